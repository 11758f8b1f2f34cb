//! # Radplot Core
//!
//! Platform-independent manual radar plotting engine.
//!
//! This crate contains the pure plotting math with **zero I/O dependencies**:
//! two observations of a contact plus own course and speed go in, relative
//! motion, CPA/TCPA, true motion, aspect and an optional avoidance maneuver
//! come out. Every result is a value; nothing is logged, stored or cached.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  radplot-core (pure, synchronous, no I/O)                  │
//! │  ├── geometry/  (plane, polar conversion, display frames)  │
//! │  ├── plot/      (solver, CPA, aspect, avoidance)           │
//! │  ├── timeline/  (replay positions, window, events)         │
//! │  └── state      (plotting sheet and its transitions)       │
//! └─────────────────────────────────────────────────────────────┘
//!                             ▲
//!               ┌─────────────┴─────────────┐
//!               │  radplot-cli              │
//!               │  (args, state file, logs) │
//!               └───────────────────────────┘
//! ```
//!
//! ## Conventions
//!
//! Own ship sits at the origin of a flat plane at the second observation,
//! `+x` east and `+y` north, distances in nautical miles. Bearings and
//! courses are degrees clockwise from north in `[0, 360)`, speeds in knots.
//!
//! ## Example: Solving a Plot
//!
//! ```rust
//! use radplot_core::{solve, DangerThresholds, Observation, OwnShip};
//!
//! let obs1: Observation = "0,10,12:00".parse().unwrap();
//! let obs2: Observation = "0,8,12:06".parse().unwrap();
//! let own = OwnShip::new(0.0, 10.0);
//!
//! let solution = solve(&obs1, &obs2, &own).unwrap();
//! let result = solution.solve();
//! assert!(result.cpa.distance < 1e-6);
//! assert!((result.cpa.tcpa_minutes - 24.0).abs() < 1e-6);
//! println!("{}", result.danger(&DangerThresholds::default()));
//! ```
//!
//! ## Example: Editing the Plotting Sheet
//!
//! ```rust
//! use radplot_core::state::{Action, PlotState};
//! use radplot_core::ReplayScene;
//!
//! let state = PlotState::default()
//!     .apply(Action::SelectTarget(1))
//!     .apply(Action::SetAvoidance { course: 60.0, speed: 12.0 });
//!
//! if let Ok(solution) = state.evaluate() {
//!     if let Some(scene) = ReplayScene::new(&solution) {
//!         let frame = scene.frame(scene.time_at(0.5));
//!         println!("range {:.2} NM", frame.range.distance);
//!     }
//! }
//! ```

pub mod error;
pub mod geometry;
pub mod plot;
pub mod state;
pub mod timeline;

// Re-export commonly used types
pub use error::PlotError;
pub use geometry::{FrameMode, PlanarPoint, Polar};
pub use plot::{
    solve, solve_avoidance, Aspect, AvoidanceInput, AvoidanceResult, ClockTime, CpaResult,
    DangerLevel, DangerThresholds, Observation, OwnShip, RelativeVector, Solution, SolveResult,
    TrueMotion,
};
pub use state::{Action, PlotState};
pub use timeline::{ReplayEvent, ReplayFrame, ReplayScene};
