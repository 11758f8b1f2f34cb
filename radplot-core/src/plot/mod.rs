//! Manual Radar Plotting
//!
//! This module solves the classic two-observation radar plot and the
//! avoidance maneuver built on top of it. It is platform-independent and
//! keeps no state between calls: every change of input means a fresh solve.
//!
//! # Architecture
//!
//! - **types**: Observations, own ship, solver results
//! - **cpa**: Closest point of approach along a straight track
//! - **solver**: Relative motion, true motion and CPA/TCPA from two observations
//! - **aspect**: Aspect angle and navigation-light sector of the contact
//! - **avoidance**: Maneuver point and new CPA for a proposed course/speed
//!
//! # Usage
//!
//! ```rust
//! use radplot_core::plot::{solve, solve_avoidance, AvoidanceInput, Observation, OwnShip};
//!
//! let obs1: Observation = "45,8,12:00".parse().unwrap();
//! let obs2: Observation = "50,6,12:12".parse().unwrap();
//! let own = OwnShip::new(0.0, 12.0);
//!
//! let solution = solve(&obs1, &obs2, &own).unwrap();
//! println!("CPA {:.2} NM in {:.1} min", solution.solve().cpa.distance, solution.solve().cpa.tcpa_minutes);
//!
//! let maneuver = AvoidanceInput { new_course: 90.0, new_speed: 12.0, min_distance: 4.0 };
//! if let Ok(avoidance) = solve_avoidance(solution.solve(), &maneuver) {
//!     let solution = solution.with_avoidance(avoidance);
//!     assert!(solution.avoidance().is_some());
//! }
//! ```

mod aspect;
mod avoidance;
mod cpa;
mod solver;
mod types;

pub use aspect::{aspect, Aspect, AspectSector, Side};
pub use avoidance::solve_avoidance;
pub use cpa::{
    closest_approach, closest_approach_ahead, closest_point_of_approach, tcpa_from_observation,
    ClosestApproach,
};
pub use solver::{observation_interval, relative_motion, solve, true_motion};
pub use types::{
    AvoidanceInput, AvoidanceResult, ClockTime, CpaResult, DangerLevel, DangerThresholds,
    Observation, OwnShip, RelativeVector, Solution, SolveResult, TrueMotion,
};
