//! # Radplot CLI
//!
//! Command-line front end for [`radplot_core`].
//!
//! ```text
//! radplot [-v|-q]... <COMMAND>
//!   solve   one-off solve from two observations given as arguments
//!   plot    solve a contact from the saved plotting sheet
//!   replay  sample the encounter timeline of a contact
//!   init    write the default plotting sheet
//! ```
//!
//! The plotting sheet is a JSON file, by default
//! `~/.local/share/radplot/plots/current.json` (see [`storage::PlotStore`]).
//!
//! ## Example
//!
//! ```rust,no_run
//! use clap::Parser;
//! use radplot_cli::Cli;
//!
//! let args = Cli::parse_from([
//!     "radplot", "solve",
//!     "--obs1", "45,8,12:00", "--obs2", "50,6,12:12",
//!     "--course", "0", "--speed", "12",
//! ]);
//! radplot_cli::run(args).unwrap();
//! ```

use clap::{Args, Parser, Subcommand};
use log::{debug, info, warn};
use radplot_core::geometry::{display_to_true, normalize_bearing};
use radplot_core::state::{Action, PlotState};
use radplot_core::{
    solve, solve_avoidance, AvoidanceInput, DangerThresholds, FrameMode, Observation, OwnShip,
    PlotError, ReplayScene, Solution,
};
use std::path::PathBuf;
use std::str::FromStr;

pub mod config;
pub mod error;
pub mod report;
pub mod storage;

pub use error::CliError;

use report::{render_replay, render_solution, ReplayReport, SolutionReport};
use storage::PlotStore;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Clone, Debug)]
#[command(name = "radplot", version, about = "Manual radar plotting: CPA/TCPA, true motion and avoidance")]
pub struct Cli {
    #[clap(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Solve a contact from two observations
    Solve(SolveArgs),
    /// Solve a contact from the saved plotting sheet
    Plot(PlotArgs),
    /// Sample the encounter timeline of a contact
    Replay(ReplayArgs),
    /// Write the default plotting sheet
    Init(InitArgs),
}

/// Proposed avoidance maneuver, `COURSE,SPEED`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvoidArg {
    pub course: f64,
    pub speed: f64,
}

impl FromStr for AvoidArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (course, speed) = s
            .split_once(',')
            .ok_or_else(|| format!("{:?}: expected COURSE,SPEED", s))?;
        let course: f64 = course
            .trim()
            .parse()
            .map_err(|_| format!("bad course {:?}", course))?;
        let speed: f64 = speed
            .trim()
            .parse()
            .map_err(|_| format!("bad speed {:?}", speed))?;
        if speed < 0.0 {
            return Err(format!("negative speed {}", speed));
        }
        Ok(AvoidArg { course, speed })
    }
}

#[derive(Args, Clone, Debug)]
pub struct SolveArgs {
    /// First observation, `BEARING,RANGE,HH:MM`
    #[arg(long, allow_hyphen_values = true)]
    pub obs1: Observation,

    /// Second observation, `BEARING,RANGE,HH:MM`
    #[arg(long, allow_hyphen_values = true)]
    pub obs2: Observation,

    /// Own course in degrees true
    #[arg(long, allow_negative_numbers = true)]
    pub course: f64,

    /// Own speed in knots
    #[arg(long)]
    pub speed: f64,

    /// Frame the observation bearings are read in
    #[arg(long, default_value = "true-up")]
    pub frame: FrameMode,

    /// Avoidance maneuver, `COURSE,SPEED`
    #[arg(long)]
    pub avoid: Option<AvoidArg>,

    /// Range at which to execute the avoidance maneuver (NM)
    #[arg(long, default_value_t = 3.0)]
    pub min_distance: f64,

    /// Write the result as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Clone, Debug)]
pub struct PlotArgs {
    /// Plot state file (default: the saved plotting sheet)
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Contact number, starting at 1 (default: the selected contact)
    #[arg(long)]
    pub target: Option<usize>,

    /// Write the result as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Clone, Debug)]
pub struct ReplayArgs {
    /// Plot state file (default: the saved plotting sheet)
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Contact number, starting at 1 (default: the selected contact)
    #[arg(long)]
    pub target: Option<usize>,

    /// Number of intervals to sample the replay window in
    #[arg(long, default_value_t = 12)]
    pub steps: usize,

    /// Write the result as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Clone, Debug)]
pub struct InitArgs {
    /// Plot state file (default: the saved plotting sheet)
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

pub fn run(cli: Cli) -> Result<(), CliError> {
    debug!("radplot {}", VERSION);
    match cli.command {
        Commands::Solve(args) => solve_command(&args),
        Commands::Plot(args) => plot_command(&args),
        Commands::Replay(args) => replay_command(&args),
        Commands::Init(args) => init_command(&args),
    }
}

/// Observation with its bearing read in `frame` turned into a true bearing
fn observation_to_true(obs: Observation, own_course: f64, frame: FrameMode) -> Observation {
    Observation {
        bearing: normalize_bearing(display_to_true(obs.bearing, own_course, frame)),
        ..obs
    }
}

/// Attach an avoidance result, keeping the plain solution when none applies
fn with_avoidance(solution: Solution, input: &AvoidanceInput) -> Result<Solution, CliError> {
    match solve_avoidance(solution.solve(), input) {
        Ok(avoidance) => {
            if !avoidance.maneuver_needed {
                info!(
                    "Contact never closes to {:.2} NM, no maneuver needed",
                    input.min_distance
                );
            }
            Ok(solution.with_avoidance(avoidance))
        }
        Err(PlotError::ZeroRelativeMotion) => {
            warn!("Contact has no relative motion, avoidance maneuver not applicable");
            Ok(solution)
        }
        Err(e) => Err(e.into()),
    }
}

fn log_geometry(solution: &Solution) {
    let solve = solution.solve();
    if solution.aspect().is_none() {
        debug!("Contact is stopped, no aspect");
    }
    if solve.relative.speed == 0.0 {
        debug!("No relative motion, CPA is the first observation");
    }
    if solve.cpa.tcpa_minutes < 0.0 {
        debug!("CPA passed {:.1} min ago", -solve.cpa.tcpa_minutes);
    }
}

fn print_solution(solution: &Solution, frame: FrameMode, json: bool) -> Result<(), CliError> {
    let thresholds = DangerThresholds::default();
    if json {
        let report = SolutionReport::new(solution, &thresholds);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_solution(solution, frame, &thresholds));
    }
    Ok(())
}

fn solve_command(args: &SolveArgs) -> Result<(), CliError> {
    let own_ship = OwnShip::new(normalize_bearing(args.course), args.speed.max(0.0));
    let obs1 = observation_to_true(args.obs1, own_ship.course, args.frame);
    let obs2 = observation_to_true(args.obs2, own_ship.course, args.frame);
    debug!(
        "Solving {:?} -> {:?} with own ship {:?}",
        obs1, obs2, own_ship
    );

    let mut solution = solve(&obs1, &obs2, &own_ship)?;
    log_geometry(&solution);

    if let Some(avoid) = args.avoid {
        let input = AvoidanceInput {
            new_course: normalize_bearing(avoid.course),
            new_speed: avoid.speed,
            min_distance: args.min_distance.max(0.0).min(obs2.range),
        };
        debug!("Avoidance {:?}", input);
        solution = with_avoidance(solution, &input)?;
    }

    print_solution(&solution, args.frame, args.json)
}

/// Load the plotting sheet and select the requested contact
fn load_plot(state: &Option<PathBuf>, target: Option<usize>) -> Result<PlotState, CliError> {
    let store = PlotStore::new(state.clone())?;
    let mut plot = store.load_or_default()?;

    if let Some(number) = target {
        let count = plot.targets.len();
        if number == 0 || number > count {
            return Err(CliError::NoSuchTarget {
                index: number,
                count,
            });
        }
        plot = plot.apply(Action::SelectTarget(number - 1));
    }
    debug!(
        "Contact {} of {}, avoidance {}",
        plot.current_target + 1,
        plot.targets.len(),
        if plot.avoidance.active { "active" } else { "off" }
    );
    Ok(plot)
}

fn plot_command(args: &PlotArgs) -> Result<(), CliError> {
    let plot = load_plot(&args.state, args.target)?;
    if let Some(target) = plot.target().filter(|_| plot.avoidance.active) {
        if plot.avoidance.distance > target.range2 {
            debug!(
                "Avoidance distance {:.2} NM held to current range {:.2} NM",
                plot.avoidance.distance, target.range2
            );
        }
    }

    let solution = plot.evaluate()?;
    log_geometry(&solution);
    if plot.avoidance.active && solution.avoidance().is_none() {
        warn!("Contact has no relative motion, avoidance maneuver not applicable");
    }
    print_solution(&solution, plot.frame_mode, args.json)
}

fn replay_command(args: &ReplayArgs) -> Result<(), CliError> {
    let plot = load_plot(&args.state, args.target)?;
    let solution = plot.evaluate()?;

    let Some(scene) = ReplayScene::new(&solution) else {
        warn!(
            "CPA passed {:.1} min ago, nothing to replay",
            -solution.solve().cpa.tcpa_minutes
        );
        return Ok(());
    };

    let report = ReplayReport::new(&scene, args.steps);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_replay(&report, plot.frame_mode));
    }
    Ok(())
}

fn init_command(args: &InitArgs) -> Result<(), CliError> {
    let store = PlotStore::new(args.state.clone())?;
    if store.exists() && args.force {
        info!("Replacing plot state {}", store.path().display());
    }
    store.save(&PlotState::default(), args.force)?;
    println!("{}", store.path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_solve() {
        let cli = Cli::try_parse_from([
            "radplot",
            "solve",
            "--obs1",
            "45,8,12:00",
            "--obs2",
            "50, 6, 12:12",
            "--course",
            "0",
            "--speed",
            "12",
            "--avoid",
            "90,12",
            "--frame",
            "head-up",
        ])
        .unwrap();

        let Commands::Solve(args) = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(args.obs1.bearing, 45.0);
        assert_eq!(args.obs2.range, 6.0);
        assert_eq!(args.obs2.time.minutes(), 732);
        assert_eq!(args.frame, FrameMode::HeadingUp);
        assert_eq!(
            args.avoid,
            Some(AvoidArg {
                course: 90.0,
                speed: 12.0
            })
        );
        assert_eq!(args.min_distance, 3.0);
        assert!(!args.json);
    }

    #[test]
    fn test_parse_rejects_bad_observation() {
        for bad in ["45,8", "45,8,1200", "x,8,12:00", "45,-1,12:00", "45,8,25:00"] {
            let result = Cli::try_parse_from([
                "radplot", "solve", "--obs1", bad, "--obs2", "50,6,12:12", "--course", "0",
                "--speed", "12",
            ]);
            assert!(result.is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_avoid_arg() {
        assert_eq!(
            "135, 6.5".parse::<AvoidArg>(),
            Ok(AvoidArg {
                course: 135.0,
                speed: 6.5
            })
        );
        assert!("135".parse::<AvoidArg>().is_err());
        assert!("135,fast".parse::<AvoidArg>().is_err());
        assert!("135,-2".parse::<AvoidArg>().is_err());
    }

    #[test]
    fn test_observation_to_true() {
        let obs: Observation = "20,5,10:00".parse().unwrap();
        let true_obs = observation_to_true(obs, 350.0, FrameMode::HeadingUp);
        assert!((true_obs.bearing - 10.0).abs() < 1e-9);
        assert_eq!(true_obs.range, 5.0);

        let same = observation_to_true(obs, 350.0, FrameMode::TrueUp);
        assert_eq!(same, obs);
    }

    #[test]
    fn test_with_avoidance_zero_relative_motion() {
        let own = OwnShip::new(90.0, 8.0);
        let obs1: Observation = "30,4,08:00".parse().unwrap();
        let obs2: Observation = "30,4,08:10".parse().unwrap();
        let solution = solve(&obs1, &obs2, &own).unwrap();
        let input = AvoidanceInput {
            new_course: 180.0,
            new_speed: 8.0,
            min_distance: 2.0,
        };
        let result = with_avoidance(solution.clone(), &input).unwrap();
        assert_eq!(result, solution);
    }

    #[test]
    fn test_init_then_plot() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sheet.json");

        let init = InitArgs {
            state: Some(path.clone()),
            force: false,
        };
        init_command(&init).unwrap();
        assert!(path.exists());
        assert!(matches!(
            init_command(&init),
            Err(CliError::StateExists(_))
        ));

        let plot = load_plot(&Some(path.clone()), Some(3)).unwrap();
        assert_eq!(plot.current_target, 2);
        assert!(plot.evaluate().is_ok());

        assert!(matches!(
            load_plot(&Some(path.clone()), Some(6)),
            Err(CliError::NoSuchTarget { index: 6, count: 5 })
        ));
        assert!(matches!(
            load_plot(&Some(path), Some(0)),
            Err(CliError::NoSuchTarget { .. })
        ));
    }

    #[test]
    fn test_parse_replay_defaults() {
        let cli = Cli::try_parse_from(["radplot", "-v", "replay", "--target", "2"]).unwrap();
        let Commands::Replay(args) = cli.command else {
            panic!("expected replay");
        };
        assert_eq!(args.steps, 12);
        assert_eq!(args.target, Some(2));
        assert!(args.state.is_none());
        assert_eq!(cli.verbose.log_level_filter(), log::LevelFilter::Debug);
    }
}
