//! Text and JSON output for solved plots and replays.

use radplot_core::geometry::true_to_display;
use radplot_core::{
    DangerLevel, DangerThresholds, FrameMode, ReplayEvent, ReplayFrame, ReplayScene, Solution,
};
use radplot_core::timeline::ReplayEventKind;
use serde::Serialize;
use std::fmt::Write;

/// A solution with its danger assessment, as written with `--json`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SolutionReport<'a> {
    pub solution: &'a Solution,
    pub danger: DangerLevel,
    pub tcpa_critical: bool,
}

impl<'a> SolutionReport<'a> {
    pub fn new(solution: &'a Solution, thresholds: &DangerThresholds) -> Self {
        let solve = solution.solve();
        Self {
            solution,
            danger: solve.danger(thresholds),
            tcpa_critical: solve.tcpa_is_critical(thresholds),
        }
    }
}

/// Sampled replay, as written with `--json`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport<'a> {
    pub scene: &'a ReplayScene,
    pub events: Vec<ReplayEvent>,
    pub frames: Vec<ReplayFrame>,
}

impl<'a> ReplayReport<'a> {
    /// Sample `steps + 1` evenly spaced frames across the whole window
    pub fn new(scene: &'a ReplayScene, steps: usize) -> Self {
        let steps = steps.max(1);
        let frames = (0..=steps)
            .map(|i| scene.frame(scene.time_at(i as f64 / steps as f64)))
            .collect();
        Self {
            scene,
            events: scene.events(),
            frames,
        }
    }
}

fn minutes(hours: f64) -> f64 {
    hours * 60.0
}

/// Human-readable plot summary
///
/// Bearings to points are shown in the given display frame; courses are
/// always true.
pub fn render_solution(solution: &Solution, frame: FrameMode, thresholds: &DangerThresholds) -> String {
    let solve = solution.solve();
    let own_course = solve.own_ship.course;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Own ship        {:05.1}°  {:.1} kn   ({} display)",
        own_course, solve.own_ship.speed, frame
    );
    let _ = writeln!(
        out,
        "Relative motion {:05.1}°  {:.2} kn",
        solve.relative.course, solve.relative.speed
    );
    let _ = writeln!(
        out,
        "True motion     {:05.1}°  {:.2} kn",
        solve.true_motion.course, solve.true_motion.speed
    );

    let when = if solve.cpa.tcpa_minutes < 0.0 {
        format!("{:.1} min ago", -solve.cpa.tcpa_minutes)
    } else {
        format!("in {:.1} min", solve.cpa.tcpa_minutes)
    };
    let _ = writeln!(
        out,
        "CPA             {:.2} NM at {:05.1}°, {}",
        solve.cpa.distance,
        true_to_display(solve.cpa.bearing, own_course, frame),
        when
    );

    match solution.aspect() {
        Some(aspect) => {
            let _ = writeln!(out, "Aspect          {:05.1}°  {}", aspect.degrees, aspect.label);
        }
        None => {
            let _ = writeln!(out, "Aspect          -  (contact stopped)");
        }
    }

    let report = SolutionReport::new(solution, thresholds);
    let _ = writeln!(
        out,
        "Danger          {}{}",
        report.danger,
        if report.tcpa_critical { "  (TCPA critical)" } else { "" }
    );

    if let Some(avoidance) = solution.avoidance() {
        let input = &avoidance.input;
        let _ = writeln!(
            out,
            "Avoidance       {:05.1}°  {:.1} kn at {:.2} NM",
            input.new_course, input.new_speed, input.min_distance
        );
        if avoidance.maneuver_needed {
            let point = avoidance.maneuver_point.to_polar();
            let _ = writeln!(
                out,
                "  Maneuver      in {:.1} min, contact at {:05.1}° {:.2} NM",
                minutes(avoidance.time_to_maneuver_hours),
                true_to_display(point.bearing, own_course, frame),
                point.distance
            );
            let _ = writeln!(
                out,
                "  Relative      {:05.1}°  {:.2} kn",
                avoidance.relative.course, avoidance.relative.speed
            );
            let _ = writeln!(
                out,
                "  New CPA       {:.2} NM at {:05.1}°, in {:.1} min",
                avoidance.cpa.distance,
                true_to_display(avoidance.cpa.bearing, own_course, frame),
                avoidance.cpa.tcpa_minutes
            );
        } else {
            let _ = writeln!(
                out,
                "  Not needed    contact never closes to {:.2} NM",
                input.min_distance
            );
        }
    }

    out
}

fn event_name(kind: ReplayEventKind) -> &'static str {
    match kind {
        ReplayEventKind::Cpa => "CPA",
        ReplayEventKind::Maneuver => "Maneuver",
        ReplayEventKind::AvoidanceCpa => "CPA'",
    }
}

/// Human-readable replay table
pub fn render_replay(report: &ReplayReport, frame: FrameMode) -> String {
    let own_course = report.scene.own_course;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Replay {:.1} min, viewport {:.1} x {:.1} NM",
        minutes(report.scene.window.t_end - report.scene.window.t_start),
        report.scene.bounds.width(),
        report.scene.bounds.height()
    );
    for event in &report.events {
        let _ = writeln!(
            out,
            "  {:<9} at {:5.1} min, separation {:.2} NM",
            event_name(event.kind),
            minutes(event.t),
            event.separation
        );
    }

    let _ = writeln!(out, "   min    brg    rng   avoid brg  avoid rng");
    for f in &report.frames {
        let _ = write!(
            out,
            "{:6.1}  {:05.1}  {:5.2}",
            minutes(f.t),
            true_to_display(f.range.bearing, own_course, frame),
            f.range.distance
        );
        match f.avoiding.and_then(|a| a.range) {
            Some(range) => {
                let _ = writeln!(
                    out,
                    "   {:05.1}      {:5.2}",
                    true_to_display(range.bearing, own_course, frame),
                    range.distance
                );
            }
            None => {
                let _ = writeln!(out);
            }
        }
    }

    out
}
