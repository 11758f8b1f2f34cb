//! Replay Scene
//!
//! Everything a replay driver needs to animate one solved encounter, built
//! once per solve. Sampling a frame is a pure function of simulated time;
//! the driver owns the clock and the drawing.

use serde::{Deserialize, Serialize};

use super::{
    avoidance_own_position, bearing_and_distance, bounding_box, lerp_angle, own_position,
    target_position, timeline_window, BoundingBox, TimelineWindow,
};
use crate::geometry::{polar_to_cartesian, PlanarPoint, Polar};
use crate::plot::Solution;

/// Share of the replay window over which a displayed heading swings to the
/// avoidance course
pub const HEADING_TRANSITION_FRACTION: f64 = 0.03;

/// Own ship's alternative track when it maneuvers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvoidancePath {
    pub velocity: PlanarPoint,
    pub course: f64,
    pub speed: f64,
    /// Hours from the second observation until the maneuver
    pub t_maneuver: f64,
    /// Hours from the second observation until the new CPA
    pub t_cpa: f64,
    pub cpa_distance: f64,
}

/// A solved encounter, ready to be replayed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayScene {
    pub own_velocity: PlanarPoint,
    pub own_course: f64,
    pub own_speed: f64,
    pub target_velocity: PlanarPoint,
    pub target_course: f64,
    /// Contact position at the second observation (`t = 0`)
    pub pos2: PlanarPoint,
    pub window: TimelineWindow,
    pub cpa_distance: f64,
    pub avoidance: Option<AvoidancePath>,
    /// Viewport enclosing every track over the whole window
    pub bounds: BoundingBox,
}

/// Avoiding own ship at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvoidingFrame {
    pub position: PlanarPoint,
    /// Course actually steered
    pub heading: f64,
    /// Heading to show, swinging smoothly onto the new course after the maneuver
    pub display_heading: f64,
    /// Bearing and range to the contact, only once the maneuver has happened
    pub range: Option<Polar>,
}

/// Both vessels at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayFrame {
    /// Hours from the second observation
    pub t: f64,
    pub own: PlanarPoint,
    pub own_heading: f64,
    pub target: PlanarPoint,
    pub target_heading: f64,
    /// Bearing and range from own ship to the contact
    pub range: Polar,
    pub avoiding: Option<AvoidingFrame>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReplayEventKind {
    /// CPA on the present courses
    Cpa,
    /// Own ship executes the avoidance maneuver
    Maneuver,
    /// CPA after the maneuver
    AvoidanceCpa,
}

/// A moment worth highlighting during replay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayEvent {
    pub kind: ReplayEventKind,
    pub t: f64,
    pub own: PlanarPoint,
    pub target: PlanarPoint,
    /// Distance between the two vessels at `t`
    pub separation: f64,
}

impl ReplayScene {
    /// Build a scene from a solution
    ///
    /// Returns `None` when the CPA is not ahead of the second observation,
    /// since there is then nothing left to replay.
    pub fn new(solution: &Solution) -> Option<ReplayScene> {
        let solve = solution.solve();
        if solve.cpa.tcpa_minutes <= 0.0 {
            return None;
        }

        let own_velocity = solve.own_ship.velocity();
        let target_velocity = solve.true_motion.velocity();

        let avoidance = solution
            .avoidance()
            .filter(|a| a.maneuver_needed)
            .map(|a| AvoidancePath {
                velocity: polar_to_cartesian(a.input.new_course, a.input.new_speed),
                course: a.input.new_course,
                speed: a.input.new_speed,
                t_maneuver: a.time_to_maneuver_hours,
                t_cpa: a.cpa.tcpa_minutes / 60.0,
                cpa_distance: a.cpa.distance,
            });

        let window = timeline_window(
            solve.cpa.tcpa_minutes,
            avoidance.map(|a| a.t_cpa * 60.0),
        );

        let mut points = vec![
            own_position(own_velocity, window.t_start),
            own_position(own_velocity, window.t_end),
            target_position(solve.pos2, target_velocity, window.t_start),
            target_position(solve.pos2, target_velocity, window.t_end),
        ];
        if let Some(path) = &avoidance {
            points.push(avoidance_own_position(
                own_velocity,
                path.velocity,
                path.t_maneuver,
                window.t_end,
            ));
        }
        let bounds = bounding_box(&points)?;

        Some(ReplayScene {
            own_velocity,
            own_course: solve.own_ship.course,
            own_speed: solve.own_ship.speed,
            target_velocity,
            target_course: solve.true_motion.course,
            pos2: solve.pos2,
            window,
            cpa_distance: solve.cpa.distance,
            avoidance,
            bounds,
        })
    }

    /// Simulated time for a seek position in `[0, 1]`
    pub fn time_at(&self, fraction: f64) -> f64 {
        let fraction = fraction.clamp(0.0, 1.0);
        self.window.t_start + fraction * (self.window.t_end - self.window.t_start)
    }

    /// Both vessels at simulated time `t`
    pub fn frame(&self, t: f64) -> ReplayFrame {
        let own = own_position(self.own_velocity, t);
        let target = target_position(self.pos2, self.target_velocity, t);

        let avoiding = self.avoidance.map(|path| {
            let position = avoidance_own_position(self.own_velocity, path.velocity, path.t_maneuver, t);
            let maneuvered = t > path.t_maneuver;
            let heading = if maneuvered { path.course } else { self.own_course };

            let duration = self.window.t_end * HEADING_TRANSITION_FRACTION;
            let elapsed = t - path.t_maneuver;
            let display_heading = if elapsed > 0.0 && elapsed < duration {
                lerp_angle(self.own_course, path.course, elapsed / duration)
            } else {
                heading
            };

            AvoidingFrame {
                position,
                heading,
                display_heading,
                range: maneuvered.then(|| bearing_and_distance(position, target)),
            }
        });

        ReplayFrame {
            t,
            own,
            own_heading: self.own_course,
            target,
            target_heading: self.target_course,
            range: bearing_and_distance(own, target),
            avoiding,
        }
    }

    /// CPA and maneuver moments, in time order
    pub fn events(&self) -> Vec<ReplayEvent> {
        let mut events = vec![self.event_at(ReplayEventKind::Cpa, self.window.t_cpa)];

        if let Some(path) = &self.avoidance {
            events.push(self.event_at(ReplayEventKind::Maneuver, path.t_maneuver));
            events.push(self.event_at(ReplayEventKind::AvoidanceCpa, path.t_cpa));
        }

        events.sort_by(|a, b| a.t.total_cmp(&b.t));
        events
    }

    fn event_at(&self, kind: ReplayEventKind, t: f64) -> ReplayEvent {
        let own = match (kind, &self.avoidance) {
            (ReplayEventKind::Cpa, _) | (_, None) => own_position(self.own_velocity, t),
            (_, Some(path)) => {
                avoidance_own_position(self.own_velocity, path.velocity, path.t_maneuver, t)
            }
        };
        let target = target_position(self.pos2, self.target_velocity, t);
        ReplayEvent {
            kind,
            t,
            own,
            target,
            separation: (target - own).magnitude(),
        }
    }
}
