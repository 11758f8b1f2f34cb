//! Trajectory Timeline
//!
//! Pure functions of simulated time for replaying an encounter. Time `t` is
//! in hours from the second observation; own ship starts at the origin, the
//! contact at `pos2`. A replay driver samples these as often as it likes.

mod replay;

pub use replay::{AvoidancePath, AvoidingFrame, ReplayEvent, ReplayEventKind, ReplayFrame, ReplayScene};

use serde::{Deserialize, Serialize};

use crate::geometry::{normalize_bearing, PlanarPoint, Polar};

/// Replay keeps running this fraction of the latest CPA time past that CPA
pub const POST_CPA_FRACTION: f64 = 0.25;
/// Viewport margin, as a fraction of the larger extent of the trajectories
pub const BBOX_PADDING: f64 = 0.15;

/// Time span of a replay, in hours
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineWindow {
    pub t_start: f64,
    pub t_cpa: f64,
    pub t_end: f64,
}

/// Axis-aligned box on the plotting sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, p: PlanarPoint) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Own ship position, starting from the origin
#[inline]
pub fn own_position(own_velocity: PlanarPoint, t: f64) -> PlanarPoint {
    own_velocity * t
}

/// Contact position, starting from `pos2`
#[inline]
pub fn target_position(pos2: PlanarPoint, target_velocity: PlanarPoint, t: f64) -> PlanarPoint {
    pos2 + target_velocity * t
}

/// Own ship position when it changes to `avoid_velocity` at `t_maneuver`
pub fn avoidance_own_position(
    own_velocity: PlanarPoint,
    avoid_velocity: PlanarPoint,
    t_maneuver: f64,
    t: f64,
) -> PlanarPoint {
    if t <= t_maneuver {
        return own_position(own_velocity, t);
    }
    own_position(own_velocity, t_maneuver) + avoid_velocity * (t - t_maneuver)
}

/// Replay window ending a quarter past the latest CPA
pub fn timeline_window(tcpa_minutes: f64, tcpa_avoid_minutes: Option<f64>) -> TimelineWindow {
    let t_cpa = tcpa_minutes / 60.0;
    let last_cpa = match tcpa_avoid_minutes {
        Some(avoid) => t_cpa.max(avoid / 60.0),
        None => t_cpa,
    };
    TimelineWindow {
        t_start: 0.0,
        t_cpa,
        t_end: last_cpa * (1.0 + POST_CPA_FRACTION),
    }
}

/// Interpolate between two headings along the shorter arc
///
/// `t = 1` returns `to_deg` exactly (normalized).
pub fn lerp_angle(from_deg: f64, to_deg: f64, t: f64) -> f64 {
    if t == 1.0 {
        return normalize_bearing(to_deg);
    }
    let mut diff = normalize_bearing(to_deg - from_deg);
    if diff > 180.0 {
        diff -= 360.0;
    }
    normalize_bearing(from_deg + diff * t)
}

/// Bearing and distance from `from` to `to`
pub fn bearing_and_distance(from: PlanarPoint, to: PlanarPoint) -> Polar {
    (to - from).to_polar()
}

/// Padded box around all points, or `None` for no points
///
/// A degenerate extent (all points on one line) counts as 1 NM for padding.
pub fn bounding_box(points: &[PlanarPoint]) -> Option<BoundingBox> {
    let first = points.first()?;
    let mut bbox = BoundingBox {
        min_x: first.x,
        min_y: first.y,
        max_x: first.x,
        max_y: first.y,
    };
    for p in &points[1..] {
        bbox.min_x = bbox.min_x.min(p.x);
        bbox.min_y = bbox.min_y.min(p.y);
        bbox.max_x = bbox.max_x.max(p.x);
        bbox.max_y = bbox.max_y.max(p.y);
    }

    let dx = match bbox.width() {
        w if w == 0.0 => 1.0,
        w => w,
    };
    let dy = match bbox.height() {
        h if h == 0.0 => 1.0,
        h => h,
    };
    let pad = dx.max(dy) * BBOX_PADDING;

    Some(BoundingBox {
        min_x: bbox.min_x - pad,
        min_y: bbox.min_y - pad,
        max_x: bbox.max_x + pad,
        max_y: bbox.max_y + pad,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_own_and_target_positions() {
        let own = own_position(PlanarPoint::new(0.0, 12.0), 0.5);
        assert_eq!(own, PlanarPoint::new(0.0, 6.0));

        let target = target_position(PlanarPoint::new(4.0, 4.0), PlanarPoint::new(-2.0, 0.0), 1.5);
        assert_eq!(target, PlanarPoint::new(1.0, 4.0));
        assert_eq!(
            target_position(PlanarPoint::new(4.0, 4.0), PlanarPoint::new(-2.0, 0.0), 0.0),
            PlanarPoint::new(4.0, 4.0)
        );
    }

    #[test]
    fn test_avoidance_path_is_continuous() {
        let own_velocity = PlanarPoint::new(0.0, 10.0);
        let avoid_velocity = PlanarPoint::new(7.0, -3.0);
        for t_maneuver in [0.0, 0.1, 0.37, 2.0] {
            let before = avoidance_own_position(own_velocity, avoid_velocity, t_maneuver, t_maneuver - 1e-9);
            let at = avoidance_own_position(own_velocity, avoid_velocity, t_maneuver, t_maneuver);
            let after = avoidance_own_position(own_velocity, avoid_velocity, t_maneuver, t_maneuver + 1e-9);
            assert!((before - at).magnitude() < 1e-6);
            assert!((after - at).magnitude() < 1e-6);
        }
    }

    #[test]
    fn test_avoidance_path_changes_direction() {
        let own_velocity = PlanarPoint::new(0.0, 10.0);
        let avoid_velocity = PlanarPoint::new(10.0, 0.0);
        let p = avoidance_own_position(own_velocity, avoid_velocity, 0.2, 0.1);
        assert!((p.y - 1.0).abs() < EPSILON);
        let p = avoidance_own_position(own_velocity, avoid_velocity, 0.2, 0.5);
        assert!((p.x - 3.0).abs() < EPSILON);
        assert!((p.y - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_timeline_window() {
        let w = timeline_window(30.0, None);
        assert_eq!(w.t_start, 0.0);
        assert!((w.t_cpa - 0.5).abs() < EPSILON);
        assert!((w.t_end - 0.625).abs() < EPSILON);

        let w = timeline_window(30.0, Some(48.0));
        assert!((w.t_cpa - 0.5).abs() < EPSILON);
        assert!((w.t_end - 48.0 / 60.0 * 1.25).abs() < EPSILON);

        // An earlier avoidance CPA does not shorten the replay
        let w = timeline_window(30.0, Some(12.0));
        assert!((w.t_end - 0.625).abs() < EPSILON);
    }

    #[test]
    fn test_lerp_angle() {
        assert!(lerp_angle(350.0, 10.0, 0.5).abs() < EPSILON);
        assert_eq!(lerp_angle(10.0, 50.0, 0.0), 10.0);
        assert_eq!(lerp_angle(10.0, 50.0, 1.0), 50.0);
        assert!((lerp_angle(10.0, 350.0, 0.5) - 0.0).abs() < EPSILON);
        assert!((lerp_angle(90.0, 270.0, 0.5) - 180.0).abs() < EPSILON);
        assert!((lerp_angle(0.0, 90.0, 0.25) - 22.5).abs() < EPSILON);
        assert_eq!(lerp_angle(350.0, 10.0, 1.0), 10.0);
    }

    #[test]
    fn test_lerp_angle_fractional_ends() {
        assert_eq!(lerp_angle(359.7, 0.3, 1.0), 0.3);
        assert_eq!(lerp_angle(12.25, 370.5, 1.0), 10.5);

        let mut from = 0.1;
        while from < 360.0 {
            let to = normalize_bearing(from * 7.3 + 0.3);
            assert_eq!(lerp_angle(from, to, 1.0), to);
            assert!((lerp_angle(from, to, 0.0) - from).abs() < EPSILON);
            from += 0.7;
        }
    }

    #[test]
    fn test_bearing_and_distance() {
        let bd = bearing_and_distance(PlanarPoint::new(1.0, 1.0), PlanarPoint::new(4.0, 5.0));
        assert!((bd.distance - 5.0).abs() < EPSILON);
        assert!((bd.bearing - 36.86989764584402).abs() < 1e-9);

        let bd = bearing_and_distance(PlanarPoint::new(0.0, 2.0), PlanarPoint::ORIGIN);
        assert!((bd.bearing - 180.0).abs() < EPSILON);
    }

    #[test]
    fn test_bounding_box_padding() {
        let bbox = bounding_box(&[
            PlanarPoint::new(0.0, 0.0),
            PlanarPoint::new(10.0, 4.0),
            PlanarPoint::new(2.0, -2.0),
        ])
        .unwrap();
        // Larger extent is 10 NM in x: pad 1.5 NM on every side
        assert!((bbox.min_x + 1.5).abs() < EPSILON);
        assert!((bbox.max_x - 11.5).abs() < EPSILON);
        assert!((bbox.min_y + 3.5).abs() < EPSILON);
        assert!((bbox.max_y - 5.5).abs() < EPSILON);
    }

    #[test]
    fn test_bounding_box_degenerate() {
        let p = PlanarPoint::new(3.0, 3.0);
        let bbox = bounding_box(&[p, p]).unwrap();
        assert!((bbox.width() - 0.3).abs() < EPSILON);
        assert!((bbox.height() - 0.3).abs() < EPSILON);
        assert!(bbox.contains(p));

        assert!(bounding_box(&[]).is_none());
    }
}
