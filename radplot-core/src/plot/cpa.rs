//! CPA/TCPA Calculation
//!
//! Computes the Closest Point of Approach along a straight relative track.
//! Own ship sits at the origin; the contact moves from `start` along
//! `direction`, one unit of `t` per `direction` step.

use nalgebra::Vector2;

use crate::geometry::PlanarPoint;

/// Closest point of a straight track to the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestApproach {
    /// Distance from the origin at the closest point
    pub distance: f64,
    /// The closest point itself
    pub point: PlanarPoint,
    /// Track parameter of the closest point, in `direction` steps from `start`
    /// Unconstrained: negative means the closest point lies behind `start`
    pub t: f64,
}

/// Closest approach of the track `start + t * direction` to the origin
///
/// Uses the dot product method: `t = -(start · direction) / |direction|²`.
/// A zero `direction` is a stationary track; the answer is `start` at `t = 0`.
pub fn closest_approach(start: PlanarPoint, direction: PlanarPoint) -> ClosestApproach {
    let r: Vector2<f64> = start.into();
    let v: Vector2<f64> = direction.into();

    let v_sq = v.norm_squared();
    if v_sq == 0.0 {
        return ClosestApproach {
            distance: r.norm(),
            point: start,
            t: 0.0,
        };
    }

    let t = -r.dot(&v) / v_sq;
    let point = r + v * t;

    ClosestApproach {
        distance: point.norm(),
        point: point.into(),
        t,
    }
}

/// Closest approach of the relative track through `pos1` with displacement
/// `(dx, dy)` per observation interval
///
/// `t = 0` is the first observation and `t = 1` the second.
pub fn closest_point_of_approach(pos1: PlanarPoint, dx: f64, dy: f64) -> ClosestApproach {
    closest_approach(pos1, PlanarPoint::new(dx, dy))
}

/// Like [`closest_approach`], but a closest point already behind `start` is
/// replaced by `start` itself
///
/// Used after a maneuver: the track only exists from the maneuver onwards.
pub fn closest_approach_ahead(start: PlanarPoint, direction: PlanarPoint) -> ClosestApproach {
    let approach = closest_approach(start, direction);
    if approach.t >= 0.0 {
        return approach;
    }
    ClosestApproach {
        distance: start.magnitude(),
        point: start,
        t: 0.0,
    }
}

/// Convert a CPA track index into hours from the second observation
///
/// Positive = future, Negative = past
#[inline]
pub fn tcpa_from_observation(t: f64, delta_hours: f64) -> f64 {
    (t - 1.0) * delta_hours
}
