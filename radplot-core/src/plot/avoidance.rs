//! Avoidance Maneuver Solver
//!
//! Given a solved plot and a proposed new own course/speed, finds where on
//! the current relative track the contact closes to the chosen maneuver
//! range, and what the relative track and CPA become once own ship turns
//! there.

use nalgebra::Vector2;

use super::cpa::closest_approach_ahead;
use super::types::{AvoidanceInput, AvoidanceResult, CpaResult, RelativeVector, SolveResult};
use crate::error::PlotError;
use crate::geometry::{polar_to_cartesian, PlanarPoint};

/// Slack allowed on a root just behind the second observation
const ROOT_EPSILON: f64 = 1e-9;

/// Track parameter at which the relative track first reaches `min_distance`
///
/// Solves `|pos2 + s·d|² = min_distance²`. Returns the chosen `s` (in
/// observation intervals from `pos2`, never negative) and whether the track
/// reaches that range at all. A contact already inside the range at `pos2`
/// gives `s = 0`: maneuver now.
fn maneuver_parameter(pos2: PlanarPoint, d: PlanarPoint, min_distance: f64) -> (f64, bool) {
    let p: Vector2<f64> = pos2.into();
    let v: Vector2<f64> = d.into();

    let a = v.norm_squared();
    let b = 2.0 * p.dot(&v);
    let c = p.norm_squared() - min_distance * min_distance;
    if c < 0.0 {
        return (0.0, true);
    }

    let disc = b * b - 4.0 * a * c;

    if disc < 0.0 {
        return (0.0, false);
    }

    let sqrt_disc = disc.sqrt();
    let s1 = (-b - sqrt_disc) / (2.0 * a);
    let s2 = (-b + sqrt_disc) / (2.0 * a);

    // Earliest crossing that is not in the past
    let s = if s1 >= -ROOT_EPSILON {
        s1
    } else if s2 >= -ROOT_EPSILON {
        s2
    } else {
        0.0
    };

    (s.max(0.0), true)
}

/// Solve an avoidance maneuver against a solved plot
///
/// `min_distance` is used as given; callers keep it within the second
/// observation's range. Fails with [`PlotError::ZeroRelativeMotion`] when the
/// contact has no relative motion, since it then never closes at all.
pub fn solve_avoidance(
    solve: &SolveResult,
    input: &AvoidanceInput,
) -> Result<AvoidanceResult, PlotError> {
    let d = solve.relative.displacement();
    if d.x * d.x + d.y * d.y == 0.0 {
        return Err(PlotError::ZeroRelativeMotion);
    }

    let (s, maneuver_needed) = maneuver_parameter(solve.pos2, d, input.min_distance);
    let maneuver_point = solve.pos2 + d * s;
    let time_to_maneuver_hours = s * solve.delta_hours;

    let target_velocity = solve.true_motion.velocity();
    let new_own_velocity = polar_to_cartesian(input.new_course, input.new_speed);
    let new_relative_velocity = target_velocity - new_own_velocity;
    let new_polar = new_relative_velocity.to_polar();
    let per_interval = new_relative_velocity * solve.delta_hours;

    let relative = RelativeVector {
        course: new_polar.bearing,
        speed: new_polar.distance,
        dx: per_interval.x,
        dy: per_interval.y,
    };

    // Velocity is in knots, so the track parameter here is in hours
    let approach = closest_approach_ahead(maneuver_point, new_relative_velocity);
    let total_tcpa_hours = time_to_maneuver_hours + approach.t;

    let remaining = (1.0 - time_to_maneuver_hours).max(0.0);

    Ok(AvoidanceResult {
        maneuver_needed,
        maneuver_point,
        time_to_maneuver_hours,
        relative,
        cpa: CpaResult {
            distance: approach.distance,
            point: approach.point,
            bearing: approach.point.to_polar().bearing,
            tcpa_minutes: total_tcpa_hours * 60.0,
        },
        prediction: maneuver_point + new_relative_velocity * remaining,
        input: *input,
    })
}
