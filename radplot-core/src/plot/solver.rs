//! Relative Motion Solver
//!
//! Turns two observations of a contact plus own course and speed into the
//! relative track, CPA/TCPA, the contact's true motion and its aspect.

use super::aspect::aspect;
use super::cpa::{closest_point_of_approach, tcpa_from_observation};
use super::types::{
    CpaResult, Observation, OwnShip, RelativeVector, Solution, SolveResult, TrueMotion,
};
use crate::error::PlotError;
use crate::geometry::{cartesian_to_polar, polar_to_cartesian, PlanarPoint};

/// True speed below which the contact is considered stopped (knots)
const STOPPED_SPEED: f64 = 1e-9;

/// Relative track between two plotted positions
pub fn relative_motion(pos1: PlanarPoint, pos2: PlanarPoint, delta_hours: f64) -> RelativeVector {
    let d = pos2 - pos1;
    let polar = cartesian_to_polar(d.x, d.y);
    RelativeVector {
        course: polar.bearing,
        speed: polar.distance / delta_hours,
        dx: d.x,
        dy: d.y,
    }
}

/// Contact's true motion: own velocity plus relative velocity
pub fn true_motion(
    own_course: f64,
    own_speed: f64,
    relative_course: f64,
    relative_speed: f64,
) -> TrueMotion {
    let v = polar_to_cartesian(own_course, own_speed)
        + polar_to_cartesian(relative_course, relative_speed);
    let polar = cartesian_to_polar(v.x, v.y);
    TrueMotion {
        course: polar.bearing,
        speed: polar.distance,
    }
}

/// Hours between two observations; must be strictly positive
pub fn observation_interval(obs1: &Observation, obs2: &Observation) -> Result<f64, PlotError> {
    let t1 = obs1.time.minutes();
    let t2 = obs2.time.minutes();
    if t2 <= t1 {
        return Err(PlotError::NonChronological {
            first: obs1.time.to_string(),
            second: obs2.time.to_string(),
        });
    }
    Ok(f64::from(t2 - t1) / 60.0)
}

/// Solve a plot from two observations of one contact
///
/// Fails only when the second observation is not later than the first.
pub fn solve(
    obs1: &Observation,
    obs2: &Observation,
    own_ship: &OwnShip,
) -> Result<Solution, PlotError> {
    let delta_hours = observation_interval(obs1, obs2)?;

    let pos1 = obs1.position();
    let pos2 = obs2.position();

    let relative = relative_motion(pos1, pos2, delta_hours);
    let approach = closest_point_of_approach(pos1, relative.dx, relative.dy);
    let tcpa_hours = tcpa_from_observation(approach.t, delta_hours);
    let true_target = true_motion(
        own_ship.course,
        own_ship.speed,
        relative.course,
        relative.speed,
    );

    let result = SolveResult {
        pos1,
        pos2,
        delta_hours,
        own_ship: *own_ship,
        relative,
        cpa: CpaResult {
            distance: approach.distance,
            point: approach.point,
            bearing: approach.point.to_polar().bearing,
            tcpa_minutes: tcpa_hours * 60.0,
        },
        true_motion: true_target,
        prediction: pos2 + relative.displacement(),
    };

    if true_target.speed < STOPPED_SPEED {
        return Ok(Solution::Basic(result));
    }

    Ok(Solution::WithAspect {
        solve: result,
        aspect: aspect(obs2.bearing, true_target.course),
    })
}
