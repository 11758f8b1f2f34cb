//! Plot Type Definitions
//!
//! Inputs and results of the relative-motion and avoidance solvers. Angles
//! are degrees (0-360), distances nautical miles, speeds knots.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::aspect::Aspect;
use crate::error::PlotError;
use crate::geometry::{polar_to_cartesian, PlanarPoint};

/// Wall-clock time of an observation, `HH:MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    time: NaiveTime,
}

const CLOCK_FORMAT: &str = "%H:%M";

impl ClockTime {
    pub fn new(hours: u32, minutes: u32) -> Result<Self, PlotError> {
        NaiveTime::from_hms_opt(hours, minutes, 0)
            .map(|time| ClockTime { time })
            .ok_or_else(|| PlotError::InvalidTime(format!("{}:{}", hours, minutes)))
    }

    /// Minutes since midnight
    pub fn minutes(&self) -> u32 {
        self.time.hour() * 60 + self.time.minute()
    }
}

impl FromStr for ClockTime {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), CLOCK_FORMAT)
            .map(|time| ClockTime { time })
            .map_err(|_| PlotError::InvalidTime(s.to_string()))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = PlotError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.time.format(CLOCK_FORMAT))
    }
}

/// One bearing/range observation of a contact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// True bearing from own ship in degrees (0-360)
    pub bearing: f64,
    /// Range in nautical miles
    pub range: f64,
    /// Time the observation was taken
    pub time: ClockTime,
}

impl Observation {
    pub fn new(bearing: f64, range: f64, time: ClockTime) -> Self {
        Observation {
            bearing,
            range,
            time,
        }
    }

    /// Position of the contact on the sheet
    pub fn position(&self) -> PlanarPoint {
        polar_to_cartesian(self.bearing, self.range)
    }
}

/// Parses `bearing,range,HH:MM`
impl FromStr for Observation {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(PlotError::InvalidObservation(format!(
                "{:?}: expected bearing,range,HH:MM",
                s
            )));
        }
        let bearing: f64 = parts[0]
            .parse()
            .map_err(|_| PlotError::InvalidObservation(format!("bad bearing {:?}", parts[0])))?;
        let range: f64 = parts[1]
            .parse()
            .map_err(|_| PlotError::InvalidObservation(format!("bad range {:?}", parts[1])))?;
        if range < 0.0 {
            return Err(PlotError::InvalidObservation(format!(
                "negative range {}",
                range
            )));
        }
        Ok(Observation {
            bearing,
            range,
            time: parts[2].parse()?,
        })
    }
}

/// Own ship state (required for the true-motion calculation)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OwnShip {
    /// True course in degrees (0-360)
    pub course: f64,
    /// Speed in knots
    pub speed: f64,
}

impl OwnShip {
    pub fn new(course: f64, speed: f64) -> Self {
        OwnShip { course, speed }
    }

    /// Own velocity vector in knots
    pub fn velocity(&self) -> PlanarPoint {
        polar_to_cartesian(self.course, self.speed)
    }
}

/// Contact motion as seen from a stationary observer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RelativeVector {
    /// Direction of relative motion in degrees (0-360)
    pub course: f64,
    /// Relative speed in knots
    pub speed: f64,
    /// East displacement over one observation interval (NM)
    pub dx: f64,
    /// North displacement over one observation interval (NM)
    pub dy: f64,
}

impl RelativeVector {
    /// Displacement over one observation interval
    pub fn displacement(&self) -> PlanarPoint {
        PlanarPoint::new(self.dx, self.dy)
    }

    /// Relative velocity in knots
    pub fn velocity(&self) -> PlanarPoint {
        polar_to_cartesian(self.course, self.speed)
    }
}

/// Closest point of approach
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpaResult {
    /// Closest point of approach in nautical miles
    pub distance: f64,
    /// Where the contact will be at CPA, relative to own ship
    pub point: PlanarPoint,
    /// Bearing of the CPA point in degrees (0-360)
    pub bearing: f64,
    /// Time to CPA in minutes from the second observation
    /// Positive = future, Negative = past
    pub tcpa_minutes: f64,
}

/// Contact motion over the ground
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrueMotion {
    /// True course in degrees (0-360)
    pub course: f64,
    /// Speed over ground in knots
    pub speed: f64,
}

impl TrueMotion {
    pub fn velocity(&self) -> PlanarPoint {
        polar_to_cartesian(self.course, self.speed)
    }
}

/// Proposed avoidance maneuver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvoidanceInput {
    /// New own course in degrees (0-360)
    pub new_course: f64,
    /// New own speed in knots
    pub new_speed: f64,
    /// Range at which the maneuver is executed (NM)
    pub min_distance: f64,
}

/// Outcome of the avoidance solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvoidanceResult {
    /// Whether the relative track reaches `min_distance` at all
    pub maneuver_needed: bool,
    /// Contact position (relative to own ship) when the maneuver is executed
    pub maneuver_point: PlanarPoint,
    /// Hours from the second observation until the maneuver
    pub time_to_maneuver_hours: f64,
    /// Relative motion after the maneuver
    pub relative: RelativeVector,
    /// CPA after the maneuver; never earlier than the maneuver itself
    pub cpa: CpaResult,
    /// Extrapolated relative position after the maneuver
    pub prediction: PlanarPoint,
    /// The maneuver this result was computed for
    pub input: AvoidanceInput,
}

/// Result of the relative-motion solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResult {
    /// Contact position at the first observation
    pub pos1: PlanarPoint,
    /// Contact position at the second observation
    pub pos2: PlanarPoint,
    /// Interval between the observations in hours (always > 0)
    pub delta_hours: f64,
    /// Own ship state used for the solve
    pub own_ship: OwnShip,
    pub relative: RelativeVector,
    pub cpa: CpaResult,
    pub true_motion: TrueMotion,
    /// Relative position one interval after the second observation
    pub prediction: PlanarPoint,
}

impl SolveResult {
    /// Assess collision danger from CPA and TCPA
    pub fn danger(&self, thresholds: &DangerThresholds) -> DangerLevel {
        if self.relative.speed <= thresholds.min_relative_speed {
            return DangerLevel::NotApplicable;
        }

        let cpa = self.cpa.distance;
        if cpa < thresholds.cpa_danger {
            DangerLevel::Danger
        } else if cpa < thresholds.cpa_warning {
            DangerLevel::Warning
        } else {
            DangerLevel::Safe
        }
    }

    /// Close CPA reached within the TCPA threshold
    pub fn tcpa_is_critical(&self, thresholds: &DangerThresholds) -> bool {
        self.cpa.tcpa_minutes.abs() < thresholds.tcpa_danger_minutes
            && self.cpa.distance < thresholds.cpa_danger
    }
}

/// Thresholds for flagging a contact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DangerThresholds {
    /// CPA below this is dangerous (NM)
    pub cpa_danger: f64,
    /// CPA below this deserves attention (NM)
    pub cpa_warning: f64,
    /// TCPA below this, with a dangerous CPA, is critical (minutes)
    pub tcpa_danger_minutes: f64,
    /// Relative speed at or below this makes CPA meaningless (knots)
    pub min_relative_speed: f64,
}

impl Default for DangerThresholds {
    fn default() -> Self {
        DangerThresholds {
            cpa_danger: 2.0,
            cpa_warning: 5.0,
            tcpa_danger_minutes: 30.0,
            min_relative_speed: 0.1,
        }
    }
}

/// Collision danger classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DangerLevel {
    Safe,
    Warning,
    Danger,
    /// Contact barely moves relative to own ship
    NotApplicable,
}

impl fmt::Display for DangerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DangerLevel::Safe => write!(f, "safe"),
            DangerLevel::Warning => write!(f, "warning"),
            DangerLevel::Danger => write!(f, "danger"),
            DangerLevel::NotApplicable => write!(f, "n/a"),
        }
    }
}

/// A solved plot, carrying only what the inputs could support
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Solution {
    /// Contact is stopped, so it has no heading and no aspect
    Basic(SolveResult),
    WithAspect {
        solve: SolveResult,
        aspect: Aspect,
    },
    WithAvoidance {
        solve: SolveResult,
        aspect: Option<Aspect>,
        avoidance: AvoidanceResult,
    },
}

impl Solution {
    pub fn solve(&self) -> &SolveResult {
        match self {
            Solution::Basic(solve) => solve,
            Solution::WithAspect { solve, .. } => solve,
            Solution::WithAvoidance { solve, .. } => solve,
        }
    }

    pub fn aspect(&self) -> Option<&Aspect> {
        match self {
            Solution::Basic(_) => None,
            Solution::WithAspect { aspect, .. } => Some(aspect),
            Solution::WithAvoidance { aspect, .. } => aspect.as_ref(),
        }
    }

    pub fn avoidance(&self) -> Option<&AvoidanceResult> {
        match self {
            Solution::WithAvoidance { avoidance, .. } => Some(avoidance),
            _ => None,
        }
    }

    /// Attach an avoidance result, replacing any previous one
    pub fn with_avoidance(self, avoidance: AvoidanceResult) -> Solution {
        match self {
            Solution::Basic(solve) => Solution::WithAvoidance {
                solve,
                aspect: None,
                avoidance,
            },
            Solution::WithAspect { solve, aspect } => Solution::WithAvoidance {
                solve,
                aspect: Some(aspect),
                avoidance,
            },
            Solution::WithAvoidance { solve, aspect, .. } => Solution::WithAvoidance {
                solve,
                aspect,
                avoidance,
            },
        }
    }
}
