//! Bearing Frames
//!
//! The engine works in true bearings throughout. Operators may read bearings
//! off a heading-up display, so input and output pass through these
//! conversions at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::normalize_bearing;
use crate::error::PlotError;

/// Display orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameMode {
    /// North at the top; display bearings are true bearings
    #[serde(alias = "north-up")]
    TrueUp,
    /// Own heading at the top; display bearings are relative to own course
    #[serde(alias = "head-up")]
    HeadingUp,
}

impl Default for FrameMode {
    fn default() -> Self {
        FrameMode::TrueUp
    }
}

impl FromStr for FrameMode {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true-up" | "north-up" => Ok(FrameMode::TrueUp),
            "heading-up" | "head-up" => Ok(FrameMode::HeadingUp),
            other => Err(PlotError::UnknownFrameMode(other.to_string())),
        }
    }
}

impl fmt::Display for FrameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameMode::TrueUp => write!(f, "true-up"),
            FrameMode::HeadingUp => write!(f, "heading-up"),
        }
    }
}

/// True bearing to bearing relative to own course
///
/// The relative conversions are inverses up to floating-point rounding
/// (within `1e-9` degrees); integer bearings and courses round-trip exactly.
#[inline]
pub fn true_to_relative(true_bearing: f64, own_course: f64) -> f64 {
    normalize_bearing(true_bearing - own_course)
}

/// Bearing relative to own course to true bearing
#[inline]
pub fn relative_to_true(relative_bearing: f64, own_course: f64) -> f64 {
    normalize_bearing(relative_bearing + own_course)
}

/// True bearing to the bearing shown in the given display frame
pub fn true_to_display(true_bearing: f64, own_course: f64, mode: FrameMode) -> f64 {
    match mode {
        FrameMode::TrueUp => true_bearing,
        FrameMode::HeadingUp => true_to_relative(true_bearing, own_course),
    }
}

/// Bearing read in the given display frame to true bearing
pub fn display_to_true(display_bearing: f64, own_course: f64, mode: FrameMode) -> f64 {
    match mode {
        FrameMode::TrueUp => display_bearing,
        FrameMode::HeadingUp => relative_to_true(display_bearing, own_course),
    }
}
