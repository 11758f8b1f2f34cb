//! Error types for plot solving

use thiserror::Error;

/// Errors that can occur when solving a radar plot
///
/// None of these are fatal: each one means "no result for these inputs" and
/// callers are expected to show a placeholder until the inputs change.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    /// Clock time could not be parsed as `HH:MM`
    #[error("Invalid clock time: {0:?} (expected HH:MM)")]
    InvalidTime(String),

    /// Second observation is not strictly later than the first
    #[error("Observations out of order: {first} is not before {second}")]
    NonChronological { first: String, second: String },

    /// Observation text could not be parsed as `bearing,range,HH:MM`
    #[error("Invalid observation: {0}")]
    InvalidObservation(String),

    /// Selected contact index is outside the plot's contact list
    #[error("No contact at index {index}: the plot has {count}")]
    NoSuchTarget { index: usize, count: usize },

    /// Display frame name not recognized
    #[error("Unknown display frame: {0:?} (expected true-up or heading-up)")]
    UnknownFrameMode(String),

    /// Contact shows no relative motion, so no avoidance geometry exists
    #[error("Contact has no relative motion; avoidance maneuver is not applicable")]
    ZeroRelativeMotion,
}
