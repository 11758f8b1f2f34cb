//! Aspect Classification
//!
//! The aspect is the angle between the contact's heading and the line from
//! the contact to own ship, measured clockwise from the contact's bow. It
//! tells which side of the contact we are looking at, and therefore which
//! navigation lights should be visible at night.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::normalize_bearing;

/// Below this off-bow angle both sidelights are in view
const DEAD_AHEAD_LIMIT: f64 = 2.0;
const FINE_ON_BOW_LIMIT: f64 = 22.5;
const FORWARD_OF_BEAM_LIMIT: f64 = 67.5;
const ABEAM_LIMIT: f64 = 112.5;
const AFT_OF_BEAM_LIMIT: f64 = 157.5;
/// At or beyond this off-bow angle only the sternlight is in view
const DEAD_ASTERN_LIMIT: f64 = 178.0;

/// Side of the contact presented to own ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Starboard,
    Port,
}

impl Side {
    /// Colour of the sidelight on this side
    pub fn sidelight(&self) -> &'static str {
        match self {
            Side::Starboard => "green",
            Side::Port => "red",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Starboard => write!(f, "starboard"),
            Side::Port => write!(f, "port"),
        }
    }
}

/// Light/sector band for an aspect angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sector", content = "side", rename_all = "camelCase")]
pub enum AspectSector {
    DeadAhead,
    FineOnBow(Side),
    ForwardOfBeam(Side),
    Abeam(Side),
    AftOfBeam(Side),
    NearlyAstern(Side),
    DeadAstern,
}

impl AspectSector {
    /// Classify an aspect angle in degrees (0-360)
    pub fn classify(aspect_deg: f64) -> AspectSector {
        let aspect = normalize_bearing(aspect_deg);
        let side = if aspect <= 180.0 {
            Side::Starboard
        } else {
            Side::Port
        };
        let off_bow = aspect.min(360.0 - aspect);

        if off_bow < DEAD_AHEAD_LIMIT {
            AspectSector::DeadAhead
        } else if off_bow < FINE_ON_BOW_LIMIT {
            AspectSector::FineOnBow(side)
        } else if off_bow < FORWARD_OF_BEAM_LIMIT {
            AspectSector::ForwardOfBeam(side)
        } else if off_bow < ABEAM_LIMIT {
            AspectSector::Abeam(side)
        } else if off_bow < AFT_OF_BEAM_LIMIT {
            AspectSector::AftOfBeam(side)
        } else if off_bow < DEAD_ASTERN_LIMIT {
            AspectSector::NearlyAstern(side)
        } else {
            AspectSector::DeadAstern
        }
    }

    /// Side presented, if the sector has one
    pub fn side(&self) -> Option<Side> {
        match self {
            AspectSector::DeadAhead | AspectSector::DeadAstern => None,
            AspectSector::FineOnBow(side)
            | AspectSector::ForwardOfBeam(side)
            | AspectSector::Abeam(side)
            | AspectSector::AftOfBeam(side)
            | AspectSector::NearlyAstern(side) => Some(*side),
        }
    }

    /// Human-readable description including the lights in view
    pub fn label(&self) -> String {
        match self {
            AspectSector::DeadAhead => "Dead ahead: both sidelights (red and green)".to_string(),
            AspectSector::FineOnBow(side) => {
                format!("Fine on the {} bow: {} sidelight", side, side.sidelight())
            }
            AspectSector::ForwardOfBeam(side) => {
                format!("Forward of the {} beam: {} sidelight", side, side.sidelight())
            }
            AspectSector::Abeam(side) => {
                format!("Abeam to {}: {} sidelight", side, side.sidelight())
            }
            AspectSector::AftOfBeam(side) => format!(
                "Aft of the {} beam: sternlight and {} sidelight",
                side,
                side.sidelight()
            ),
            AspectSector::NearlyAstern(side) => {
                format!("Nearly dead astern, {} quarter: sternlight", side)
            }
            AspectSector::DeadAstern => "Dead astern: sternlight only".to_string(),
        }
    }
}

/// Aspect of a contact at the second observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    /// Aspect angle in degrees (0-360), clockwise from the contact's bow
    pub degrees: f64,
    pub sector: AspectSector,
    pub label: String,
}

impl Aspect {
    pub fn from_degrees(degrees: f64) -> Aspect {
        let degrees = normalize_bearing(degrees);
        let sector = AspectSector::classify(degrees);
        Aspect {
            degrees,
            sector,
            label: sector.label(),
        }
    }
}

/// Aspect of a contact seen on `bearing` from own ship, steering `course`
pub fn aspect(bearing_to_contact: f64, contact_course: f64) -> Aspect {
    let bearing_to_own = normalize_bearing(bearing_to_contact + 180.0);
    Aspect::from_degrees(bearing_to_own - contact_course)
}
