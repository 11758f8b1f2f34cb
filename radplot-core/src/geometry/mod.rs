//! Planar Coordinate System
//!
//! Conversions between polar (bearing, distance) and Cartesian positions on
//! the plotting sheet. Bearings are degrees clockwise from north (the +y
//! axis), x grows to the east. All geometry is flat-earth, which is fine at
//! radar plotting ranges.

mod bearing;

pub use bearing::{display_to_true, relative_to_true, true_to_display, true_to_relative, FrameMode};

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Point (or velocity) on the plotting sheet
///
/// Units are nautical miles for positions and knots for velocities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    /// East component
    pub x: f64,
    /// North component
    pub y: f64,
}

impl PlanarPoint {
    pub const ORIGIN: PlanarPoint = PlanarPoint { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        PlanarPoint { x, y }
    }

    /// Distance from the origin (own ship at the plot centre)
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Bearing and distance of this point seen from the origin
    pub fn to_polar(&self) -> Polar {
        cartesian_to_polar(self.x, self.y)
    }
}

impl Add for PlanarPoint {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        PlanarPoint {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for PlanarPoint {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        PlanarPoint {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f64> for PlanarPoint {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        PlanarPoint {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl From<PlanarPoint> for Vector2<f64> {
    fn from(p: PlanarPoint) -> Self {
        Vector2::new(p.x, p.y)
    }
}

impl From<Vector2<f64>> for PlanarPoint {
    fn from(v: Vector2<f64>) -> Self {
        PlanarPoint { x: v.x, y: v.y }
    }
}

/// Polar coordinates relative to the plot centre
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Polar {
    /// Bearing in degrees (0-360, clockwise from north)
    pub bearing: f64,
    /// Distance (nautical miles, or knots for a velocity)
    pub distance: f64,
}

/// Normalize bearing to 0-360 range
#[inline]
pub fn normalize_bearing(bearing: f64) -> f64 {
    let b = bearing.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs,
    // and keeps the sign of -0.0
    if b >= 360.0 {
        0.0
    } else {
        b + 0.0
    }
}

/// Convert a bearing/distance pair into a point on the sheet
pub fn polar_to_cartesian(bearing_deg: f64, distance: f64) -> PlanarPoint {
    let rad = bearing_deg.to_radians();
    PlanarPoint {
        x: distance * rad.sin(),
        y: distance * rad.cos(),
    }
}

/// Convert a point on the sheet into bearing/distance from the origin
///
/// The origin itself maps to bearing 0.
pub fn cartesian_to_polar(x: f64, y: f64) -> Polar {
    Polar {
        bearing: normalize_bearing(x.atan2(y).to_degrees()),
        distance: x.hypot(y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_cardinal_points() {
        let north = polar_to_cartesian(0.0, 10.0);
        assert!(north.x.abs() < EPSILON);
        assert!((north.y - 10.0).abs() < EPSILON);

        let east = polar_to_cartesian(90.0, 10.0);
        assert!((east.x - 10.0).abs() < EPSILON);
        assert!(east.y.abs() < EPSILON);

        let south = polar_to_cartesian(180.0, 10.0);
        assert!(south.x.abs() < EPSILON);
        assert!((south.y + 10.0).abs() < EPSILON);

        let west = polar_to_cartesian(270.0, 10.0);
        assert!((west.x + 10.0).abs() < EPSILON);
        assert!(west.y.abs() < EPSILON);
    }

    #[test]
    fn test_cartesian_to_polar_quadrants() {
        let p = cartesian_to_polar(1.0, 1.0);
        assert!((p.bearing - 45.0).abs() < EPSILON);
        assert!((p.distance - 2f64.sqrt()).abs() < EPSILON);

        let p = cartesian_to_polar(-1.0, 1.0);
        assert!((p.bearing - 315.0).abs() < EPSILON);

        let p = cartesian_to_polar(0.0, -3.0);
        assert!((p.bearing - 180.0).abs() < EPSILON);
        assert!((p.distance - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_negative_zero_bearing() {
        assert!(normalize_bearing(-0.0).is_sign_positive());
        let p = cartesian_to_polar(-0.0, 1.0);
        assert_eq!(p.bearing, 0.0);
        assert!(p.bearing.is_sign_positive());
        assert_eq!(format!("{:05.1}", p.bearing), "000.0");
    }

    #[test]
    fn test_origin_maps_to_bearing_zero() {
        let p = cartesian_to_polar(0.0, 0.0);
        assert_eq!(p.bearing, 0.0);
        assert_eq!(p.distance, 0.0);
    }

    #[test]
    fn test_polar_cartesian_roundtrip() {
        let mut bearing = 0.0;
        while bearing < 360.0 {
            for distance in [0.1, 1.0, 6.5, 24.0] {
                let p = polar_to_cartesian(bearing, distance);
                let back = p.to_polar();
                let diff = (back.bearing - bearing).abs();
                // 359.9999 and 0.0 are the same bearing
                assert!(
                    diff < 1e-6 || (360.0 - diff) < 1e-6,
                    "bearing {} came back as {}",
                    bearing,
                    back.bearing
                );
                assert!((back.distance - distance).abs() < 1e-6);
            }
            bearing += 7.5;
        }
    }

    #[test]
    fn test_normalize_bearing() {
        assert_eq!(normalize_bearing(0.0), 0.0);
        assert_eq!(normalize_bearing(360.0), 0.0);
        assert_eq!(normalize_bearing(-90.0), 270.0);
        assert_eq!(normalize_bearing(725.0), 5.0);
        let tiny = normalize_bearing(-1e-17);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_point_arithmetic() {
        let a = PlanarPoint::new(1.0, 2.0);
        let b = PlanarPoint::new(3.0, -1.0);
        assert_eq!(a + b, PlanarPoint::new(4.0, 1.0));
        assert_eq!(b - a, PlanarPoint::new(2.0, -3.0));
        assert_eq!(a * 2.0, PlanarPoint::new(2.0, 4.0));
        assert!((PlanarPoint::new(3.0, 4.0).magnitude() - 5.0).abs() < EPSILON);

        let v: Vector2<f64> = a.into();
        assert_eq!(PlanarPoint::from(v), a);
    }
}
