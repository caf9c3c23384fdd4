//! Plain 2D value types shared by motion and clock geometry

use serde::{Deserialize, Serialize};

/// Screen-space point, Y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Per-tick displacement
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self` in clock-face polar terms: angle 0 is up, clockwise positive
    pub fn polar(&self, radius: f64, angle: f64) -> Point {
        Point {
            x: self.x + radius * angle.sin(),
            y: self.y - radius * angle.cos(),
        }
    }

    pub fn offset(&self, v: Vector) -> Point {
        Point {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Vector {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_angle(angle: f64, magnitude: f64) -> Self {
        Self {
            x: angle.cos() * magnitude,
            y: angle.sin() * magnitude,
        }
    }

    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero, negative or non-finite sizes cannot host a clock
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite()) || self.width <= 0.0 || self.height <= 0.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_dimension(&self) -> f64 {
        self.width.min(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_polar_zero_points_up() {
        let p = Point::new(10.0, 10.0).polar(5.0, 0.0);
        assert!((p.x - 10.0).abs() < 1e-12);
        assert!((p.y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_polar_quarter_turn_points_right() {
        let p = Point::new(0.0, 0.0).polar(10.0, PI / 2.0);
        assert!((p.x - 10.0).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_sizes() {
        assert!(Size::new(0.0, 600.0).is_degenerate());
        assert!(Size::new(800.0, -1.0).is_degenerate());
        assert!(Size::new(f64::NAN, 600.0).is_degenerate());
        assert!(!Size::new(800.0, 600.0).is_degenerate());
    }

    #[test]
    fn test_vector_angle_round_trip() {
        let v = Vector::from_angle(1.2, 0.16);
        assert!((v.angle() - 1.2).abs() < 1e-12);
        assert!((v.magnitude() - 0.16).abs() < 1e-12);
    }
}
