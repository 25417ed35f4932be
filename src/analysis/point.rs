//! Sample point type
//!
//! Points live in canvas pixel space. Serialized as `{"x": .., "y": ..}` so
//! the JSON shape matches what the drawing surface produces.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A single sampled coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    /// Offset by a vector
    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        p.to_vec()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Point at polar (r, theta) around `center`
#[inline]
pub fn polar_to_point(center: Point, r: f64, theta: f64) -> Point {
    (center.to_vec() + DVec2::from_angle(theta) * r).into()
}

/// `count` points evenly spaced on a circle, starting at angle 0
///
/// The loop is not closed: the last point sits one step short of the first.
pub fn sample_circle(center: Point, radius: f64, count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let theta = std::f64::consts::TAU * i as f64 / count as f64;
            polar_to_point(center, radius, theta)
        })
        .collect()
}
