//! `Point`: 2D coordinates for mesh vertices and quadrature points.
//!
//! The multimesh build pass is 2D-only, so points carry `x` and `y`
//! components. The type is `repr(C)` so a slice of points can be viewed
//! as a flat coordinate array when handed to external solvers.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A 2D point/vector with `f64` components.
#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a point from its two components.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`.
    #[inline]
    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Dot product with `other`.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z-component of the cross product of two in-plane vectors.
    #[inline]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Euclidean norm.
    #[inline]
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Squared distance to `other`.
    #[inline]
    pub fn squared_distance(self, other: Self) -> f64 {
        let d = self - other;
        d.dot(d)
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        self.squared_distance(other).sqrt()
    }

    /// Midpoint of the segment `self`–`other`.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Point").field(&self.x).field(&self.y).finish()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<[f64; 2]> for Point {
    #[inline]
    fn from(c: [f64; 2]) -> Self {
        Point::new(c[0], c[1])
    }
}

impl From<Point> for [f64; 2] {
    #[inline]
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, -1.0);
        assert_eq!(a + b, Point::new(4.0, 1.0));
        assert_eq!(b - a, Point::new(2.0, -3.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert_eq!(-a, Point::new(-1.0, -2.0));
    }

    #[test]
    fn dot_cross_norm() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(-4.0, 3.0);
        assert_eq!(a.dot(b), 0.0);
        assert_eq!(a.cross(b), 25.0);
        assert_eq!(a.norm(), 5.0);
        assert_eq!(a.distance(Point::origin()), 5.0);
    }

    #[test]
    fn midpoint() {
        let m = Point::new(0.0, 0.0).midpoint(Point::new(2.0, 0.5));
        assert_eq!(m, Point::new(1.0, 0.25));
    }

    #[test]
    fn display_and_debug() {
        let p = Point::new(1.5, -2.0);
        assert_eq!(format!("{p}"), "(1.5, -2)");
        assert_eq!(format!("{p:?}"), "Point(1.5, -2.0)");
    }
}

#[cfg(test)]
mod serde_tests {
    use super::*;

    #[test]
    fn json_roundtrip() {
        let p = Point::new(0.25, 7.0);
        let s = serde_json::to_string(&p).unwrap();
        let q: Point = serde_json::from_str(&s).unwrap();
        assert_eq!(p, q);
    }
}
