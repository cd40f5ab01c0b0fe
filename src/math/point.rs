use std::ops::{Add, AddAssign, Sub, SubAssign};

use super::vec2::{safe, Vec2};

/// A location in the plane.
///
/// Structurally the same as [`Vec2`] but with position semantics:
/// `Point - Point` is a `Vec2`, `Point + Vec2` is a `Point`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x: safe(x), y: safe(y) }
    }

    /// Displacement from the origin to this point.
    pub fn to_vec(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn distance(self, other: Point) -> f64 {
        (self - other).magnitude()
    }

    pub fn distance_squared(self, other: Point) -> f64 {
        (self - other).magnitude_squared()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl Sub for Point {
    type Output = Vec2;

    fn sub(self, other: Point) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    fn add(self, offset: Vec2) -> Point {
        Point::new(self.x + offset.x, self.y + offset.y)
    }
}

impl Sub<Vec2> for Point {
    type Output = Point;

    fn sub(self, offset: Vec2) -> Point {
        Point::new(self.x - offset.x, self.y - offset.y)
    }
}

impl AddAssign<Vec2> for Point {
    fn add_assign(&mut self, offset: Vec2) {
        *self = *self + offset;
    }
}

impl SubAssign<Vec2> for Point {
    fn sub_assign(&mut self, offset: Vec2) {
        *self = *self - offset;
    }
}
