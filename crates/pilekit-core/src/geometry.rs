//! Axis-aligned geometry used by every engine component.
//!
//! Coordinates are screen-space: x grows to the right, y grows downward, and a
//! rectangle's `(x, y)` is its top-left corner.

use serde::{Deserialize, Serialize};

/// A 2-D point or offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Creates a new vector.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scales both components by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned rectangle with a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle from its top-left corner and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a small square of side `size` centered on `point`.
    ///
    /// Used as the pointer probe for hit-testing.
    pub fn probe(point: Vec2, size: f64) -> Self {
        let half = size / 2.0;
        Self::new(point.x - half, point.y - half, size, size)
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns the same rectangle moved by `offset`.
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Returns the same size placed with its top-left corner at `position`.
    pub fn with_position(&self, position: Vec2) -> Self {
        Self::new(position.x, position.y, self.width, self.height)
    }

    /// Returns the same size centered on `point`.
    pub fn centered_on(&self, point: Vec2) -> Self {
        Self::new(
            point.x - self.width * 0.5,
            point.y - self.height * 0.5,
            self.width,
            self.height,
        )
    }

    /// Point containment, edges inclusive.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Axis-aligned overlap test. Rectangles that only share an edge do not
    /// intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Compares the top-left corners of two rectangles with [`approx_eq`].
    pub fn approx_eq_position(&self, other: &Rect, epsilon: f64) -> bool {
        approx_eq(self.x, other.x, epsilon) && approx_eq(self.y, other.y, epsilon)
    }
}

/// Squared Euclidean distance between the top-left corners of two rectangles.
///
/// Only relative ordering matters to callers, so no square root is taken.
pub fn distance_sqr(a: &Rect, b: &Rect) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Relative float comparison with an absolute floor of `epsilon` near zero:
/// `|a - b| <= epsilon * max(1, |a|, |b|)`.
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon * 1.0_f64.max(a.abs().max(b.abs()))
}
