//! Axis-aligned rectangle math used for every bounding box in the overworld.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle described by its center and dimensions.
///
/// World space grows rightwards along `x` and downwards along `y`, so the
/// top edge has the smaller `y` coordinate. Containment is half-open: a
/// point on the right or bottom edge belongs to the neighbouring rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    center_x: f32,
    center_y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a rectangle centered on the provided coordinates.
    #[must_use]
    pub const fn new(center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        Self {
            center_x,
            center_y,
            width,
            height,
        }
    }

    /// Creates a rectangle centered on the provided point.
    #[must_use]
    pub const fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x, center.y, width, height)
    }

    /// Creates a rectangle spanning the provided edges.
    #[must_use]
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        let width = right - left;
        let height = bottom - top;
        Self::new(left + width / 2.0, top + height / 2.0, width, height)
    }

    /// Center point of the rectangle.
    #[must_use]
    pub const fn center(&self) -> Vec2 {
        Vec2::new(self.center_x, self.center_y)
    }

    /// Horizontal coordinate of the center.
    #[must_use]
    pub const fn center_x(&self) -> f32 {
        self.center_x
    }

    /// Vertical coordinate of the center.
    #[must_use]
    pub const fn center_y(&self) -> f32 {
        self.center_y
    }

    /// Horizontal extent of the rectangle.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent of the rectangle.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Left edge coordinate.
    #[must_use]
    pub fn left(&self) -> f32 {
        self.center_x - self.width / 2.0
    }

    /// Right edge coordinate.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.center_x + self.width / 2.0
    }

    /// Top edge coordinate.
    #[must_use]
    pub fn top(&self) -> f32 {
        self.center_y - self.height / 2.0
    }

    /// Bottom edge coordinate.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.center_y + self.height / 2.0
    }

    /// Upper-left corner.
    #[must_use]
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.left(), self.top())
    }

    /// Upper-right corner.
    #[must_use]
    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.top())
    }

    /// Lower-left corner.
    #[must_use]
    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.left(), self.bottom())
    }

    /// Lower-right corner.
    #[must_use]
    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    /// Reports whether the point lies inside the half-open rectangle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Reports whether the two rectangles share a region of non-zero area.
    ///
    /// Rectangles that only touch along an edge do not intersect.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Length of the shared span along the horizontal axis, zero when disjoint.
    #[must_use]
    pub fn horizontal_overlap(&self, other: &Rect) -> f32 {
        (self.right().min(other.right()) - self.left().max(other.left())).max(0.0)
    }

    /// Length of the shared span along the vertical axis, zero when disjoint.
    #[must_use]
    pub fn vertical_overlap(&self, other: &Rect) -> f32 {
        (self.bottom().min(other.bottom()) - self.top().max(other.top())).max(0.0)
    }

    /// Returns a copy moved by the provided offset.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(
            self.center_x + offset.x,
            self.center_y + offset.y,
            self.width,
            self.height,
        )
    }

    /// Returns a copy with the same dimensions centered on `center`.
    #[must_use]
    pub const fn with_center(&self, center: Vec2) -> Self {
        Self::from_center(center, self.width, self.height)
    }

    /// Returns a copy reduced by the provided amounts, keeping the center.
    ///
    /// Dimensions never drop below zero.
    #[must_use]
    pub fn shrunk(&self, width: f32, height: f32) -> Self {
        Self::new(
            self.center_x,
            self.center_y,
            (self.width - width).max(0.0),
            (self.height - height).max(0.0),
        )
    }

    /// Smallest rectangle covering both rectangles.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Self {
        Self::from_edges(
            self.left().min(other.left()),
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }
}
