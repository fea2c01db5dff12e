#![warn(missing_docs)]

//! Math types for the pcad board geometry core.
//!
//! Thin wrappers around nalgebra providing domain-specific types for
//! 2D PCB geometry: points, vectors, rectangles (both axis-aligned and
//! rotated), and tolerance constants. All dimensions are in millimeters.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A point on the board plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector on the board plane.
pub type Vec2 = Vector2<f64>;

/// A serializable 2D point for record output.
///
/// We use a custom type instead of nalgebra::Point2 to enable serde
/// serialization without requiring nalgebra's serde feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point2D {
    /// Create a new 2D point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// True if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<Point2> for Point2D {
    fn from(p: Point2) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<Point2D> for Point2 {
    fn from(p: Point2D) -> Self {
        Point2::new(p.x, p.y)
    }
}

/// Axis-aligned rectangle on the board plane.
///
/// Stored as its four extents; build one from a center and size with
/// [`Rect::from_center_size`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Minimum X extent.
    pub left: f64,
    /// Maximum X extent.
    pub right: f64,
    /// Minimum Y extent.
    pub bottom: f64,
    /// Maximum Y extent.
    pub top: f64,
}

impl Rect {
    /// Build a rectangle from its center and full width/height.
    pub fn from_center_size(center: Point2, width: f64, height: f64) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self {
            left: center.x - hw,
            right: center.x + hw,
            bottom: center.y - hh,
            top: center.y + hh,
        }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// True if the point lies inside or on the boundary.
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.bottom && p.y <= self.top
    }

    /// True if the circle lies strictly inside the rectangle, clear of
    /// the boundary on all four sides.
    pub fn strictly_contains_circle(&self, center: &Point2, radius: f64) -> bool {
        center.x - radius > self.left
            && center.x + radius < self.right
            && center.y - radius > self.bottom
            && center.y + radius < self.top
    }

    /// True if the circle's bounding extent is separated from the
    /// rectangle on some axis, i.e. the two cannot touch.
    pub fn is_circle_separated(&self, center: &Point2, radius: f64) -> bool {
        center.x + radius < self.left
            || center.x - radius > self.right
            || center.y + radius < self.bottom
            || center.y - radius > self.top
    }

    /// Corners in counter-clockwise order starting from bottom-left.
    pub fn corners(&self) -> [Point2; 4] {
        [
            Point2::new(self.left, self.bottom),
            Point2::new(self.right, self.bottom),
            Point2::new(self.right, self.top),
            Point2::new(self.left, self.top),
        ]
    }

    /// The four boundary edges as finite segments, counter-clockwise:
    /// bottom, right, top, left.
    pub fn edges(&self) -> [(Point2, Point2); 4] {
        let [bl, br, tr, tl] = self.corners();
        [(bl, br), (br, tr), (tr, tl), (tl, bl)]
    }
}

/// A rectangle with arbitrary rotation about its center.
///
/// Used to model pad footprints for the overlap check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedRect {
    /// Center of the rectangle.
    pub center: Point2,
    /// Half extents along the rectangle's local X and Y axes.
    pub half_extents: Vec2,
    /// Rotation in radians, counter-clockwise.
    pub rotation: f64,
}

impl OrientedRect {
    /// Build from center, full width/height, and rotation in radians.
    pub fn from_center_size(center: Point2, width: f64, height: f64, rotation: f64) -> Self {
        Self {
            center,
            half_extents: Vec2::new(width / 2.0, height / 2.0),
            rotation,
        }
    }

    /// The rectangle's local axes (also its edge normals) as unit vectors.
    pub fn axes(&self) -> [Vec2; 2] {
        let (s, c) = self.rotation.sin_cos();
        [Vec2::new(c, s), Vec2::new(-s, c)]
    }

    /// Corners in counter-clockwise order.
    pub fn corners(&self) -> [Point2; 4] {
        let [u, v] = self.axes();
        let du = self.half_extents.x * u;
        let dv = self.half_extents.y * v;
        [
            self.center - du - dv,
            self.center + du - dv,
            self.center + du + dv,
            self.center - du + dv,
        ]
    }

    /// Projection radius onto a unit axis.
    fn projection_radius(&self, axis: &Vec2) -> f64 {
        let [u, v] = self.axes();
        self.half_extents.x * u.dot(axis).abs() + self.half_extents.y * v.dot(axis).abs()
    }

    /// Separating-axis test for positive-area intersection.
    ///
    /// Returns true only if the two rectangles overlap with positive area:
    /// on every candidate axis (both rectangles' edge normals) the projected
    /// intervals must overlap by more than `tol`. Touching along an edge or
    /// at a corner is not an overlap.
    pub fn overlaps(&self, other: &OrientedRect, tol: f64) -> bool {
        let d = other.center - self.center;
        let [a0, a1] = self.axes();
        let [b0, b1] = other.axes();
        for axis in [a0, a1, b0, b1] {
            let depth =
                self.projection_radius(&axis) + other.projection_radius(&axis) - d.dot(&axis).abs();
            if depth <= tol {
                return false;
            }
        }
        true
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in mm.
    pub linear: f64,
    /// Tolerance for normalized segment parameters.
    pub parametric: f64,
}

impl Tolerance {
    /// Default board-geometry tolerances (1e-9 mm linear, 1e-10 parametric).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        parametric: 1e-10,
    };

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
