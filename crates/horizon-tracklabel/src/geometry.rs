//! Geometry types and the side-selection placement rule.
//!
//! Screen-space types are `f32` like the rest of the rendering stack;
//! geographic coordinates are `f64` because latitude/longitude precision
//! matters at high zoom levels.

use serde::{Deserialize, Serialize};

/// A point in 2-D screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Translate by an offset vector.
    #[inline]
    pub fn translate(self, offset: Vector) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
        }
    }

    /// Round both coordinates to the nearest whole pixel.
    #[inline]
    pub fn round(self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
        }
    }

    /// Convert to a glam Vec2.
    #[inline]
    pub fn to_vec2(self) -> glam::Vec2 {
        glam::Vec2::new(self.x, self.y)
    }

    /// Create from a glam Vec2.
    #[inline]
    pub fn from_vec2(v: glam::Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<glam::Vec2> for Point {
    fn from(v: glam::Vec2) -> Self {
        Self::from_vec2(v)
    }
}

/// A size in 2-D screen space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

/// A displacement in 2-D screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    /// Create a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Convert to a glam Vec2.
    #[inline]
    pub fn to_vec2(self) -> glam::Vec2 {
        glam::Vec2::new(self.x, self.y)
    }
}

impl From<(f32, f32)> for Vector {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A geographic coordinate (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new coordinate.
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Which side of its anchor a label is rendered on.
///
/// Exactly one side is in effect whenever a label is placed; the container
/// carries the side so hosts can style the connector accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelSide {
    /// The label extends to the left of the anchor.
    Left,
    /// The label extends to the right of the anchor.
    Right,
}

/// Side preference for label placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Always render on the left side of the anchor.
    #[default]
    Left,
    /// Always render on the right side of the anchor.
    Right,
    /// Pick the side pointing away from the viewport's visual center, so
    /// labels near the left edge render to the right and vice versa.
    Auto,
}

/// Compute the final screen position and side for a label.
///
/// `anchor` is the anchor's projected screen point, `viewport_center` the
/// projected center of the current view, `label_width` the laid-out width of
/// the label container. The configured `offset` pushes the label away from
/// the anchor; on the left side it is mirrored and the label width is
/// subtracted so the label's right edge keeps the same gap to the anchor.
///
/// Stateless and side-effect-free, so it is safe to call at sub-frame
/// cadence during zoom animation.
///
/// The `Auto` rule is a heuristic, not a collision solver: it only compares
/// the anchor against the viewport center and knows nothing about other
/// labels.
///
/// # Example
///
/// ```
/// use horizon_tracklabel::geometry::{compute_placement, Direction, LabelSide, Point, Vector};
///
/// let (pos, side) = compute_placement(
///     Point::new(100.0, 50.0),
///     Point::new(200.0, 50.0),
///     Direction::Auto,
///     Vector::new(12.0, -15.0),
///     40.0,
/// );
/// assert_eq!(side, LabelSide::Right); // anchor left of center
/// assert_eq!(pos, Point::new(112.0, 35.0));
/// ```
pub fn compute_placement(
    anchor: Point,
    viewport_center: Point,
    direction: Direction,
    offset: Vector,
    label_width: f32,
) -> (Point, LabelSide) {
    let to_the_right = match direction {
        Direction::Right => true,
        Direction::Auto => anchor.x < viewport_center.x,
        Direction::Left => false,
    };

    if to_the_right {
        (anchor.translate(offset), LabelSide::Right)
    } else {
        let mirrored = Vector::new(-offset.x - label_width, offset.y);
        (anchor.translate(mirrored), LabelSide::Left)
    }
}
