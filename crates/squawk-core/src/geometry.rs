//! Geometric primitives for subtitle layout.
//!
//! All coordinates are whole pixels in the track's play resolution. The
//! coordinate system matches ASS and SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     ▼
//!    +Y
//! ```

/// A point in play-resolution pixels.
///
/// # Examples
///
/// ```
/// # use squawk_core::geometry::Point;
/// let p = Point::new(10, -20);
/// assert_eq!(p.x(), 10);
/// assert_eq!(p.y(), -20);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    x: i64,
    y: i64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> i64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> i64 {
        self.y
    }
}

/// Width and height in play-resolution pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    width: i64,
    height: i64,
}

impl Size {
    /// Creates a new size with the specified width and height
    pub const fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    /// Returns the width
    pub fn width(self) -> i64 {
        self.width
    }

    /// Returns the height
    pub fn height(self) -> i64 {
        self.height
    }

    /// Returns the smaller of the two dimensions.
    pub fn min_dimension(self) -> i64 {
        self.width.min(self.height)
    }

    /// Grows the size by the given insets on every side.
    ///
    /// ```
    /// # use squawk_core::geometry::{Insets, Size};
    /// let padded = Size::new(100, 61).add_padding(Insets::new(15, 20, 15, 20));
    /// assert_eq!(padded, Size::new(140, 91));
    /// ```
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }
}

/// Padding or margin values for the four sides of a rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    top: i64,
    right: i64,
    bottom: i64,
    left: i64,
}

impl Insets {
    /// Creates insets in CSS order: top, right, bottom, left
    pub fn new(top: i64, right: i64, bottom: i64, left: i64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates insets with the same vertical and the same horizontal value
    pub fn symmetric(vertical: i64, horizontal: i64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Sum of the left and right insets
    pub fn horizontal_sum(self) -> i64 {
        self.left + self.right
    }

    /// Sum of the top and bottom insets
    pub fn vertical_sum(self) -> i64 {
        self.top + self.bottom
    }
}
