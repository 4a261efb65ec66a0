//! Background box geometry.
//!
//! A background box is a filled rounded rectangle drawn behind one dialogue
//! line. Its size follows the wrapped text and its placement mirrors the
//! line's alignment, clamped to stay inside the frame.

use log::debug;

use super::metrics::{
    CORNER_RADIUS, FONT_SIZE, KAPPA, LINE_HEIGHT, MARGIN_L, MARGIN_R, MARGIN_V, PAD_X, PAD_Y,
};
use crate::{
    geometry::{Insets, Point, Size},
    position::{Horizontal, Position, Vertical},
};

/// A rounded rectangle positioned by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundBox {
    origin: Point,
    size: Size,
    radius: i64,
}

impl BackgroundBox {
    /// Computes the box behind `line_count` wrapped lines whose widest line
    /// measures `max_line_units`, for a line anchored at `position` inside a
    /// `frame` of play-resolution pixels.
    ///
    /// # Examples
    ///
    /// ```
    /// # use squawk_core::{draw::BackgroundBox, geometry::{Point, Size}, position::Position};
    /// let frame = Size::new(1920, 1080);
    /// let bg = BackgroundBox::new(Position::normalize("bottom-left"), 1, 5.0, frame);
    /// assert_eq!(bg.size(), Size::new(320, 91));
    /// assert_eq!(bg.origin(), Point::new(0, 1080 - 20 + 15 - 91));
    /// ```
    pub fn new(position: Position, line_count: usize, max_line_units: f64, frame: Size) -> Self {
        let padding = Insets::symmetric(PAD_Y, PAD_X);
        let text_size = Size::new(
            text_core_width(max_line_units),
            line_count.max(1) as i64 * LINE_HEIGHT,
        );
        let box_height = text_size.add_padding(padding).height();

        let y = match position.vertical() {
            Vertical::Top => MARGIN_V - PAD_Y,
            Vertical::Middle => frame.height() / 2 - box_height / 2,
            Vertical::Bottom => frame.height() - MARGIN_V + PAD_Y - box_height,
        };
        let (x, box_width) = horizontal_extent(position.horizontal(), text_size.width(), frame.width());

        let bg = Self {
            origin: Point::new(x, y),
            size: Size::new(box_width, box_height),
            radius: CORNER_RADIUS,
        };
        debug!(
            position:%,
            x = bg.origin.x(),
            y = bg.origin.y(),
            width = bg.size.width(),
            height = bg.size.height();
            "Computed background box"
        );
        bg
    }

    /// Top-left corner, used with `\an7\pos(x,y)`.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Corner radius after clamping to half the smaller side.
    pub fn radius(&self) -> i64 {
        self.radius.min(self.size.min_dimension() / 2).max(0)
    }

    /// ASS vector drawing commands for the rounded rectangle, relative to
    /// [`origin`](Self::origin).
    ///
    /// ```
    /// # use squawk_core::{draw::BackgroundBox, geometry::Size, position::Position};
    /// let bg = BackgroundBox::new(Position::default(), 1, 0.0, Size::new(1920, 1080));
    /// assert!(bg.path().starts_with("m 18 0 l 23 0 b 33 0 41 8 41 18 "));
    /// ```
    pub fn path(&self) -> String {
        let w = self.size.width();
        let h = self.size.height();
        let r = self.radius();
        if r <= 0 {
            return format!("m 0 0 l {w} 0 l {w} {h} l 0 {h} l 0 0");
        }

        let k = (r as f64 * KAPPA).round() as i64;
        [
            format!("m {r} 0"),
            format!("l {} 0", w - r),
            format!("b {} 0 {w} {} {w} {r}", w - r + k, r - k),
            format!("l {w} {}", h - r),
            format!("b {w} {} {} {h} {} {h}", h - r + k, w - r + k, w - r),
            format!("l {r} {h}"),
            format!("b {} {h} 0 {} 0 {}", r - k, h - r + k, h - r),
            format!("l 0 {r}"),
            format!("b 0 {} {} 0 {r} 0", r - k, r - k),
        ]
        .join(" ")
    }
}

/// Width of the text itself, at least one pixel.
fn text_core_width(max_line_units: f64) -> i64 {
    ((max_line_units.max(0.0) * FONT_SIZE as f64).floor() as i64).max(1)
}

/// Returns `(left, width)` of the box for a text column.
///
/// A box overflowing one edge is shifted toward the other before clamping.
fn horizontal_extent(column: Horizontal, text_width: i64, frame_width: i64) -> (i64, i64) {
    let text_left = match column {
        Horizontal::Left => MARGIN_L,
        Horizontal::Center => frame_width / 2 - text_width / 2,
        Horizontal::Right => frame_width - MARGIN_R - text_width,
    };

    let mut left = text_left - PAD_X;
    let mut right = text_left + text_width + PAD_X;

    if right > frame_width {
        left -= right - frame_width;
        right = frame_width;
    }
    if left < 0 {
        let shift = -left;
        left = 0;
        right = frame_width.min(right + shift);
    }

    let width = (right - left).max(1);
    let left = left.min(frame_width - width).max(0);
    (left, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Size = Size::new(1920, 1080);

    #[test]
    fn test_box_height_grows_with_lines() {
        let one = BackgroundBox::new(Position::default(), 1, 3.0, FRAME);
        let three = BackgroundBox::new(Position::default(), 3, 3.0, FRAME);
        assert_eq!(one.size().height(), 61 + 30);
        assert_eq!(three.size().height(), 3 * 61 + 30);
    }

    #[test]
    fn test_vertical_rows() {
        let top = BackgroundBox::new(Position::normalize("top-left"), 1, 3.0, FRAME);
        let middle = BackgroundBox::new(Position::normalize("middle-left"), 1, 3.0, FRAME);
        let bottom = BackgroundBox::new(Position::normalize("bottom-left"), 1, 3.0, FRAME);
        assert_eq!(top.origin().y(), 5);
        assert_eq!(middle.origin().y(), 540 - 45);
        assert_eq!(bottom.origin().y(), 1080 - 20 + 15 - 91);
    }

    #[test]
    fn test_horizontal_columns() {
        // 5 units × 56 px = 280 px of text.
        let left = BackgroundBox::new(Position::normalize("bottom-left"), 1, 5.0, FRAME);
        let center = BackgroundBox::new(Position::normalize("bottom-center"), 1, 5.0, FRAME);
        let right = BackgroundBox::new(Position::normalize("bottom-right"), 1, 5.0, FRAME);
        assert_eq!(left.origin().x(), 0);
        assert_eq!(center.origin().x(), 960 - 140 - 20);
        assert_eq!(right.origin().x(), 1920 - 20 - 280 - 20);
        assert_eq!(right.size().width(), 320);
    }

    #[test]
    fn test_overflow_is_clamped_to_frame() {
        let wide = BackgroundBox::new(Position::normalize("bottom-right"), 1, 40.0, FRAME);
        assert_eq!(wide.origin().x(), 0);
        assert_eq!(wide.size().width(), 1920);
    }

    #[test]
    fn test_zero_units_still_has_width() {
        let bg = BackgroundBox::new(Position::default(), 1, 0.0, FRAME);
        assert_eq!(bg.size().width(), 1 + 40);
    }

    #[test]
    fn test_path_without_radius_is_rectangle() {
        let bg = BackgroundBox {
            origin: Point::default(),
            size: Size::new(1, 1),
            radius: CORNER_RADIUS,
        };
        assert_eq!(bg.radius(), 0);
        assert_eq!(bg.path(), "m 0 0 l 1 0 l 1 1 l 0 1 l 0 0");
    }

    #[test]
    fn test_rounded_path() {
        let bg = BackgroundBox {
            origin: Point::default(),
            size: Size::new(100, 91),
            radius: CORNER_RADIUS,
        };
        assert_eq!(
            bg.path(),
            "m 18 0 l 82 0 b 92 0 100 8 100 18 l 100 73 b 100 83 92 91 82 91 \
             l 18 91 b 8 91 0 83 0 73 l 0 18 b 0 8 8 0 18 0"
        );
    }

    #[test]
    fn test_radius_clamped_to_half_side() {
        let bg = BackgroundBox {
            origin: Point::default(),
            size: Size::new(20, 91),
            radius: CORNER_RADIUS,
        };
        assert_eq!(bg.radius(), 10);
    }
}
