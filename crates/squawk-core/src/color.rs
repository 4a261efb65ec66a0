//! Color handling for subtitle styles and background boxes.
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor`
//! type from the color crate and converts it into the `&HAABBGGRR` notation
//! used by ASS style rows and inline overrides.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};
use thiserror::Error;

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`: {reason}")]
pub struct ColorError {
    input: String,
    reason: String,
}

/// Wrapper around the `DynamicColor` type from the color crate.
///
/// Accepts CSS color strings such as `"#ff0000"`, `"#ff000080"`,
/// `"rgb(255, 0, 0)"` or named colors like `"cyan"`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string.
    ///
    /// # Examples
    ///
    /// ```
    /// use squawk_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let cyan = Color::new("cyan").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ColorError> {
        let trimmed = color_str.trim();
        DynamicColor::from_str(trimmed)
            .map(|color| Self { color })
            .map_err(|err| ColorError {
                input: trimmed.to_string(),
                reason: err.to_string(),
            })
    }

    /// The fixed fallback text color.
    pub fn white() -> Self {
        Self::new("white").expect("'white' is a valid CSS color")
    }

    /// Returns the `(alpha, blue, green, red)` bytes in ASS order.
    ///
    /// ASS alpha is inverted with respect to CSS: `0x00` is opaque and
    /// `0xFF` is fully transparent.
    fn ass_components(&self) -> (u8, u8, u8, u8) {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        (255 - rgba.a, rgba.b, rgba.g, rgba.r)
    }

    /// Formats this color as an opaque ASS color: `&H00BBGGRR`.
    ///
    /// Any alpha channel of the source color is dropped.
    ///
    /// ```
    /// use squawk_core::color::Color;
    ///
    /// assert_eq!(Color::new("#102030").unwrap().to_ass(), "&H00302010");
    /// assert_eq!(Color::new("#10203080").unwrap().to_ass(), "&H00302010");
    /// ```
    pub fn to_ass(&self) -> String {
        let (_, b, g, r) = self.ass_components();
        format!("&H00{b:02X}{g:02X}{r:02X}")
    }

    /// The two hex digits of the inverted ASS alpha, for `\1a&H..&` overrides.
    pub fn ass_alpha(&self) -> String {
        let (a, _, _, _) = self.ass_components();
        format!("{a:02X}")
    }

    /// The six hex digits `BBGGRR`, for `\1c&H..&` overrides.
    pub fn ass_bgr(&self) -> String {
        let (_, b, g, r) = self.ass_components();
        format!("{b:02X}{g:02X}{r:02X}")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::white()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
