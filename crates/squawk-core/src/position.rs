//! Screen anchoring for subtitle rows.
//!
//! A [`Position`] pairs a [`Vertical`] row with a [`Horizontal`] column and
//! maps onto the nine ASS numpad alignments.

use std::fmt;

/// Vertical row of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertical {
    Top,
    Middle,
    Bottom,
}

impl Vertical {
    /// Parses a vertical token; `center` is accepted as an alias of `middle`.
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "top" => Some(Self::Top),
            "middle" | "center" => Some(Self::Middle),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

/// Horizontal column of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizontal {
    Left,
    Center,
    Right,
}

impl Horizontal {
    /// Parses a horizontal token; `middle` is accepted as an alias of `center`.
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "left" => Some(Self::Left),
            "center" | "middle" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// One of the nine screen anchors.
///
/// # Examples
///
/// ```
/// use squawk_core::position::Position;
///
/// assert_eq!(Position::normalize("Top_Right").alignment(), 9);
/// assert_eq!(Position::normalize("center").to_string(), "bottom-center");
/// assert_eq!(Position::normalize("middle").to_string(), "bottom-center");
/// assert_eq!(Position::normalize("top").to_string(), "top-left");
/// assert_eq!(Position::normalize("nowhere").to_string(), "bottom-left");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    vertical: Vertical,
    horizontal: Horizontal,
}

impl Position {
    pub fn new(vertical: Vertical, horizontal: Horizontal) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Normalizes free-form position text.
    ///
    /// Tokens are case-insensitive and separated by `-` or `_`. Two tokens may
    /// appear in either order. A single token is read as a column on the
    /// bottom row when possible, else as a row anchored left. Anything else
    /// falls back to [`Position::default`].
    pub fn normalize(text: &str) -> Self {
        let lowered = text.trim().to_lowercase();
        let parts: Vec<&str> = lowered
            .split(['-', '_'])
            .filter(|part| !part.is_empty())
            .collect();

        match parts.as_slice() {
            [] => Self::default(),
            [token] => {
                if let Some(horizontal) = Horizontal::from_token(token) {
                    Self::new(Vertical::Bottom, horizontal)
                } else if let Some(vertical) = Vertical::from_token(token) {
                    Self::new(vertical, Horizontal::Left)
                } else {
                    Self::default()
                }
            }
            [first, second, ..] => {
                let in_order = Vertical::from_token(first).zip(Horizontal::from_token(second));
                let swapped = Vertical::from_token(second).zip(Horizontal::from_token(first));
                in_order
                    .or(swapped)
                    .map(|(vertical, horizontal)| Self::new(vertical, horizontal))
                    .unwrap_or_default()
            }
        }
    }

    pub fn vertical(self) -> Vertical {
        self.vertical
    }

    pub fn horizontal(self) -> Horizontal {
        self.horizontal
    }

    /// ASS numpad alignment: bottom row 1-3, middle row 4-6, top row 7-9.
    pub fn alignment(self) -> u8 {
        let row = match self.vertical {
            Vertical::Bottom => 0,
            Vertical::Middle => 3,
            Vertical::Top => 6,
        };
        let column = match self.horizontal {
            Horizontal::Left => 1,
            Horizontal::Center => 2,
            Horizontal::Right => 3,
        };
        row + column
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(Vertical::Bottom, Horizontal::Left)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.vertical.as_str(), self.horizontal.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_ordinals() {
        let cases = [
            ("bottom-left", 1),
            ("bottom-center", 2),
            ("bottom-right", 3),
            ("middle-left", 4),
            ("middle-center", 5),
            ("middle-right", 6),
            ("top-left", 7),
            ("top-center", 8),
            ("top-right", 9),
        ];
        for (text, expected) in cases {
            assert_eq!(Position::normalize(text).alignment(), expected, "{text}");
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(Position::normalize("center-middle").to_string(), "middle-center");
        assert_eq!(Position::normalize("center_center").to_string(), "middle-center");
    }

    #[test]
    fn test_reversed_order() {
        assert_eq!(Position::normalize("right-top").to_string(), "top-right");
        assert_eq!(Position::normalize("LEFT_MIDDLE").to_string(), "middle-left");
    }

    #[test]
    fn test_single_token_prefers_horizontal() {
        assert_eq!(Position::normalize("right").to_string(), "bottom-right");
        assert_eq!(Position::normalize("bottom").to_string(), "bottom-left");
    }

    #[test]
    fn test_unparseable_defaults() {
        assert_eq!(Position::normalize("").to_string(), "bottom-left");
        assert_eq!(Position::normalize("up-left").to_string(), "bottom-left");
        assert_eq!(Position::normalize("---").to_string(), "bottom-left");
    }
}
