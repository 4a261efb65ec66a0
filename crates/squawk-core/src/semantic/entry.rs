//! Type and entry declarations.
//!
//! A script declares named types under `[speakerTypes.<Name>]` and
//! `[metaTypes.<Name>]`, and entries under `[speakers.<KEY>]` and
//! `[meta.<KEY>]`. Both carry the same optional [`Attributes`]; entries may
//! additionally reference a type and set a display name.

use std::{fmt, str::FromStr};

use crate::{color::Color, identifier::Id, position::Position};

/// Reserved type name (case-insensitive) that turns entries into markers.
pub const TIMESTAMP_TYPE: &str = "timestamp";

/// Default speech rate in units per second.
pub const DEFAULT_CPS: f64 = 15.0;

/// Returns `true` when `name` is the reserved timestamp type name.
pub fn is_timestamp_name(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(TIMESTAMP_TYPE)
}

/// Which section family a declaration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Speaker,
    Meta,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Speaker => write!(f, "speaker"),
            Self::Meta => write!(f, "meta"),
        }
    }
}

/// Layout of a marker value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampFormat {
    /// `ss`
    Seconds,
    /// `mm:ss`
    #[default]
    MinutesSeconds,
    /// `hh:mm:ss`
    HoursMinutesSeconds,
}

impl TimestampFormat {
    /// Number of `:`-separated components a value must have.
    pub fn component_count(self) -> usize {
        match self {
            Self::Seconds => 1,
            Self::MinutesSeconds => 2,
            Self::HoursMinutesSeconds => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seconds => "ss",
            Self::MinutesSeconds => "mm:ss",
            Self::HoursMinutesSeconds => "hh:mm:ss",
        }
    }
}

impl FromStr for TimestampFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ss" => Ok(Self::Seconds),
            "mm:ss" => Ok(Self::MinutesSeconds),
            "hh:mm:ss" => Ok(Self::HoursMinutesSeconds),
            _ => Err("Unsupported timestamp format"),
        }
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Background fill behind a dialogue line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    /// No background box (`background = none`).
    #[default]
    None,
    Fill(Color),
}

impl Background {
    /// Returns the fill color, if any.
    pub fn color(&self) -> Option<Color> {
        match self {
            Self::None => None,
            Self::Fill(color) => Some(*color),
        }
    }
}

/// Optional attribute values shared by types and entries.
///
/// Unset attributes fall through the cascade: entry, then type, then the
/// hard default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    position: Option<Position>,
    color: Option<Color>,
    background: Option<Background>,
    show_name: Option<bool>,
    background_lines_threshold: Option<u32>,
    format: Option<TimestampFormat>,
    cps: Option<f64>,
}

impl Attributes {
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_show_name(mut self, show_name: bool) -> Self {
        self.show_name = Some(show_name);
        self
    }

    pub fn with_background_lines_threshold(mut self, threshold: u32) -> Self {
        self.background_lines_threshold = Some(threshold);
        self
    }

    pub fn with_format(mut self, format: TimestampFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_cps(mut self, cps: f64) -> Self {
        self.cps = Some(cps);
        self
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn background(&self) -> Option<Background> {
        self.background
    }

    pub fn show_name(&self) -> Option<bool> {
        self.show_name
    }

    pub fn background_lines_threshold(&self) -> Option<u32> {
        self.background_lines_threshold
    }

    pub fn format(&self) -> Option<TimestampFormat> {
        self.format
    }

    pub fn cps(&self) -> Option<f64> {
        self.cps
    }
}

/// A named type under `[speakerTypes.<Name>]` or `[metaTypes.<Name>]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    name: String,
    family: Family,
    attributes: Attributes,
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>, family: Family, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            family,
            attributes,
        }
    }

    /// The type name as written in the section header.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns `true` for the reserved timestamp type.
    pub fn is_timestamp(&self) -> bool {
        is_timestamp_name(&self.name)
    }
}

/// A participant under `[speakers.<KEY>]` or `[meta.<KEY>]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    key: Id,
    family: Family,
    display_name: Option<String>,
    type_name: Option<String>,
    attributes: Attributes,
}

impl Entry {
    pub fn new(key: Id, family: Family) -> Self {
        Self {
            key,
            family,
            display_name: None,
            type_name: None,
            attributes: Attributes::default(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn key(&self) -> Id {
        self.key
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// The display name, defaulting to the key.
    pub fn display_name(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| self.key.to_string())
    }

    /// The referenced type name, if any.
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
