//! Parsed, not yet validated, document structure.
//!
//! The [`parser`](super::parser) groups line tokens into these types; the
//! [`elaborate`](super::elaborate) phase turns them into the typed
//! [`Script`](squawk_core::semantic::Script).

use std::fmt;

use crate::span::{Span, Spanned};

/// Section family, decided from the header prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    SpeakerType,
    MetaType,
    Speaker,
    Meta,
    Acronym,
    Waypoints,
    Render,
    Comms,
}

impl SectionKind {
    /// Header prefix of a named family, e.g. `speakers` for `[speakers.ATC]`.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            SectionKind::SpeakerType => Some("speakerTypes"),
            SectionKind::MetaType => Some("metaTypes"),
            SectionKind::Speaker => Some("speakers"),
            SectionKind::Meta => Some("meta"),
            SectionKind::Acronym => Some("acronyms"),
            SectionKind::Waypoints => Some("waypoints"),
            SectionKind::Render | SectionKind::Comms => None,
        }
    }

    /// Looks up a named family by its prefix, ignoring case.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        [
            SectionKind::SpeakerType,
            SectionKind::MetaType,
            SectionKind::Speaker,
            SectionKind::Meta,
            SectionKind::Acronym,
            SectionKind::Waypoints,
        ]
        .into_iter()
        .find(|kind| {
            kind.prefix()
                .is_some_and(|p| p.eq_ignore_ascii_case(prefix.trim()))
        })
    }

    /// Returns `true` for the two type-definition families.
    pub fn is_type(self) -> bool {
        matches!(self, SectionKind::SpeakerType | SectionKind::MetaType)
    }

    /// Canonical spelling of a section name, used to detect duplicates.
    ///
    /// Type names compare case-insensitively as lowercase, everything else
    /// as uppercase keys.
    pub fn canonical_name(self, name: &str) -> String {
        if self.is_type() {
            name.trim().to_lowercase()
        } else {
            name.trim().to_uppercase()
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::Render => f.write_str("render"),
            SectionKind::Comms => f.write_str("comms"),
            kind => f.write_str(kind.prefix().unwrap_or_default()),
        }
    }
}

/// A `name = value` pair inside a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercased attribute name.
    pub name: Spanned<String>,
    /// Value with one layer of outer quotes removed.
    pub value: Spanned<String>,
}

impl Attribute {
    /// Span covering the name through the value.
    pub fn span(&self) -> Span {
        self.name.span().union(self.value.span())
    }
}

/// A key/value section such as `[speakers.ATC]` or `[render]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub kind: SectionKind,
    /// Name after the family prefix; `None` for `[render]`.
    pub name: Option<Spanned<&'a str>>,
    /// Span of the header name.
    pub header: Span,
    pub attributes: Vec<Attribute>,
}

impl Section<'_> {
    /// Finds an attribute by its lowercase name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| *attr.name == name)
    }
}

/// A `[waypoints.<NAME>]` group of literal tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaypointGroup<'a> {
    pub name: Spanned<&'a str>,
    pub tokens: Vec<Spanned<&'a str>>,
}

/// One `KEY = text` line of the `[comms]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine<'a> {
    /// Key as written; canonicalized during elaboration.
    pub key: Spanned<&'a str>,
    /// Text with one layer of outer quotes removed.
    pub text: Spanned<String>,
    /// 1-based source line number.
    pub line_number: usize,
}

/// The whole document, grouped by section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document<'a> {
    /// Key/value sections in source order.
    pub sections: Vec<Section<'a>>,
    pub waypoints: Vec<WaypointGroup<'a>>,
    pub dialogue: Vec<DialogueLine<'a>>,
    /// Header span of the `[comms]` section, if present.
    pub comms: Option<Span>,
}
