//! Cascading style resolution.
//!
//! Every attribute resolves in the same order: the entry's own value, else
//! the value of the type it references, else a hard default. Keys without a
//! speaker entry fall back to a meta entry of the same key.

use crate::{
    color::Color,
    identifier::Id,
    position::Position,
    semantic::{Attributes, Background, DEFAULT_CPS, Entry, Script, TimestampFormat, TypeDefinition},
};

/// Visual style of one participant after the cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    display_name: String,
    position: Position,
    color: Color,
    background: Background,
    show_name: bool,
    background_lines_threshold: u32,
}

impl ResolvedStyle {
    /// Resolves the style of `key` from its entry and that entry's type.
    ///
    /// Both lookups are optional so undeclared keys resolve to the defaults.
    pub fn resolve(key: Id, entry: Option<&Entry>, type_def: Option<&TypeDefinition>) -> Self {
        Self {
            display_name: entry.map_or_else(|| key.to_string(), Entry::display_name),
            position: cascade(entry, type_def, Attributes::position).unwrap_or_default(),
            color: cascade(entry, type_def, Attributes::color).unwrap_or_else(Color::white),
            background: cascade(entry, type_def, Attributes::background).unwrap_or_default(),
            show_name: cascade(entry, type_def, Attributes::show_name).unwrap_or(false),
            background_lines_threshold: cascade(
                entry,
                type_def,
                Attributes::background_lines_threshold,
            )
            .unwrap_or(1),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn show_name(&self) -> bool {
        self.show_name
    }

    pub fn background_lines_threshold(&self) -> u32 {
        self.background_lines_threshold
    }

    /// Returns `true` when a line with `line_count` rendered lines gets a
    /// background box.
    pub fn wants_background(&self, line_count: usize) -> bool {
        self.background.color().is_some()
            && line_count >= self.background_lines_threshold as usize
    }
}

/// Timing settings of a timestamp entry after the cascade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTiming {
    format: TimestampFormat,
    cps: f64,
}

impl ResolvedTiming {
    pub fn resolve(entry: Option<&Entry>, type_def: Option<&TypeDefinition>) -> Self {
        Self {
            format: cascade(entry, type_def, Attributes::format).unwrap_or_default(),
            cps: cascade(entry, type_def, Attributes::cps).unwrap_or(DEFAULT_CPS),
        }
    }

    pub fn format(&self) -> TimestampFormat {
        self.format
    }

    pub fn cps(&self) -> f64 {
        self.cps
    }
}

/// Returns the first value set on the entry, else on its type.
fn cascade<T>(
    entry: Option<&Entry>,
    type_def: Option<&TypeDefinition>,
    get: impl Fn(&Attributes) -> Option<T>,
) -> Option<T> {
    entry
        .and_then(|entry| get(entry.attributes()))
        .or_else(|| type_def.and_then(|type_def| get(type_def.attributes())))
}

impl Script {
    /// Resolves the visual style of `key`.
    pub fn resolve_style(&self, key: Id) -> ResolvedStyle {
        let entry = self.entry(key);
        ResolvedStyle::resolve(key, entry, entry.and_then(|entry| self.type_of(entry)))
    }

    /// Resolves the timing settings of `key`.
    pub fn resolve_timing(&self, key: Id) -> ResolvedTiming {
        let entry = self.entry(key);
        ResolvedTiming::resolve(entry, entry.and_then(|entry| self.type_of(entry)))
    }
}
