//! The loaded script: declarations plus the ordered dialogue.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::{
    identifier::Id,
    semantic::entry::{Entry, TypeDefinition},
};

/// Acronym keys mapped to their spoken expansion.
///
/// Keys are stored uppercase; lookups are exact on the uppercase form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acronyms {
    expansions: IndexMap<String, String>,
}

impl Acronyms {
    pub fn insert(&mut self, key: &str, expansion: impl Into<String>) {
        self.expansions
            .insert(key.trim().to_uppercase(), expansion.into());
    }

    /// Returns the expansion for an uppercase key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.expansions.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.expansions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.expansions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expansions.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Acronyms {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut acronyms = Self::default();
        for (key, expansion) in iter {
            acronyms.insert(key.as_ref(), expansion);
        }
        acronyms
    }
}

/// Named groups of literal tokens that are never spelled phonetically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Waypoints {
    groups: IndexMap<String, Vec<String>>,
    literals: HashSet<String>,
}

impl Waypoints {
    /// Adds `tokens` to the group `name`, creating the group if needed.
    pub fn extend_group<I, S>(&mut self, name: &str, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let group = self.groups.entry(name.to_string()).or_default();
        for token in tokens {
            let token = token.into();
            self.literals.insert(token.to_uppercase());
            group.push(token);
        }
    }

    /// Returns `true` when `token` (compared uppercase) is a waypoint literal.
    pub fn contains(&self, token: &str) -> bool {
        self.literals.contains(&token.to_uppercase())
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, tokens)| (name.as_str(), tokens.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

/// Render options declared by the script's `[render]` section.
///
/// Each value overrides the corresponding application setting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderOverrides {
    play_res_x: Option<u32>,
    play_res_y: Option<u32>,
    wrap_width_ratio: Option<f64>,
}

impl RenderOverrides {
    pub fn with_play_res_x(mut self, value: u32) -> Self {
        self.play_res_x = Some(value);
        self
    }

    pub fn with_play_res_y(mut self, value: u32) -> Self {
        self.play_res_y = Some(value);
        self
    }

    pub fn with_wrap_width_ratio(mut self, value: f64) -> Self {
        self.wrap_width_ratio = Some(value);
        self
    }

    pub fn play_res_x(&self) -> Option<u32> {
        self.play_res_x
    }

    pub fn play_res_y(&self) -> Option<u32> {
        self.play_res_y
    }

    pub fn wrap_width_ratio(&self) -> Option<f64> {
        self.wrap_width_ratio
    }
}

/// One `KEY = text` line of the dialogue section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    index: usize,
    key: Id,
    text: String,
    line_number: usize,
}

impl ScriptLine {
    /// Creates a dialogue line at position `index` of the dialogue, read from
    /// 1-based source line `line_number`.
    pub fn new(index: usize, key: Id, text: impl Into<String>, line_number: usize) -> Self {
        Self {
            index,
            key,
            text: text.into(),
            line_number,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn key(&self) -> Id {
        self.key
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

/// A dialogue line whose key is a timestamp entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    line_index: usize,
    time_ms: u64,
    cps: f64,
}

impl Marker {
    pub fn new(line_index: usize, time_ms: u64, cps: f64) -> Self {
        Self {
            line_index,
            time_ms,
            cps,
        }
    }

    /// Index of the marker line in the dialogue.
    pub fn line_index(&self) -> usize {
        self.line_index
    }

    /// Absolute time offset in milliseconds.
    pub fn time_ms(&self) -> u64 {
        self.time_ms
    }

    /// Speech rate for the block this marker opens.
    pub fn cps(&self) -> f64 {
        self.cps
    }
}

/// Everything declared outside the dialogue section.
#[derive(Debug, Clone, Default)]
pub struct Declarations {
    /// Speaker entries in declaration order.
    pub speakers: IndexMap<Id, Entry>,
    /// Meta entries in declaration order.
    pub meta: IndexMap<Id, Entry>,
    /// Types keyed by lowercase name.
    pub types: IndexMap<String, TypeDefinition>,
    pub acronyms: Acronyms,
    pub waypoints: Waypoints,
    pub render: RenderOverrides,
}

/// A fully validated comms script.
#[derive(Debug, Clone, Default)]
pub struct Script {
    declarations: Declarations,
    lines: Vec<ScriptLine>,
    markers: Vec<Marker>,
}

impl Script {
    /// Creates a script. `markers` must be ordered by line index.
    pub fn new(declarations: Declarations, lines: Vec<ScriptLine>, markers: Vec<Marker>) -> Self {
        Self {
            declarations,
            lines,
            markers,
        }
    }

    /// Replaces the dialogue, keeping the declarations.
    pub fn with_dialogue(mut self, lines: Vec<ScriptLine>, markers: Vec<Marker>) -> Self {
        self.lines = lines;
        self.markers = markers;
        self
    }

    pub fn speakers(&self) -> &IndexMap<Id, Entry> {
        &self.declarations.speakers
    }

    pub fn meta(&self) -> &IndexMap<Id, Entry> {
        &self.declarations.meta
    }

    pub fn types(&self) -> &IndexMap<String, TypeDefinition> {
        &self.declarations.types
    }

    pub fn acronyms(&self) -> &Acronyms {
        &self.declarations.acronyms
    }

    pub fn waypoints(&self) -> &Waypoints {
        &self.declarations.waypoints
    }

    pub fn render(&self) -> &RenderOverrides {
        &self.declarations.render
    }

    /// Dialogue lines in source order, duplicates included.
    pub fn lines(&self) -> &[ScriptLine] {
        &self.lines
    }

    /// Markers ordered by line index.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// The entry that governs `key`: the speaker entry, else the meta entry.
    pub fn entry(&self, key: Id) -> Option<&Entry> {
        self.speakers().get(&key).or_else(|| self.meta().get(&key))
    }

    /// The type referenced by `entry`, looked up case-insensitively.
    pub fn type_of(&self, entry: &Entry) -> Option<&TypeDefinition> {
        entry
            .type_name()
            .and_then(|name| self.types().get(&name.trim().to_lowercase()))
    }

    /// Returns `true` when `key` resolves to an entry of the timestamp type.
    pub fn is_marker_key(&self, key: Id) -> bool {
        self.entry(key)
            .and_then(|entry| self.type_of(entry))
            .is_some_and(TypeDefinition::is_timestamp)
    }

    /// Returns `true` when lines for `key` belong on the meta rail: the key is
    /// a non-marker meta entry that is not also a speaker.
    pub fn is_meta_rail_key(&self, key: Id) -> bool {
        self.meta().contains_key(&key)
            && !self.speakers().contains_key(&key)
            && !self.is_marker_key(key)
    }

    /// Keys that get a style row: speakers in declaration order, then
    /// non-marker meta keys not already listed.
    pub fn style_keys(&self) -> Vec<Id> {
        let mut keys: Vec<Id> = self.speakers().keys().copied().collect();
        keys.extend(
            self.meta()
                .keys()
                .copied()
                .filter(|key| !self.speakers().contains_key(key) && !self.is_marker_key(*key)),
        );
        keys
    }
}
