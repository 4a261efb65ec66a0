//! Elaboration phase for comms scripts.
//!
//! This module turns a parsed [`Document`](parser_types::Document) into the
//! typed [`Script`](semantic::Script). It parses every attribute value into
//! its typed form, checks the timing/visual attribute rules, resolves type
//! references and computes the dialogue markers. All problems are collected
//! so a single run reports every one of them.

use std::{collections::HashMap, str::FromStr};

use log::{debug, info, trace};

use squawk_core::{
    color::Color,
    identifier::Id,
    position::Position,
    semantic::{self, Attributes, Background, Family, TimestampFormat, TypeDefinition},
};

use crate::{
    builtin_types,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError, Result},
    parser_types::{self, Attribute, SectionKind},
    span::Span,
    timestamp::{TimestampError, parse_timestamp},
};

/// Attributes only a `Timestamp` type or entry may set.
const TIMING_ATTRIBUTES: [&str; 2] = ["format", "cps"];

/// Attributes a `Timestamp` type or entry may not set.
const VISUAL_ATTRIBUTES: [&str; 3] = ["position", "color", "background"];

/// Attributes an entry section accepts on top of the shared ones.
const ENTRY_ATTRIBUTES: [&str; 2] = ["name", "type"];

/// Builds a [`semantic::Script`] from a parsed document.
///
/// A builder is used once: [`Builder::build`] consumes it. Declarations are
/// accumulated section by section, and every problem goes to the collector
/// instead of stopping the build.
pub struct Builder {
    declarations: semantic::Declarations,
    /// Header spans of declared types, keyed by lowercase name.
    type_spans: HashMap<String, Span>,
    /// Problems found so far, in source order per phase.
    diagnostics: DiagnosticCollector,
}

impl Builder {
    /// Creates a builder with the default render settings and no declarations.
    pub fn new() -> Self {
        Self {
            declarations: semantic::Declarations::default(),
            type_spans: HashMap::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    // ============================================================================
    // Main Entry Methods
    // ============================================================================

    /// Elaborates `document` into a script.
    ///
    /// Type sections are processed before entries so an entry may name a type
    /// declared further down. Built-in types fill in any name left undeclared.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] carrying every diagnostic, warnings included,
    /// when at least one error was emitted.
    pub fn build(mut self, document: &parser_types::Document<'_>) -> std::result::Result<semantic::Script, ParseError> {
        info!(
            sections = document.sections.len(),
            dialogue_lines = document.dialogue.len();
            "Elaborating script",
        );

        // Types first: entries refer to them.
        for section in &document.sections {
            match section.kind {
                SectionKind::SpeakerType => self.add_type(section, Family::Speaker),
                SectionKind::MetaType => self.add_type(section, Family::Meta),
                _ => {}
            }
        }
        self.add_builtin_types();

        for section in &document.sections {
            match section.kind {
                SectionKind::Speaker => self.add_entry(section, Family::Speaker),
                SectionKind::Meta => self.add_entry(section, Family::Meta),
                SectionKind::Acronym => self.add_acronym(section),
                SectionKind::Render => self.add_render(section),
                _ => {}
            }
        }

        for group in &document.waypoints {
            self.declarations.waypoints.extend_group(
                &group.name.inner().to_uppercase(),
                group.tokens.iter().map(|token| *token.inner()),
            );
        }

        if document.comms.is_none() {
            self.diagnostics.emit(
                Diagnostic::warning("script has no `[comms]` section")
                    .with_help("add a `[comms]` section with the dialogue lines"),
            );
        }

        trace!(declarations:? = self.declarations; "Elaborated declarations");

        let script = semantic::Script::new(self.declarations, Vec::new(), Vec::new());
        let (lines, markers) = Self::build_dialogue(&script, &document.dialogue, &mut self.diagnostics);
        self.diagnostics.finish()?;

        info!(
            speakers = script.speakers().len(),
            meta = script.meta().len(),
            lines = lines.len(),
            markers = markers.len();
            "Script elaboration completed successfully",
        );
        Ok(script.with_dialogue(lines, markers))
    }

    // ============================================================================
    // Attribute Value Extraction Helpers
    // ============================================================================
    // These associated functions parse an attribute value into its typed form
    // with consistent error messages.

    /// Extract a color.
    fn extract_color(attr: &Attribute) -> Result<Color> {
        let value = attr.value.inner().trim();
        Color::new(value).map_err(|err| {
            Diagnostic::warning(format!("{err}, using white"))
                .with_code(ErrorCode::E403)
                .with_label(attr.value.span(), "invalid color")
                .with_help("use a CSS color such as `white`, `#ffcc00` or `rgba(0, 0, 0, 0.6)`")
        })
    }

    /// Extract a background: `none` or a color.
    fn extract_background(attr: &Attribute) -> Result<Background> {
        if attr.value.inner().trim().eq_ignore_ascii_case("none") {
            return Ok(Background::None);
        }
        Self::extract_color(attr).map(Background::Fill)
    }

    /// Parses a color attribute, warning and substituting white when the
    /// value is not a color.
    fn color_or_white(&mut self, attr: &Attribute) -> Color {
        Self::extract_color(attr).unwrap_or_else(|diagnostic| {
            self.diagnostics.emit(diagnostic);
            Color::white()
        })
    }

    /// Like [`Self::color_or_white`], keeping `none` as no background.
    fn background_or_white(&mut self, attr: &Attribute) -> Background {
        Self::extract_background(attr).unwrap_or_else(|diagnostic| {
            self.diagnostics.emit(diagnostic);
            Background::Fill(Color::white())
        })
    }

    /// Extract a boolean: `1`, `true`, `yes`, `on` or `0`, `false`, `no`, `off`.
    fn extract_bool(attr: &Attribute) -> Result<bool> {
        match attr.value.inner().trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(Diagnostic::error(format!(
                "`{other}` is not a boolean for `{}`",
                *attr.name
            ))
            .with_code(ErrorCode::E402)
            .with_label(attr.value.span(), "invalid boolean")
            .with_help("use one of `true`, `false`, `yes`, `no`, `on`, `off`, `1`, `0`")),
        }
    }

    /// Extract an integer of at least 1.
    fn extract_positive_int(attr: &Attribute) -> Result<u32> {
        let value = attr.value.inner().trim();
        value
            .parse::<u32>()
            .ok()
            .filter(|number| *number >= 1)
            .ok_or_else(|| {
                Diagnostic::error(format!("`{value}` is not a valid `{}`", *attr.name))
                    .with_code(ErrorCode::E401)
                    .with_label(attr.value.span(), "invalid integer")
                    .with_help(format!("`{}` must be a whole number of at least 1", *attr.name))
            })
    }

    /// Extract a finite number greater than zero.
    fn extract_positive_float(attr: &Attribute) -> Result<f64> {
        let value = attr.value.inner().trim();
        value
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite() && *number > 0.0)
            .ok_or_else(|| {
                Diagnostic::error(format!("`{value}` is not a valid `{}`", *attr.name))
                    .with_code(ErrorCode::E400)
                    .with_label(attr.value.span(), "invalid number")
                    .with_help(format!("`{}` must be a number greater than 0", *attr.name))
            })
    }

    /// Extract a timestamp format.
    fn extract_format(attr: &Attribute) -> Result<TimestampFormat> {
        let value = attr.value.inner().trim();
        TimestampFormat::from_str(value).map_err(|_| {
            Diagnostic::error(format!("unknown timestamp format `{value}`"))
                .with_code(ErrorCode::E404)
                .with_label(attr.value.span(), "unknown format")
                .with_help("supported formats are `ss`, `mm:ss` and `hh:mm:ss`")
        })
    }

    /// Parses the shared attributes of a type or entry section.
    ///
    /// Schema violations are reported by attribute presence, even when the
    /// value is empty. Empty values otherwise count as unset.
    fn extract_attributes(
        &mut self,
        section: &parser_types::Section<'_>,
        subject: &str,
        is_timestamp: bool,
        extra: &[&str],
    ) -> Attributes {
        let mut attributes = Attributes::default();

        for attr in &section.attributes {
            let name = attr.name.inner().as_str();

            if is_timestamp && VISUAL_ATTRIBUTES.contains(&name) {
                self.diagnostics.emit(
                    Diagnostic::error(format!("{subject} is a timestamp and cannot set `{name}`"))
                        .with_code(ErrorCode::E201)
                        .with_label(attr.span(), "visual attribute")
                        .with_help("timestamp declarations only accept `format` and `cps`"),
                );
                continue;
            }
            if !is_timestamp && TIMING_ATTRIBUTES.contains(&name) {
                self.diagnostics.emit(
                    Diagnostic::error(format!("{subject} is not a timestamp and cannot set `{name}`"))
                        .with_code(ErrorCode::E200)
                        .with_label(attr.span(), "timing attribute")
                        .with_help("only `Timestamp` types and their entries accept `format` and `cps`"),
                );
                continue;
            }
            if attr.value.inner().trim().is_empty() {
                continue;
            }

            match name {
                "position" => {
                    attributes = attributes.with_position(Position::normalize(attr.value.inner()));
                }
                "color" => {
                    attributes = attributes.with_color(self.color_or_white(attr));
                }
                "background" => {
                    attributes = attributes.with_background(self.background_or_white(attr));
                }
                "show_name" => {
                    if let Some(show_name) = self.diagnostics.check(Self::extract_bool(attr)) {
                        attributes = attributes.with_show_name(show_name);
                    }
                }
                "background_lines_threshold" => {
                    if let Some(threshold) = self.diagnostics.check(Self::extract_positive_int(attr)) {
                        attributes = attributes.with_background_lines_threshold(threshold);
                    }
                }
                "format" => {
                    if let Some(format) = self.diagnostics.check(Self::extract_format(attr)) {
                        attributes = attributes.with_format(format);
                    }
                }
                "cps" => {
                    if let Some(cps) = self.diagnostics.check(Self::extract_positive_float(attr)) {
                        attributes = attributes.with_cps(cps);
                    }
                }
                other if extra.contains(&other) => {}
                other => self.unknown_attribute(attr, other, subject),
            }
        }

        attributes
    }

    /// Warns that `name` is ignored on `subject`.
    fn unknown_attribute(&mut self, attr: &Attribute, name: &str, subject: &str) {
        self.diagnostics.emit(
            Diagnostic::warning(format!("unknown attribute `{name}` on {subject} is ignored"))
                .with_label(attr.name.span(), "unknown attribute"),
        );
    }

    // ============================================================================
    // Declaration Methods
    // ============================================================================

    /// Declares a speaker or meta type.
    ///
    /// A second declaration under the same case-insensitive name is an error,
    /// whatever its family, and is dropped.
    fn add_type(&mut self, section: &parser_types::Section<'_>, family: Family) {
        let Some(name) = &section.name else {
            return;
        };
        let key = section.kind.canonical_name(name.inner());

        if let Some(first) = self.type_spans.get(&key) {
            self.diagnostics.emit(
                Diagnostic::error(format!("type `{}` is declared twice", name.inner()))
                    .with_code(ErrorCode::E203)
                    .with_label(name.span(), "duplicate type definition")
                    .with_secondary_label(*first, "first declared here")
                    .with_help("type names are shared by speaker and meta types"),
            );
            return;
        }

        let is_timestamp = semantic::is_timestamp_name(name.inner());
        let subject = format!("type `{}`", name.inner());
        let attributes = self.extract_attributes(section, &subject, is_timestamp, &[]);

        debug!(name = *name.inner(), family:% = family, is_timestamp; "Type definition added");
        self.type_spans.insert(key.clone(), name.span());
        self.declarations
            .types
            .insert(key, TypeDefinition::new(*name.inner(), family, attributes));
    }

    /// Adds the built-in types the script did not override.
    fn add_builtin_types(&mut self) {
        for type_def in builtin_types::defaults() {
            let key = type_def.name().to_lowercase();
            if !self.declarations.types.contains_key(&key) {
                self.declarations.types.insert(key, type_def);
            }
        }
    }

    /// Declares a speaker or meta entry.
    ///
    /// The referenced type decides whether timing attributes are allowed. An
    /// undefined type is a warning and the entry keeps the default style.
    fn add_entry(&mut self, section: &parser_types::Section<'_>, family: Family) {
        let Some(name) = &section.name else {
            return;
        };
        let key = Id::new(name.inner());
        let subject = format!("{family} `{key}`");

        let type_name = section
            .attribute("type")
            .filter(|attr| !attr.value.inner().trim().is_empty());

        let is_timestamp = match type_name {
            Some(attr) => {
                let type_name = attr.value.inner().trim();
                match self.declarations.types.get(&type_name.to_lowercase()) {
                    Some(type_def) => type_def.is_timestamp(),
                    None => {
                        self.diagnostics.emit(
                            Diagnostic::warning(format!(
                                "{subject} references undefined type `{type_name}`, using default style"
                            ))
                            .with_code(ErrorCode::E202)
                            .with_label(attr.value.span(), "not declared")
                            .with_help(format!(
                                "declare `[speakerTypes.{type_name}]` or `[metaTypes.{type_name}]`"
                            )),
                        );
                        false
                    }
                }
            }
            None => false,
        };

        let attributes = self.extract_attributes(section, &subject, is_timestamp, &ENTRY_ATTRIBUTES);

        let mut entry = semantic::Entry::new(key, family).with_attributes(attributes);
        if let Some(display_name) = section
            .attribute("name")
            .map(|attr| attr.value.inner().trim())
            .filter(|value| !value.is_empty())
        {
            entry = entry.with_display_name(display_name);
        }
        if let Some(attr) = type_name {
            entry = entry.with_type_name(attr.value.inner().trim());
        }

        debug!(key:% = key, family:% = family, is_timestamp; "Entry added");
        match family {
            Family::Speaker => self.declarations.speakers.insert(key, entry),
            Family::Meta => self.declarations.meta.insert(key, entry),
        };
    }

    /// Records the spoken extension of an acronym.
    fn add_acronym(&mut self, section: &parser_types::Section<'_>) {
        let Some(name) = &section.name else {
            return;
        };
        let subject = format!("acronym `{}`", name.inner().to_uppercase());

        for attr in &section.attributes {
            if *attr.name != "extension" {
                self.unknown_attribute(attr, attr.name.inner(), &subject);
            }
        }

        match section
            .attribute("extension")
            .map(|attr| attr.value.inner().trim())
            .filter(|value| !value.is_empty())
        {
            Some(extension) => {
                trace!(key = *name.inner(), extension; "Acronym added");
                self.declarations.acronyms.insert(name.inner(), extension);
            }
            None => self.diagnostics.emit(
                Diagnostic::warning(format!("{subject} has no `extension` and is ignored"))
                    .with_label(section.header, "missing extension"),
            ),
        }
    }

    /// Applies `[render]` overrides on top of the current settings.
    ///
    /// Empty values keep the default, invalid ones are reported and skipped.
    fn add_render(&mut self, section: &parser_types::Section<'_>) {
        let mut render = self.declarations.render;

        for attr in &section.attributes {
            if attr.value.inner().trim().is_empty() {
                continue;
            }
            match attr.name.inner().as_str() {
                "play_res_x" => {
                    if let Some(value) = self.diagnostics.check(Self::extract_positive_int(attr)) {
                        render = render.with_play_res_x(value);
                    }
                }
                "play_res_y" => {
                    if let Some(value) = self.diagnostics.check(Self::extract_positive_int(attr)) {
                        render = render.with_play_res_y(value);
                    }
                }
                "wrap_width_ratio" => {
                    if let Some(value) = self.diagnostics.check(Self::extract_positive_float(attr)) {
                        render = render.with_wrap_width_ratio(value);
                    }
                }
                other => self.unknown_attribute(attr, other, "the render section"),
            }
        }

        debug!(render:? = render; "Render overrides");
        self.declarations.render = render;
    }

    // ============================================================================
    // Dialogue Methods
    // ============================================================================

    /// Canonicalizes dialogue keys and computes the markers.
    fn build_dialogue(
        script: &semantic::Script,
        dialogue: &[parser_types::DialogueLine<'_>],
        diagnostics: &mut DiagnosticCollector,
    ) -> (Vec<semantic::ScriptLine>, Vec<semantic::Marker>) {
        let mut lines = Vec::with_capacity(dialogue.len());
        let mut markers = Vec::new();

        for (index, line) in dialogue.iter().enumerate() {
            let key = Id::new(line.key.inner());
            let line_span = line.key.span().union(line.text.span());
            let is_marker = script.is_marker_key(key);

            if index == 0 && !is_marker {
                diagnostics.emit(
                    Diagnostic::error(format!("dialogue starts with `{key}`, which is not a marker"))
                        .with_code(ErrorCode::E103)
                        .with_label(line.key.span(), "first dialogue line")
                        .with_help("start `[comms]` with a timestamp marker such as `TS = 00:00`"),
                );
            }

            if is_marker {
                let timing = script.resolve_timing(key);
                match parse_timestamp(line.text.inner(), timing.format()) {
                    Ok(time_ms) => {
                        trace!(line = line.line_number, time_ms; "Marker");
                        markers.push(semantic::Marker::new(index, time_ms, timing.cps()));
                    }
                    Err(err) => diagnostics.emit(Self::timestamp_error(err, line_span)),
                }
            } else if script.entry(key).is_none() {
                diagnostics.emit(
                    Diagnostic::error(format!("unknown dialogue key `{key}`"))
                        .with_code(ErrorCode::E104)
                        .with_label(line.key.span(), "not declared")
                        .with_help(format!("declare `[speakers.{key}]` or `[meta.{key}]`")),
                );
            }

            lines.push(semantic::ScriptLine::new(
                index,
                key,
                line.text.inner().as_str(),
                line.line_number,
            ));
        }

        (lines, markers)
    }

    /// Maps a timestamp failure to its diagnostic code and help text.
    fn timestamp_error(err: TimestampError, span: Span) -> Diagnostic {
        let (code, help) = match &err {
            TimestampError::Empty => (ErrorCode::E300, "give the marker a time such as `00:00`".to_string()),
            TimestampError::ComponentCount { format, .. } => (
                ErrorCode::E301,
                format!("write the time as `{format}` or change the marker's `format`"),
            ),
            TimestampError::NonNumeric { .. } => {
                (ErrorCode::E302, "time components are whole numbers".to_string())
            }
        };
        Diagnostic::error(err.to_string())
            .with_code(code)
            .with_label(span, code.description())
            .with_help(help)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
