//! Section parser for comms scripts.
//!
//! This module groups the line tokens from the [`lexer`](super::lexer) into
//! the sections of a [`Document`](types::Document). The public entry point
//! is [`build_document`].

use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    parser_types as types,
    span::{Span, Spanned},
    tokens::{PositionedToken, Token},
};

/// Removes one layer of matching outer quotes and unescapes `\"` and `\'`.
pub(crate) fn unquote(value: &str) -> String {
    let value = value.trim();
    let inner = ['"', '\'']
        .into_iter()
        .find_map(|quote| {
            (value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote))
                .then(|| &value[1..value.len() - 1])
        })
        .unwrap_or(value);
    inner.replace("\\\"", "\"").replace("\\'", "'")
}

/// Narrows `name` to the part starting `offset` bytes in, trimmed.
fn sub_name<'a>(name: &Spanned<&'a str>, offset: usize) -> Spanned<&'a str> {
    let rest = &name.inner()[offset..];
    let start = name.span().start() + offset + (rest.len() - rest.trim_start().len());
    let value = rest.trim();
    Spanned::new(value, Span::new(start..start + value.len()))
}

/// Where the lines being read belong.
#[derive(Debug, Clone, Copy)]
enum Current {
    /// Before the first header.
    Preamble,
    /// Index into `Document::sections`.
    Section(usize),
    /// Index into `Document::waypoints`.
    Waypoints(usize),
    Comms,
    /// Unknown or rejected section: lines are checked, then dropped.
    Ignored,
}

struct Parser<'a> {
    document: types::Document<'a>,
    current: Current,
    seen: HashMap<(types::SectionKind, String), Span>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Parser<'a> {
    fn new() -> Self {
        Self {
            document: types::Document::default(),
            current: Current::Preamble,
            seen: HashMap::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn parse(&mut self, tokens: &[PositionedToken<'a>]) {
        for positioned in tokens {
            match &positioned.token {
                Token::Blank | Token::Comment => {}
                Token::Header(name) => self.open_section(name),
                Token::Assignment { key, value } => {
                    self.assignment(key, value, positioned);
                }
                Token::Bare(text) => self.bare(text, positioned),
            }
        }
    }

    fn open_section(&mut self, name: &Spanned<&'a str>) {
        let text = *name.inner();
        let header = name.span();
        trace!(header = text; "Opening section");

        if text.eq_ignore_ascii_case("comms") {
            self.open(types::SectionKind::Comms, None, header);
            return;
        }
        if text.eq_ignore_ascii_case("render") {
            self.open(types::SectionKind::Render, None, header);
            return;
        }

        let family = match text.split_once('.') {
            Some((prefix, _)) => types::SectionKind::from_prefix(prefix)
                .map(|kind| (kind, Some(sub_name(name, prefix.len() + 1)))),
            None => types::SectionKind::from_prefix(text).map(|kind| (kind, None)),
        };

        match family {
            Some((kind, Some(section_name))) if !section_name.is_empty() => {
                self.open(kind, Some(section_name), header);
            }
            Some((kind, _)) => {
                let prefix = kind.prefix().unwrap_or_default();
                self.diagnostics.emit(
                    Diagnostic::error(format!("section `[{text}]` has no name"))
                        .with_code(ErrorCode::E101)
                        .with_label(header, "missing name")
                        .with_help(format!("write the header as `[{prefix}.<name>]`")),
                );
                self.current = Current::Ignored;
            }
            None => {
                self.diagnostics.emit(
                    Diagnostic::warning(format!("unknown section `[{text}]` is ignored"))
                        .with_label(header, "unknown section"),
                );
                self.current = Current::Ignored;
            }
        }
    }

    fn open(
        &mut self,
        kind: types::SectionKind,
        name: Option<Spanned<&'a str>>,
        header: Span,
    ) {
        let canonical = name
            .as_ref()
            .map(|name| kind.canonical_name(name.inner()))
            .unwrap_or_default();

        if let Some(first) = self.seen.get(&(kind, canonical.clone())) {
            self.diagnostics.emit(
                Diagnostic::error(format!("{kind} section is declared twice"))
                    .with_code(ErrorCode::E105)
                    .with_label(header, "duplicate section")
                    .with_secondary_label(*first, "first declared here")
                    .with_help("merge the two sections"),
            );
            self.current = Current::Ignored;
            return;
        }
        self.seen.insert((kind, canonical), header);

        self.current = match (kind, name) {
            (types::SectionKind::Comms, _) => {
                self.document.comms = Some(header);
                Current::Comms
            }
            (types::SectionKind::Waypoints, Some(name)) => {
                self.document.waypoints.push(types::WaypointGroup {
                    name,
                    tokens: Vec::new(),
                });
                Current::Waypoints(self.document.waypoints.len() - 1)
            }
            (_, name) => {
                self.document.sections.push(types::Section {
                    kind,
                    name,
                    header,
                    attributes: Vec::new(),
                });
                Current::Section(self.document.sections.len() - 1)
            }
        };
    }

    fn assignment(
        &mut self,
        key: &Spanned<&'a str>,
        value: &Spanned<&'a str>,
        positioned: &PositionedToken<'a>,
    ) {
        match self.current {
            Current::Preamble => self.outside_section(positioned.span),
            Current::Section(index) => {
                let attribute = types::Attribute {
                    name: Spanned::new(key.inner().to_lowercase(), key.span()),
                    value: Spanned::new(unquote(value.inner()), value.span()),
                };
                let section = &mut self.document.sections[index];
                if let Some(first) = section.attribute(&attribute.name) {
                    let first_span = first.name.span();
                    self.diagnostics.emit(
                        Diagnostic::error(format!(
                            "attribute `{}` is set twice",
                            *attribute.name
                        ))
                        .with_code(ErrorCode::E106)
                        .with_label(attribute.name.span(), "duplicate attribute")
                        .with_secondary_label(first_span, "first set here"),
                    );
                    return;
                }
                section.attributes.push(attribute);
            }
            Current::Waypoints(_) => {
                self.diagnostics.emit(
                    Diagnostic::error("waypoint groups hold tokens, not assignments")
                        .with_code(ErrorCode::E100)
                        .with_label(positioned.span, ErrorCode::E100.description())
                        .with_help("list waypoint tokens separated by commas"),
                );
            }
            Current::Comms => {
                self.document.dialogue.push(types::DialogueLine {
                    key: key.clone(),
                    text: Spanned::new(unquote(value.inner()), value.span()),
                    line_number: positioned.line_number,
                });
            }
            Current::Ignored => {}
        }
    }

    fn bare(&mut self, text: &Spanned<&'a str>, positioned: &PositionedToken<'a>) {
        match self.current {
            Current::Preamble => self.outside_section(positioned.span),
            Current::Waypoints(index) => {
                let group = &mut self.document.waypoints[index];
                let base = text.span().start();
                let mut offset = 0;
                for part in text.inner().split(',') {
                    let part_span = Span::new(base + offset..base + offset + part.len());
                    let token = sub_name(&Spanned::new(part, part_span), 0);
                    if !token.is_empty() {
                        group.tokens.push(token);
                    }
                    offset += part.len() + 1;
                }
            }
            Current::Comms => {
                debug!(line = positioned.line_number; "Skipping dialogue line without `=`");
                self.diagnostics.emit(
                    Diagnostic::warning("dialogue line without `=` is skipped")
                        .with_label(positioned.span, "not a `KEY = text` line"),
                );
            }
            Current::Section(_) | Current::Ignored => {
                self.diagnostics.emit(
                    Diagnostic::error(format!("expected `key = value`, found `{}`", text.inner()))
                        .with_code(ErrorCode::E100)
                        .with_label(positioned.span, ErrorCode::E100.description())
                        .with_help("settings are written as `key = value`"),
                );
            }
        }
    }

    fn outside_section(&mut self, span: Span) {
        self.diagnostics.emit(
            Diagnostic::error("entry appears before any section header")
                .with_code(ErrorCode::E102)
                .with_label(span, "outside any section")
                .with_help("add a section header such as `[comms]` above this line"),
        );
    }

    fn finish(self) -> Result<types::Document<'a>, ParseError> {
        self.diagnostics.finish().map(|()| self.document)
    }
}

/// Groups line tokens into a [`Document`](types::Document).
///
/// Reports every structural problem in one pass: entries before the first
/// header, nameless or duplicate sections, duplicate attributes and lines
/// that are not `key = value` where one is required.
pub fn build_document<'a>(
    tokens: &[PositionedToken<'a>],
) -> Result<types::Document<'a>, ParseError> {
    let mut parser = Parser::new();
    parser.parse(tokens);
    let document = parser.finish()?;
    debug!(
        sections = document.sections.len(),
        waypoint_groups = document.waypoints.len(),
        dialogue_lines = document.dialogue.len();
        "Grouped document sections",
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"Roger, wilco\""), "Roger, wilco");
        assert_eq!(unquote("'it''s'"), "it''s");
        assert_eq!(unquote("\"say \\\"again\\\"\""), "say \"again\"");
        assert_eq!(unquote("pilot\\'s call"), "pilot's call");
        assert_eq!(unquote("\"mismatched'"), "\"mismatched'");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("\"\""), "");
    }

    #[test]
    fn test_sub_name() {
        let header = Spanned::new("speakers. ATC ", Span::new(10..24));
        let name = sub_name(&header, 9);
        assert_eq!(*name.inner(), "ATC");
        assert_eq!(name.span(), Span::new(20..23));
    }
}
