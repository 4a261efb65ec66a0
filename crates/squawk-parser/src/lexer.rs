//! Line classifier for comms scripts.
//!
//! The lexer splits the source into physical lines and classifies each one
//! as a [`Token`]: blank, comment, section header, `key = value` assignment
//! or bare text. Deciding whether a bare line is legal needs the enclosing
//! section, so that check lives in the [`parser`](super::parser).
//!
//! The public entry point is [`tokenize`], which reports every malformed
//! header in a single pass.

use std::ops::Range;

use winnow::{
    Parser as _,
    ascii::space0,
    combinator::{alt, cut_err, eof, terminated},
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{one_of, rest, take_till},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::{Span, Spanned},
    tokens::{PositionedToken, Token},
};

/// Rich diagnostic information for lexer errors.
///
/// Attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    pub code: ErrorCode,
    pub message: &'static str,
    pub help: Option<&'static str>,
    /// Line-relative offset where the error span starts.
    pub start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<'a, O> = ModalResult<O, ContextError<LexerDiagnostic>>;

/// Trims `text` and narrows `range` to match.
fn trimmed(text: &str, range: Range<usize>) -> Spanned<&str> {
    let start = range.start + (text.len() - text.trim_start().len());
    let value = text.trim();
    Spanned::new(value, Span::new(start..start + value.len()))
}

fn blank<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    (space0, eof).value(Token::Blank).parse_next(input)
}

fn comment<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    (space0, one_of([';', '#']), rest)
        .value(Token::Comment)
        .parse_next(input)
}

/// Parse a `[name]` section header.
///
/// Commits after the opening bracket: an unclosed header, trailing text or
/// an empty name is reported as E101.
fn header<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    space0.parse_next(input)?;
    let start = input.current_token_start();
    '['.parse_next(input)?;

    let (name, range) = cut_err(terminated(take_till(0.., ']').with_span(), ']'))
        .context(LexerDiagnostic {
            code: ErrorCode::E101,
            message: "unclosed section header",
            help: Some("close the header with `]`"),
            start,
        })
        .parse_next(input)?;

    cut_err((space0, eof))
        .context(LexerDiagnostic {
            code: ErrorCode::E101,
            message: "unexpected text after section header",
            help: Some("a header line holds nothing but `[name]`"),
            start,
        })
        .parse_next(input)?;

    let name = trimmed(name, range);
    if name.is_empty() {
        return Err(ErrMode::Cut(ContextError::new().add_context(
            input,
            &input.checkpoint(),
            LexerDiagnostic {
                code: ErrorCode::E101,
                message: "empty section header",
                help: Some("name the section, for example `[comms]`"),
                start,
            },
        )));
    }
    Ok(Token::Header(name))
}

/// Parse `key = value`, splitting on the first `=`.
fn assignment<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    let key = take_till(1.., '=')
        .with_span()
        .map(|(key, range)| trimmed(key, range))
        .verify(|key: &Spanned<&str>| !key.is_empty())
        .parse_next(input)?;
    '='.parse_next(input)?;
    let value = rest
        .with_span()
        .map(|(value, range)| trimmed(value, range))
        .parse_next(input)?;
    Ok(Token::Assignment { key, value })
}

fn bare<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    rest.with_span()
        .map(|(text, range)| Token::Bare(trimmed(text, range)))
        .parse_next(input)
}

fn line_token<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    alt((blank, comment, header, assignment, bare)).parse_next(input)
}

/// Lexer state that accumulates tokens and diagnostics.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Tokenize every line of `source`, collecting tokens and errors.
    fn tokenize(&mut self, source: &'a str) {
        let body = source.strip_prefix('\u{feff}').unwrap_or(source);
        let mut offset = source.len() - body.len();

        for (index, raw) in body.split_inclusive('\n').enumerate() {
            let line = raw.trim_end_matches(['\n', '\r']);
            self.tokenize_line(line, offset, index + 1);
            offset += raw.len();
        }
    }

    fn tokenize_line(&mut self, line: &'a str, offset: usize, line_number: usize) {
        let mut input = LocatingSlice::new(line);
        match line_token(&mut input) {
            Ok(token) => self.tokens.push(PositionedToken::new(
                token,
                Span::new(0..line.len()),
                offset,
                line_number,
            )),
            Err(err) => {
                // Line errors extend to the end of the line.
                let diagnostic = Self::convert_err_mode(err, line.len(), offset);
                self.diagnostics.emit(diagnostic);
            }
        }
    }

    /// Finish lexing and return tokens or collected errors.
    fn finish(self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        self.diagnostics.finish().map(|()| self.tokens)
    }

    /// Convert an ErrMode to a Diagnostic.
    ///
    /// Uses the first `LexerDiagnostic` in the error context. Falls back to
    /// E100 (malformed line) if no context is present.
    fn convert_err_mode(
        err: ErrMode<ContextError<LexerDiagnostic>>,
        error_pos: usize,
        offset: usize,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        if let Some(LexerDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let span = Span::new(*start..error_pos).offset_by(offset);

            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(span, code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        let span = Span::new(0..error_pos).offset_by(offset);
        Diagnostic::error("malformed line")
            .with_code(ErrorCode::E100)
            .with_label(span, ErrorCode::E100.description())
    }
}

/// Classify every line of `source`.
///
/// A leading byte order mark is skipped; spans still index into `source`.
///
/// # Returns
///
/// - `Ok(tokens)` - one token per line, in source order
/// - `Err(ParseError)` - every malformed header in the source
pub fn tokenize(source: &str) -> Result<Vec<PositionedToken<'_>>, ParseError> {
    let mut lexer = Lexer::new();
    lexer.tokenize(source);
    lexer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_token(line: &str) -> Token<'_> {
        let mut input = LocatingSlice::new(line);
        line_token(&mut input).unwrap()
    }

    fn assert_error_codes(source: &str, expected_codes: &[ErrorCode]) {
        let err = tokenize(source).unwrap_err();
        let codes: Vec<_> = err.diagnostics().iter().map(|d| d.code()).collect();
        let expected: Vec<_> = expected_codes.iter().copied().map(Some).collect();
        assert_eq!(codes, expected, "unexpected codes for {source:?}");
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(single_token(""), Token::Blank);
        assert_eq!(single_token("   \t"), Token::Blank);
        assert_eq!(single_token("; note"), Token::Comment);
        assert_eq!(single_token("  # note = 3"), Token::Comment);
    }

    #[test]
    fn test_header() {
        match single_token("  [ speakers.ATC ] ") {
            Token::Header(name) => {
                assert_eq!(*name.inner(), "speakers.ATC");
                assert_eq!(name.span(), Span::new(4..16));
            }
            other => panic!("expected header, got {other:?}"),
        }
    }

    #[test]
    fn test_assignment_splits_on_first_equals() {
        match single_token("ATC = climb = maintain") {
            Token::Assignment { key, value } => {
                assert_eq!(*key.inner(), "ATC");
                assert_eq!(*value.inner(), "climb = maintain");
                assert_eq!(value.span(), Span::new(6..22));
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_value_is_assignment() {
        match single_token("color =") {
            Token::Assignment { key, value } => {
                assert_eq!(*key.inner(), "color");
                assert!(value.is_empty());
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_key_is_bare() {
        assert!(matches!(single_token(" = orphan"), Token::Bare(_)));
        assert!(matches!(single_token("KORD, KLAX"), Token::Bare(_)));
    }

    #[test]
    fn test_tokenize_offsets_and_line_numbers() {
        let source = "[comms]\r\nTS = 00:00\n\nATC = hello";
        let tokens = tokenize(source).unwrap();

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1].line_number, 2);
        assert_eq!(tokens[1].span, Span::new(9..19));
        assert_eq!(tokens[2].token, Token::Blank);
        match &tokens[3].token {
            Token::Assignment { value, .. } => {
                assert_eq!(&source[value.span().start()..value.span().end()], "hello");
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_tokenize_skips_byte_order_mark() {
        let source = "\u{feff}[comms]";
        let tokens = tokenize(source).unwrap();
        match &tokens[0].token {
            Token::Header(name) => assert_eq!(name.span(), Span::new(4..9)),
            other => panic!("expected header, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_headers() {
        assert_error_codes("[comms", &[ErrorCode::E101]);
        assert_error_codes("[]", &[ErrorCode::E101]);
        assert_error_codes("[  ]", &[ErrorCode::E101]);
        assert_error_codes("[comms] extra", &[ErrorCode::E101]);
    }

    #[test]
    fn test_every_bad_header_is_reported() {
        let source = "[meta.TS\ntype = Timestamp\n[]\n[comms]";
        assert_error_codes(source, &[ErrorCode::E101, ErrorCode::E101]);
    }

    #[test]
    fn test_header_error_span_covers_rest_of_line() {
        let source = "ok = 1\n[render";
        let err = tokenize(source).unwrap_err();
        let label = &err.diagnostics()[0].labels()[0];
        assert_eq!(label.span(), Span::new(7..14));
    }
}
