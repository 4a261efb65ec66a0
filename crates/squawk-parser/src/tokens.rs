//! Line tokens produced by the [`lexer`](super::lexer).
//!
//! A comms script is line oriented, so each token describes one physical
//! line of the source.

use crate::span::{Span, Spanned};

/// Classification of one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Empty or whitespace-only line.
    Blank,
    /// Line starting with `;` or `#`.
    Comment,
    /// `[name]` section header. The name is trimmed.
    Header(Spanned<&'a str>),
    /// `key = value` line, split on the first `=`. Both sides are trimmed
    /// and the key is never empty.
    Assignment {
        key: Spanned<&'a str>,
        value: Spanned<&'a str>,
    },
    /// Any other non-empty line, trimmed.
    Bare(Spanned<&'a str>),
}

impl<'a> Token<'a> {
    /// Moves every span from line-relative to source-relative offsets.
    fn offset_by(self, offset: usize) -> Self {
        let shift = |spanned: Spanned<&'a str>| -> Spanned<&'a str> {
            let span = spanned.span().offset_by(offset);
            Spanned::new(spanned.into_inner(), span)
        };
        match self {
            Token::Blank => Token::Blank,
            Token::Comment => Token::Comment,
            Token::Header(name) => Token::Header(shift(name)),
            Token::Assignment { key, value } => Token::Assignment {
                key: shift(key),
                value: shift(value),
            },
            Token::Bare(text) => Token::Bare(shift(text)),
        }
    }
}

/// A line token with its location in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken<'a> {
    pub token: Token<'a>,
    /// Span of the whole line, excluding the line terminator.
    pub span: Span,
    /// 1-based line number.
    pub line_number: usize,
}

impl<'a> PositionedToken<'a> {
    /// Builds a token from spans relative to the line start at `offset`.
    pub(crate) fn new(token: Token<'a>, line_span: Span, offset: usize, line_number: usize) -> Self {
        Self {
            token: token.offset_by(offset),
            span: line_span.offset_by(offset),
            line_number,
        }
    }
}
