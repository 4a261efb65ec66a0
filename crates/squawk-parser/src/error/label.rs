//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A labeled span in the script source.
///
/// - **Primary labels** mark the main location of a problem.
/// - **Secondary labels** add context, such as "first declared here".
///
/// ```text
/// error[E105]: section `[speakers.ATC]` is declared twice
///    |
/// 12 | [speakers.ATC]
///    | ^^^^^^^^^^^^^^ duplicate section
///    |
///  4 | [speakers.ATC]
///    | -------------- first declared here
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Check if this is a secondary label.
    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}
