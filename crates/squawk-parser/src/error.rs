//! Error and diagnostic system for the Squawk script loader.
//!
//! This module provides an error handling system with:
//! - Error codes grouped by failure category
//! - Multiple labeled spans for rich error context
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, multiple source
//! locations, and help text. Multiple diagnostics are wrapped in [`ParseError`]
//! for returning from [`parse`](crate::parse).
//!
//! # Example
//!
//! ```
//! # use squawk_parser::error::{Diagnostic, ErrorCode, ErrorKind};
//! # use squawk_parser::Span;
//!
//! let span = Span::new(100..120);
//! let original_span = Span::new(50..70);
//!
//! let diag = Diagnostic::error("section `[speakers.ATC]` is declared twice")
//!     .with_code(ErrorCode::E105)
//!     .with_label(span, "duplicate section")
//!     .with_secondary_label(original_span, "first declared here")
//!     .with_help("merge the two sections");
//! assert_eq!(diag.kind(), Some(ErrorKind::Structure));
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::{ErrorCode, ErrorKind};
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
