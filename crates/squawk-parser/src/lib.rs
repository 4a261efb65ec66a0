//! # Squawk Parser
//!
//! Loader for comms scripts. This crate turns script text into the
//! validated [`Script`] model of `squawk-core`.
//!
//! ## Usage
//!
//! ```
//! # use squawk_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//! [meta.TS]
//! type = Timestamp
//!
//! [speakers.ATC]
//! name = Tower
//!
//! [comms]
//! TS = 00:00
//! ATC = "Cleared for takeoff"
//! "#;
//!
//!     let script = parse(source)?;
//!     assert_eq!(script.lines().len(), 2);
//!     assert_eq!(script.markers().len(), 1);
//!     Ok(())
//! }
//! ```

mod builtin_types;
mod elaborate;
pub mod error;
mod lexer;
mod parser;
#[cfg(test)]
mod parser_tests;
mod parser_types;
mod span;
mod timestamp;
mod tokens;

pub use span::{Span, Spanned};
pub use timestamp::{TimestampError, parse_timestamp};

use squawk_core::semantic::Script;

use elaborate::Builder;
use error::ParseError;

/// Parse script text into a validated [`Script`].
///
/// This is the main entry point of the loader. It runs the pipeline:
///
/// 1. **Tokenize** - Classify every line
/// 2. **Parse** - Group lines into sections and dialogue
/// 3. **Elaborate** - Parse attribute values, validate declarations and
///    compute the markers
///
/// # Returns
///
/// Returns the [`Script`] on success, or a [`ParseError`] holding every
/// error found. Warnings are logged.
pub fn parse(source: &str) -> Result<Script, ParseError> {
    // Step 1: Tokenize
    let tokens = lexer::tokenize(source)?;

    // Step 2: Parse
    let document = parser::build_document(&tokens)?;

    // Step 3: Elaborate
    Builder::new().build(&document)
}
