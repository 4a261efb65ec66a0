//! Semantic comms-script model.
//!
//! These types are the fully validated, typed representation of a script
//! after loading. Every attribute has already been parsed into its typed
//! form and every reference has been checked, so later stages never fail.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ lexer
//! Classified lines
//!     ↓ parser
//! Sections and dialogue lines with spans
//!     ↓ elaborate + validate
//! Semantic Model (these types)
//!     ↓ substitute + estimate + allocate
//! Timed events
//!     ↓ export
//! ASS
//! ```
//!
//! # Organization
//!
//! - [`entry`] - Declarations: [`TypeDefinition`], [`Entry`], [`Attributes`]
//! - [`script`] - The loaded script: [`Script`], [`ScriptLine`], [`Marker`]

pub mod entry;
pub mod script;

pub use entry::*;
pub use script::*;
