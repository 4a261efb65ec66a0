//! Deterministic text and box geometry for subtitle rendering.
//!
//! Nothing in this module measures real glyphs. Widths come from a fixed
//! per-character table expressed in "units", where one unit equals the font
//! size in pixels.
//!
//! # Overview
//!
//! - [`metrics`] - Fixed layout constants (font size, margins, padding)
//! - [`WrappedText`] - Greedy word wrap driven by the width table
//! - [`BackgroundBox`] - Rounded background rectangle placed behind a line

mod background;
pub mod metrics;
mod text;

pub use background::BackgroundBox;
pub use text::{WrappedText, char_width_units, max_units_per_line, text_width_units};
