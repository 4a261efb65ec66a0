//! Squawk Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Squawk comms
//! script compiler. It includes:
//!
//! - **Identifiers**: Case-insensitive, string-interned participant keys ([`identifier::Id`])
//! - **Colors**: CSS color parsing and ASS color notation ([`color::Color`])
//! - **Geometry**: Integer pixel geometry ([`geometry`] module)
//! - **Positions**: Screen anchors and ASS alignments ([`position::Position`])
//! - **Semantic**: The validated script model ([`semantic`] module)
//! - **Style**: The cascading style resolver ([`style`] module)
//! - **Draw**: Text wrapping and background box geometry ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod position;
pub mod semantic;
pub mod style;
