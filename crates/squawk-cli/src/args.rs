//! Command-line argument definitions for the Squawk CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the metadata file for an encoder, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Squawk subtitle compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input comms script
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output ASS file
    #[arg(short, long, default_value = "comms.ass")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to write the track metadata (TOML) for a video encoder
    #[arg(long)]
    pub metadata: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
