//! CLI logic for the Squawk subtitle compiler.
//!
//! This module contains the core CLI logic: load the configuration, compile
//! the script and write the track plus optional encoder metadata.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, info};

use squawk::{SquawkError, TrackBuilder, TrackMetadata};

/// Run the Squawk CLI application
///
/// This function processes the input script through the Squawk pipeline
/// and writes the resulting ASS track to the output file.
///
/// # Errors
///
/// Returns `SquawkError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), SquawkError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing script"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Compile the script using the TrackBuilder API
    let builder = TrackBuilder::new(app_config);
    let script = builder.parse(&source)?;
    let track = builder.compile(&script)?;

    // Write output file
    builder.write_ass(&track, &args.output)?;

    let metadata = track.metadata();
    info!(
        output_file = args.output,
        start_seconds:? = metadata.start_seconds(),
        end_seconds:? = metadata.end_seconds();
        "Track exported successfully"
    );

    if let Some(path) = &args.metadata {
        write_metadata(metadata, path)?;
    }

    Ok(())
}

/// Write the track metadata as TOML for an external encoder.
fn write_metadata(metadata: &TrackMetadata, path: &str) -> Result<(), SquawkError> {
    let content =
        toml::to_string(metadata).map_err(|err| SquawkError::Export(Box::new(err)))?;
    debug!(path, content; "Writing track metadata");

    fs::write(path, content)?;
    info!(path; "Metadata written");
    Ok(())
}
