//! Squawk - compiles timestamped radio-comms scripts into subtitle tracks.
//!
//! A script declares its participants, then lists the dialogue under
//! timestamp markers. Squawk estimates how long every line takes to say,
//! fits the lines between their markers and writes an ASS subtitle track.

pub mod assemble;
pub mod config;
pub mod export;
pub mod substitute;
pub mod timing;

mod error;

pub use squawk_core::{color, draw, identifier, semantic};

pub use assemble::{Track, TrackMetadata};
pub use error::SquawkError;

use std::path::Path;

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;

/// Builder for compiling Squawk scripts.
///
/// This provides an API for processing scripts through parsing, timing and
/// export stages.
///
/// # Examples
///
/// ```rust
/// use squawk::{TrackBuilder, config::AppConfig};
///
/// let source = r#"
/// [meta.T]
/// type = Timestamp
///
/// [speakers.TWR]
/// name = Tower
///
/// [comms]
/// T = 00:05
/// TWR = "Cleared to land"
/// "#;
///
/// let builder = TrackBuilder::new(AppConfig::default());
///
/// let script = builder.parse(source).expect("Failed to parse");
/// let track = builder.compile(&script).expect("Failed to compile");
/// let ass = builder.render_ass(&track);
///
/// assert!(ass.contains("Dialogue: 0,0:00:05.00,"));
/// assert_eq!(track.metadata().start_seconds(), Some(5.0));
/// ```
#[derive(Default)]
pub struct TrackBuilder {
    config: AppConfig,
}

impl TrackBuilder {
    /// Create a new track builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse script text into a validated [`semantic::Script`].
    ///
    /// # Errors
    ///
    /// Returns [`SquawkError::Parse`] holding every diagnostic found, with
    /// the source attached for reporting.
    pub fn parse(&self, source: &str) -> Result<semantic::Script, SquawkError> {
        info!("Parsing script");

        let script = squawk_parser::parse(source)
            .map_err(|err| SquawkError::new_parse_error(err, source))?;

        debug!(
            lines = script.lines().len(),
            markers = script.markers().len();
            "Script parsed successfully"
        );
        trace!(script:?; "Parsed script");

        Ok(script)
    }

    /// Time and lay out a parsed script.
    ///
    /// The script's `[render]` options take precedence over the builder's
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SquawkError::Config`] when the effective render settings
    /// are unusable.
    pub fn compile(&self, script: &semantic::Script) -> Result<Track, SquawkError> {
        let render = self.config.render().with_overrides(script.render());
        render.validate()?;
        debug!(
            play_res_x = render.play_res_x(),
            play_res_y = render.play_res_y(),
            wrap_width_ratio = render.wrap_width_ratio();
            "Effective render settings"
        );

        Ok(assemble::assemble(script, render))
    }

    /// Serialize a compiled track to ASS text.
    pub fn render_ass(&self, track: &Track) -> String {
        export::ass::render(track)
    }

    /// Write a compiled track to `path` as an ASS file.
    ///
    /// Missing parent directories are created. The file only appears once
    /// it is complete.
    ///
    /// # Errors
    ///
    /// Returns [`SquawkError::Export`] when the file cannot be written.
    pub fn write_ass(&self, track: &Track, path: impl AsRef<Path>) -> Result<(), SquawkError> {
        let exporter = export::ass::Ass::new(path.as_ref());
        exporter.export_track(track)?;

        info!(path:? = path.as_ref(); "Track written");
        Ok(())
    }
}
