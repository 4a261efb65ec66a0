//! Configuration types for Squawk track rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources such as a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`RenderConfig`] - Frame size, wrap width, font and title of the track.
//!
//! A script's `[render]` section takes precedence over the loaded
//! configuration; see [`RenderConfig::with_overrides`].
//!
//! # Example
//!
//! ```
//! # use squawk::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.render().play_res_x(), 1920);
//! assert_eq!(config.render().font_name(), "Arial");
//! ```

use serde::Deserialize;

use squawk_core::semantic::RenderOverrides;

use crate::error::SquawkError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified render configuration.
    pub fn new(render: RenderConfig) -> Self {
        Self { render }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }
}

/// Output settings of the subtitle track.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderConfig {
    /// Horizontal frame size in pixels.
    #[serde(default = "default_play_res_x")]
    play_res_x: u32,

    /// Vertical frame size in pixels.
    #[serde(default = "default_play_res_y")]
    play_res_y: u32,

    /// Share of the usable frame width a text line may take.
    #[serde(default = "default_wrap_width_ratio")]
    wrap_width_ratio: f64,

    /// Font used by every style row.
    #[serde(default = "default_font_name")]
    font_name: String,

    /// Value of the `Title` field in the script info block.
    #[serde(default = "default_title")]
    title: String,
}

fn default_play_res_x() -> u32 {
    1920
}

fn default_play_res_y() -> u32 {
    1080
}

fn default_wrap_width_ratio() -> f64 {
    0.75
}

fn default_font_name() -> String {
    "Arial".to_string()
}

fn default_title() -> String {
    "Comms Subtitles".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            play_res_x: default_play_res_x(),
            play_res_y: default_play_res_y(),
            wrap_width_ratio: default_wrap_width_ratio(),
            font_name: default_font_name(),
            title: default_title(),
        }
    }
}

impl RenderConfig {
    /// Returns a copy with a different frame size.
    pub fn with_play_res(mut self, play_res_x: u32, play_res_y: u32) -> Self {
        self.play_res_x = play_res_x;
        self.play_res_y = play_res_y;
        self
    }

    /// Returns a copy with a different wrap width ratio.
    pub fn with_wrap_width_ratio(mut self, wrap_width_ratio: f64) -> Self {
        self.wrap_width_ratio = wrap_width_ratio;
        self
    }

    /// Returns a copy with a different font.
    pub fn with_font_name(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    /// Returns a copy with a different title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn play_res_x(&self) -> u32 {
        self.play_res_x
    }

    pub fn play_res_y(&self) -> u32 {
        self.play_res_y
    }

    pub fn wrap_width_ratio(&self) -> f64 {
        self.wrap_width_ratio
    }

    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Applies the options a script set in its `[render]` section.
    ///
    /// Options the script leaves unset keep the configured value.
    pub fn with_overrides(&self, overrides: &RenderOverrides) -> Self {
        Self {
            play_res_x: overrides.play_res_x().unwrap_or(self.play_res_x),
            play_res_y: overrides.play_res_y().unwrap_or(self.play_res_y),
            wrap_width_ratio: overrides
                .wrap_width_ratio()
                .unwrap_or(self.wrap_width_ratio),
            font_name: self.font_name.clone(),
            title: self.title.clone(),
        }
    }

    /// Checks the values that cannot be expressed by the field types.
    ///
    /// # Errors
    ///
    /// Returns [`SquawkError::Config`] for a zero frame dimension, a wrap
    /// ratio that is not a positive finite number, or a font name that would
    /// break the comma separated style rows.
    pub fn validate(&self) -> Result<(), SquawkError> {
        if self.play_res_x == 0 || self.play_res_y == 0 {
            return Err(SquawkError::Config(format!(
                "frame size must be positive, got {}x{}",
                self.play_res_x, self.play_res_y
            )));
        }
        if !self.wrap_width_ratio.is_finite() || self.wrap_width_ratio <= 0.0 {
            return Err(SquawkError::Config(format!(
                "wrap_width_ratio must be a positive number, got {}",
                self.wrap_width_ratio
            )));
        }
        if self.font_name.trim().is_empty() || self.font_name.contains([',', '\n']) {
            return Err(SquawkError::Config(format!(
                "invalid font name `{}`",
                self.font_name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_set_options() {
        let overrides = RenderOverrides::default().with_play_res_x(1280);
        let config = RenderConfig::default().with_overrides(&overrides);

        assert_eq!(config.play_res_x(), 1280);
        assert_eq!(config.play_res_y(), 1080);
        assert_eq!(config.wrap_width_ratio(), 0.75);
        assert_eq!(config.title(), "Comms Subtitles");
    }

    #[test]
    fn test_validate() {
        assert!(RenderConfig::default().validate().is_ok());
        assert!(
            RenderConfig::default()
                .with_play_res(0, 1080)
                .validate()
                .is_err()
        );
        assert!(
            RenderConfig::default()
                .with_wrap_width_ratio(f64::NAN)
                .validate()
                .is_err()
        );
        assert!(
            RenderConfig::default()
                .with_font_name("Arial, Bold")
                .validate()
                .is_err()
        );
    }
}
