//! Engine configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Stroke parameters for win-line geometry.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Stroke thickness in layout units.
    #[serde(default = "default_thickness")]
    thickness: f64,

    /// Maximum spread of cell centers still treated as one row or column.
    #[serde(default = "default_tolerance")]
    tolerance: f64,
}

fn default_thickness() -> f64 {
    4.0
}

fn default_tolerance() -> f64 {
    5.0
}

impl GeometryConfig {
    /// Creates a geometry configuration.
    pub fn new(thickness: f64, tolerance: f64) -> Self {
        Self {
            thickness,
            tolerance,
        }
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self::new(default_thickness(), default_tolerance())
    }
}

/// Configuration for a [`Game`](crate::Game).
///
/// Loaded from TOML; every field is optional.
///
/// ```toml
/// draw_reset_delay_ms = 2000
///
/// [geometry]
/// thickness = 4.0
/// tolerance = 5.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Win-line geometry settings.
    #[serde(default)]
    geometry: GeometryConfig,

    /// Delay reported after a draw before the board should be reset.
    #[serde(default = "default_draw_reset_delay_ms")]
    draw_reset_delay_ms: u64,
}

fn default_draw_reset_delay_ms() -> u64 {
    2000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            draw_reset_delay_ms: default_draw_reset_delay_ms(),
        }
    }
}

impl EngineConfig {
    /// Creates a configuration from explicit values.
    pub fn new(geometry: GeometryConfig, draw_reset_delay_ms: u64) -> Self {
        Self {
            geometry,
            draw_reset_delay_ms,
        }
    }

    /// Draw reset delay as a [`Duration`].
    pub fn draw_reset_delay(&self) -> Duration {
        Duration::from_millis(self.draw_reset_delay_ms)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(
            thickness = config.geometry.thickness,
            tolerance = config.geometry.tolerance,
            draw_reset_delay_ms = config.draw_reset_delay_ms,
            "Config loaded successfully"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let GeometryConfig {
            thickness,
            tolerance,
        } = self.geometry;
        if !(thickness.is_finite() && thickness > 0.0) {
            return Err(ConfigError::new(format!(
                "geometry.thickness must be positive, got {}",
                thickness
            )));
        }
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(ConfigError::new(format!(
                "geometry.tolerance must be positive, got {}",
                tolerance
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
