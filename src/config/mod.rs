//! Configuration file support for ghostdraw.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/ghostdraw/config.toml`. Settings include the canvas size,
//! stroke width, background color, and per-tool colors and lead-in delays.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{CanvasConfig, ToolConfig, ToolsConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::canvas::SurfaceConfig;
use crate::input::Tool;

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 400.0
/// height = 400.0
/// display_scale = 2.0
/// line_width = 12.0
/// background = "light-gray"
///
/// [tools.red]
/// delay_secs = 1.0
///
/// [tools.blue]
/// color = [0, 128, 255]
/// delay_secs = 3.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Canvas size and stroke appearance
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Per-tool colors and delays
    #[serde(default)]
    pub tools: ToolsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    /// Runs automatically on load; call it again after overriding fields in code.
    ///
    /// Validated ranges:
    /// - `canvas.width`, `canvas.height`: 16.0 - 8192.0
    /// - `canvas.display_scale`: 0.5 - 8.0
    /// - `canvas.line_width`: 1.0 - 100.0
    /// - `tools.*.delay_secs`: 0.0 - 60.0
    pub fn validate_and_clamp(&mut self) {
        clamp_field("canvas width", &mut self.canvas.width, 16.0, 8192.0);
        clamp_field("canvas height", &mut self.canvas.height, 16.0, 8192.0);
        clamp_field("display_scale", &mut self.canvas.display_scale, 0.5, 8.0);
        clamp_field("line_width", &mut self.canvas.line_width, 1.0, 100.0);

        for tool in Tool::ALL {
            if let Some(delay) = self.tools.get_mut(tool).delay_secs.as_mut() {
                clamp_field(&format!("{tool} delay_secs"), delay, 0.0, 60.0);
            }
        }
    }

    /// Surface parameters for the configured container size.
    pub fn surface_config(&self) -> SurfaceConfig {
        SurfaceConfig::for_container(
            self.canvas.width,
            self.canvas.height,
            self.canvas.display_scale,
            self.canvas.background.to_color(),
            self.canvas.line_width,
        )
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/ghostdraw/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("ghostdraw");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(source)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Serializes the effective configuration.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_field(name: &str, value: &mut f64, min: f64, max: f64) {
    if value.is_nan() {
        log::warn!("Invalid {} NaN, using {:.1}", name, min);
        *value = min;
    } else if !(min..=max).contains(value) {
        log::warn!(
            "Invalid {} {:.2}, clamping to {:.1}-{:.1} range",
            name,
            value,
            min,
            max
        );
        *value = value.clamp(min, max);
    }
}
