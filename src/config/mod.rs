//! Configuration file support for sketchpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sketchpad/config.toml`. Settings include the canvas size and
//! border, the initial paint style, spray tuning, and where saved images go.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{CanvasConfig, DrawingConfig, OutputConfig, SprayConfig};

use crate::draw::{BLACK, FontDescriptor, PaintStyle, RED};
use crate::image::FileSaveConfig;
use crate::tools::ToolSettings;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 800
/// height = 600
/// border_width = 0
///
/// [drawing]
/// default_color = "#3366ff"
/// default_width = 8.0
///
/// [spray]
/// tick_ms = 25
/// area_per_dot = 30.0
///
/// [output]
/// save_directory = "~/Pictures/Sketchpad"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Bitmap size and border
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Initial paint style
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Spray can tuning
    #[serde(default)]
    pub spray: SprayConfig,

    /// Image saving
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `canvas.width`, `canvas.height`: 1 - 8192
    /// - `canvas.border_width`: 0.0 - 100.0
    /// - `drawing.default_width`: 1.0 - 100.0
    /// - `drawing.min_font_size`: 1.0 - 200.0
    /// - `spray.tick_ms`: 1 - 1000
    /// - `spray.area_per_dot`: 1.0 - 10000.0
    pub fn validate_and_clamp(&mut self) {
        if !(1..=8192).contains(&self.canvas.width) {
            log::warn!(
                "Invalid canvas width {}, clamping to 1-8192 range",
                self.canvas.width
            );
            self.canvas.width = self.canvas.width.clamp(1, 8192);
        }

        if !(1..=8192).contains(&self.canvas.height) {
            log::warn!(
                "Invalid canvas height {}, clamping to 1-8192 range",
                self.canvas.height
            );
            self.canvas.height = self.canvas.height.clamp(1, 8192);
        }

        // NaN fails every range check; clamp would keep it, so reset instead
        if !(0.0..=100.0).contains(&self.canvas.border_width) {
            log::warn!(
                "Invalid border_width {:.1}, clamping to 0.0-100.0 range",
                self.canvas.border_width
            );
            self.canvas.border_width = clamp_or(self.canvas.border_width, 0.0, 100.0, 4.0);
        }

        if !(1.0..=100.0).contains(&self.drawing.default_width) {
            log::warn!(
                "Invalid default_width {:.1}, clamping to 1.0-100.0 range",
                self.drawing.default_width
            );
            self.drawing.default_width = clamp_or(self.drawing.default_width, 1.0, 100.0, 4.0);
        }

        if !(1.0..=200.0).contains(&self.drawing.min_font_size) {
            log::warn!(
                "Invalid min_font_size {:.1}, clamping to 1.0-200.0 range",
                self.drawing.min_font_size
            );
            self.drawing.min_font_size = clamp_or(self.drawing.min_font_size, 1.0, 200.0, 7.0);
        }

        if !(1..=1000).contains(&self.spray.tick_ms) {
            log::warn!(
                "Invalid spray tick_ms {}, clamping to 1-1000 range",
                self.spray.tick_ms
            );
            self.spray.tick_ms = self.spray.tick_ms.clamp(1, 1000);
        }

        if !(1.0..=10000.0).contains(&self.spray.area_per_dot) {
            log::warn!(
                "Invalid spray area_per_dot {:.1}, clamping to 1.0-10000.0 range",
                self.spray.area_per_dot
            );
            self.spray.area_per_dot = clamp_or(self.spray.area_per_dot, 1.0, 10000.0, 30.0);
        }

        // Validate font weight is reasonable
        let valid_weight = matches!(
            self.drawing.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                self.drawing.font_weight
            );
            self.drawing.font_weight = "normal".to_string();
        }

        // Validate font style
        if !matches!(
            self.drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.drawing.font_style
            );
            self.drawing.font_style = "normal".to_string();
        }

        if self.drawing.default_color.try_color().is_none() {
            log::warn!(
                "Unknown default_color {:?}, falling back to black",
                self.drawing.default_color
            );
            self.drawing.default_color = ColorSpec::from("black");
        }

        if self.canvas.border_color.try_color().is_none() {
            log::warn!(
                "Unknown border_color {:?}, falling back to red",
                self.canvas.border_color
            );
            self.canvas.border_color = ColorSpec::from("red");
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        config.validate_and_clamp();
        Ok(config)
    }

    /// Parses configuration from a TOML string without validating it.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Returns the JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// The paint style a fresh surface starts with.
    pub fn paint_style(&self) -> PaintStyle {
        let color = self.drawing.default_color.to_color_or(BLACK);
        PaintStyle {
            stroke_color: color,
            fill_color: color,
            line_width: self.drawing.default_width,
            font: FontDescriptor::new(
                self.drawing.font_family.clone(),
                self.drawing.font_weight.clone(),
                self.drawing.font_style.clone(),
            ),
            ..PaintStyle::default()
        }
    }

    /// The border color stroked around a fresh canvas.
    pub fn border_color(&self) -> crate::draw::Color {
        self.canvas.border_color.to_color_or(RED)
    }

    /// Tunables for the built-in tools.
    pub fn tool_settings(&self) -> ToolSettings {
        ToolSettings {
            spray_period: Duration::from_millis(self.spray.tick_ms),
            spray_area_per_dot: self.spray.area_per_dot,
            min_font_size: self.drawing.min_font_size,
        }
    }

    /// Where and how the `save` control writes images.
    pub fn save_config(&self) -> FileSaveConfig {
        FileSaveConfig {
            save_directory: crate::image::expand_tilde(&self.output.save_directory),
            filename_template: self.output.filename_template.clone(),
            ..FileSaveConfig::default()
        }
    }
}

fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLUE, LineCap};

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!((config.canvas.width, config.canvas.height), (500, 300));
        assert_eq!(config.drawing.default_width, 4.0);
        assert_eq!(config.spray.tick_ms, 25);
        assert_eq!(config.spray.seed, None);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            r##"
            [drawing]
            default_color = "#0000ff"

            [spray]
            seed = 9
            "##,
        )
        .unwrap();

        let style = config.paint_style();
        assert_eq!(style.stroke_color, BLUE);
        assert_eq!(style.fill_color, BLUE);
        assert_eq!(style.line_width, 4.0);
        assert_eq!(style.line_cap, LineCap::Butt);
        assert_eq!(config.spray.seed, Some(9));
        assert_eq!(config.spray.area_per_dot, 30.0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::from_toml(
            r#"
            [canvas]
            width = 0
            height = 100000
            border_width = -2.0

            [drawing]
            default_width = 500.0
            font_weight = "extra-wobbly"
            default_color = "not-a-color"

            [spray]
            tick_ms = 0
            area_per_dot = 0.5
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.canvas.width, 1);
        assert_eq!(config.canvas.height, 8192);
        assert_eq!(config.canvas.border_width, 0.0);
        assert_eq!(config.drawing.default_width, 100.0);
        assert_eq!(config.drawing.font_weight, "normal");
        assert_eq!(config.drawing.default_color, ColorSpec::from("black"));
        assert_eq!(config.spray.tick_ms, 1);
        assert_eq!(config.spray.area_per_dot, 1.0);
    }

    #[test]
    fn tool_settings_follow_config() {
        let mut config = Config::default();
        config.spray.tick_ms = 40;
        config.drawing.min_font_size = 9.0;
        let settings = config.tool_settings();
        assert_eq!(settings.spray_period, Duration::from_millis(40));
        assert_eq!(settings.min_font_size, 9.0);
    }

    #[test]
    fn load_from_reads_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[canvas]\nwidth = 64\nheight = 32\n[spray]\ntick_ms = 5000\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!((config.canvas.width, config.canvas.height), (64, 32));
        assert_eq!(config.spray.tick_ms, 1000);

        assert!(Config::load_from(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema.get("properties").unwrap();
        for section in ["canvas", "drawing", "spray", "output"] {
            assert!(properties.get(section).is_some(), "missing {section}");
        }
    }
}
