//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canvas settings.
///
/// Size of the bitmap created at startup and the border stroked around it.
/// Loading an image replaces the bitmap and its size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Bitmap width in pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_width")]
    pub width: i32,

    /// Bitmap height in pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_height")]
    pub height: i32,

    /// Width of the border stroked around the canvas at startup; 0 disables it
    #[serde(default = "default_border_width")]
    pub border_width: f64,

    /// Border color
    #[serde(default = "default_border_color")]
    pub border_color: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            border_width: default_border_width(),
            border_color: default_border_color(),
        }
    }
}

/// Drawing-related settings.
///
/// Controls the paint style the surface starts with. The toolbar changes
/// color and width at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Initial fill and stroke color - a named color (red, green, blue, yellow,
    /// orange, pink, white, black), a `#rrggbb` string or an RGB array
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Initial stroke width in pixels (valid range: 1.0 - 100.0)
    #[serde(default = "default_width")]
    pub default_width: f64,

    /// Font family name for text rendering (e.g., "Sans", "Monospace")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", 400, 700)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,

    /// Smallest font size the text tool uses; text is otherwise sized by the
    /// stroke width (valid range: 1.0 - 200.0)
    #[serde(default = "default_min_font_size")]
    pub min_font_size: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_width: default_width(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
            min_font_size: default_min_font_size(),
        }
    }
}

/// Spray can settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SprayConfig {
    /// Milliseconds between spray bursts (valid range: 1 - 1000)
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Brush area in square pixels per sprayed dot per burst
    /// (valid range: 1.0 - 10000.0). Smaller values spray denser.
    #[serde(default = "default_area_per_dot")]
    pub area_per_dot: f64,

    /// Fixed random seed for reproducible spray patterns
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SprayConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            area_per_dot: default_area_per_dot(),
            seed: None,
        }
    }
}

/// Where saved images go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OutputConfig {
    /// Directory for saved images (`~` is expanded)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Filename template (chrono format specifiers, e.g. `%Y-%m-%d`)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_canvas_width() -> i32 {
    500
}

fn default_canvas_height() -> i32 {
    300
}

fn default_border_width() -> f64 {
    4.0
}

fn default_border_color() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_width() -> f64 {
    // Matches the border stroke, which leaves this width behind
    4.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_min_font_size() -> f64 {
    7.0
}

fn default_tick_ms() -> u64 {
    25
}

fn default_area_per_dot() -> f64 {
    30.0
}

fn default_save_directory() -> String {
    "~/Pictures/Sketchpad".to_string()
}

fn default_filename_template() -> String {
    "sketchpad_%Y-%m-%d_%H%M%S".to_string()
}
