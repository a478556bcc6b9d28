//! Configuration enum types.

use crate::draw::{BLACK, Color};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a named color, a hex string, or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "red"
///
/// # Hex string, as produced by a color picker
/// default_color = "#ff8000"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, yellow, orange, pink, white, black) or `#rrggbb`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Returns the color, or `None` for an unrecognized name.
    pub fn try_color(&self) -> Option<Color> {
        match self {
            ColorSpec::Name(name) => crate::util::parse_color(name),
            ColorSpec::Rgb([r, g, b]) => Some(Color::from_rgb8(*r, *g, *b)),
        }
    }

    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown color names fall back to `fallback` with a warning.
    pub fn to_color_or(&self, fallback: Color) -> Color {
        self.try_color().unwrap_or_else(|| {
            warn!("Unknown color {:?}, using {}", self, fallback.to_hex());
            fallback
        })
    }

    /// Converts the color specification, defaulting unknown names to black.
    pub fn to_color(&self) -> Color {
        self.to_color_or(BLACK)
    }
}

impl From<&str> for ColorSpec {
    fn from(name: &str) -> Self {
        ColorSpec::Name(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::RED;

    #[test]
    fn names_hex_and_rgb_resolve() {
        assert_eq!(ColorSpec::from("red").to_color(), RED);
        assert_eq!(ColorSpec::from("#ff0000").to_color(), RED);
        assert_eq!(ColorSpec::Rgb([255, 0, 0]).to_color(), RED);
    }

    #[test]
    fn unknown_names_use_the_fallback() {
        let spec = ColorSpec::from("chartreuse-ish");
        assert_eq!(spec.try_color(), None);
        assert_eq!(spec.to_color_or(RED), RED);
        assert_eq!(spec.to_color(), BLACK);
    }
}
