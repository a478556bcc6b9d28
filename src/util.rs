//! Utility functions for colors and rectangle geometry.
//!
//! This module provides:
//! - Color name and hex-string parsing used by the config and the toolbar
//! - The [`Rect`] helper used for dirty region tracking
//! - Bounding boxes for the primitives the drawing context emits

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

/// Parses a `#rrggbb` or `#rgb` hex string, the format produced by an HTML
/// color input.
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
    let (r, g, b) = match hex.len() {
        6 => (channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?),
        3 => {
            // #abc expands to #aabbcc
            let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
            (short(0)?, short(1)?, short(2)?)
        }
        _ => return None,
    };

    Some(Color::from_rgb8(r, g, b))
}

/// Parses either a color name or a hex string.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    parse_hex_color(value).or_else(|| name_to_color(value))
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Axis-aligned rectangle helper used for dirty region tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x - min_x;
        let height = max_y - min_y;
        Self::new(min_x, min_y, width, height)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Returns true if the point lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

fn stroke_padding(width: f64) -> i32 {
    let padding = (width / 2.0).ceil() as i32;
    padding.max(1)
}

/// Bounds of a single stroked segment, padded by half the line width so
/// round caps are covered.
pub fn bounding_box_for_segment(x1: i32, y1: i32, x2: i32, y2: i32, width: f64) -> Option<Rect> {
    let padding = stroke_padding(width);
    Rect::from_min_max(
        x1.min(x2) - padding,
        y1.min(y2) - padding,
        x1.max(x2) + padding + 1,
        y1.max(y2) + padding + 1,
    )
}

/// Bounds of a filled rectangle given in fractional coordinates.
pub fn bounding_box_for_fill(x: f64, y: f64, width: f64, height: f64) -> Option<Rect> {
    Rect::from_min_max(
        x.floor() as i32,
        y.floor() as i32,
        (x + width).ceil() as i32,
        (y + height).ceil() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_color_mapping() {
        assert_eq!(name_to_color("white").unwrap(), WHITE);
        assert_eq!(name_to_color("Black").unwrap(), BLACK);
        assert!(name_to_color("chartreuse").is_none());
    }

    #[test]
    fn hex_colors_parse_long_and_short_forms() {
        assert_eq!(parse_hex_color("#ff0000").unwrap(), RED);
        assert_eq!(parse_hex_color("#0f0").unwrap(), GREEN);
        assert_eq!(
            parse_hex_color("#336699").unwrap(),
            Color::from_rgb8(0x33, 0x66, 0x99)
        );
        assert!(parse_hex_color("ff0000").is_none());
        assert!(parse_hex_color("#ff00").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
    }

    #[test]
    fn parse_color_accepts_names_and_hex() {
        assert_eq!(parse_color(" blue ").unwrap(), BLUE);
        assert_eq!(parse_color("#000000").unwrap(), BLACK);
        assert!(parse_color("mauve").is_none());
    }

    #[test]
    fn segment_bounds_cover_round_caps() {
        let rect = bounding_box_for_segment(10, 20, 30, 40, 6.0).unwrap();
        assert_eq!(rect, Rect::new(7, 17, 27, 27).unwrap());
    }

    #[test]
    fn single_pixel_fill_has_unit_bounds() {
        let rect = bounding_box_for_fill(5.0, 6.0, 1.0, 1.0).unwrap();
        assert_eq!(rect, Rect::new(5, 6, 1, 1).unwrap());

        let rect = bounding_box_for_fill(5.5, 6.25, 1.0, 1.0).unwrap();
        assert_eq!(rect, Rect::new(5, 6, 2, 2).unwrap());
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(0, 0, 10, 5).unwrap();
        assert!(rect.contains(0, 0));
        assert!(rect.contains(9, 4));
        assert!(!rect.contains(10, 4));
        assert!(!rect.contains(-1, 2));
    }
}
