//! Font descriptor for text rendering.

/// Font configuration for text rendering.
///
/// Describes which font family, weight and style the text tool uses. The size
/// is not part of the descriptor: it is derived from the current stroke width
/// at the moment text is placed.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Monospace", "DejaVu Serif")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light")
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::new("Sans".to_string(), "normal".to_string(), "normal".to_string())
    }
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family Style Weight" (size is applied separately in pixels)
    /// Example: "Sans Bold" or "Monospace Italic"
    pub fn to_pango_string(&self) -> String {
        let mut parts = vec![self.family.clone()];

        if !self.style.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.style));
        }

        if !self.weight.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.weight));
        }

        parts.join(" ")
    }

    /// Builds a Pango description whose size is an absolute pixel height.
    pub fn to_pango_description(&self, size_px: f64) -> pango::FontDescription {
        let mut desc = pango::FontDescription::from_string(&self.to_pango_string());
        desc.set_absolute_size(size_px * f64::from(pango::SCALE));
        desc
    }

    /// Returns a CSS-style font shorthand, e.g. `"12px sans-serif"`.
    pub fn to_css_string(&self, size_px: f64) -> String {
        let family = match self.family.to_lowercase().as_str() {
            "sans" => "sans-serif".to_string(),
            "serif" => "serif".to_string(),
            "monospace" => "monospace".to_string(),
            _ => self.family.clone(),
        };
        format!("{}px {}", format_size(size_px), family)
    }
}

fn format_size(size: f64) -> String {
    if size.fract() == 0.0 {
        format!("{}", size as i64)
    } else {
        format!("{size}")
    }
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
