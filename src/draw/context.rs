//! The live paint state shared by every tool and toolbar control.

use super::color::{BLACK, Color};
use super::dirty::DirtyTracker;
use super::font::FontDescriptor;
use super::render;
use crate::error::PaintError;
use crate::input::geometry::CanvasBounds;
use crate::input::Point;
use crate::util::Rect;
use std::io::Write;

/// Widest stroke the context accepts, matching the largest brush preset.
pub const MAX_LINE_WIDTH: f64 = 100.0;

/// How newly drawn pixels combine with what is already on the bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Normal painting: new pixels are drawn over existing ones
    #[default]
    SourceOver,
    /// Erasing: drawn pixels punch transparent holes into existing ones
    DestinationOut,
}

impl CompositeMode {
    fn operator(self) -> cairo::Operator {
        match self {
            CompositeMode::SourceOver => cairo::Operator::Over,
            CompositeMode::DestinationOut => cairo::Operator::DestOut,
        }
    }
}

/// Shape drawn at the ends of stroked segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl From<LineCap> for cairo::LineCap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => cairo::LineCap::Butt,
            LineCap::Round => cairo::LineCap::Round,
            LineCap::Square => cairo::LineCap::Square,
        }
    }
}

/// Paint style applied to subsequent drawing operations.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintStyle {
    pub stroke_color: Color,
    pub fill_color: Color,
    pub line_width: f64,
    pub line_cap: LineCap,
    pub composite: CompositeMode,
    pub font: FontDescriptor,
    pub font_size: f64,
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self {
            stroke_color: BLACK,
            fill_color: BLACK,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            composite: CompositeMode::SourceOver,
            font: FontDescriptor::default(),
            font_size: 10.0,
        }
    }
}

/// The drawing context of one paint surface.
///
/// Owns the ARGB32 bitmap and the Cairo context drawing into it, the current
/// [`PaintStyle`], the viewport bounds of the canvas element, and a
/// [`DirtyTracker`] fed by every drawing call. Style setters take effect on
/// the next drawing call only; nothing already on the bitmap is re-rendered.
pub struct DrawingContext {
    surface: cairo::ImageSurface,
    cairo: cairo::Context,
    style: PaintStyle,
    bounds: CanvasBounds,
    dirty: DirtyTracker,
}

impl DrawingContext {
    /// Creates a transparent bitmap of the given size.
    pub fn new(width: i32, height: i32, mut style: PaintStyle) -> Result<Self, PaintError> {
        style.line_width = style.line_width.min(MAX_LINE_WIDTH);
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        let cairo = cairo::Context::new(&surface)?;
        let cx = Self {
            surface,
            cairo,
            style,
            bounds: CanvasBounds::default(),
            dirty: DirtyTracker::new(),
        };
        cx.sync_operator();
        Ok(cx)
    }

    /// Bitmap width in pixels.
    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    /// Bitmap height in pixels.
    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    pub fn style(&self) -> &PaintStyle {
        &self.style
    }

    pub fn stroke_color(&self) -> Color {
        self.style.stroke_color
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.style.stroke_color = color;
    }

    pub fn fill_color(&self) -> Color {
        self.style.fill_color
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.style.fill_color = color;
    }

    /// Sets both fill and stroke color, as the color control does.
    pub fn set_color(&mut self, color: Color) {
        self.style.fill_color = color;
        self.style.stroke_color = color;
    }

    pub fn line_width(&self) -> f64 {
        self.style.line_width
    }

    /// Sets the stroke width, capped at [`MAX_LINE_WIDTH`]. Non-positive or
    /// non-finite widths are ignored.
    pub fn set_line_width(&mut self, width: f64) {
        if width > MAX_LINE_WIDTH && width.is_finite() {
            log::warn!("Line width {width} too large, clamping to {MAX_LINE_WIDTH}");
            self.style.line_width = MAX_LINE_WIDTH;
        } else if width.is_finite() && width > 0.0 {
            self.style.line_width = width;
        } else {
            log::warn!("Ignoring invalid line width {width}");
        }
    }

    pub fn line_cap(&self) -> LineCap {
        self.style.line_cap
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.style.line_cap = cap;
    }

    pub fn composite(&self) -> CompositeMode {
        self.style.composite
    }

    pub fn set_composite(&mut self, mode: CompositeMode) {
        if self.style.composite != mode {
            log::debug!("Composite mode {:?} -> {:?}", self.style.composite, mode);
        }
        self.style.composite = mode;
        self.sync_operator();
    }

    pub fn font(&self) -> &FontDescriptor {
        &self.style.font
    }

    pub fn set_font(&mut self, font: FontDescriptor) {
        self.style.font = font;
    }

    pub fn font_size(&self) -> f64 {
        self.style.font_size
    }

    pub fn set_font_size(&mut self, size: f64) {
        self.style.font_size = size;
    }

    /// The current font as a CSS shorthand string, e.g. `"12px sans-serif"`.
    pub fn font_css(&self) -> String {
        self.style.font.to_css_string(self.style.font_size)
    }

    /// Viewport bounds of the canvas element.
    pub fn canvas_bounds(&self) -> CanvasBounds {
        self.bounds
    }

    /// Moves the canvas element within the viewport (scroll or relayout).
    pub fn set_canvas_origin(&mut self, left: f64, top: f64) {
        self.bounds.left = left;
        self.bounds.top = top;
    }

    /// Returns true if the viewport position lies over the canvas.
    pub fn canvas_contains(&self, client_x: f64, client_y: f64) -> bool {
        let x = client_x - self.bounds.left;
        let y = client_y - self.bounds.top;
        x >= 0.0 && y >= 0.0 && x < f64::from(self.width()) && y < f64::from(self.height())
    }

    /// Strokes a straight segment with the current stroke style.
    pub fn stroke_segment(&mut self, from: Point, to: Point) {
        let rect = render::render_segment(
            &self.cairo,
            (from.x, from.y),
            (to.x, to.y),
            self.style.stroke_color,
            self.style.line_width,
            self.style.line_cap.into(),
        );
        self.dirty.mark_optional_rect(rect);
    }

    /// Fills a rectangle with the current fill color.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let rect =
            render::render_fill_rect(&self.cairo, x, y, width, height, self.style.fill_color);
        self.dirty.mark_optional_rect(rect);
    }

    /// Strokes a rectangle outline with the current stroke style.
    pub fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let rect = render::render_stroke_rect(
            &self.cairo,
            x,
            y,
            width,
            height,
            self.style.stroke_color,
            self.style.line_width,
        );
        self.dirty.mark_optional_rect(rect);
    }

    /// Renders `text` with its baseline starting at `at`, using the current
    /// font, font size and fill color.
    pub fn fill_text(&mut self, text: &str, at: Point) {
        let rect = render::render_text(
            &self.cairo,
            at.x,
            at.y,
            text,
            self.style.fill_color,
            self.style.font_size,
            &self.style.font,
        );
        self.dirty.mark_optional_rect(rect);
    }

    /// Swaps in a new bitmap sized to `image`, keeping the style state.
    pub fn replace_bitmap(&mut self, image: &cairo::ImageSurface) -> Result<(), PaintError> {
        let surface =
            cairo::ImageSurface::create(cairo::Format::ARgb32, image.width(), image.height())?;
        let cairo = cairo::Context::new(&surface)?;
        render::render_image(&cairo, image)?;

        self.surface = surface;
        self.cairo = cairo;
        self.sync_operator();
        self.dirty.mark_full();
        log::debug!(
            "Bitmap replaced: {}x{} (style kept: {})",
            self.width(),
            self.height(),
            self.style.stroke_color.to_hex()
        );
        Ok(())
    }

    /// Encodes the bitmap as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> Result<(), PaintError> {
        self.surface.flush();
        self.surface.write_to_png(writer)?;
        Ok(())
    }

    /// Copies the raw premultiplied ARGB32 bytes of the bitmap.
    pub fn snapshot(&self) -> Vec<u8> {
        self.surface.flush();
        let mut bytes = Vec::new();
        if let Err(err) = self.surface.with_data(|data| bytes.extend_from_slice(data)) {
            log::warn!("Failed to read bitmap: {err}");
        }
        bytes
    }

    /// Returns the `[b, g, r, a]` bytes of one pixel (little-endian ARGB32).
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }
        let stride = self.surface.stride() as usize;
        let offset = y as usize * stride + x as usize * 4;
        let data = self.snapshot();
        data.get(offset..offset + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Returns the alpha channel of one pixel.
    pub fn alpha_at(&self, x: i32, y: i32) -> Option<u8> {
        // ARGB32 is stored native-endian; alpha is the high byte of the word
        self.pixel(x, y).map(|px| {
            let word = u32::from_ne_bytes(px);
            (word >> 24) as u8
        })
    }

    /// Drains the areas drawn since the last call.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        let (width, height) = (self.width(), self.height());
        self.dirty.take_regions(width, height)
    }

    /// Returns true when nothing has been drawn since the last drain.
    pub fn is_clean(&self) -> bool {
        self.dirty.is_clean()
    }

    fn sync_operator(&self) {
        self.cairo.set_operator(self.style.composite.operator());
    }
}

impl std::fmt::Debug for DrawingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingContext")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("style", &self.style)
            .field("bounds", &self.bounds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED};

    fn context(width: i32, height: i32) -> DrawingContext {
        DrawingContext::new(width, height, PaintStyle::default()).unwrap()
    }

    #[test]
    fn new_bitmap_is_transparent_and_clean() {
        let cx = context(20, 10);
        assert_eq!((cx.width(), cx.height()), (20, 10));
        assert!(cx.snapshot().iter().all(|b| *b == 0));
        assert!(cx.is_clean());
        assert_eq!(cx.composite(), CompositeMode::SourceOver);
    }

    #[test]
    fn stroke_segment_paints_and_records_damage() {
        let mut cx = context(40, 40);
        cx.set_line_width(4.0);
        cx.stroke_segment(Point::new(5, 20), Point::new(35, 20));

        assert!(cx.alpha_at(20, 20).unwrap() > 0);
        assert_eq!(cx.alpha_at(20, 2), Some(0));
        let regions = cx.take_dirty_regions();
        assert_eq!(regions.len(), 1);
        assert!(regions[0].contains(20, 20));
    }

    #[test]
    fn destination_out_erases_pixels() {
        let mut cx = context(40, 40);
        cx.set_line_width(6.0);
        cx.stroke_segment(Point::new(5, 20), Point::new(35, 20));
        assert_eq!(cx.alpha_at(20, 20), Some(255));

        cx.set_composite(CompositeMode::DestinationOut);
        cx.stroke_segment(Point::new(5, 20), Point::new(35, 20));
        assert_eq!(cx.alpha_at(20, 20), Some(0));
    }

    #[test]
    fn set_color_updates_fill_and_stroke() {
        let mut cx = context(4, 4);
        cx.set_color(RED);
        assert_eq!(cx.fill_color(), RED);
        assert_eq!(cx.stroke_color(), RED);

        cx.set_stroke_color(BLUE);
        assert_eq!(cx.fill_color(), RED);
    }

    #[test]
    fn invalid_widths_are_ignored() {
        let mut cx = context(4, 4);
        cx.set_line_width(8.0);
        cx.set_line_width(0.0);
        cx.set_line_width(f64::NAN);
        assert_eq!(cx.line_width(), 8.0);
    }

    #[test]
    fn huge_widths_are_clamped() {
        let mut cx = context(4, 4);
        cx.set_line_width(1e6);
        assert_eq!(cx.line_width(), MAX_LINE_WIDTH);
        cx.set_line_width(f64::INFINITY);
        assert_eq!(cx.line_width(), MAX_LINE_WIDTH);

        let style = PaintStyle {
            line_width: 5e3,
            ..PaintStyle::default()
        };
        let cx = DrawingContext::new(4, 4, style).unwrap();
        assert_eq!(cx.line_width(), MAX_LINE_WIDTH);
    }

    #[test]
    fn canvas_contains_respects_origin() {
        let mut cx = context(100, 50);
        cx.set_canvas_origin(10.0, 20.0);
        assert!(cx.canvas_contains(10.0, 20.0));
        assert!(cx.canvas_contains(109.5, 69.0));
        assert!(!cx.canvas_contains(9.0, 30.0));
        assert!(!cx.canvas_contains(50.0, 70.0));
    }

    #[test]
    fn replace_bitmap_resizes_and_keeps_style() {
        let mut cx = context(10, 10);
        cx.set_color(BLUE);
        cx.set_line_width(12.0);

        let image = cairo::ImageSurface::create(cairo::Format::ARgb32, 30, 15).unwrap();
        cx.replace_bitmap(&image).unwrap();

        assert_eq!((cx.width(), cx.height()), (30, 15));
        assert_eq!(cx.stroke_color(), BLUE);
        assert_eq!(cx.line_width(), 12.0);
        assert_eq!(cx.take_dirty_regions(), vec![Rect::new(0, 0, 30, 15).unwrap()]);
    }

    #[test]
    fn png_output_has_signature() {
        let cx = context(3, 3);
        let mut bytes = Vec::new();
        cx.write_png(&mut bytes).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
