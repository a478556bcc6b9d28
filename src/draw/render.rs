//! Cairo-based rendering primitives.
//!
//! Each function draws directly into the bitmap and returns the area it
//! touched so callers can record damage.

use super::color::Color;
use super::font::FontDescriptor;
use crate::util::{self, Rect};

/// Renders one independently stroked segment.
///
/// A fresh path is started for every call so style changes between calls
/// never affect segments that were already stroked.
pub fn render_segment(
    ctx: &cairo::Context,
    from: (i32, i32),
    to: (i32, i32),
    color: Color,
    width: f64,
    cap: cairo::LineCap,
) -> Option<Rect> {
    color.apply(ctx);
    ctx.set_line_width(width);
    ctx.set_line_cap(cap);

    ctx.new_path();
    ctx.move_to(f64::from(from.0), f64::from(from.1));
    ctx.line_to(f64::from(to.0), f64::from(to.1));
    if let Err(err) = ctx.stroke() {
        log::warn!("Failed to stroke segment {from:?} -> {to:?}: {err}");
        return None;
    }

    util::bounding_box_for_segment(from.0, from.1, to.0, to.1, width)
}

/// Fills an axis-aligned rectangle.
pub fn render_fill_rect(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: Color,
) -> Option<Rect> {
    color.apply(ctx);
    ctx.new_path();
    ctx.rectangle(x, y, width, height);
    if let Err(err) = ctx.fill() {
        log::warn!("Failed to fill rectangle at ({x:.1}, {y:.1}): {err}");
        return None;
    }

    util::bounding_box_for_fill(x, y, width, height)
}

/// Strokes a rectangle outline.
pub fn render_stroke_rect(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: Color,
    thick: f64,
) -> Option<Rect> {
    color.apply(ctx);
    ctx.set_line_width(thick);
    ctx.set_line_join(cairo::LineJoin::Miter);

    ctx.new_path();
    ctx.rectangle(x, y, width, height);
    if let Err(err) = ctx.stroke() {
        log::warn!("Failed to stroke rectangle outline: {err}");
        return None;
    }

    let pad = thick / 2.0;
    util::bounding_box_for_fill(x - pad, y - pad, width + thick, height + thick)
}

/// Renders a single line of text with its baseline at `(x, y)` using Pango.
///
/// The font size is an absolute pixel height. The returned rectangle starts at
/// `x` and spans the layout's logical extent.
pub fn render_text(
    ctx: &cairo::Context,
    x: i32,
    y: i32,
    text: &str,
    color: Color,
    size: f64,
    font: &FontDescriptor,
) -> Option<Rect> {
    let layout = pangocairo::functions::create_layout(ctx);
    layout.set_font_description(Some(&font.to_pango_description(size)));
    layout.set_text(text);

    // Pango positions layouts by their top-left corner
    let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
    let top = f64::from(y) - baseline;

    color.apply(ctx);
    ctx.new_path();
    ctx.move_to(f64::from(x), top);
    pangocairo::functions::show_layout(ctx, &layout);

    let (width, height) = layout.pixel_size();
    Rect::new(x, top.floor() as i32, width.max(1), height.max(1))
}

/// Copies `image` into the target with its top-left corner at the origin.
pub fn render_image(ctx: &cairo::Context, image: &cairo::ImageSurface) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_surface(image, 0.0, 0.0)?;
    let painted = ctx.paint();
    ctx.restore()?;
    painted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED};

    fn surface_with_context(width: i32, height: i32) -> (cairo::ImageSurface, cairo::Context) {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        (surface, ctx)
    }

    fn surface_has_pixels(surface: &mut cairo::ImageSurface) -> bool {
        surface
            .data()
            .map(|data| data.iter().any(|byte| *byte != 0))
            .unwrap_or(false)
    }

    #[test]
    fn segment_draws_pixels_and_reports_bounds() {
        let (mut surface, ctx) = surface_with_context(50, 50);
        let rect = render_segment(&ctx, (5, 5), (40, 5), RED, 4.0, cairo::LineCap::Round)
            .expect("segment bounds");
        drop(ctx);

        assert!(rect.contains(5, 5));
        assert!(rect.contains(40, 5));
        assert!(surface_has_pixels(&mut surface));
    }

    #[test]
    fn fill_rect_marks_single_pixel() {
        let (mut surface, ctx) = surface_with_context(10, 10);
        let rect = render_fill_rect(&ctx, 3.0, 4.0, 1.0, 1.0, BLACK).unwrap();
        drop(ctx);

        assert_eq!(rect, Rect::new(3, 4, 1, 1).unwrap());
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let offset = 4 * stride + 3 * 4;
        assert!(data[offset..offset + 4].iter().any(|b| *b != 0));
        assert!(data[..offset].iter().all(|b| *b == 0));
    }

    #[test]
    fn image_copy_replaces_pixels() {
        let (image, image_ctx) = surface_with_context(4, 4);
        render_fill_rect(&image_ctx, 0.0, 0.0, 4.0, 4.0, RED);
        drop(image_ctx);

        let (mut target, ctx) = surface_with_context(4, 4);
        render_image(&ctx, &image).unwrap();
        drop(ctx);
        assert!(surface_has_pixels(&mut target));
    }
}
