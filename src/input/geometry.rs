//! Viewport to surface coordinate conversion.

use super::events::PointerEvent;

/// Integer surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Top-left viewport offset of the canvas element.
///
/// Scrolling or relayout can move the canvas at any time, so gestures read
/// the bounds afresh for every event instead of keeping a copy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasBounds {
    pub left: f64,
    pub top: f64,
}

impl CanvasBounds {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// Converts the event's viewport position to canvas-relative integer
/// coordinates, flooring each axis.
pub fn relative_pos(event: &PointerEvent, bounds: CanvasBounds) -> Point {
    Point {
        x: (event.client_x - bounds.left).floor() as i32,
        y: (event.client_y - bounds.top).floor() as i32,
    }
}
