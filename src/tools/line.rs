//! Freehand line and eraser.

use super::{ToolBehavior, ToolContext};
use crate::draw::{CompositeMode, DrawingContext, LineCap};
use crate::error::Result;
use crate::input::{EndHandler, PointerEvent, SessionId, relative_pos};

/// Draws a freehand line following the pointer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineTool;

impl ToolBehavior for LineTool {
    fn start(&self, event: &PointerEvent, tool: &mut ToolContext<'_>) -> Result<()> {
        line_gesture(event, tool, None);
        Ok(())
    }
}

/// Starts a freehand line gesture.
///
/// Every pointer-move strokes one segment from the previous position to the
/// new one with whatever stroke style is current at that moment, so a color
/// or width change mid-gesture only affects later segments. `on_end` is
/// handed to the drag tracker unchanged.
pub fn line_gesture(
    event: &PointerEvent,
    tool: &mut ToolContext<'_>,
    on_end: Option<EndHandler>,
) -> SessionId {
    tool.cx.set_line_cap(LineCap::Round);

    let mut anchor = relative_pos(event, tool.cx.canvas_bounds());
    tool.drag
        .start_drag(
            move |event: &PointerEvent, cx: &mut DrawingContext| {
                let next = relative_pos(event, cx.canvas_bounds());
                cx.stroke_segment(anchor, next);
                anchor = next;
            },
            on_end,
        )
        .id()
}

/// Erases along the pointer path by drawing a line in
/// [`CompositeMode::DestinationOut`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EraseTool;

impl ToolBehavior for EraseTool {
    fn start(&self, event: &PointerEvent, tool: &mut ToolContext<'_>) -> Result<()> {
        tool.cx.set_composite(CompositeMode::DestinationOut);
        line_gesture(
            event,
            tool,
            Some(Box::new(|_event: &PointerEvent, cx: &mut DrawingContext| {
                cx.set_composite(CompositeMode::SourceOver);
            })),
        );
        Ok(())
    }
}
