//! The paint surface: bitmap, tools and the pointer dispatcher.
//!
//! A [`PaintSurface`] owns the one [`DrawingContext`] of a canvas, the drag
//! tracker following the current gesture, and the tool registry it was built
//! with. The host feeds it pointer events in viewport coordinates through
//! [`PaintSurface::handle_pointer`] and drives its clock with
//! [`PaintSurface::advance`]; timed tools only run when the clock moves.


use crate::config::Config;
use crate::draw::{DrawingContext, PaintStyle};
use crate::error::Result;
use crate::image::{self, FileSaveConfig, ImageSource};
use crate::input::{DragTracker, EventOutcome, MouseButton, PointerEvent, PointerKind};
use crate::tools::{TextPrompt, ToolContext, ToolRegistry, ToolSettings};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// A drawing surface with its tools.
pub struct PaintSurface {
    cx: DrawingContext,
    drag: DragTracker,
    tools: ToolRegistry,
    settings: ToolSettings,
    rng: StdRng,
    clock: Instant,
}

impl PaintSurface {
    /// Creates a surface from the user configuration.
    ///
    /// The canvas is created at the configured size with the configured border
    /// stroked around its edge, then the paint style is reset to the
    /// configured defaults.
    pub fn new(config: &Config, tools: ToolRegistry) -> Result<Self> {
        let style = config.paint_style();
        let mut cx = DrawingContext::new(config.canvas.width, config.canvas.height, style.clone())?;
        stroke_border(&mut cx, config, &style);

        let rng = match config.spray.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        log::info!(
            "Paint surface {}x{} with tools {:?}",
            cx.width(),
            cx.height(),
            tools
        );
        Ok(Self::from_parts(cx, tools, config.tool_settings(), rng))
    }

    /// Assembles a surface from an existing context.
    pub fn from_parts(
        cx: DrawingContext,
        tools: ToolRegistry,
        settings: ToolSettings,
        rng: StdRng,
    ) -> Self {
        Self {
            cx,
            drag: DragTracker::new(),
            tools,
            settings,
            rng,
            clock: Instant::now(),
        }
    }

    /// Routes one pointer event.
    ///
    /// A primary-button press over the canvas starts `active_tool` and is
    /// reported as [`EventOutcome::Dispatched`] (default action prevented).
    /// Presses with other buttons, outside the canvas, or while a gesture is
    /// still in progress are ignored. Moves and releases anywhere in the
    /// viewport go to the active gesture.
    ///
    /// # Errors
    /// [`crate::PaintError::UnknownTool`] if `active_tool` is not registered.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        active_tool: &str,
        prompt: &mut dyn TextPrompt,
    ) -> Result<EventOutcome> {
        let outcome = match event.kind {
            PointerKind::Down(button) => self.pointer_down(button, event, active_tool, prompt)?,
            PointerKind::Move => {
                if self.drag.pointer_move(event, &mut self.cx) {
                    EventOutcome::Tracked
                } else {
                    EventOutcome::Ignored
                }
            }
            PointerKind::Up(_) => {
                if self.drag.pointer_up(event, &mut self.cx) {
                    EventOutcome::Released
                } else {
                    EventOutcome::Ignored
                }
            }
        };
        Ok(outcome)
    }

    fn pointer_down(
        &mut self,
        button: MouseButton,
        event: &PointerEvent,
        active_tool: &str,
        prompt: &mut dyn TextPrompt,
    ) -> Result<EventOutcome> {
        if !button.is_primary() {
            log::trace!("Ignoring {button:?} press");
            return Ok(EventOutcome::Ignored);
        }
        if !self.cx.canvas_contains(event.client_x, event.client_y) {
            log::trace!(
                "Ignoring press outside the canvas at ({}, {})",
                event.client_x,
                event.client_y
            );
            return Ok(EventOutcome::Ignored);
        }
        if self.drag.is_active() {
            log::warn!("Ignoring press while a gesture is still in progress");
            return Ok(EventOutcome::Ignored);
        }

        let tool = self.tools.resolve(active_tool)?;
        log::debug!("Starting tool '{active_tool}'");
        let mut tool_cx = ToolContext {
            cx: &mut self.cx,
            drag: &mut self.drag,
            prompt,
            settings: &self.settings,
            now: self.clock,
        };
        tool.start(event, &mut tool_cx)?;
        Ok(EventOutcome::Dispatched)
    }

    /// Moves the surface clock to `now`, running every timer tick due.
    ///
    /// Returns the number of ticks fired. Instants earlier than the current
    /// clock are ignored.
    pub fn advance(&mut self, now: Instant) -> u64 {
        if now < self.clock {
            log::trace!("Ignoring clock moving backwards");
            return 0;
        }
        self.clock = now;
        self.drag.advance(now, &mut self.cx, &mut self.rng)
    }

    /// Advances the clock by `elapsed`.
    pub fn advance_by(&mut self, elapsed: Duration) -> u64 {
        self.advance(self.clock + elapsed)
    }

    /// The surface clock.
    pub fn now(&self) -> Instant {
        self.clock
    }

    /// Returns true while a gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn drag(&self) -> &DragTracker {
        &self.drag
    }

    pub fn context(&self) -> &DrawingContext {
        &self.cx
    }

    /// Mutable access for toolbar controls.
    pub fn context_mut(&mut self) -> &mut DrawingContext {
        &mut self.cx
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    /// Moves the canvas within the viewport.
    pub fn set_canvas_origin(&mut self, left: f64, top: f64) {
        self.cx.set_canvas_origin(left, top);
    }

    /// Replaces the bitmap with an image, keeping the paint style.
    pub fn load_image(&mut self, source: &ImageSource) -> Result<()> {
        if self.drag.is_active() {
            log::warn!("Loading {source} while a gesture is in progress");
        }
        image::load_image(&mut self.cx, source)
    }

    /// Writes the bitmap to `path` as PNG.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        image::save_png(&self.cx, path)
    }

    /// Writes the bitmap under a generated name. Returns the path written.
    pub fn save_image(&self, config: &FileSaveConfig) -> Result<PathBuf> {
        image::save_image(&self.cx, config)
    }
}

impl std::fmt::Debug for PaintSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintSurface")
            .field("cx", &self.cx)
            .field("drag", &self.drag)
            .field("tools", &self.tools)
            .field("settings", &self.settings)
            .finish()
    }
}

fn stroke_border(cx: &mut DrawingContext, config: &Config, style: &PaintStyle) {
    let width = config.canvas.border_width;
    if width <= 0.0 {
        return;
    }
    cx.set_stroke_color(config.border_color());
    cx.set_line_width(width);
    cx.stroke_rect(0.0, 0.0, f64::from(cx.width()), f64::from(cx.height()));
    cx.set_stroke_color(style.stroke_color);
    cx.set_line_width(style.line_width);
}
