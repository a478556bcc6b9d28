//! Drawing tools and the registry that names them.
//!
//! A tool is anything implementing [`ToolBehavior`]: given the pointer-down
//! event that started a gesture and a [`ToolContext`], it either draws once
//! (text) or registers a drag session that follows the pointer until release
//! (line, erase, spray). Tools are looked up by name at dispatch time, so the
//! registry is the single extension point for new tools.

pub mod line;
pub mod spray;
pub mod text;

pub use line::{EraseTool, LineTool, line_gesture};
pub use spray::{SprayTool, dots_per_tick, random_point_in_radius};
pub use text::{QueuedPrompt, TextPrompt, TextTool};

use crate::draw::DrawingContext;
use crate::error::{PaintError, Result};
use crate::input::{DragTracker, PointerEvent};
use std::fmt;
use std::time::{Duration, Instant};

/// Name of the freehand line tool.
pub const LINE: &str = "Line";
/// Name of the eraser.
pub const ERASE: &str = "Erase";
/// Name of the text tool.
pub const TEXT: &str = "Text";
/// Name of the spray can.
pub const SPRAY: &str = "Spray";

/// Tunables read by the built-in tools.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    /// Interval between spray ticks
    pub spray_period: Duration,
    /// Brush area (px²) covered per sprayed dot per tick
    pub spray_area_per_dot: f64,
    /// Smallest font size the text tool uses, in pixels
    pub min_font_size: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            spray_period: Duration::from_millis(25),
            spray_area_per_dot: 30.0,
            min_font_size: 7.0,
        }
    }
}

/// Everything a tool may touch while starting a gesture.
pub struct ToolContext<'a> {
    /// The surface's drawing context
    pub cx: &'a mut DrawingContext,
    /// Where gestures register their move/end handlers
    pub drag: &'a mut DragTracker,
    /// Synchronous text input collaborator
    pub prompt: &'a mut dyn TextPrompt,
    pub settings: &'a ToolSettings,
    /// The surface clock at the time of the press
    pub now: Instant,
}

/// Behavior bound to a tool name.
pub trait ToolBehavior {
    /// Handles the pointer-down that starts a gesture.
    fn start(&self, event: &PointerEvent, tool: &mut ToolContext<'_>) -> Result<()>;
}

impl<F> ToolBehavior for F
where
    F: Fn(&PointerEvent, &mut ToolContext<'_>) -> Result<()>,
{
    fn start(&self, event: &PointerEvent, tool: &mut ToolContext<'_>) -> Result<()> {
        self(event, tool)
    }
}

/// Ordered mapping from unique tool names to behaviors.
///
/// Built once at startup and handed to the surface; the order of registration
/// is the order tools are listed in a tool picker.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<(String, Box<dyn ToolBehavior>)>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in tools.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.tools.push((LINE.to_string(), Box::new(LineTool)));
        registry.tools.push((ERASE.to_string(), Box::new(EraseTool)));
        registry.tools.push((TEXT.to_string(), Box::new(TextTool)));
        registry.tools.push((SPRAY.to_string(), Box::new(SprayTool)));
        registry
    }

    /// Adds a named tool. Names are unique.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        tool: impl ToolBehavior + 'static,
    ) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(PaintError::DuplicateTool(name));
        }
        log::debug!("Registered tool '{name}'");
        self.tools.push((name, Box::new(tool)));
        Ok(())
    }

    /// Adds a closure as a named tool.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, tool: F) -> Result<()>
    where
        F: Fn(&PointerEvent, &mut ToolContext<'_>) -> Result<()> + 'static,
    {
        self.register(name, tool)
    }

    pub fn get(&self, name: &str) -> Option<&dyn ToolBehavior> {
        self.tools
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, tool)| tool.as_ref())
    }

    /// Looks up a tool, failing with [`PaintError::UnknownTool`].
    pub fn resolve(&self, name: &str) -> Result<&dyn ToolBehavior> {
        self.get(name)
            .ok_or_else(|| PaintError::UnknownTool(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Tool names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
