//! Toolbar controls: named setters for the tool selection and the paint style.
//!
//! A host builds whatever widgets it likes (select boxes, a color picker, file
//! choosers) and forwards each change as a `(control name, string value)`
//! pair. The toolbar owns the active tool selection; everything else is
//! written straight into the surface's drawing context.

use crate::error::{PaintError, Result};
use crate::image::{FileSaveConfig, ImageSource};
use crate::input::{EventOutcome, PointerEvent};
use crate::surface::PaintSurface;
use crate::tools::TextPrompt;
use crate::util;
use std::fmt;
use std::path::PathBuf;

/// Selects the active tool by name.
pub const TOOL: &str = "tool";
/// Sets fill and stroke color.
pub const COLOR: &str = "color";
/// Sets the stroke width to one of [`BRUSH_SIZES`].
pub const BRUSH_SIZE: &str = "brush_size";
/// Replaces the bitmap with a local PNG file.
pub const OPEN_FILE: &str = "open_file";
/// Replaces the bitmap with a PNG given as a `file://` URL or a path.
pub const OPEN_URL: &str = "open_url";
/// Writes the bitmap; an empty value uses a generated file name.
pub const SAVE: &str = "save";

/// Brush sizes offered by the size selector, in pixels.
pub const BRUSH_SIZES: [u32; 11] = [1, 2, 3, 5, 8, 12, 25, 35, 50, 75, 100];

/// What a control may change.
pub struct ControlContext<'a> {
    pub surface: &'a mut PaintSurface,
    /// Name of the tool started by the next press
    pub active_tool: &'a mut String,
    pub save_config: &'a FileSaveConfig,
}

/// A named toolbar control.
pub trait Control {
    fn apply(&self, value: &str, target: &mut ControlContext<'_>) -> Result<()>;
}

impl<F> Control for F
where
    F: Fn(&str, &mut ControlContext<'_>) -> Result<()>,
{
    fn apply(&self, value: &str, target: &mut ControlContext<'_>) -> Result<()> {
        self(value, target)
    }
}

/// Ordered registry of controls plus the active tool selection.
pub struct Toolbar {
    controls: Vec<(String, Box<dyn Control>)>,
    active_tool: String,
    save_config: FileSaveConfig,
}

impl Toolbar {
    /// Creates a toolbar without controls.
    ///
    /// `active_tool` is the tool selected initially.
    pub fn new(active_tool: impl Into<String>, save_config: FileSaveConfig) -> Self {
        Self {
            controls: Vec::new(),
            active_tool: active_tool.into(),
            save_config,
        }
    }

    /// Creates a toolbar with the standard controls, selecting the first
    /// tool registered on `surface`.
    pub fn with_defaults(surface: &PaintSurface, save_config: FileSaveConfig) -> Self {
        let first = surface.tools().names().next().unwrap_or_default().to_string();
        let standard: [(&str, Box<dyn Control>); 6] = [
            (TOOL, Box::new(select_tool)),
            (COLOR, Box::new(set_color)),
            (BRUSH_SIZE, Box::new(set_brush_size)),
            (OPEN_FILE, Box::new(open_file)),
            (OPEN_URL, Box::new(open_url)),
            (SAVE, Box::new(save)),
        ];

        let mut toolbar = Self::new(first, save_config);
        toolbar.controls = standard
            .into_iter()
            .map(|(name, control)| (name.to_string(), control))
            .collect();
        toolbar
    }

    /// Adds a named control. Names are unique.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        control: impl Control + 'static,
    ) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(PaintError::DuplicateControl(name));
        }
        log::debug!("Registered toolbar control '{name}'");
        self.controls.push((name, Box::new(control)));
        Ok(())
    }

    /// Adds a closure as a named control.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, control: F) -> Result<()>
    where
        F: Fn(&str, &mut ControlContext<'_>) -> Result<()> + 'static,
    {
        self.register(name, control)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.controls.iter().any(|(candidate, _)| candidate == name)
    }

    /// Control names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.controls.iter().map(|(name, _)| name.as_str())
    }

    /// The tool started by the next press.
    pub fn active_tool(&self) -> &str {
        &self.active_tool
    }

    /// Feeds a widget change to the named control.
    pub fn apply(&mut self, surface: &mut PaintSurface, name: &str, value: &str) -> Result<()> {
        let control = self
            .controls
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, control)| control)
            .ok_or_else(|| PaintError::UnknownControl(name.to_string()))?;

        log::debug!("Control '{name}' <- '{value}'");
        let mut target = ControlContext {
            surface,
            active_tool: &mut self.active_tool,
            save_config: &self.save_config,
        };
        control.apply(value, &mut target)
    }

    /// Forwards a pointer event to `surface` with the selected tool.
    pub fn handle_pointer(
        &self,
        surface: &mut PaintSurface,
        event: &PointerEvent,
        prompt: &mut dyn TextPrompt,
    ) -> Result<EventOutcome> {
        surface.handle_pointer(event, &self.active_tool, prompt)
    }
}

impl fmt::Debug for Toolbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolbar")
            .field("controls", &self.names().collect::<Vec<_>>())
            .field("active_tool", &self.active_tool)
            .field("save_config", &self.save_config)
            .finish()
    }
}

fn select_tool(value: &str, target: &mut ControlContext<'_>) -> Result<()> {
    let name = value.trim();
    if !target.surface.tools().contains(name) {
        return Err(PaintError::invalid_value(TOOL, value, "no tool with this name"));
    }
    *target.active_tool = name.to_string();
    Ok(())
}

fn set_color(value: &str, target: &mut ControlContext<'_>) -> Result<()> {
    let color = util::parse_color(value).ok_or_else(|| {
        PaintError::invalid_value(COLOR, value, "expected #rrggbb or a color name")
    })?;
    target.surface.context_mut().set_color(color);
    Ok(())
}

fn set_brush_size(value: &str, target: &mut ControlContext<'_>) -> Result<()> {
    let size = parse_brush_size(value)?;
    target.surface.context_mut().set_line_width(f64::from(size));
    Ok(())
}

fn parse_brush_size(value: &str) -> Result<u32> {
    let digits = value.trim().trim_end_matches("pixels").trim_end();
    let size: u32 = digits.parse().map_err(|_| {
        PaintError::invalid_value(BRUSH_SIZE, value, "expected a whole number of pixels")
    })?;
    if !BRUSH_SIZES.contains(&size) {
        return Err(PaintError::invalid_value(
            BRUSH_SIZE,
            value,
            format!("not one of {BRUSH_SIZES:?}"),
        ));
    }
    Ok(size)
}

fn open_file(value: &str, target: &mut ControlContext<'_>) -> Result<()> {
    // An empty selection means the chooser was dismissed
    if value.trim().is_empty() {
        return Ok(());
    }
    target
        .surface
        .load_image(&ImageSource::File(PathBuf::from(value.trim())))
}

fn open_url(value: &str, target: &mut ControlContext<'_>) -> Result<()> {
    let source = ImageSource::parse(value)?;
    target.surface.load_image(&source)
}

fn save(value: &str, target: &mut ControlContext<'_>) -> Result<()> {
    let path = value.trim();
    if path.is_empty() {
        target.surface.save_image(target.save_config)?;
    } else {
        target.surface.save_png(&crate::image::expand_tilde(path))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::draw::BLUE;
    use crate::input::MouseButton;
    use crate::tools::{ERASE, LINE, QueuedPrompt, ToolRegistry};

    fn create_test_setup() -> (PaintSurface, Toolbar) {
        let mut config = Config::default();
        config.canvas.width = 50;
        config.canvas.height = 30;
        config.canvas.border_width = 0.0;
        config.spray.seed = Some(3);
        let surface = PaintSurface::new(&config, ToolRegistry::with_defaults()).unwrap();
        let toolbar = Toolbar::with_defaults(&surface, FileSaveConfig::default());
        (surface, toolbar)
    }

    #[test]
    fn standard_controls_and_initial_tool() {
        let (_surface, toolbar) = create_test_setup();
        assert_eq!(
            toolbar.names().collect::<Vec<_>>(),
            [TOOL, COLOR, BRUSH_SIZE, OPEN_FILE, OPEN_URL, SAVE]
        );
        assert_eq!(toolbar.active_tool(), LINE);
    }

    #[test]
    fn tool_control_only_accepts_registered_tools() {
        let (mut surface, mut toolbar) = create_test_setup();
        toolbar.apply(&mut surface, TOOL, ERASE).unwrap();
        assert_eq!(toolbar.active_tool(), ERASE);

        let err = toolbar.apply(&mut surface, TOOL, "Bucket").unwrap_err();
        assert!(matches!(err, PaintError::InvalidControlValue { .. }));
        assert_eq!(toolbar.active_tool(), ERASE);
    }

    #[test]
    fn color_control_sets_fill_and_stroke() {
        let (mut surface, mut toolbar) = create_test_setup();
        toolbar.apply(&mut surface, COLOR, "#0000ff").unwrap();
        assert_eq!(surface.context().fill_color(), BLUE);
        assert_eq!(surface.context().stroke_color(), BLUE);

        assert!(toolbar.apply(&mut surface, COLOR, "#12345").is_err());
        assert_eq!(surface.context().fill_color(), BLUE);
    }

    #[test]
    fn brush_size_only_accepts_presets() {
        let (mut surface, mut toolbar) = create_test_setup();
        toolbar.apply(&mut surface, BRUSH_SIZE, "25").unwrap();
        assert_eq!(surface.context().line_width(), 25.0);
        toolbar.apply(&mut surface, BRUSH_SIZE, "8 pixels").unwrap();
        assert_eq!(surface.context().line_width(), 8.0);

        for bad in ["7", "0", "-1", "big", "12.5"] {
            let err = toolbar.apply(&mut surface, BRUSH_SIZE, bad).unwrap_err();
            assert!(matches!(err, PaintError::InvalidControlValue { .. }), "{bad}");
        }
        assert_eq!(surface.context().line_width(), 8.0);
    }

    #[test]
    fn unknown_and_duplicate_controls() {
        let (mut surface, mut toolbar) = create_test_setup();
        assert!(matches!(
            toolbar.apply(&mut surface, "zoom", "2"),
            Err(PaintError::UnknownControl(_))
        ));
        assert!(matches!(
            toolbar.register_fn(COLOR, |_, _| Ok(())),
            Err(PaintError::DuplicateControl(_))
        ));
    }

    #[test]
    fn custom_controls_can_drive_the_surface() {
        let (mut surface, mut toolbar) = create_test_setup();
        toolbar
            .register_fn("origin", |value, target| {
                let (left, top) = value
                    .split_once(',')
                    .ok_or_else(|| PaintError::invalid_value("origin", value, "expected x,y"))?;
                let parse = |v: &str| {
                    v.trim()
                        .parse::<f64>()
                        .map_err(|_| PaintError::invalid_value("origin", value, "not a number"))
                };
                target.surface.set_canvas_origin(parse(left)?, parse(top)?);
                Ok(())
            })
            .unwrap();

        toolbar.apply(&mut surface, "origin", "10, 20").unwrap();
        assert!(surface.context().canvas_contains(10.0, 20.0));
        assert!(!surface.context().canvas_contains(9.0, 20.0));
    }

    #[test]
    fn save_and_reopen_through_controls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.png");
        let (mut surface, mut toolbar) = create_test_setup();

        let mut prompt = QueuedPrompt::new();
        for event in [
            PointerEvent::down(MouseButton::Left, 5.0, 15.0),
            PointerEvent::moved(45.0, 15.0),
            PointerEvent::up(MouseButton::Left, 45.0, 15.0),
        ] {
            toolbar.handle_pointer(&mut surface, &event, &mut prompt).unwrap();
        }

        toolbar.apply(&mut surface, SAVE, path.to_str().unwrap()).unwrap();
        toolbar.apply(&mut surface, BRUSH_SIZE, "50").unwrap();

        let (mut fresh, mut fresh_toolbar) = create_test_setup();
        fresh_toolbar.apply(&mut fresh, BRUSH_SIZE, "12").unwrap();
        let url = url::Url::from_file_path(&path).unwrap();
        fresh_toolbar.apply(&mut fresh, OPEN_URL, url.as_str()).unwrap();
        assert_eq!(fresh.context().alpha_at(25, 15), Some(255));
        assert_eq!(fresh.context().line_width(), 12.0);

        fresh_toolbar.apply(&mut fresh, OPEN_FILE, "").unwrap();
        assert!(matches!(
            fresh_toolbar.apply(&mut fresh, OPEN_URL, "ftp://example.com/x.png"),
            Err(PaintError::UnsupportedSource(_))
        ));
    }
}
