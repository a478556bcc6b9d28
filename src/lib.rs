//! Raster paint surface with pluggable pointer-driven tools.
//!
//! The crate owns the bitmap and the interaction engine; a host supplies
//! pointer events in viewport coordinates, advances the clock, and shows the
//! bitmap however it likes. The bundled binary is such a host: it replays
//! gesture scripts and writes the result as PNG.
//!
//! ```no_run
//! use sketchpad::input::{MouseButton, PointerEvent};
//! use sketchpad::tools::{QueuedPrompt, ToolRegistry};
//! use sketchpad::{Config, PaintSurface};
//!
//! let config = Config::default();
//! let mut surface = PaintSurface::new(&config, ToolRegistry::with_defaults())?;
//! let mut prompt = QueuedPrompt::new();
//! let press = PointerEvent::down(MouseButton::Left, 10.0, 10.0);
//! surface.handle_pointer(&press, "Line", &mut prompt)?;
//! surface.handle_pointer(&PointerEvent::moved(90.0, 40.0), "Line", &mut prompt)?;
//! surface.handle_pointer(&PointerEvent::up(MouseButton::Left, 90.0, 40.0), "Line", &mut prompt)?;
//! surface.save_png(std::path::Path::new("drawing.png"))?;
//! # Ok::<(), sketchpad::PaintError>(())
//! ```

pub mod config;
pub mod draw;
pub mod error;
pub mod image;
pub mod input;
pub mod script;
pub mod surface;
pub mod toolbar;
pub mod tools;
pub mod util;

pub use config::Config;
pub use error::PaintError;
pub use surface::PaintSurface;
pub use toolbar::Toolbar;
