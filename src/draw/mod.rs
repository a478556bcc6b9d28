//! Rendering primitives and the drawing context (Cairo-based).
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`DrawingContext`]: the bitmap plus its mutable paint style
//! - [`DirtyTracker`]: damage accumulated by drawing calls
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod context;
pub mod dirty;
pub mod font;
pub mod render;

// Re-export commonly used types at module level
pub use color::Color;
pub use context::{CompositeMode, DrawingContext, LineCap, MAX_LINE_WIDTH, PaintStyle};
pub use dirty::DirtyTracker;
pub use font::FontDescriptor;

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
