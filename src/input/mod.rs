//! Pointer input handling.
//!
//! This module defines the host-neutral pointer event types, the conversion
//! from viewport to canvas coordinates, and the drag tracker that follows a
//! gesture from press to release.

pub mod drag;
pub mod events;
pub mod geometry;

// Re-export commonly used types at module level
pub use drag::{DragSession, DragTracker, EndHandler, SessionId};
pub use events::{EventOutcome, MouseButton, PointerEvent, PointerKind};
pub use geometry::{CanvasBounds, Point, relative_pos};
