//! Generic pointer event types for cross-host compatibility.

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (primary drawing button)
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

impl MouseButton {
    /// Returns true for the button that starts gestures.
    pub fn is_primary(self) -> bool {
        self == MouseButton::Left
    }
}

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Button pressed
    Down(MouseButton),
    /// Pointer moved (with or without buttons held)
    Move,
    /// Button released
    Up(MouseButton),
}

/// A pointer event in viewport coordinates.
///
/// Hosts deliver every event for the whole viewport, not only those over the
/// canvas: a drag that leaves the canvas must still see its release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Horizontal viewport position
    pub client_x: f64,
    /// Vertical viewport position
    pub client_y: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, client_x: f64, client_y: f64) -> Self {
        Self {
            kind,
            client_x,
            client_y,
        }
    }

    pub fn down(button: MouseButton, client_x: f64, client_y: f64) -> Self {
        Self::new(PointerKind::Down(button), client_x, client_y)
    }

    pub fn moved(client_x: f64, client_y: f64) -> Self {
        Self::new(PointerKind::Move, client_x, client_y)
    }

    pub fn up(button: MouseButton, client_x: f64, client_y: f64) -> Self {
        Self::new(PointerKind::Up(button), client_x, client_y)
    }
}

/// How the surface handled an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Nothing listened; the host should run its default handling
    Ignored,
    /// A tool was started; the host must suppress its default handling
    /// (text selection while dragging, for example)
    Dispatched,
    /// Delivered to the active drag session
    Tracked,
    /// Ended the active drag session
    Released,
}

impl EventOutcome {
    /// Returns true if the host's default action must be suppressed.
    pub fn default_prevented(self) -> bool {
        self == EventOutcome::Dispatched
    }
}
