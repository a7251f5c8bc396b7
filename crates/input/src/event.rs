use glam::Vec2;

/// Keys the toy reacts to. Everything else is dropped by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Ascend.
    Space,
    /// Descend.
    ShiftLeft,
    /// Release pointer capture.
    Escape,
    /// Toggle the inspector.
    F1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// A raw platform event, queued until the next frame.
///
/// Positions and sizes are in logical pixels with the origin at the top-left
/// of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key { key: Key, pressed: bool },
    PointerButton { button: PointerButton, pressed: bool },
    /// Raw relative mouse movement.
    PointerMotion { dx: f32, dy: f32 },
    /// Wheel movement; positive means scrolling down.
    Wheel { delta_y: f32 },
    Touch { id: u64, phase: TouchPhase, position: Vec2 },
    /// The window lost keyboard focus.
    FocusLost,
    Resized { width: f32, height: f32 },
}
