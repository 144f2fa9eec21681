//! Canonical, backend-independent event taxonomy
//!
//! Backends translate host notifications into these variants; applications
//! only ever see this taxonomy. Events reference their window by id and do
//! not keep it alive — draining a queue after destroying the window that
//! produced its events is a documented precondition violation.

use crate::window::WindowId;

/// A canonical event delivered to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Window lifecycle and focus notifications
    Window(WindowEvent),
    /// Pointer input routed to the window with mouse focus
    Mouse(MouseEvent),
}

/// Window-category event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowEvent {
    /// The window that raised the notification
    pub window: WindowId,
    /// What happened
    pub kind: WindowEventKind,
}

/// Window event discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEventKind {
    /// The client area changed to the given size, in screen coordinates.
    Resized {
        /// New client width
        width: i32,
        /// New client height
        height: i32,
    },
    /// The user asked the window to close. The window is still alive; the
    /// application decides what to do.
    CloseRequested,
    /// The window gained input focus.
    Focused,
    /// The window lost input focus.
    Unfocused,
    /// The pointer entered the window's hover region.
    PointerEntered,
    /// The pointer left the window's hover region.
    PointerLeft,
}

/// Mouse-category event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// The window holding mouse focus when the event was raised
    pub window: WindowId,
    /// What happened
    pub kind: MouseEventKind,
}

/// Mouse event discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    /// The pointer moved to (x, y) in client coordinates.
    Moved {
        /// Pointer x position
        x: i32,
        /// Pointer y position
        y: i32,
    },
    /// A mouse button changed state.
    Button {
        /// Which button
        button: MouseButton,
        /// Pressed or released
        state: ButtonState,
    },
    /// The wheel rotated by `delta` steps; positive is away from the user.
    Wheel {
        /// Wheel steps
        delta: i32,
    },
}

/// Mouse buttons covered by the canonical taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Middle mouse button
    Middle,
    /// Right mouse button
    Right,
}

/// Button transition direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// The button was pressed.
    Down,
    /// The button was released.
    Up,
}

impl Event {
    /// The window this event references.
    pub fn window(&self) -> WindowId {
        match self {
            Event::Window(event) => event.window,
            Event::Mouse(event) => event.window,
        }
    }
}
