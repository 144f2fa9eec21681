//! Raw-notification translation
//!
//! [`translate`] is the single mapping from a host notification plus the
//! current window state to canonical events and state transitions. Backends
//! never append events themselves; they hand every notification to an
//! [`EventSink`] during a pump cycle and act on the [`Directive`] replies.
//! The reply channel exists so the core can answer queries (size
//! negotiation, exit-watch registration) without re-entering the backend,
//! which is mutably borrowed for the whole pump.

use slotmap::SlotMap;

use crate::event::{Event, MouseEvent, MouseEventKind, WindowEvent, WindowEventKind};
use crate::event::{ButtonState, MouseButton};
use crate::queue::{EventQueue, QueueId};
use crate::window::{Window, WindowId};

/// A host notification, already stripped of platform detail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    /// The user asked the window to close.
    CloseRequested,
    /// The client area was resized.
    Resized {
        /// New client width
        width: i32,
        /// New client height
        height: i32,
    },
    /// The host is negotiating a resize and wants the permitted bounds.
    SizeNegotiation {
        /// Proposed client width
        width: i32,
        /// Proposed client height
        height: i32,
    },
    /// The window gained input focus.
    FocusGained,
    /// The window lost input focus.
    FocusLost,
    /// The pointer entered the hover region.
    PointerEntered,
    /// The pointer left the tracked region.
    PointerLeft,
    /// The pointer moved in client coordinates.
    PointerMoved {
        /// Pointer x position
        x: i32,
        /// Pointer y position
        y: i32,
    },
    /// A mouse button changed state.
    PointerButton {
        /// Which button
        button: MouseButton,
        /// Pressed or released
        state: ButtonState,
    },
    /// The wheel rotated by `delta` steps.
    Wheel {
        /// Wheel steps
        delta: i32,
    },
}

/// Reply from the core to the backend for the notification just dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Answer to a size negotiation: the bounds the backend must apply.
    ClampResize {
        /// Permitted client width
        width: i32,
        /// Permitted client height
        height: i32,
    },
    /// A hover session started; register for the matching exit
    /// notification if the platform needs explicit arming.
    WatchPointerExit,
}

/// Dispatch surface handed to a backend for the duration of one pump cycle
///
/// Owns mutable access to the window and queue tables so translation can
/// mutate state and append events while the backend drains the host.
pub struct EventSink<'a> {
    windows: &'a mut SlotMap<WindowId, Window>,
    queues: &'a mut SlotMap<QueueId, EventQueue>,
}

impl<'a> EventSink<'a> {
    pub(crate) fn new(
        windows: &'a mut SlotMap<WindowId, Window>,
        queues: &'a mut SlotMap<QueueId, EventQueue>,
    ) -> Self {
        Self { windows, queues }
    }

    /// Translate one notification raised by `window`.
    ///
    /// Notifications for ids the core no longer knows (a window destroyed
    /// with host messages still in flight) are dropped.
    pub fn dispatch(&mut self, window: WindowId, raw: RawEvent) -> Option<Directive> {
        let Some(state) = self.windows.get_mut(window) else {
            log::warn!("dropping {raw:?} for unknown window {window:?}");
            return None;
        };
        let Some(queue) = self.queues.get_mut(state.queue()) else {
            log::warn!("dropping {raw:?}: window {window:?} targets a destroyed queue");
            return None;
        };
        translate(window, state, queue, raw)
    }
}

/// Map one raw notification to canonical events and state effects.
pub(crate) fn translate(
    id: WindowId,
    window: &mut Window,
    queue: &mut EventQueue,
    raw: RawEvent,
) -> Option<Directive> {
    match raw {
        RawEvent::CloseRequested => {
            push_window_event(queue, id, WindowEventKind::CloseRequested);
            None
        }
        RawEvent::Resized { width, height } => {
            push_window_event(queue, id, WindowEventKind::Resized { width, height });
            None
        }
        RawEvent::SizeNegotiation { width, height } => {
            let (width, height) = window.clamp_size(width, height);
            Some(Directive::ClampResize { width, height })
        }
        RawEvent::FocusGained => {
            push_window_event(queue, id, WindowEventKind::Focused);
            None
        }
        RawEvent::FocusLost => {
            push_window_event(queue, id, WindowEventKind::Unfocused);
            None
        }
        RawEvent::PointerEntered => {
            window.note_pointer_entered();
            push_window_event(queue, id, WindowEventKind::PointerEntered);
            None
        }
        RawEvent::PointerLeft => {
            window.note_pointer_left();
            push_window_event(queue, id, WindowEventKind::PointerLeft);
            None
        }
        RawEvent::PointerMoved { x, y } => {
            let directive = if window.note_pointer_motion() {
                // Enter precedes the motion that revealed it.
                push_window_event(queue, id, WindowEventKind::PointerEntered);
                Some(Directive::WatchPointerExit)
            } else {
                None
            };
            push_mouse_event(queue, id, MouseEventKind::Moved { x, y });
            directive
        }
        RawEvent::PointerButton { button, state } => {
            push_mouse_event(queue, id, MouseEventKind::Button { button, state });
            None
        }
        RawEvent::Wheel { delta } => {
            push_mouse_event(queue, id, MouseEventKind::Wheel { delta });
            None
        }
    }
}

fn push_window_event(queue: &mut EventQueue, window: WindowId, kind: WindowEventKind) {
    push_or_drop(queue, Event::Window(WindowEvent { window, kind }));
}

fn push_mouse_event(queue: &mut EventQueue, window: WindowId, kind: MouseEventKind) {
    push_or_drop(queue, Event::Mouse(MouseEvent { window, kind }));
}

/// Append an event; there is no caller to report to mid-pump, so a failed
/// queue growth drops this single notification and keeps the cycle alive.
fn push_or_drop(queue: &mut EventQueue, event: Event) {
    if let Err(err) = queue.push(event) {
        log::warn!("dropping {event:?}: {err}");
    }
}
