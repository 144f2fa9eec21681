//! Per-window state and the screen-mode / tracking state machine
//!
//! A [`Window`] is the core-side record for one native window. It owns no
//! native resources — the backend keeps the native handle in its own table,
//! keyed by [`WindowId`] — and holds the state that is not uniform across
//! platforms: screen mode, optional size constraints, the mouse-tracking
//! flag, and the placement snapshot used to leave fullscreen.

use slotmap::new_key_type;

use crate::backend::Placement;
use crate::queue::QueueId;

new_key_type! {
    /// Stable identifier for a window owned by a [`Context`]
    ///
    /// [`Context`]: crate::context::Context
    pub struct WindowId;
}

/// Screen mode of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    /// Decorated, movable window at its own placement.
    Windowed,
    /// Undecorated window covering the monitor it occupies.
    Fullscreen,
    /// Reserved. Accepted and recorded, but no backend behavior is defined.
    Desktop,
}

/// Configuration for a window to be created
///
/// Unset axes defer to the host's defaults, matching the behavior of the
/// platforms that have a notion of a default placement.
#[derive(Debug, Clone)]
pub struct WindowSpec {
    /// Window title shown in decorations, required.
    pub title: String,
    /// Initial x position, or host default.
    pub x: Option<i32>,
    /// Initial y position, or host default.
    pub y: Option<i32>,
    /// Initial client width, or host default.
    pub width: Option<i32>,
    /// Initial client height, or host default.
    pub height: Option<i32>,
    /// Target event queue; the context's default queue when `None`.
    pub queue: Option<QueueId>,
}

impl WindowSpec {
    /// Start a spec with the given title and everything else unspecified.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x: None,
            y: None,
            width: None,
            height: None,
            queue: None,
        }
    }

    /// Request an initial position.
    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Request an initial client size.
    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Deliver this window's events to a specific queue.
    pub fn queue(mut self, queue: QueueId) -> Self {
        self.queue = Some(queue);
        self
    }
}

/// Core-side state for one window
#[derive(Debug)]
pub struct Window {
    title: String,
    queue: QueueId,
    screen_mode: ScreenMode,
    min_size: Option<(i32, i32)>,
    max_size: Option<(i32, i32)>,
    tracked: bool,
    saved_placement: Option<Placement>,
}

impl Window {
    pub(crate) fn new(title: String, queue: QueueId) -> Self {
        Self {
            title,
            queue,
            screen_mode: ScreenMode::Windowed,
            min_size: None,
            max_size: None,
            tracked: false,
            saved_placement: None,
        }
    }

    /// Title the window was created with. Stored here because not every
    /// backend can read a title back from the host.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The queue this window's events are delivered to.
    pub fn queue(&self) -> QueueId {
        self.queue
    }

    /// Current screen mode.
    pub fn screen_mode(&self) -> ScreenMode {
        self.screen_mode
    }

    /// Lower size bound, if one was ever set. Constraints stay active for
    /// the window's lifetime; there is no unset operation.
    pub fn minimum_size(&self) -> Option<(i32, i32)> {
        self.min_size
    }

    /// Upper size bound, if one was ever set.
    pub fn maximum_size(&self) -> Option<(i32, i32)> {
        self.max_size
    }

    pub(crate) fn set_minimum_size(&mut self, width: i32, height: i32) {
        self.min_size = Some((width, height));
    }

    pub(crate) fn set_maximum_size(&mut self, width: i32, height: i32) {
        self.max_size = Some((width, height));
    }

    /// Clamp a proposed client size against the active constraints.
    ///
    /// The state machine only answers the negotiation; the backend performs
    /// the actual geometry change.
    pub(crate) fn clamp_size(&self, width: i32, height: i32) -> (i32, i32) {
        let (mut w, mut h) = (width, height);
        if let Some((min_w, min_h)) = self.min_size {
            w = w.max(min_w);
            h = h.max(min_h);
        }
        if let Some((max_w, max_h)) = self.max_size {
            w = w.min(max_w);
            h = h.min(max_h);
        }
        (w, h)
    }

    /// Record entry into fullscreen, keeping the placement to restore later.
    pub(crate) fn enter_fullscreen(&mut self, saved: Placement) {
        self.saved_placement = Some(saved);
        self.screen_mode = ScreenMode::Fullscreen;
    }

    /// Record return to windowed mode; yields the placement saved on entry.
    pub(crate) fn leave_fullscreen(&mut self) -> Option<Placement> {
        self.screen_mode = ScreenMode::Windowed;
        self.saved_placement.take()
    }

    pub(crate) fn set_screen_mode_raw(&mut self, mode: ScreenMode) {
        self.screen_mode = mode;
    }

    /// Note a pointer motion. Returns true when this is the first motion of
    /// a hover session, i.e. an enter event must be synthesized and the
    /// backend asked to watch for the matching exit.
    pub(crate) fn note_pointer_motion(&mut self) -> bool {
        if self.tracked {
            false
        } else {
            self.tracked = true;
            true
        }
    }

    /// Note a host-delivered enter. Starts the hover session so the next
    /// motion does not synthesize a duplicate enter.
    pub(crate) fn note_pointer_entered(&mut self) {
        self.tracked = true;
    }

    /// Note a pointer exit. The next motion starts a new hover session.
    pub(crate) fn note_pointer_left(&mut self) {
        self.tracked = false;
    }

    #[cfg(test)]
    pub(crate) fn is_tracked(&self) -> bool {
        self.tracked
    }
}
