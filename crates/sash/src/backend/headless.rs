//! Headless windowing backend
//!
//! Implements the full [`PlatformBackend`] contract against in-memory
//! records instead of a display server, so the translator and the window
//! state machine can be exercised deterministically. Tests script host
//! behavior with [`HeadlessBackend::deliver`] and
//! [`HeadlessBackend::request_resize`]; the next pump drains the script in
//! order, exactly like a host queue.

use std::collections::VecDeque;

use raw_window_handle::{RawDisplayHandle, RawWindowHandle};
use slotmap::SecondaryMap;

use crate::backend::{Placement, PlacementFlags, PlatformBackend};
use crate::error::{SashError, SashResult};
use crate::translate::{Directive, EventSink, RawEvent};
use crate::window::{WindowId, WindowSpec};

const DEFAULT_POSITION: (i32, i32) = (100, 100);
const DEFAULT_SIZE: (i32, i32) = (640, 480);

/// Monitor reported by [`PlatformBackend::monitor_bounds`] unless changed
/// with [`HeadlessBackend::set_monitor`].
pub const DEFAULT_MONITOR: Placement = Placement {
    x: 0,
    y: 0,
    width: 1920,
    height: 1080,
    flags: PlacementFlags::empty(),
};

enum ScriptedOp {
    Deliver(WindowId, RawEvent),
    Resize {
        window: WindowId,
        width: i32,
        height: i32,
    },
}

struct HeadlessWindow {
    placement: Placement,
    captured: bool,
}

/// Scriptable [`PlatformBackend`] with no native resources
pub struct HeadlessBackend {
    windows: SecondaryMap<WindowId, HeadlessWindow>,
    script: VecDeque<ScriptedOp>,
    monitor: Placement,
    releases: usize,
    fail_next_create: bool,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessBackend {
    /// Create a backend with no windows and an empty script.
    pub fn new() -> Self {
        Self {
            windows: SecondaryMap::new(),
            script: VecDeque::new(),
            monitor: DEFAULT_MONITOR,
            releases: 0,
            fail_next_create: false,
        }
    }

    /// Queue a raw notification for delivery on the next pump.
    pub fn deliver(&mut self, window: WindowId, raw: RawEvent) {
        self.script.push_back(ScriptedOp::Deliver(window, raw));
    }

    /// Queue an interactive resize: the next pump raises the negotiation
    /// query, applies the clamped size, then delivers the resize.
    pub fn request_resize(&mut self, window: WindowId, width: i32, height: i32) {
        self.script.push_back(ScriptedOp::Resize {
            window,
            width,
            height,
        });
    }

    /// Replace the monitor every window pretends to occupy.
    pub fn set_monitor(&mut self, monitor: Placement) {
        self.monitor = monitor;
    }

    /// Placement currently recorded for a window.
    pub fn placement_of(&self, window: WindowId) -> Option<Placement> {
        self.windows.get(window).map(|win| win.placement)
    }

    /// Whether the fake native window still exists.
    pub fn is_alive(&self, window: WindowId) -> bool {
        self.windows.contains_key(window)
    }

    /// Whether a pointer grab is recorded for the window.
    pub fn is_captured(&self, window: WindowId) -> bool {
        self.windows.get(window).is_some_and(|win| win.captured)
    }

    /// Number of native releases performed so far.
    pub fn release_count(&self) -> usize {
        self.releases
    }

    /// Make the next `create_window` fail with a platform error.
    pub fn fail_next_create(&mut self) {
        self.fail_next_create = true;
    }
}

impl PlatformBackend for HeadlessBackend {
    fn create_window(&mut self, id: WindowId, spec: &WindowSpec) -> SashResult<()> {
        if self.fail_next_create {
            self.fail_next_create = false;
            return Err(SashError::Platform(
                "scripted window creation failure".to_string(),
            ));
        }
        let placement = Placement {
            x: spec.x.unwrap_or(DEFAULT_POSITION.0),
            y: spec.y.unwrap_or(DEFAULT_POSITION.1),
            width: spec.width.unwrap_or(DEFAULT_SIZE.0),
            height: spec.height.unwrap_or(DEFAULT_SIZE.1),
            flags: PlacementFlags::DECORATED,
        };
        self.windows.insert(
            id,
            HeadlessWindow {
                placement,
                captured: false,
            },
        );
        Ok(())
    }

    fn destroy_window(&mut self, id: WindowId) {
        if self.windows.remove(id).is_some() {
            self.releases += 1;
        } else {
            log::warn!("destroy_window: no headless window for {id:?}");
        }
    }

    fn pump(&mut self, sink: &mut EventSink<'_>) -> SashResult<()> {
        while let Some(op) = self.script.pop_front() {
            match op {
                ScriptedOp::Deliver(window, raw) => {
                    // WatchPointerExit replies need no arming: scripted
                    // exits arrive from the test itself.
                    sink.dispatch(window, raw);
                }
                ScriptedOp::Resize {
                    window,
                    width,
                    height,
                } => {
                    let (width, height) = match sink
                        .dispatch(window, RawEvent::SizeNegotiation { width, height })
                    {
                        Some(Directive::ClampResize { width, height }) => (width, height),
                        _ => (width, height),
                    };
                    if let Some(win) = self.windows.get_mut(window) {
                        win.placement.width = width;
                        win.placement.height = height;
                    }
                    sink.dispatch(window, RawEvent::Resized { width, height });
                }
            }
        }
        Ok(())
    }

    fn query_placement(&mut self, id: WindowId) -> SashResult<Placement> {
        self.windows
            .get(id)
            .map(|win| win.placement)
            .ok_or_else(|| SashError::Platform(format!("no headless window for {id:?}")))
    }

    fn apply_placement(&mut self, id: WindowId, placement: &Placement) -> SashResult<()> {
        let win = self
            .windows
            .get_mut(id)
            .ok_or_else(|| SashError::Platform(format!("no headless window for {id:?}")))?;
        win.placement = *placement;
        Ok(())
    }

    fn monitor_bounds(&mut self, _id: WindowId) -> SashResult<Placement> {
        Ok(self.monitor)
    }

    fn set_pointer_capture(&mut self, id: WindowId, captured: bool) {
        if let Some(win) = self.windows.get_mut(id) {
            win.captured = captured;
        }
    }

    fn size_in_screen_coordinates(&self, id: WindowId) -> SashResult<(i32, i32)> {
        self.query_placement_size(id)
    }

    fn size_in_pixels(&self, id: WindowId) -> SashResult<(i32, i32)> {
        // Headless displays are never scaled.
        self.query_placement_size(id)
    }

    fn raw_window(&self, id: WindowId) -> SashResult<(RawWindowHandle, RawDisplayHandle)> {
        let _ = id;
        Err(SashError::Platform(
            "headless windows have no native handles".to_string(),
        ))
    }

    #[cfg(feature = "vulkan")]
    fn required_surface_extensions(&self) -> SashResult<Vec<String>> {
        Err(SashError::Graphics(
            "headless backend cannot present".to_string(),
        ))
    }

    #[cfg(feature = "vulkan")]
    fn create_surface(
        &mut self,
        id: WindowId,
        _instance: ash::vk::Instance,
    ) -> SashResult<ash::vk::SurfaceKHR> {
        let _ = id;
        Err(SashError::Graphics(
            "headless backend cannot present".to_string(),
        ))
    }
}

impl HeadlessBackend {
    fn query_placement_size(&self, id: WindowId) -> SashResult<(i32, i32)> {
        self.windows
            .get(id)
            .map(|win| (win.placement.width, win.placement.height))
            .ok_or_else(|| SashError::Platform(format!("no headless window for {id:?}")))
    }
}
