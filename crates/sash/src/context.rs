//! Windowing context
//!
//! [`Context`] pairs one platform backend with the window and queue tables
//! and a default event queue. It replaces any process-wide state: create a
//! context at startup, drive it from one thread, and drop it to tear the
//! platform down. Windows and queues are addressed by slotmap ids, so a
//! stale id after destruction is detected rather than dereferenced.

use slotmap::SlotMap;

use crate::backend::{Placement, PlacementFlags, PlatformBackend};
use crate::error::{SashError, SashResult};
use crate::event::Event;
use crate::queue::{EventQueue, QueueId};
use crate::translate::EventSink;
use crate::window::{ScreenMode, Window, WindowId, WindowSpec};

/// Owner of the backend, the windows, and the event queues
pub struct Context<B: PlatformBackend> {
    backend: B,
    windows: SlotMap<WindowId, Window>,
    queues: SlotMap<QueueId, EventQueue>,
    default_queue: QueueId,
}

impl<B: PlatformBackend> Context<B> {
    /// Take ownership of an initialized backend and create the default
    /// event queue.
    pub fn new(backend: B) -> SashResult<Self> {
        let mut queues = SlotMap::with_key();
        let default_queue = queues.insert(EventQueue::new()?);
        Ok(Self {
            backend,
            windows: SlotMap::with_key(),
            queues,
            default_queue,
        })
    }

    /// The backend, for platform-specific access.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The queue windows use when their spec names none.
    pub fn default_queue(&self) -> QueueId {
        self.default_queue
    }

    /// Create an additional event queue.
    pub fn create_event_queue(&mut self) -> SashResult<QueueId> {
        Ok(self.queues.insert(EventQueue::new()?))
    }

    /// Destroy a queue, releasing its buffer. Unconsumed events are lost;
    /// the default queue cannot be destroyed.
    pub fn destroy_event_queue(&mut self, queue: QueueId) {
        if queue == self.default_queue {
            log::warn!("refusing to destroy the default event queue");
            return;
        }
        if self.queues.remove(queue).is_none() {
            log::warn!("destroy_event_queue: unknown queue {queue:?}");
        }
    }

    /// Create a window from a spec.
    ///
    /// A window that fails native creation leaves nothing behind: the core
    /// record is removed before the error is returned.
    pub fn create_window(&mut self, spec: WindowSpec) -> SashResult<WindowId> {
        if spec.title.contains('\0') {
            return Err(SashError::InvalidTitle);
        }
        let queue = spec.queue.unwrap_or(self.default_queue);
        if !self.queues.contains_key(queue) {
            return Err(SashError::Platform(format!(
                "target queue {queue:?} does not exist"
            )));
        }

        let id = self.windows.insert(Window::new(spec.title.clone(), queue));
        if let Err(err) = self.backend.create_window(id, &spec) {
            self.windows.remove(id);
            return Err(err);
        }
        log::debug!("created window {id:?} ({:?})", spec.title);
        Ok(id)
    }

    /// Destroy a window. The native handle is released before the core
    /// record; events already queued for the window keep their stale id.
    pub fn destroy_window(&mut self, id: WindowId) {
        if self.windows.contains_key(id) {
            self.backend.destroy_window(id);
            self.windows.remove(id);
        } else {
            log::warn!("destroy_window: unknown window {id:?}");
        }
    }

    /// Number of live windows.
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Core-side state of a window, if the id is live.
    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(id)
    }

    /// A queue's buffer, for occupancy and capacity introspection.
    pub fn event_queue(&self, queue: QueueId) -> Option<&EventQueue> {
        self.queues.get(queue)
    }

    /// Drain all pending host notifications into the event queues.
    pub fn pump(&mut self) -> SashResult<()> {
        let mut sink = EventSink::new(&mut self.windows, &mut self.queues);
        self.backend.pump(&mut sink)
    }

    /// Poll the default queue. See [`Context::poll_event_from`].
    pub fn poll_event(&mut self) -> Option<Event> {
        self.poll_event_from(self.default_queue)
    }

    /// Remove and return the oldest event in the queue.
    ///
    /// An empty queue triggers exactly one pump cycle before the re-check;
    /// `None` therefore means "nothing pending right now", and the caller
    /// keeps liveness by polling again. Events are delivered strictly in
    /// production order.
    pub fn poll_event_from(&mut self, queue: QueueId) -> Option<Event> {
        if self.queues.get(queue)?.is_empty() {
            if let Err(err) = self.pump() {
                log::warn!("event pump failed: {err}");
            }
        }
        self.queues.get_mut(queue)?.pop()
    }

    /// Current screen mode of a window.
    pub fn screen_mode(&self, id: WindowId) -> Option<ScreenMode> {
        self.windows.get(id).map(Window::screen_mode)
    }

    /// Title a window was created with.
    pub fn title(&self, id: WindowId) -> Option<&str> {
        self.windows.get(id).map(Window::title)
    }

    /// Switch a window's screen mode.
    ///
    /// Entering fullscreen saves the current placement and covers the
    /// monitor the window occupies; returning to windowed restores the
    /// saved placement exactly. `Desktop` is accepted and recorded only.
    pub fn set_screen_mode(&mut self, id: WindowId, mode: ScreenMode) -> SashResult<()> {
        let current = self
            .windows
            .get(id)
            .map(Window::screen_mode)
            .ok_or_else(|| stale_window(id))?;
        if current == mode {
            return Ok(());
        }

        match mode {
            ScreenMode::Fullscreen => {
                let saved = self.backend.query_placement(id)?;
                let monitor = self.backend.monitor_bounds(id)?;
                let cover = Placement {
                    flags: PlacementFlags::empty(),
                    ..monitor
                };
                self.backend.apply_placement(id, &cover)?;
                if let Some(window) = self.windows.get_mut(id) {
                    window.enter_fullscreen(saved);
                }
            }
            ScreenMode::Windowed => {
                if current == ScreenMode::Fullscreen {
                    let saved = self
                        .windows
                        .get_mut(id)
                        .and_then(Window::leave_fullscreen);
                    if let Some(placement) = saved {
                        self.backend.apply_placement(id, &placement)?;
                    }
                } else if let Some(window) = self.windows.get_mut(id) {
                    window.set_screen_mode_raw(ScreenMode::Windowed);
                }
            }
            ScreenMode::Desktop => {
                if let Some(window) = self.windows.get_mut(id) {
                    window.set_screen_mode_raw(ScreenMode::Desktop);
                }
            }
        }
        Ok(())
    }

    /// Set the lower size bound consulted during resize negotiation.
    /// Active for the window's lifetime.
    pub fn set_minimum_size(&mut self, id: WindowId, width: i32, height: i32) {
        if let Some(window) = self.windows.get_mut(id) {
            window.set_minimum_size(width, height);
        } else {
            log::warn!("set_minimum_size: unknown window {id:?}");
        }
    }

    /// Set the upper size bound consulted during resize negotiation.
    /// Active for the window's lifetime.
    pub fn set_maximum_size(&mut self, id: WindowId, width: i32, height: i32) {
        if let Some(window) = self.windows.get_mut(id) {
            window.set_maximum_size(width, height);
        } else {
            log::warn!("set_maximum_size: unknown window {id:?}");
        }
    }

    /// Client size in screen coordinates.
    pub fn size(&self, id: WindowId) -> SashResult<(i32, i32)> {
        self.backend.size_in_screen_coordinates(id)
    }

    /// Client size in pixels.
    pub fn size_in_pixels(&self, id: WindowId) -> SashResult<(i32, i32)> {
        self.backend.size_in_pixels(id)
    }

    /// Grab the pointer on behalf of a window.
    pub fn capture_mouse(&mut self, id: WindowId) {
        self.backend.set_pointer_capture(id, true);
    }

    /// Release a pointer grab.
    pub fn release_mouse(&mut self, id: WindowId) {
        self.backend.set_pointer_capture(id, false);
    }

    /// Native handles for interop, tagged by platform.
    pub fn raw_window(
        &self,
        id: WindowId,
    ) -> SashResult<(
        raw_window_handle::RawWindowHandle,
        raw_window_handle::RawDisplayHandle,
    )> {
        self.backend.raw_window(id)
    }

    /// Instance extensions a Vulkan instance needs before surfaces can be
    /// created on this backend.
    #[cfg(feature = "vulkan")]
    pub fn required_surface_extensions(&self) -> SashResult<Vec<String>> {
        self.backend.required_surface_extensions()
    }

    /// Create a Vulkan presentation surface for a window.
    #[cfg(feature = "vulkan")]
    pub fn create_surface(
        &mut self,
        id: WindowId,
        instance: ash::vk::Instance,
    ) -> SashResult<ash::vk::SurfaceKHR> {
        self.backend.create_surface(id, instance)
    }
}

impl<B: PlatformBackend> Drop for Context<B> {
    fn drop(&mut self) {
        // Native handles go before the core records that reference them.
        let ids: Vec<WindowId> = self.windows.keys().collect();
        for id in ids {
            self.backend.destroy_window(id);
        }
        self.windows.clear();
    }
}

fn stale_window(id: WindowId) -> SashError {
    SashError::Platform(format!("unknown window {id:?}"))
}
