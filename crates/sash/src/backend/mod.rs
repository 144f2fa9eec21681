//! Platform backend contract
//!
//! The core drives a backend through [`PlatformBackend`] and never touches
//! the host windowing system directly. A backend owns every native resource
//! and the association from its native handles to [`WindowId`]s; the core
//! never stores an application pointer on an OS object.
//!
//! Two implementations ship with the crate: [`GlfwBackend`] for real
//! windows and [`HeadlessBackend`] for deterministic tests.

use bitflags::bitflags;
use raw_window_handle::{RawDisplayHandle, RawWindowHandle};

use crate::error::SashResult;
use crate::translate::EventSink;
use crate::window::{WindowId, WindowSpec};

mod glfw;
mod headless;

pub use self::glfw::GlfwBackend;
pub use self::headless::HeadlessBackend;

bitflags! {
    /// Show-state portion of a placement snapshot
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PlacementFlags: u32 {
        /// Window decorations (title bar, borders) are present.
        const DECORATED = 1 << 0;
        /// The window is maximized.
        const MAXIMIZED = 1 << 1;
    }
}

/// Position, size, and show-state of a window
///
/// Saved verbatim when entering fullscreen and re-applied verbatim when
/// leaving it; the round trip must be bit-exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Left edge in screen coordinates
    pub x: i32,
    /// Top edge in screen coordinates
    pub y: i32,
    /// Client width in screen coordinates
    pub width: i32,
    /// Client height in screen coordinates
    pub height: i32,
    /// Show-state flags
    pub flags: PlacementFlags,
}

/// Contract every windowing backend implements
///
/// Construction is process-wide init, `Drop` is deinit. All operations are
/// single-threaded; the thread that owns the backend is the only thread
/// that may pump or poll.
pub trait PlatformBackend {
    /// Create the native window for `id` matching `spec`. On failure
    /// nothing may remain registered for `id`.
    fn create_window(&mut self, id: WindowId, spec: &WindowSpec) -> SashResult<()>;

    /// Release the native window for `id`. Must be called before the core
    /// record for `id` is dropped.
    fn destroy_window(&mut self, id: WindowId);

    /// Drain all pending host notifications, handing each to `sink` and
    /// obeying the returned directives. Returns once no notification is
    /// pending; never waits for new ones.
    fn pump(&mut self, sink: &mut EventSink<'_>) -> SashResult<()>;

    /// Current placement of the window.
    fn query_placement(&mut self, id: WindowId) -> SashResult<Placement>;

    /// Move/resize/restyle the window to the given placement.
    fn apply_placement(&mut self, id: WindowId, placement: &Placement) -> SashResult<()>;

    /// Bounds of the monitor currently containing the window.
    fn monitor_bounds(&mut self, id: WindowId) -> SashResult<Placement>;

    /// Grab or release the pointer on behalf of the window.
    fn set_pointer_capture(&mut self, id: WindowId, captured: bool);

    /// Client size in screen coordinates.
    fn size_in_screen_coordinates(&self, id: WindowId) -> SashResult<(i32, i32)>;

    /// Client size in pixels; differs from screen coordinates on scaled
    /// displays.
    fn size_in_pixels(&self, id: WindowId) -> SashResult<(i32, i32)>;

    /// Native handles for interop, tagged by platform.
    fn raw_window(&self, id: WindowId) -> SashResult<(RawWindowHandle, RawDisplayHandle)>;

    /// Instance extensions a Vulkan instance needs before this backend can
    /// create surfaces.
    #[cfg(feature = "vulkan")]
    fn required_surface_extensions(&self) -> SashResult<Vec<String>>;

    /// Create a presentation surface for the window on the given instance.
    #[cfg(feature = "vulkan")]
    fn create_surface(
        &mut self,
        id: WindowId,
        instance: ash::vk::Instance,
    ) -> SashResult<ash::vk::SurfaceKHR>;
}
