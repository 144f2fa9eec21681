//! # Sash
//!
//! A backend-independent windowing core: native window/input notifications
//! are normalized into a small canonical event model, and per-window state
//! that platforms disagree about (screen mode, size constraints, mouse
//! tracking) is managed in one place.
//!
//! ## Features
//!
//! - **Canonical Events**: one window/mouse taxonomy for every backend
//! - **Growable Queues**: per-queue buffers with fan-in from many windows
//! - **Screen Modes**: fullscreen toggling with exact placement restore
//! - **Size Constraints**: min/max bounds answered during host negotiation
//! - **Backend Contract**: GLFW backend included, headless backend for
//!   deterministic tests
//! - **Vulkan Interop**: surface creation behind the `vulkan` feature
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sash::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut ctx = Context::new(GlfwBackend::new()?)?;
//!     let window = ctx.create_window(WindowSpec::new("hello").size(640, 480))?;
//!
//!     let mut running = true;
//!     while running {
//!         while let Some(event) = ctx.poll_event() {
//!             if let Event::Window(event) = event {
//!                 if event.kind == WindowEventKind::CloseRequested {
//!                     running = false;
//!                 }
//!             }
//!         }
//!     }
//!
//!     ctx.destroy_window(window);
//!     Ok(())
//! }
//! ```
//!
//! ## Threading
//!
//! The model is single-threaded and cooperative: the thread that owns the
//! [`Context`] is the only thread that may pump, poll, or mutate windows.
//! There are no internal threads and no asynchronous callbacks; `poll`
//! blocks only for one non-blocking drain of already-queued host
//! notifications.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod backend;
pub mod context;
pub mod error;
pub mod event;
pub mod queue;
pub mod translate;
pub mod window;

pub use backend::{GlfwBackend, HeadlessBackend, Placement, PlacementFlags, PlatformBackend};
pub use context::Context;
pub use error::{SashError, SashResult};
pub use event::{
    ButtonState, Event, MouseButton, MouseEvent, MouseEventKind, WindowEvent, WindowEventKind,
};
pub use queue::{EventQueue, QueueId, INITIAL_QUEUE_CAPACITY};
pub use translate::{Directive, EventSink, RawEvent};
pub use window::{ScreenMode, WindowId, WindowSpec};

/// Common imports for applications embedding the library
pub mod prelude {
    pub use crate::{
        backend::{GlfwBackend, HeadlessBackend, PlatformBackend},
        context::Context,
        error::{SashError, SashResult},
        event::{
            ButtonState, Event, MouseButton, MouseEvent, MouseEventKind, WindowEvent,
            WindowEventKind,
        },
        queue::QueueId,
        window::{ScreenMode, WindowId, WindowSpec},
    };
}
