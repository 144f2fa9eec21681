//! GLFW windowing backend
//!
//! Real-window implementation of [`PlatformBackend`] on top of the `glfw`
//! crate. GLFW has no size-negotiation callback, so the backend raises the
//! negotiation query when it observes a host resize and re-applies the
//! clamped bounds before forwarding the resize. GLFW also reports pointer
//! exits unconditionally through `CursorEnter(false)`, so exit watching
//! needs no arming.

use raw_window_handle::{
    HasRawDisplayHandle, HasRawWindowHandle, RawDisplayHandle, RawWindowHandle,
};
use slotmap::SecondaryMap;

use crate::backend::{Placement, PlacementFlags, PlatformBackend};
use crate::error::{SashError, SashResult};
use crate::event::{ButtonState, MouseButton};
use crate::translate::{Directive, EventSink, RawEvent};
use crate::window::{WindowId, WindowSpec};

/// Client size used when the spec leaves an axis unspecified; GLFW has no
/// host default to defer to.
const DEFAULT_SIZE: (i32, i32) = (640, 480);

struct GlfwWindow {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

/// [`PlatformBackend`] over the GLFW library
pub struct GlfwBackend {
    glfw: glfw::Glfw,
    windows: SecondaryMap<WindowId, GlfwWindow>,
}

impl GlfwBackend {
    /// Initialize GLFW. Dropping the backend terminates it.
    pub fn new() -> SashResult<Self> {
        let glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|err| SashError::Platform(format!("GLFW initialization failed: {err}")))?;
        Ok(Self {
            glfw,
            windows: SecondaryMap::new(),
        })
    }

    fn window(&self, id: WindowId) -> SashResult<&GlfwWindow> {
        self.windows
            .get(id)
            .ok_or_else(|| SashError::Platform(format!("no GLFW window for {id:?}")))
    }

    fn window_mut(&mut self, id: WindowId) -> SashResult<&mut GlfwWindow> {
        self.windows
            .get_mut(id)
            .ok_or_else(|| SashError::Platform(format!("no GLFW window for {id:?}")))
    }
}

impl PlatformBackend for GlfwBackend {
    fn create_window(&mut self, id: WindowId, spec: &WindowSpec) -> SashResult<()> {
        // No client API: rendering, if any, goes through the raw handles or
        // the vulkan feature.
        self.glfw
            .window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        self.glfw.window_hint(glfw::WindowHint::Resizable(true));

        let width = spec.width.unwrap_or(DEFAULT_SIZE.0);
        let height = spec.height.unwrap_or(DEFAULT_SIZE.1);
        let (mut window, events) = self
            .glfw
            .create_window(
                width as u32,
                height as u32,
                &spec.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or_else(|| SashError::Platform("window creation failed".to_string()))?;

        if spec.x.is_some() || spec.y.is_some() {
            let (default_x, default_y) = window.get_pos();
            window.set_pos(spec.x.unwrap_or(default_x), spec.y.unwrap_or(default_y));
        }

        window.set_close_polling(true);
        window.set_size_polling(true);
        window.set_focus_polling(true);
        window.set_cursor_enter_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_mouse_button_polling(true);
        window.set_scroll_polling(true);

        self.windows.insert(id, GlfwWindow { window, events });
        log::debug!("created GLFW window for {id:?}");
        Ok(())
    }

    fn destroy_window(&mut self, id: WindowId) {
        if self.windows.remove(id).is_none() {
            log::warn!("destroy_window: no GLFW window for {id:?}");
        }
    }

    fn pump(&mut self, sink: &mut EventSink<'_>) -> SashResult<()> {
        self.glfw.poll_events();

        for (id, win) in self.windows.iter_mut() {
            let pending: Vec<glfw::WindowEvent> = glfw::flush_messages(&win.events)
                .map(|(_, event)| event)
                .collect();

            for event in pending {
                match event {
                    glfw::WindowEvent::Close => {
                        sink.dispatch(id, RawEvent::CloseRequested);
                    }
                    glfw::WindowEvent::Size(width, height) => {
                        // Negotiate first; GLFW only tells us after the fact.
                        let (width, height) = match sink
                            .dispatch(id, RawEvent::SizeNegotiation { width, height })
                        {
                            Some(Directive::ClampResize {
                                width: clamped_w,
                                height: clamped_h,
                            }) if (clamped_w, clamped_h) != (width, height) => {
                                win.window.set_size(clamped_w, clamped_h);
                                (clamped_w, clamped_h)
                            }
                            _ => (width, height),
                        };
                        sink.dispatch(id, RawEvent::Resized { width, height });
                    }
                    glfw::WindowEvent::Focus(true) => {
                        sink.dispatch(id, RawEvent::FocusGained);
                    }
                    glfw::WindowEvent::Focus(false) => {
                        sink.dispatch(id, RawEvent::FocusLost);
                    }
                    glfw::WindowEvent::CursorEnter(true) => {
                        sink.dispatch(id, RawEvent::PointerEntered);
                    }
                    glfw::WindowEvent::CursorEnter(false) => {
                        sink.dispatch(id, RawEvent::PointerLeft);
                    }
                    glfw::WindowEvent::CursorPos(x, y) => {
                        // WatchPointerExit needs no arming here; GLFW always
                        // reports leaves via CursorEnter(false).
                        sink.dispatch(
                            id,
                            RawEvent::PointerMoved {
                                x: x as i32,
                                y: y as i32,
                            },
                        );
                    }
                    glfw::WindowEvent::MouseButton(button, action, _mods) => {
                        let Some(button) = map_button(button) else {
                            continue;
                        };
                        let state = match action {
                            glfw::Action::Press => ButtonState::Down,
                            glfw::Action::Release => ButtonState::Up,
                            glfw::Action::Repeat => continue,
                        };
                        sink.dispatch(id, RawEvent::PointerButton { button, state });
                    }
                    glfw::WindowEvent::Scroll(_x, y) => {
                        sink.dispatch(id, RawEvent::Wheel { delta: y as i32 });
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn query_placement(&mut self, id: WindowId) -> SashResult<Placement> {
        let win = self.window(id)?;
        let (x, y) = win.window.get_pos();
        let (width, height) = win.window.get_size();
        let mut flags = PlacementFlags::empty();
        if win.window.is_decorated() {
            flags |= PlacementFlags::DECORATED;
        }
        if win.window.is_maximized() {
            flags |= PlacementFlags::MAXIMIZED;
        }
        Ok(Placement {
            x,
            y,
            width,
            height,
            flags,
        })
    }

    fn apply_placement(&mut self, id: WindowId, placement: &Placement) -> SashResult<()> {
        let win = self.window_mut(id)?;
        win.window
            .set_decorated(placement.flags.contains(PlacementFlags::DECORATED));
        if placement.flags.contains(PlacementFlags::MAXIMIZED) {
            win.window.maximize();
        } else {
            win.window.restore();
        }
        win.window.set_pos(placement.x, placement.y);
        win.window.set_size(placement.width, placement.height);
        Ok(())
    }

    fn monitor_bounds(&mut self, id: WindowId) -> SashResult<Placement> {
        let win = self.window(id)?;
        let (x, y) = win.window.get_pos();
        let (width, height) = win.window.get_size();
        let (center_x, center_y) = (x + width / 2, y + height / 2);

        self.glfw
            .with_connected_monitors(|_, monitors| {
                let mut fallback = None;
                for monitor in monitors {
                    let Some(mode) = monitor.get_video_mode() else {
                        continue;
                    };
                    let (mx, my) = monitor.get_pos();
                    let bounds = Placement {
                        x: mx,
                        y: my,
                        width: mode.width as i32,
                        height: mode.height as i32,
                        flags: PlacementFlags::empty(),
                    };
                    if fallback.is_none() {
                        fallback = Some(bounds);
                    }
                    if center_x >= mx
                        && center_x < mx + bounds.width
                        && center_y >= my
                        && center_y < my + bounds.height
                    {
                        return Some(bounds);
                    }
                }
                fallback
            })
            .ok_or_else(|| SashError::Platform("no monitor available".to_string()))
    }

    fn set_pointer_capture(&mut self, id: WindowId, captured: bool) {
        let Some(win) = self.windows.get_mut(id) else {
            log::warn!("set_pointer_capture: no GLFW window for {id:?}");
            return;
        };
        // Closest GLFW equivalent of a pointer grab.
        let mode = if captured {
            glfw::CursorMode::Disabled
        } else {
            glfw::CursorMode::Normal
        };
        win.window.set_cursor_mode(mode);
    }

    fn size_in_screen_coordinates(&self, id: WindowId) -> SashResult<(i32, i32)> {
        Ok(self.window(id)?.window.get_size())
    }

    fn size_in_pixels(&self, id: WindowId) -> SashResult<(i32, i32)> {
        Ok(self.window(id)?.window.get_framebuffer_size())
    }

    fn raw_window(&self, id: WindowId) -> SashResult<(RawWindowHandle, RawDisplayHandle)> {
        let win = self.window(id)?;
        Ok((
            win.window.raw_window_handle(),
            win.window.raw_display_handle(),
        ))
    }

    #[cfg(feature = "vulkan")]
    fn required_surface_extensions(&self) -> SashResult<Vec<String>> {
        self.glfw
            .get_required_instance_extensions()
            .ok_or_else(|| SashError::Graphics("failed to get required extensions".to_string()))
    }

    #[cfg(feature = "vulkan")]
    fn create_surface(
        &mut self,
        id: WindowId,
        instance: ash::vk::Instance,
    ) -> SashResult<ash::vk::SurfaceKHR> {
        let win = self.window_mut(id)?;
        let mut surface = ash::vk::SurfaceKHR::null();
        let result = win
            .window
            .create_window_surface(instance, std::ptr::null(), &mut surface);

        if result == ash::vk::Result::SUCCESS {
            Ok(surface)
        } else {
            Err(SashError::Graphics(format!(
                "failed to create Vulkan surface: {result:?}"
            )))
        }
    }
}

/// Buttons outside the canonical taxonomy are dropped.
fn map_button(button: glfw::MouseButton) -> Option<MouseButton> {
    match button {
        glfw::MouseButton::Button1 => Some(MouseButton::Left),
        glfw::MouseButton::Button2 => Some(MouseButton::Right),
        glfw::MouseButton::Button3 => Some(MouseButton::Middle),
        _ => None,
    }
}
