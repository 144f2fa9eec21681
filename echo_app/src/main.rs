//! Event echo demo application
//!
//! Opens a single window and logs every canonical event it produces.
//! Left click switches to fullscreen, right click back to windowed, and
//! closing the window exits. Window parameters can be overridden with an
//! `echo.toml` next to the binary.

use sash::prelude::*;
use serde::Deserialize;

/// Window parameters read from `echo.toml`
#[derive(Debug, Deserialize)]
#[serde(default)]
struct EchoConfig {
    title: String,
    width: i32,
    height: i32,
    x: Option<i32>,
    y: Option<i32>,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            title: "sash echo, 素晴らしい".to_string(),
            width: 200,
            height: 200,
            x: None,
            y: None,
        }
    }
}

fn load_config() -> EchoConfig {
    match std::fs::read_to_string("echo.toml") {
        Ok(text) => toml::from_str(&text).unwrap_or_else(|err| {
            log::warn!("echo.toml is invalid ({err}); using defaults");
            EchoConfig::default()
        }),
        Err(_) => EchoConfig::default(),
    }
}

fn spec_from_config(config: &EchoConfig, queue: QueueId) -> WindowSpec {
    let mut spec = WindowSpec::new(config.title.as_str())
        .size(config.width, config.height)
        .queue(queue);
    spec.x = config.x;
    spec.y = config.y;
    spec
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = load_config();
    log::info!("starting with {config:?}");

    let mut ctx = Context::new(GlfwBackend::new()?)?;
    let queue = ctx.create_event_queue()?;
    let window = ctx.create_window(spec_from_config(&config, queue))?;

    let (width, height) = ctx.size_in_pixels(window)?;
    log::info!("pixel size: ({width}, {height})");
    let (width, height) = ctx.size(window)?;
    log::info!("screen coordinate size: ({width}, {height})");

    ctx.set_minimum_size(window, 100, 100);
    ctx.set_maximum_size(window, 300, 300);

    let mut running = true;
    while running {
        while let Some(event) = ctx.poll_event_from(queue) {
            match event {
                Event::Window(event) => match event.kind {
                    WindowEventKind::CloseRequested => {
                        log::info!("close requested");
                        running = false;
                    }
                    WindowEventKind::Resized { width, height } => {
                        log::info!("window resize: ({width}, {height})");
                    }
                    WindowEventKind::Focused => log::info!("window focused"),
                    WindowEventKind::Unfocused => log::info!("window unfocused"),
                    WindowEventKind::PointerEntered => log::info!("mouse enter"),
                    WindowEventKind::PointerLeft => log::info!("mouse exit"),
                },
                Event::Mouse(event) => match event.kind {
                    MouseEventKind::Moved { x, y } => {
                        log::debug!("mouse move: ({x}, {y})");
                    }
                    MouseEventKind::Wheel { delta } => {
                        log::info!("mouse wheel: {delta}");
                    }
                    MouseEventKind::Button { button, state } => {
                        log::info!("mouse {state:?}: {button:?}");
                        if state == ButtonState::Down {
                            match button {
                                MouseButton::Left => {
                                    ctx.set_screen_mode(window, ScreenMode::Fullscreen)?;
                                }
                                MouseButton::Right => {
                                    ctx.set_screen_mode(window, ScreenMode::Windowed)?;
                                }
                                MouseButton::Middle => {}
                            }
                        }
                    }
                },
            }
        }
    }

    ctx.destroy_window(window);
    log::info!("exiting with success");
    Ok(())
}
