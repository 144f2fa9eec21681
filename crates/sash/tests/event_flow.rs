//! Full-pipeline tests over the headless backend: scripted host
//! notifications in, canonical events and placement changes out.

use sash::backend::{HeadlessBackend, Placement, PlacementFlags};
use sash::{
    ButtonState, Context, Event, MouseButton, MouseEventKind, RawEvent, SashError, ScreenMode,
    WindowEventKind, WindowId, WindowSpec,
};

fn new_context() -> Context<HeadlessBackend> {
    Context::new(HeadlessBackend::new()).unwrap()
}

fn window_kind(event: Event) -> (WindowId, WindowEventKind) {
    match event {
        Event::Window(event) => (event.window, event.kind),
        Event::Mouse(event) => panic!("expected window event, got {event:?}"),
    }
}

fn mouse_kind(event: Event) -> (WindowId, MouseEventKind) {
    match event {
        Event::Mouse(event) => (event.window, event.kind),
        Event::Window(event) => panic!("expected mouse event, got {event:?}"),
    }
}

#[test]
fn poll_returns_events_in_production_order() {
    let mut ctx = new_context();
    let window = ctx.create_window(WindowSpec::new("order")).unwrap();

    ctx.backend_mut().deliver(window, RawEvent::FocusGained);
    ctx.backend_mut().deliver(
        window,
        RawEvent::Resized {
            width: 320,
            height: 240,
        },
    );
    ctx.backend_mut().deliver(window, RawEvent::CloseRequested);

    // One poll pumps the whole batch; order is preserved across polls.
    assert_eq!(
        window_kind(ctx.poll_event().unwrap()),
        (window, WindowEventKind::Focused)
    );
    assert_eq!(
        window_kind(ctx.poll_event().unwrap()),
        (
            window,
            WindowEventKind::Resized {
                width: 320,
                height: 240,
            }
        )
    );
    assert_eq!(
        window_kind(ctx.poll_event().unwrap()),
        (window, WindowEventKind::CloseRequested)
    );
    assert_eq!(ctx.poll_event(), None);
}

#[test]
fn poll_on_empty_queue_pumps_once() {
    let mut ctx = new_context();
    let window = ctx.create_window(WindowSpec::new("pump")).unwrap();

    // Nothing scripted: poll pumps, finds nothing, reports no event.
    assert_eq!(ctx.poll_event(), None);

    ctx.backend_mut().deliver(window, RawEvent::CloseRequested);
    assert!(ctx.poll_event().is_some());
}

#[test]
fn fullscreen_round_trip_restores_placement_exactly() {
    let mut ctx = new_context();
    let window = ctx
        .create_window(WindowSpec::new("fullscreen").position(12, 34).size(200, 200))
        .unwrap();

    let before = ctx.backend().placement_of(window).unwrap();
    assert!(before.flags.contains(PlacementFlags::DECORATED));

    ctx.set_screen_mode(window, ScreenMode::Fullscreen).unwrap();
    assert_eq!(ctx.screen_mode(window), Some(ScreenMode::Fullscreen));
    let covering = ctx.backend().placement_of(window).unwrap();
    assert_eq!((covering.x, covering.y), (0, 0));
    assert_eq!((covering.width, covering.height), (1920, 1080));
    assert!(!covering.flags.contains(PlacementFlags::DECORATED));

    ctx.set_screen_mode(window, ScreenMode::Windowed).unwrap();
    assert_eq!(ctx.screen_mode(window), Some(ScreenMode::Windowed));
    assert_eq!(ctx.backend().placement_of(window), Some(before));
}

#[test]
fn set_screen_mode_same_mode_is_a_no_op() {
    let mut ctx = new_context();
    let window = ctx.create_window(WindowSpec::new("noop")).unwrap();
    let before = ctx.backend().placement_of(window).unwrap();

    ctx.set_screen_mode(window, ScreenMode::Windowed).unwrap();
    assert_eq!(ctx.backend().placement_of(window), Some(before));
}

#[test]
fn desktop_mode_is_recorded_without_backend_effect() {
    let mut ctx = new_context();
    let window = ctx.create_window(WindowSpec::new("desktop")).unwrap();
    let before = ctx.backend().placement_of(window).unwrap();

    ctx.set_screen_mode(window, ScreenMode::Desktop).unwrap();
    assert_eq!(ctx.screen_mode(window), Some(ScreenMode::Desktop));
    assert_eq!(ctx.backend().placement_of(window), Some(before));
}

#[test]
fn negotiated_resize_is_clamped_to_minimum() {
    let mut ctx = new_context();
    let window = ctx
        .create_window(WindowSpec::new("clamp").size(200, 200))
        .unwrap();
    ctx.set_minimum_size(window, 100, 100);

    ctx.backend_mut().request_resize(window, 50, 50);

    assert_eq!(
        window_kind(ctx.poll_event().unwrap()),
        (
            window,
            WindowEventKind::Resized {
                width: 100,
                height: 100,
            }
        )
    );
    assert_eq!(ctx.size(window).unwrap(), (100, 100));
}

#[test]
fn negotiated_resize_is_clamped_to_maximum() {
    let mut ctx = new_context();
    let window = ctx
        .create_window(WindowSpec::new("clamp-max").size(200, 200))
        .unwrap();
    ctx.set_maximum_size(window, 300, 300);

    ctx.backend_mut().request_resize(window, 800, 250);

    assert_eq!(
        window_kind(ctx.poll_event().unwrap()),
        (
            window,
            WindowEventKind::Resized {
                width: 300,
                height: 250,
            }
        )
    );
}

#[test]
fn unconstrained_resize_passes_through() {
    let mut ctx = new_context();
    let window = ctx.create_window(WindowSpec::new("free")).unwrap();

    ctx.backend_mut().request_resize(window, 5, 5000);
    assert_eq!(
        window_kind(ctx.poll_event().unwrap()),
        (
            window,
            WindowEventKind::Resized {
                width: 5,
                height: 5000,
            }
        )
    );
}

#[test]
fn first_motion_synthesizes_enter_before_move() {
    let mut ctx = new_context();
    let window = ctx.create_window(WindowSpec::new("hover")).unwrap();

    ctx.backend_mut()
        .deliver(window, RawEvent::PointerMoved { x: 10, y: 20 });

    assert_eq!(
        window_kind(ctx.poll_event().unwrap()),
        (window, WindowEventKind::PointerEntered)
    );
    assert_eq!(
        mouse_kind(ctx.poll_event().unwrap()),
        (window, MouseEventKind::Moved { x: 10, y: 20 })
    );

    // Still inside: a second motion is just a motion.
    ctx.backend_mut()
        .deliver(window, RawEvent::PointerMoved { x: 11, y: 21 });
    assert_eq!(
        mouse_kind(ctx.poll_event().unwrap()),
        (window, MouseEventKind::Moved { x: 11, y: 21 })
    );
    assert_eq!(ctx.poll_event(), None);
}

#[test]
fn motion_after_exit_synthesizes_enter_again() {
    let mut ctx = new_context();
    let window = ctx.create_window(WindowSpec::new("hover-again")).unwrap();

    ctx.backend_mut()
        .deliver(window, RawEvent::PointerMoved { x: 1, y: 1 });
    ctx.backend_mut().deliver(window, RawEvent::PointerLeft);
    ctx.backend_mut()
        .deliver(window, RawEvent::PointerMoved { x: 2, y: 2 });

    let kinds: Vec<Event> = std::iter::from_fn(|| ctx.poll_event()).collect();
    assert_eq!(kinds.len(), 5);
    assert_eq!(
        window_kind(kinds[0]),
        (window, WindowEventKind::PointerEntered)
    );
    assert_eq!(
        mouse_kind(kinds[1]),
        (window, MouseEventKind::Moved { x: 1, y: 1 })
    );
    assert_eq!(window_kind(kinds[2]), (window, WindowEventKind::PointerLeft));
    assert_eq!(
        window_kind(kinds[3]),
        (window, WindowEventKind::PointerEntered)
    );
    assert_eq!(
        mouse_kind(kinds[4]),
        (window, MouseEventKind::Moved { x: 2, y: 2 })
    );
}

#[test]
fn button_events_carry_button_and_state() {
    let mut ctx = new_context();
    let window = ctx.create_window(WindowSpec::new("buttons")).unwrap();

    ctx.backend_mut().deliver(
        window,
        RawEvent::PointerButton {
            button: MouseButton::Right,
            state: ButtonState::Down,
        },
    );
    ctx.backend_mut().deliver(window, RawEvent::Wheel { delta: 3 });

    assert_eq!(
        mouse_kind(ctx.poll_event().unwrap()),
        (
            window,
            MouseEventKind::Button {
                button: MouseButton::Right,
                state: ButtonState::Down,
            }
        )
    );
    assert_eq!(
        mouse_kind(ctx.poll_event().unwrap()),
        (window, MouseEventKind::Wheel { delta: 3 })
    );
}

#[test]
fn two_windows_fan_into_one_queue() {
    let mut ctx = new_context();
    let queue = ctx.create_event_queue().unwrap();
    let first = ctx
        .create_window(WindowSpec::new("first").queue(queue))
        .unwrap();
    let second = ctx
        .create_window(WindowSpec::new("second").queue(queue))
        .unwrap();

    ctx.backend_mut().deliver(first, RawEvent::FocusGained);
    ctx.backend_mut().deliver(second, RawEvent::FocusGained);

    assert_eq!(
        window_kind(ctx.poll_event_from(queue).unwrap()),
        (first, WindowEventKind::Focused)
    );
    assert_eq!(
        window_kind(ctx.poll_event_from(queue).unwrap()),
        (second, WindowEventKind::Focused)
    );
    // The default queue saw none of it.
    assert_eq!(ctx.poll_event(), None);
}

#[test]
fn destroy_releases_native_window_once() {
    let mut ctx = new_context();
    let window = ctx.create_window(WindowSpec::new("destroy")).unwrap();
    assert!(ctx.backend().is_alive(window));

    ctx.destroy_window(window);
    assert!(!ctx.backend().is_alive(window));
    assert_eq!(ctx.backend().release_count(), 1);
    assert_eq!(ctx.window_count(), 0);

    // A second destroy on the stale id is a logged no-op.
    ctx.destroy_window(window);
    assert_eq!(ctx.backend().release_count(), 1);
}

#[test]
fn events_for_destroyed_window_are_dropped() {
    let mut ctx = new_context();
    let window = ctx.create_window(WindowSpec::new("stale")).unwrap();
    ctx.backend_mut().deliver(window, RawEvent::CloseRequested);
    ctx.destroy_window(window);

    assert_eq!(ctx.poll_event(), None);
}

#[test]
fn nul_in_title_is_rejected_before_native_creation() {
    let mut ctx = new_context();
    let err = ctx
        .create_window(WindowSpec::new("bad\0title"))
        .unwrap_err();
    assert!(matches!(err, SashError::InvalidTitle));
    assert_eq!(ctx.window_count(), 0);
    assert_eq!(ctx.backend().release_count(), 0);
}

#[test]
fn failed_native_creation_leaves_no_core_record() {
    let mut ctx = new_context();
    ctx.backend_mut().fail_next_create();

    let err = ctx.create_window(WindowSpec::new("doomed")).unwrap_err();
    assert!(matches!(err, SashError::Platform(_)));
    assert_eq!(ctx.window_count(), 0);

    // The context is still usable afterwards.
    let window = ctx.create_window(WindowSpec::new("survivor")).unwrap();
    assert!(ctx.backend().is_alive(window));
}

#[test]
fn mouse_capture_round_trips_through_the_backend() {
    let mut ctx = new_context();
    let window = ctx.create_window(WindowSpec::new("capture")).unwrap();

    ctx.capture_mouse(window);
    assert!(ctx.backend().is_captured(window));
    ctx.release_mouse(window);
    assert!(!ctx.backend().is_captured(window));
}

#[test]
fn custom_monitor_governs_fullscreen_cover() {
    let mut ctx = new_context();
    let window = ctx.create_window(WindowSpec::new("monitor")).unwrap();
    ctx.backend_mut().set_monitor(Placement {
        x: 1920,
        y: 0,
        width: 2560,
        height: 1440,
        flags: PlacementFlags::empty(),
    });

    ctx.set_screen_mode(window, ScreenMode::Fullscreen).unwrap();
    let covering = ctx.backend().placement_of(window).unwrap();
    assert_eq!((covering.x, covering.y), (1920, 0));
    assert_eq!((covering.width, covering.height), (2560, 1440));
}
