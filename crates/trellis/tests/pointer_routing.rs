//! Integration tests for coordinate-based input routing through a window.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use trellis::prelude::*;

fn counted_button(window: &mut Window, x: f32, y: f32) -> (WidgetId, Arc<AtomicU32>) {
    let mut button = Button::new(window).unwrap();
    button.move_to(x, y);
    let clicks = Arc::new(AtomicU32::new(0));
    let counter = clicks.clone();
    button.clicked.connect(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (window.add(button).unwrap(), clicks)
}

fn state_of(window: &Window, id: WidgetId) -> WidgetState {
    window.get(id).unwrap().state()
}

#[test]
fn hover_move_and_leave() {
    let mut window = Window::new();
    let (id, _) = counted_button(&mut window, 20.0, 20.0);

    let entered = window.pointer_move(Point::new(30.0, 30.0));
    assert_eq!(entered.len(), 1);
    assert_eq!(entered[0].to, WidgetState::Hover);
    assert_eq!(entered[0].cause.position, Point::new(30.0, 30.0));

    window.pointer_move(Point::new(35.0, 32.0));
    assert_eq!(state_of(&window, id), WidgetState::Move);

    let left = window.pointer_move(Point::new(300.0, 300.0));
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].cause.kind, SignalKind::PointerLeave);
    assert_eq!(state_of(&window, id), WidgetState::IdleUp);

    assert!(window.pointer_move(Point::new(310.0, 300.0)).is_empty());
}

#[test]
fn click_inside() {
    let mut window = Window::new();
    let (id, clicks) = counted_button(&mut window, 20.0, 20.0);

    window.pointer_down(Point::new(30.0, 30.0));
    assert_eq!(state_of(&window, id), WidgetState::Pressed);
    window.pointer_up(Point::new(31.0, 30.0));

    assert_eq!(clicks.load(Ordering::SeqCst), 1);
    assert_eq!(state_of(&window, id), WidgetState::Hover);
}

#[test]
fn release_outside_does_not_click() {
    let mut window = Window::new();
    let (id, clicks) = counted_button(&mut window, 20.0, 20.0);

    window.pointer_down(Point::new(30.0, 30.0));
    window.pointer_move(Point::new(32.0, 30.0));
    assert_eq!(state_of(&window, id), WidgetState::HoverPressed);

    window.pointer_move(Point::new(300.0, 300.0));
    assert_eq!(state_of(&window, id), WidgetState::PressedOut);

    let released = window.pointer_up(Point::new(300.0, 300.0));
    assert_eq!(released.len(), 1);
    assert_eq!(released[0].cause.target, None);
    assert_eq!(state_of(&window, id), WidgetState::IdleUp);
    assert_eq!(clicks.load(Ordering::SeqCst), 0);
}

#[test]
fn drag_in_from_empty_space() {
    let mut window = Window::new();
    let (id, clicks) = counted_button(&mut window, 20.0, 20.0);

    assert!(window.pointer_down(Point::new(500.0, 500.0)).is_empty());
    window.pointer_move(Point::new(30.0, 30.0));
    assert_eq!(state_of(&window, id), WidgetState::IdleDown);

    window.pointer_up(Point::new(30.0, 30.0));
    assert_eq!(state_of(&window, id), WidgetState::Hover);
    assert_eq!(clicks.load(Ordering::SeqCst), 0);
}

#[test]
fn drag_from_one_button_to_another() {
    let mut window = Window::new();
    let (first, first_clicks) = counted_button(&mut window, 0.0, 0.0);
    let (second, second_clicks) = counted_button(&mut window, 100.0, 0.0);

    window.pointer_down(Point::new(10.0, 10.0));
    window.pointer_move(Point::new(110.0, 10.0));
    assert_eq!(state_of(&window, first), WidgetState::PressedOut);
    assert_eq!(state_of(&window, second), WidgetState::IdleDown);

    window.pointer_up(Point::new(110.0, 10.0));
    assert_eq!(state_of(&window, first), WidgetState::IdleUp);
    assert_eq!(state_of(&window, second), WidgetState::Hover);
    assert_eq!(first_clicks.load(Ordering::SeqCst), 0);
    assert_eq!(second_clicks.load(Ordering::SeqCst), 0);
}

#[test]
fn pressed_button_returns_to_pressed_on_reentry() {
    let mut window = Window::new();
    let (id, clicks) = counted_button(&mut window, 0.0, 0.0);

    window.pointer_down(Point::new(10.0, 10.0));
    window.pointer_move(Point::new(200.0, 10.0));
    window.pointer_move(Point::new(10.0, 10.0));
    assert_eq!(state_of(&window, id), WidgetState::Pressed);

    window.pointer_up(Point::new(10.0, 10.0));
    assert_eq!(clicks.load(Ordering::SeqCst), 1);
}

#[test]
fn region_dispatch_routes_to_owner() {
    let mut window = Window::new();
    let checkbox = CheckBox::new(&window, "Remember me").unwrap();
    let region = checkbox.widget_base().hit_regions()[0];
    let id = window.add(checkbox).unwrap();

    assert_eq!(window.widget_at_region(region), Some(id));
    let transition = window.dispatch(region, SignalKind::PointerDown.into()).unwrap();
    assert_eq!(transition.cause.target, Some(region));
    window.dispatch(region, SignalKind::PointerUp.into());
    assert!(window.widget::<CheckBox>(id).unwrap().is_checked());

    let stray = window.surface().rect(window.content(), 5.0, 5.0).unwrap();
    assert_eq!(window.dispatch(stray, SignalKind::PointerDown.into()), None);
}

#[test]
fn radio_option_selected_by_pointer() {
    let mut window = Window::new();
    let mut group = RadioGroup::new(&window, ["A", "B", "C"]).unwrap();
    group.move_to(0.0, 100.0);
    let id = window.add(group).unwrap();

    // Center of the second option's circle.
    window.pointer_down(Point::new(8.0, 132.0));
    window.pointer_up(Point::new(8.0, 132.0));
    assert_eq!(window.widget::<RadioGroup>(id).unwrap().selected(), 1);
}

#[test]
fn scroll_bar_parts_by_pointer() {
    let mut window = Window::new();
    let mut bar = ScrollBar::new(&window).unwrap();
    bar.move_to(100.0, 0.0);
    let id = window.add(bar).unwrap();

    // Down button occupies y in 180..200.
    window.pointer_down(Point::new(110.0, 190.0));
    window.pointer_up(Point::new(110.0, 190.0));
    assert_eq!(window.widget::<ScrollBar>(id).unwrap().thumb_position(), 20.0);

    // Track below the thumb.
    window.pointer_down(Point::new(110.0, 150.0));
    window.pointer_up(Point::new(110.0, 150.0));
    assert_eq!(window.widget::<ScrollBar>(id).unwrap().thumb_position(), 110.0);

    // Up button.
    window.pointer_down(Point::new(110.0, 5.0));
    window.pointer_up(Point::new(110.0, 5.0));
    assert_eq!(window.widget::<ScrollBar>(id).unwrap().thumb_position(), 90.0);
}

#[test]
fn drag_across_parts_activates_nothing() {
    let mut window = Window::new();
    let bar = ScrollBar::new(&window).unwrap();
    let scrolls = Arc::new(AtomicU32::new(0));
    let counter = scrolls.clone();
    bar.scrolled.connect(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let bar = window.add(bar).unwrap();

    // Up button, dragged down onto the down button.
    window.pointer_down(Point::new(10.0, 5.0));
    window.pointer_move(Point::new(10.0, 190.0));
    window.pointer_up(Point::new(10.0, 190.0));
    assert_eq!(scrolls.load(Ordering::SeqCst), 0);
    assert_eq!(window.widget::<ScrollBar>(bar).unwrap().thumb_position(), 0.0);

    let mut group = RadioGroup::new(&window, ["A", "B", "C"]).unwrap();
    group.move_to(100.0, 0.0);
    let group = window.add(group).unwrap();

    // Option A's circle, released over option C's circle.
    window.pointer_down(Point::new(108.0, 8.0));
    window.pointer_move(Point::new(108.0, 56.0));
    window.pointer_up(Point::new(108.0, 56.0));
    assert_eq!(window.widget::<RadioGroup>(group).unwrap().selected(), 0);
}

#[test]
fn removed_widget_stops_receiving_input() {
    let mut window = Window::new();
    let (id, clicks) = counted_button(&mut window, 0.0, 0.0);

    window.pointer_move(Point::new(10.0, 10.0));
    let removed = window.remove(id).unwrap();
    assert_eq!(removed.id(), id);
    assert!(window.remove(id).is_none());

    window.pointer_down(Point::new(10.0, 10.0));
    window.pointer_up(Point::new(10.0, 10.0));
    assert_eq!(window.widget_at(Point::new(10.0, 10.0)), None);
    assert_eq!(clicks.load(Ordering::SeqCst), 0);
}

#[test]
fn routing_under_trace_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("trellis=trace,trellis_core=trace"))
        .with_test_writer()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut window = Window::new();
        let (id, clicks) = counted_button(&mut window, 0.0, 0.0);

        window.pointer_move(Point::new(5.0, 5.0));
        window.pointer_down(Point::new(5.0, 5.0));
        window.pointer_up(Point::new(5.0, 5.0));
        window.key_up(Key::Escape);

        assert_eq!(clicks.load(Ordering::SeqCst), 1);
        assert_eq!(state_of(&window, id), WidgetState::Hover);
    });
}
