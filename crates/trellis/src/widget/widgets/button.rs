//! Push button widget.
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut window = Window::new();
//! let mut button = Button::with_text(&window, "Save")?;
//! button.set_font_size(14.0);
//! button.move_to(10.0, 60.0);
//! button.clicked.connect(|args| println!("clicked {}", args.source));
//! window.add(button)?;
//! # Ok::<(), trellis::WidgetError>(())
//! ```

use trellis_core::Signal;
use trellis_core::logging::targets;
use trellis_render::{Color, Point, PrimitiveId, Size, Stroke};

use crate::error::Result;
use crate::widget::{EventArgs, Role, Transition, Widget, WidgetBase};
use crate::window::Window;

const DEFAULT_TEXT: &str = "Button";
const DEFAULT_FONT_SIZE: f32 = 18.0;
const DEFAULT_WIDTH: f32 = 80.0;
const DEFAULT_HEIGHT: f32 = 30.0;
/// Horizontal gap between the frame and the label.
const TEXT_INSET: f32 = 4.0;

#[derive(Debug, Clone, Copy)]
struct Parts {
    frame: PrimitiveId,
    label: PrimitiveId,
    hit: PrimitiveId,
}

/// A clickable button with a text label.
///
/// The button is drawn as a black-outlined rectangle whose fill follows the
/// interaction state (red when idle, lighter on hover, darker when pressed).
/// A transparent rectangle on top is its hit region.
///
/// Completing a press over the button raises [`WidgetBase::events`] and then
/// emits [`clicked`](Self::clicked). With no subscribers a click does
/// nothing.
pub struct Button {
    base: WidgetBase,
    text: String,
    font_size: f32,
    parts: Option<Parts>,

    /// Emitted when the button is clicked.
    pub clicked: Signal<EventArgs>,
}

impl Button {
    /// Create a button labelled "Button".
    pub fn new(parent: &Window) -> Result<Self> {
        Self::with_text(parent, DEFAULT_TEXT)
    }

    /// Create a button with the given label.
    pub fn with_text(parent: &Window, text: impl Into<String>) -> Result<Self> {
        let mut base = WidgetBase::new(parent);
        base.set_role(Role::Button);
        base.set_size(Size::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));

        let mut button = Self {
            base,
            text: text.into(),
            font_size: DEFAULT_FONT_SIZE,
            parts: None,
            clicked: Signal::new(),
        };
        button.render()?;
        button.normal();
        Ok(button)
    }

    /// The label text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the label text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.update();
    }

    /// The label font size.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Set the label font size.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
        self.update();
    }

    /// Resize the frame and hit region.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.base.set_size(Size::new(width, height));
        self.update();
    }

    /// Click the button programmatically.
    pub fn click(&self) {
        let args = self.base.event_args();
        tracing::debug!(target: targets::WIDGET, widget = %args.source, "button clicked");
        self.base.raise(args);
        self.clicked.emit(args);
    }

    fn paint(&mut self, color: Color) {
        self.base.set_backcolor(color);
        self.update();
    }

    fn normal(&mut self) {
        self.paint(Color::RED);
    }

    fn down(&mut self) {
        self.paint(Color::from_rgb8(0xff, 0x66, 0x66));
    }

    fn pressed(&mut self) {
        self.paint(Color::from_rgb8(0xcc, 0x00, 0x00));
    }

    fn hover(&mut self) {
        self.paint(Color::from_rgb8(0xff, 0x33, 0x33));
    }

    fn hover_press(&mut self) {
        self.paint(Color::from_rgb8(0xcc, 0x33, 0x33));
    }
}

impl Widget for Button {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn render(&mut self) -> Result<()> {
        if self.base.is_rendered() {
            return Ok(());
        }
        let surface = self.base.surface().clone();
        let size = self.base.size();

        let group = surface.group(self.base.parent_group())?;
        let frame = surface.rect(group, size.width, size.height)?;
        surface.set_stroke(frame, Stroke::new(Color::BLACK, 1.0));
        let label = surface.text(group, self.text.as_str())?;
        let hit = surface.rect(group, size.width, size.height)?;
        surface.set_opacity(hit, 0.0);

        self.base.register_event(hit);
        self.base.set_root(group);
        self.parts = Some(Parts { frame, label, hit });
        Ok(())
    }

    fn update(&mut self) {
        if let Some(parts) = self.parts {
            let surface = self.base.surface();
            let size = self.base.size();
            surface.set_size(parts.frame, size);
            surface.set_size(parts.hit, size);
            surface.set_fill(parts.frame, self.base.backcolor());

            surface.set_font_size(parts.label, self.font_size);
            surface.set_text(parts.label, self.text.as_str());
            let text_height = surface.bbox(parts.label).map_or(0.0, |b| b.height());
            let y = (size.height - text_height) / 2.0;
            surface.move_to(parts.label, Point::new(TEXT_INSET, y.max(0.0)));
        }
        self.base.update();
    }

    fn accessible_label(&self) -> Option<String> {
        Some(self.text.clone())
    }

    fn idle_up_state(&mut self, _transition: &Transition) {
        self.normal();
    }

    fn idle_down_state(&mut self, _transition: &Transition) {
        self.down();
    }

    fn pressed_state(&mut self, _transition: &Transition) {
        self.pressed();
    }

    fn hover_state(&mut self, _transition: &Transition) {
        self.hover();
    }

    fn hover_pressed_state(&mut self, _transition: &Transition) {
        self.hover_press();
    }

    fn pressed_out_state(&mut self, _transition: &Transition) {
        self.normal();
    }

    fn move_state(&mut self, _transition: &Transition) {
        self.hover();
    }

    fn key_up_state(&mut self, _transition: &Transition) {
        self.normal();
    }

    fn press_release_state(&mut self, _transition: &Transition) {
        self.click();
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("base", &self.base)
            .field("text", &self.text)
            .field("font_size", &self.font_size)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(Button: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{SignalKind, WidgetState};
    use std::sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    };

    fn send(window: &mut Window, id: crate::widget::WidgetId, kinds: &[SignalKind]) {
        for kind in kinds {
            window.dispatch_to(id, (*kind).into());
        }
    }

    fn counting_button(window: &mut Window) -> (crate::widget::WidgetId, Arc<AtomicU32>) {
        let button = Button::new(window).unwrap();
        let clicks = Arc::new(AtomicU32::new(0));
        let counter = clicks.clone();
        button.clicked.connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (window.add(button).unwrap(), clicks)
    }

    #[test]
    fn test_button_defaults() {
        let window = Window::new();
        let button = Button::new(&window).unwrap();
        assert_eq!(button.text(), "Button");
        assert_eq!(button.font_size(), 18.0);
        assert_eq!(button.widget_base().size(), Size::new(80.0, 30.0));
        assert_eq!(button.role(), Role::Button);
        assert!(!button.widget_base().is_selectable());
        assert_eq!(button.widget_base().backcolor(), Color::RED);
        assert_eq!(button.state(), WidgetState::IdleUp);
        assert_eq!(button.widget_base().previous_state(), None);
        assert_eq!(button.widget_base().hit_regions().len(), 1);
    }

    #[test]
    fn test_click_on_press_release() {
        let mut window = Window::new();
        let (id, clicks) = counting_button(&mut window);
        send(
            &mut window,
            id,
            &[SignalKind::PointerEnter, SignalKind::PointerDown, SignalKind::PointerUp],
        );
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
        assert_eq!(window.get(id).unwrap().state(), WidgetState::Hover);
    }

    #[test]
    fn test_click_after_hover_press() {
        let mut window = Window::new();
        let (id, clicks) = counting_button(&mut window);
        send(
            &mut window,
            id,
            &[
                SignalKind::PointerEnter,
                SignalKind::PointerDown,
                SignalKind::PointerMove,
                SignalKind::PointerUp,
            ],
        );
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_release_outside_does_not_click() {
        let mut window = Window::new();
        let (id, clicks) = counting_button(&mut window);
        send(
            &mut window,
            id,
            &[
                SignalKind::PointerEnter,
                SignalKind::PointerDown,
                SignalKind::PointerMove,
                SignalKind::PointerLeave,
                SignalKind::PointerUp,
            ],
        );
        assert_eq!(clicks.load(Ordering::SeqCst), 0);
        assert_eq!(window.get(id).unwrap().state(), WidgetState::IdleUp);
        let button = window.widget::<Button>(id).unwrap();
        assert_eq!(button.widget_base().backcolor(), Color::RED);
    }

    #[test]
    fn test_click_raises_event_before_clicked() {
        let mut window = Window::new();
        let button = Button::new(&window).unwrap();
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let events = order.clone();
        button.widget_base().events.connect(move |_| events.lock().push("event"));
        let clicked = order.clone();
        button.clicked.connect(move |_| clicked.lock().push("clicked"));
        let id = window.add(button).unwrap();

        send(&mut window, id, &[SignalKind::PointerDown, SignalKind::PointerUp]);
        assert_eq!(*order.lock(), vec!["event", "clicked"]);
    }

    #[test]
    fn test_state_palette() {
        let mut window = Window::new();
        let (id, _) = counting_button(&mut window);

        send(&mut window, id, &[SignalKind::PointerEnter]);
        let hover = window.widget::<Button>(id).unwrap().widget_base().backcolor();
        assert_eq!(hover, Color::from_rgb8(0xff, 0x33, 0x33));

        send(&mut window, id, &[SignalKind::PointerDown]);
        let pressed = window.widget::<Button>(id).unwrap().widget_base().backcolor();
        assert_eq!(pressed, Color::from_rgb8(0xcc, 0x00, 0x00));

        send(&mut window, id, &[SignalKind::PointerMove]);
        let hover_pressed = window.widget::<Button>(id).unwrap().widget_base().backcolor();
        assert_eq!(hover_pressed, Color::from_rgb8(0xcc, 0x33, 0x33));
    }

    #[test]
    fn test_frame_fill_follows_backcolor() {
        let mut window = Window::new();
        let (id, _) = counting_button(&mut window);
        send(&mut window, id, &[SignalKind::PointerEnter]);

        let button = window.widget::<Button>(id).unwrap();
        let frame = button.parts.unwrap().frame;
        assert_eq!(
            window.surface().fill(frame),
            Some(Color::from_rgb8(0xff, 0x33, 0x33))
        );
    }

    #[test]
    fn test_label_updates() {
        let window = Window::new();
        let mut button = Button::new(&window).unwrap();
        button.set_text("OK");
        button.set_font_size(12.0);

        let label = button.parts.unwrap().label;
        assert_eq!(window.surface().text_of(label).as_deref(), Some("OK"));
        assert_eq!(button.accessible_label().as_deref(), Some("OK"));
        let pos = window.surface().position(label).unwrap();
        assert_eq!(pos.x, TEXT_INSET);
    }

    #[test]
    fn test_resize_resizes_hit_region() {
        let window = Window::new();
        let mut button = Button::new(&window).unwrap();
        button.resize(120.0, 40.0);
        let hit = button.parts.unwrap().hit;
        let bounds = window.surface().bbox(hit).unwrap();
        assert_eq!(bounds.size, Size::new(120.0, 40.0));
    }
}
