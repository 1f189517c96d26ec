//! Vertical scroll bar widget.
//!
//! A [`ScrollBar`] is an up button, a track with a draggable-looking thumb,
//! and a down button, stacked top to bottom:
//!
//! ```text
//!  ┌──┐  0
//!  │▲ │
//!  ├──┤  ARROW_HEIGHT
//!  │██│  thumb at ARROW_HEIGHT + thumb_position
//!  │  │
//!  ├──┤  scroll_height - ARROW_HEIGHT
//!  │▼ │
//!  └──┘  scroll_height
//! ```
//!
//! The thumb position is measured from the top of the track and always lies
//! in `[0, scroll_height - 2 * ARROW_HEIGHT - THUMB_HEIGHT]`.

use std::fmt;

use trellis_core::Signal;
use trellis_core::logging::targets;
use trellis_render::{Color, Point, PrimitiveId, Size, Stroke};

use crate::error::Result;
use crate::widget::{Key, Role, SignalKind, Transition, Widget, WidgetBase};
use crate::window::Window;

/// Width of the whole bar.
const BAR_WIDTH: f32 = 20.0;
/// Height of each arrow button.
const ARROW_HEIGHT: f32 = 20.0;
/// Height of the thumb.
const THUMB_HEIGHT: f32 = 40.0;
/// Distance the thumb moves per arrow press.
const STEP: f32 = 20.0;

const DEFAULT_SCROLL_HEIGHT: f32 = 200.0;
const ARROW_FONT_SIZE: f32 = ARROW_HEIGHT - 4.0;

/// What caused a scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// The up button.
    Up,
    /// The down button.
    Down,
    /// A click on the track.
    Track,
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScrollDirection::Up => "up",
            ScrollDirection::Down => "down",
            ScrollDirection::Track => "track",
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Parts {
    up_button: PrimitiveId,
    up_arrow: PrimitiveId,
    track: PrimitiveId,
    thumb: PrimitiveId,
    down_button: PrimitiveId,
    down_arrow: PrimitiveId,
}

/// A vertical scroll bar.
///
/// Completing a press on the up or down button steps the thumb by 20 pixels;
/// completing one on the track centers the thumb on the release point. While
/// focused, `ArrowUp` and `ArrowDown` step the thumb. Every action emits
/// [`scrolled`](Self::scrolled) with its direction and the resulting thumb
/// position, even when the thumb is already at the end of its travel.
pub struct ScrollBar {
    base: WidgetBase,
    scroll_height: f32,
    thumb_position: f32,
    parts: Option<Parts>,
    /// Region under the pointer when the current press started.
    pressed_region: Option<PrimitiveId>,

    /// Emitted after every scroll action.
    pub scrolled: Signal<(ScrollDirection, f32)>,
}

impl ScrollBar {
    /// Create a scroll bar 200 pixels tall with the thumb at the top.
    pub fn new(parent: &Window) -> Result<Self> {
        let mut base = WidgetBase::new(parent);
        base.set_role(Role::ScrollBar);
        base.set_selectable(true);
        base.set_size(Size::new(BAR_WIDTH, DEFAULT_SCROLL_HEIGHT));

        let mut bar = Self {
            base,
            scroll_height: DEFAULT_SCROLL_HEIGHT,
            thumb_position: 0.0,
            parts: None,
            pressed_region: None,
            scrolled: Signal::new(),
        };
        bar.render()?;
        bar.normal();
        Ok(bar)
    }

    /// Total height of the bar, buttons included.
    pub fn scroll_height(&self) -> f32 {
        self.scroll_height
    }

    /// Set the total height. The thumb is clamped into the new track.
    pub fn set_scroll_height(&mut self, height: f32) {
        self.scroll_height = height;
        self.base.set_size(Size::new(BAR_WIDTH, height));
        self.update();
    }

    /// Thumb offset from the top of the track.
    pub fn thumb_position(&self) -> f32 {
        self.thumb_position
    }

    /// Largest thumb offset the current height allows.
    pub fn max_thumb_position(&self) -> f32 {
        (self.scroll_height - 2.0 * ARROW_HEIGHT - THUMB_HEIGHT).max(0.0)
    }

    /// Move the thumb, clamped into the track. Does not emit.
    pub fn set_thumb_position(&mut self, position: f32) {
        self.thumb_position = position;
        self.update();
    }

    /// Step the thumb up.
    pub fn move_up(&mut self) {
        self.set_thumb_position(self.thumb_position - STEP);
        self.emit_scrolled(ScrollDirection::Up);
    }

    /// Step the thumb down.
    pub fn move_down(&mut self) {
        self.set_thumb_position(self.thumb_position + STEP);
        self.emit_scrolled(ScrollDirection::Down);
    }

    /// Center the thumb on `y`, measured from the top of the bar.
    pub fn track_click(&mut self, y: f32) {
        self.set_thumb_position(y - ARROW_HEIGHT - THUMB_HEIGHT / 2.0);
        self.emit_scrolled(ScrollDirection::Track);
    }

    fn emit_scrolled(&self, direction: ScrollDirection) {
        tracing::debug!(
            target: targets::WIDGET,
            widget = %self.base.id(),
            %direction,
            position = self.thumb_position,
            "scrolled"
        );
        self.scrolled.emit((direction, self.thumb_position));
    }

    fn clamp_thumb(&mut self) {
        self.thumb_position = self.thumb_position.min(self.max_thumb_position()).max(0.0);
    }

    fn paint(&mut self, color: Color) {
        self.base.set_backcolor(color);
        self.update();
    }

    fn normal(&mut self) {
        self.paint(Color::from_rgb8(0x81, 0xc7, 0x84));
    }

    fn hover(&mut self) {
        self.paint(Color::from_rgb8(0xa5, 0xd6, 0xa7));
    }

    fn down(&mut self) {
        self.paint(Color::from_rgb8(0x66, 0xbb, 0x6a));
    }
}

/// Center an arrow glyph inside a button whose top is at `top`.
fn arrow_origin(glyph: Size, top: f32) -> Point {
    Point::new(
        (BAR_WIDTH - glyph.width) / 2.0,
        top + (ARROW_HEIGHT - glyph.height) / 2.0,
    )
}

impl Widget for ScrollBar {
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
        let group = surface.group(self.base.parent_group())?;
        let outline = Stroke::new(Color::BLACK, 1.0);

        let up_button = surface.rect(group, BAR_WIDTH, ARROW_HEIGHT)?;
        surface.set_stroke(up_button, outline);
        let up_arrow = surface.text(group, "\u{25b2}")?;
        surface.set_font_size(up_arrow, ARROW_FONT_SIZE);
        surface.set_fill(up_arrow, Color::BLACK);

        let track = surface.rect(group, BAR_WIDTH, 0.0)?;
        surface.set_fill(track, Color::from_rgb8(0xe8, 0xf5, 0xe9));
        surface.move_to(track, Point::new(0.0, ARROW_HEIGHT));

        let thumb = surface.rect(group, BAR_WIDTH, THUMB_HEIGHT)?;
        surface.set_fill(thumb, Color::from_rgb8(0x66, 0xbb, 0x6a));

        let down_button = surface.rect(group, BAR_WIDTH, ARROW_HEIGHT)?;
        surface.set_stroke(down_button, outline);
        let down_arrow = surface.text(group, "\u{25bc}")?;
        surface.set_font_size(down_arrow, ARROW_FONT_SIZE);
        surface.set_fill(down_arrow, Color::BLACK);

        for region in [up_button, track, thumb, down_button] {
            self.base.register_event(region);
        }
        self.base.set_root(group);
        self.parts = Some(Parts {
            up_button,
            up_arrow,
            track,
            thumb,
            down_button,
            down_arrow,
        });
        Ok(())
    }

    fn update(&mut self) {
        self.clamp_thumb();
        if let Some(parts) = self.parts {
            let surface = self.base.surface();
            let down_top = self.scroll_height - ARROW_HEIGHT;
            let track_height = (self.scroll_height - 2.0 * ARROW_HEIGHT).max(0.0);

            surface.set_size(parts.track, Size::new(BAR_WIDTH, track_height));
            surface.move_to(parts.thumb, Point::new(0.0, ARROW_HEIGHT + self.thumb_position));
            surface.move_to(parts.down_button, Point::new(0.0, down_top));

            let up_glyph = surface.measure_text("\u{25b2}", ARROW_FONT_SIZE);
            surface.move_to(parts.up_arrow, arrow_origin(up_glyph, 0.0));
            let down_glyph = surface.measure_text("\u{25bc}", ARROW_FONT_SIZE);
            surface.move_to(parts.down_arrow, arrow_origin(down_glyph, down_top));

            surface.set_fill(parts.up_button, self.base.backcolor());
            surface.set_fill(parts.down_button, self.base.backcolor());
        }
        self.base.update();
    }

    fn idle_up_state(&mut self, _transition: &Transition) {
        self.normal();
    }

    fn idle_down_state(&mut self, _transition: &Transition) {
        self.down();
    }

    fn pressed_state(&mut self, transition: &Transition) {
        // Re-entering from PressedOut keeps the part the press started on.
        if transition.cause.kind == SignalKind::PointerDown {
            self.pressed_region = transition.cause.target;
        }
        self.down();
    }

    fn hover_state(&mut self, _transition: &Transition) {
        self.hover();
    }

    fn hover_pressed_state(&mut self, _transition: &Transition) {
        self.down();
    }

    fn pressed_out_state(&mut self, _transition: &Transition) {
        self.normal();
    }

    fn move_state(&mut self, _transition: &Transition) {
        self.hover();
    }

    fn key_up_state(&mut self, transition: &Transition) {
        self.normal();
        match transition.cause.key() {
            Some(Key::ArrowUp) => self.move_up(),
            Some(Key::ArrowDown) => self.move_down(),
            _ => {}
        }
    }

    fn press_release_state(&mut self, transition: &Transition) {
        let pressed = self.pressed_region.take();
        let region = match (transition.cause.target, pressed) {
            // A press that ends on another part activates nothing.
            (Some(released), Some(pressed)) if released != pressed => return,
            (released, pressed) => released.or(pressed),
        };
        let (Some(parts), Some(region)) = (self.parts, region) else {
            return;
        };
        if region == parts.up_button {
            self.move_up();
        } else if region == parts.down_button {
            self.move_down();
        } else if region == parts.track {
            let local_y = transition.cause.position.y - self.base.y();
            self.track_click(local_y);
        }
    }
}

impl fmt::Debug for ScrollBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollBar")
            .field("base", &self.base)
            .field("scroll_height", &self.scroll_height)
            .field("thumb_position", &self.thumb_position)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(ScrollBar: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{InputSignal, WidgetId};
    use std::sync::Arc;

    type Log = Arc<parking_lot::Mutex<Vec<(ScrollDirection, f32)>>>;

    fn recording_bar(window: &mut Window) -> (WidgetId, Log) {
        let bar = ScrollBar::new(window).unwrap();
        let seen: Log = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let log = seen.clone();
        bar.scrolled.connect(move |event| log.lock().push(*event));
        (window.add(bar).unwrap(), seen)
    }

    #[test]
    fn test_defaults() {
        let window = Window::new();
        let bar = ScrollBar::new(&window).unwrap();
        assert_eq!(bar.scroll_height(), 200.0);
        assert_eq!(bar.thumb_position(), 0.0);
        assert_eq!(bar.max_thumb_position(), 120.0);
        assert_eq!(bar.role(), Role::ScrollBar);
        assert!(bar.widget_base().is_selectable());
        assert_eq!(bar.widget_base().hit_regions().len(), 4);
        assert_eq!(bar.widget_base().backcolor(), Color::from_rgb8(0x81, 0xc7, 0x84));
    }

    #[test]
    fn test_steps_clamp() {
        let window = Window::new();
        let mut bar = ScrollBar::new(&window).unwrap();

        bar.move_up();
        assert_eq!(bar.thumb_position(), 0.0);

        for _ in 0..10 {
            bar.move_down();
        }
        assert_eq!(bar.thumb_position(), 120.0);
    }

    #[test]
    fn test_track_click_centers_thumb() {
        let window = Window::new();
        let mut bar = ScrollBar::new(&window).unwrap();

        bar.track_click(100.0);
        assert_eq!(bar.thumb_position(), 100.0 - ARROW_HEIGHT - THUMB_HEIGHT / 2.0);

        bar.track_click(5.0);
        assert_eq!(bar.thumb_position(), 0.0);

        bar.track_click(1000.0);
        assert_eq!(bar.thumb_position(), bar.max_thumb_position());
    }

    #[test]
    fn test_shrinking_reclamps_thumb() {
        let window = Window::new();
        let mut bar = ScrollBar::new(&window).unwrap();
        bar.set_thumb_position(120.0);

        bar.set_scroll_height(120.0);
        assert_eq!(bar.thumb_position(), 40.0);
        assert_eq!(bar.widget_base().size(), Size::new(BAR_WIDTH, 120.0));

        bar.set_scroll_height(50.0);
        assert_eq!(bar.thumb_position(), 0.0);
        assert_eq!(bar.max_thumb_position(), 0.0);
    }

    #[test]
    fn test_layout_follows_height() {
        let window = Window::new();
        let mut bar = ScrollBar::new(&window).unwrap();
        bar.set_scroll_height(120.0);
        bar.set_thumb_position(10.0);

        let parts = bar.parts.unwrap();
        let surface = window.surface();
        assert_eq!(surface.position(parts.down_button), Some(Point::new(0.0, 100.0)));
        assert_eq!(surface.position(parts.thumb), Some(Point::new(0.0, 30.0)));
        assert_eq!(surface.bbox(parts.track).map(|b| b.height()), Some(80.0));
    }

    #[test]
    fn test_button_releases_scroll() {
        let mut window = Window::new();
        let (id, seen) = recording_bar(&mut window);
        let parts = window.widget::<ScrollBar>(id).unwrap().parts.unwrap();

        for region in [parts.down_button, parts.down_button, parts.up_button] {
            window.dispatch_to(id, InputSignal::new(SignalKind::PointerDown).with_target(region));
            window.dispatch_to(id, InputSignal::new(SignalKind::PointerUp).with_target(region));
        }
        assert_eq!(
            *seen.lock(),
            vec![
                (ScrollDirection::Down, 20.0),
                (ScrollDirection::Down, 40.0),
                (ScrollDirection::Up, 20.0),
            ]
        );
    }

    #[test]
    fn test_track_release_uses_local_offset() {
        let mut window = Window::new();
        let mut bar = ScrollBar::new(&window).unwrap();
        bar.move_to(10.0, 80.0);
        let track = bar.parts.unwrap().track;
        let id = window.add(bar).unwrap();

        let at = Point::new(15.0, 80.0 + 90.0);
        window.dispatch_to(
            id,
            InputSignal::new(SignalKind::PointerDown).with_target(track).with_position(at),
        );
        window.dispatch_to(
            id,
            InputSignal::new(SignalKind::PointerUp).with_target(track).with_position(at),
        );
        assert_eq!(window.widget::<ScrollBar>(id).unwrap().thumb_position(), 50.0);
    }

    #[test]
    fn test_release_on_another_part_does_nothing() {
        let mut window = Window::new();
        let (id, seen) = recording_bar(&mut window);
        let parts = window.widget::<ScrollBar>(id).unwrap().parts.unwrap();

        window.dispatch_to(id, InputSignal::new(SignalKind::PointerDown).with_target(parts.up_button));
        window.dispatch_to(id, InputSignal::new(SignalKind::PointerMove).with_target(parts.down_button));
        window.dispatch_to(id, InputSignal::new(SignalKind::PointerUp).with_target(parts.down_button));
        assert!(seen.lock().is_empty());
        assert_eq!(window.widget::<ScrollBar>(id).unwrap().thumb_position(), 0.0);

        // Leaving and re-entering on another part keeps the original part.
        window.dispatch_to(id, InputSignal::new(SignalKind::PointerDown).with_target(parts.up_button));
        window.dispatch_to(id, InputSignal::new(SignalKind::PointerLeave).with_target(parts.up_button));
        window.dispatch_to(id, InputSignal::new(SignalKind::PointerEnter).with_target(parts.down_button));
        window.dispatch_to(id, InputSignal::new(SignalKind::PointerUp).with_target(parts.down_button));
        assert!(seen.lock().is_empty());

        // The next press on a single part still acts.
        window.dispatch_to(id, InputSignal::new(SignalKind::PointerDown).with_target(parts.down_button));
        window.dispatch_to(id, InputSignal::new(SignalKind::PointerUp).with_target(parts.down_button));
        assert_eq!(*seen.lock(), vec![(ScrollDirection::Down, 20.0)]);
    }

    #[test]
    fn test_thumb_release_does_nothing() {
        let mut window = Window::new();
        let (id, seen) = recording_bar(&mut window);
        let thumb = window.widget::<ScrollBar>(id).unwrap().parts.unwrap().thumb;

        window.dispatch_to(id, InputSignal::new(SignalKind::PointerDown).with_target(thumb));
        window.dispatch_to(id, InputSignal::new(SignalKind::PointerUp).with_target(thumb));
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_arrow_keys_step() {
        let mut window = Window::new();
        let (id, seen) = recording_bar(&mut window);

        window.dispatch_to(id, InputSignal::key_up(Key::ArrowDown));
        window.dispatch_to(id, InputSignal::key_up(Key::ArrowDown));
        window.dispatch_to(id, InputSignal::key_up(Key::ArrowUp));
        window.dispatch_to(id, InputSignal::key_up(Key::Space));
        assert_eq!(window.widget::<ScrollBar>(id).unwrap().thumb_position(), 20.0);
        assert_eq!(seen.lock().len(), 3);
    }
}
