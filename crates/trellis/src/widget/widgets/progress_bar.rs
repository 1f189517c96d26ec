//! Progress bar widget implementation.
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//!
//! let window = Window::new();
//! let mut bar = ProgressBar::new(&window)?;
//! bar.set_increment_value(25.0);
//! bar.incremented.connect(|value| println!("progress: {value}%"));
//!
//! bar.increment(None);
//! bar.increment(Some(100.0));
//! assert_eq!(bar.progress(), 100.0);
//! # Ok::<(), trellis::WidgetError>(())
//! ```

use trellis_core::Signal;
use trellis_core::logging::targets;
use trellis_render::{Color, PrimitiveId, Size, Stroke};

use crate::error::Result;
use crate::widget::{Role, Transition, Widget, WidgetBase};
use crate::window::Window;

const DEFAULT_WIDTH: f32 = 300.0;
const DEFAULT_HEIGHT: f32 = 20.0;
const DEFAULT_INCREMENT: f32 = 10.0;
const MAX_PROGRESS: f32 = 100.0;

/// Track and fill colors for one visual state.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Palette {
    track: Color,
    fill: Color,
}

impl Palette {
    fn normal() -> Self {
        Self {
            track: Color::from_rgb8(0xdd, 0xdd, 0xdd),
            fill: Color::from_rgb8(0x76, 0xc7, 0xc0),
        }
    }

    fn hover() -> Self {
        Self {
            track: Color::from_rgb8(0xee, 0xee, 0xee),
            fill: Color::from_rgb8(0x8b, 0xd1, 0xca),
        }
    }

    fn down() -> Self {
        Self {
            track: Color::from_rgb8(0xcc, 0xcc, 0xcc),
            fill: Color::from_rgb8(0x5b, 0xb6, 0xb0),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Parts {
    track: PrimitiveId,
    fill: PrimitiveId,
    hit: PrimitiveId,
}

/// A horizontal bar showing progress from 0 to 100 percent.
///
/// Completing a press on the bar advances it by the increment value. Every
/// state change is also observable through
/// [`state_changed`](Self::state_changed).
pub struct ProgressBar {
    base: WidgetBase,
    progress: f32,
    increment_value: f32,
    palette: Palette,
    parts: Option<Parts>,

    /// Emitted with the new progress after every [`increment`](Self::increment).
    pub incremented: Signal<f32>,
}

impl ProgressBar {
    /// Create an empty bar, 300 by 20 pixels, that advances by 10.
    pub fn new(parent: &Window) -> Result<Self> {
        let mut base = WidgetBase::new(parent);
        base.set_role(Role::ProgressBar);
        base.set_selectable(true);
        base.set_size(Size::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));

        let mut bar = Self {
            base,
            progress: 0.0,
            increment_value: DEFAULT_INCREMENT,
            palette: Palette::normal(),
            parts: None,
            incremented: Signal::new(),
        };
        bar.render()?;
        bar.paint(Palette::normal());
        Ok(bar)
    }

    /// Current progress, between 0 and 100.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Width of the track.
    pub fn bar_width(&self) -> f32 {
        self.base.width()
    }

    /// Set the width of the track. The fill keeps its proportion.
    pub fn set_bar_width(&mut self, width: f32) {
        let height = self.base.height();
        self.base.set_size(Size::new(width, height));
        self.update();
    }

    /// Amount [`increment`](Self::increment) adds when given no delta.
    pub fn increment_value(&self) -> f32 {
        self.increment_value
    }

    /// Set the default increment.
    pub fn set_increment_value(&mut self, value: f32) {
        self.increment_value = value;
    }

    /// Advance by `delta`, or by the increment value if `None`.
    ///
    /// The result is clamped to `0..=100`. Negative deltas move backwards.
    /// [`incremented`](Self::incremented) is emitted even if clamping left the
    /// value unchanged. A delta that is not finite is ignored.
    pub fn increment(&mut self, delta: Option<f32>) {
        let delta = delta.unwrap_or(self.increment_value);
        if !delta.is_finite() {
            tracing::warn!(target: targets::WIDGET, widget = %self.base.id(), delta, "ignoring non-finite progress increment");
            return;
        }
        self.progress = (self.progress + delta).clamp(0.0, MAX_PROGRESS);
        self.update();
        tracing::debug!(target: targets::WIDGET, widget = %self.base.id(), progress = self.progress, "progress incremented");
        self.incremented.emit(self.progress);
    }

    /// Emitted after every interaction state transition.
    pub fn state_changed(&self) -> &Signal<Transition> {
        &self.base.state_changed
    }

    fn fill_width(&self) -> f32 {
        self.progress / MAX_PROGRESS * self.base.width()
    }

    fn paint(&mut self, palette: Palette) {
        self.palette = palette;
        self.base.set_backcolor(palette.track);
        self.update();
    }
}

impl Widget for ProgressBar {
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
        let track = surface.rect(group, size.width, size.height)?;
        surface.set_stroke(track, Stroke::new(Color::from_rgb8(0xaa, 0xaa, 0xaa), 1.0));
        let fill = surface.rect(group, self.fill_width(), size.height)?;
        let hit = surface.rect(group, size.width, size.height)?;
        surface.set_opacity(hit, 0.0);

        self.base.register_event(hit);
        self.base.set_root(group);
        self.parts = Some(Parts { track, fill, hit });
        Ok(())
    }

    fn update(&mut self) {
        if let Some(parts) = self.parts {
            let surface = self.base.surface();
            let size = self.base.size();
            surface.set_size(parts.track, size);
            surface.set_size(parts.hit, size);
            surface.set_size(parts.fill, Size::new(self.fill_width(), size.height));
            surface.set_fill(parts.track, self.palette.track);
            surface.set_fill(parts.fill, self.palette.fill);
        }
        self.base.update();
    }

    fn accessible_label(&self) -> Option<String> {
        Some(format!("{}%", self.progress))
    }

    fn idle_up_state(&mut self, _transition: &Transition) {
        self.paint(Palette::normal());
    }

    fn idle_down_state(&mut self, _transition: &Transition) {
        self.paint(Palette::down());
    }

    fn pressed_state(&mut self, _transition: &Transition) {
        self.paint(Palette::down());
    }

    fn hover_state(&mut self, _transition: &Transition) {
        self.paint(Palette::hover());
    }

    fn hover_pressed_state(&mut self, _transition: &Transition) {
        self.paint(Palette::down());
    }

    fn pressed_out_state(&mut self, _transition: &Transition) {
        self.paint(Palette::normal());
    }

    fn move_state(&mut self, _transition: &Transition) {
        self.paint(Palette::hover());
    }

    fn key_up_state(&mut self, _transition: &Transition) {
        self.paint(Palette::normal());
    }

    fn press_release_state(&mut self, _transition: &Transition) {
        self.increment(None);
    }
}

impl std::fmt::Debug for ProgressBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressBar")
            .field("base", &self.base)
            .field("progress", &self.progress)
            .field("increment_value", &self.increment_value)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(ProgressBar: Send, Sync);
