//! Radio group widget implementation.
//!
//! A [`RadioGroup`] stacks two or more options vertically. Exactly one option
//! is selected at a time.
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut window = Window::new();
//! let group = RadioGroup::new(&window, ["Small", "Medium", "Large"])?;
//! group.selection_changed.connect(|index| println!("selected option {index}"));
//! window.add(group)?;
//!
//! // A radio group needs at least two options.
//! assert!(RadioGroup::new(&window, ["Only"]).is_err());
//! # Ok::<(), trellis::WidgetError>(())
//! ```

use trellis_core::Signal;
use trellis_core::logging::targets;
use trellis_render::{Color, Point, PrimitiveId, Size, Stroke};

use crate::error::{Result, WidgetError};
use crate::widget::{Key, Role, SignalKind, Transition, Widget, WidgetBase};
use crate::window::Window;

const MIN_OPTIONS: usize = 2;
const RADIUS: f32 = 8.0;
const SPACING: f32 = 8.0;
const LABEL_FONT_SIZE: f32 = 12.0;
/// Vertical distance between the tops of consecutive options.
const ROW_PITCH: f32 = RADIUS * 2.0 + SPACING;

#[derive(Debug, Clone, Copy)]
struct OptionParts {
    circle: PrimitiveId,
    dot: PrimitiveId,
    label: PrimitiveId,
}

impl OptionParts {
    fn owns(&self, region: PrimitiveId) -> bool {
        region == self.circle || region == self.dot || region == self.label
    }
}

/// A vertical group of mutually exclusive options.
///
/// Every option's circle, dot and label are hit regions. Completing a press
/// on any of them selects that option. While focused, `ArrowDown` and
/// `ArrowUp` move the selection, wrapping at either end.
pub struct RadioGroup {
    base: WidgetBase,
    options: Vec<String>,
    selected: usize,
    parts: Vec<OptionParts>,
    /// Option under the pointer when the current press started.
    pressed_option: Option<usize>,

    /// Emitted with the new index whenever the selection changes.
    pub selection_changed: Signal<usize>,
}

impl RadioGroup {
    /// Create a group with the first option selected.
    ///
    /// Fails with [`WidgetError::TooFewOptions`] if fewer than two options are
    /// given.
    pub fn new<I, S>(parent: &Window, options: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        if options.len() < MIN_OPTIONS {
            return Err(WidgetError::TooFewOptions {
                widget: "RadioGroup",
                required: MIN_OPTIONS,
                given: options.len(),
            });
        }

        let mut base = WidgetBase::new(parent);
        base.set_role(Role::Group);
        base.set_selectable(true);
        base.set_size(Size::new(
            RADIUS * 2.0,
            ROW_PITCH * (options.len() - 1) as f32 + RADIUS * 2.0,
        ));

        let mut group = Self {
            base,
            options,
            selected: 0,
            parts: Vec::new(),
            pressed_option: None,
            selection_changed: Signal::new(),
        };
        group.render()?;
        group.normal();
        Ok(group)
    }

    /// The option labels.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Always `false`; a radio group has at least two options.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Index of the selected option.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Label of the selected option.
    pub fn selected_label(&self) -> &str {
        &self.options[self.selected]
    }

    /// Select an option.
    ///
    /// Emits [`selection_changed`](Self::selection_changed) once if `index`
    /// differs from the current selection. Out of range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index == self.selected {
            return;
        }
        if index >= self.options.len() {
            tracing::warn!(
                target: targets::WIDGET,
                widget = %self.base.id(),
                index,
                options = self.options.len(),
                "radio option out of range"
            );
            return;
        }
        self.selected = index;
        self.update();
        tracing::debug!(target: targets::WIDGET, widget = %self.base.id(), index, "radio selection changed");
        self.selection_changed.emit(index);
    }

    /// The option a hit region belongs to.
    fn option_at(&self, region: PrimitiveId) -> Option<usize> {
        self.parts.iter().position(|parts| parts.owns(region))
    }

    fn paint(&mut self, color: Color) {
        self.base.set_backcolor(color);
        self.update();
    }

    fn normal(&mut self) {
        self.paint(Color::WHITE);
    }

    fn hover(&mut self) {
        self.paint(Color::from_rgb8(0xf0, 0xf0, 0xf0));
    }

    fn down(&mut self) {
        self.paint(Color::from_rgb8(0xe0, 0xe0, 0xe0));
    }
}

impl Widget for RadioGroup {
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

        let mut parts = Vec::with_capacity(self.options.len());
        for (index, option) in self.options.iter().enumerate() {
            let y = index as f32 * ROW_PITCH;

            let circle = surface.circle(group, RADIUS * 2.0)?;
            surface.set_stroke(circle, Stroke::new(Color::BLACK, 1.0));
            surface.move_to(circle, Point::new(0.0, y));

            let dot = surface.circle(group, RADIUS)?;
            surface.set_fill(dot, Color::BLACK);
            surface.move_to(dot, Point::new(RADIUS / 2.0, y + RADIUS / 2.0));
            surface.hide(dot);

            let label = surface.text(group, option.as_str())?;
            surface.set_font_size(label, LABEL_FONT_SIZE);
            surface.set_fill(label, Color::BLACK);
            let height = surface.measure_text(option, LABEL_FONT_SIZE).height;
            surface.move_to(
                label,
                Point::new(RADIUS * 2.0 + SPACING, y + (RADIUS * 2.0 - height) / 2.0),
            );

            for region in [circle, dot, label] {
                self.base.register_event(region);
            }
            parts.push(OptionParts { circle, dot, label });
        }

        self.base.set_root(group);
        self.parts = parts;
        Ok(())
    }

    fn update(&mut self) {
        let surface = self.base.surface();
        for (index, parts) in self.parts.iter().enumerate() {
            surface.set_fill(parts.circle, self.base.backcolor());
            surface.set_visible(parts.dot, index == self.selected);
        }
        self.base.update();
    }

    fn accessible_label(&self) -> Option<String> {
        Some(self.selected_label().to_string())
    }

    fn idle_up_state(&mut self, _transition: &Transition) {
        self.normal();
    }

    fn idle_down_state(&mut self, _transition: &Transition) {
        self.down();
    }

    fn pressed_state(&mut self, transition: &Transition) {
        if transition.cause.kind == SignalKind::PointerDown {
            self.pressed_option = transition.cause.target.and_then(|region| self.option_at(region));
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
        let count = self.options.len();
        match transition.cause.key() {
            Some(Key::ArrowDown) => self.select((self.selected + 1) % count),
            Some(Key::ArrowUp) => self.select((self.selected + count - 1) % count),
            _ => {}
        }
    }

    fn press_release_state(&mut self, transition: &Transition) {
        let pressed = self.pressed_option.take();
        let released = transition.cause.target.and_then(|region| self.option_at(region));
        let index = match (released, pressed) {
            // Pressing one option and releasing on another selects neither.
            (Some(released), Some(pressed)) if released != pressed => return,
            (released, pressed) => released.or(pressed),
        };
        if let Some(index) = index {
            self.select(index);
        }
    }
}

impl std::fmt::Debug for RadioGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadioGroup")
            .field("base", &self.base)
            .field("options", &self.options)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(RadioGroup: Send, Sync);
