//! CheckBox widget implementation.
//!
//! This module provides [`CheckBox`], a box with a check mark and a text
//! label that toggles between checked and unchecked.
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut window = Window::new();
//! let checkbox = CheckBox::new(&window, "Enable feature")?;
//! checkbox.toggled.connect(|&checked| {
//!     println!("Checkbox is now: {}", if checked { "checked" } else { "unchecked" });
//! });
//! window.add(checkbox)?;
//! # Ok::<(), trellis::WidgetError>(())
//! ```

use trellis_core::Signal;
use trellis_core::logging::targets;
use trellis_render::{Color, Point, PrimitiveId, Size, Stroke};

use crate::error::Result;
use crate::widget::{Key, Role, Transition, Widget, WidgetBase};
use crate::window::Window;

/// Side of the box, also the font size of the mark and label.
const BOX_SIZE: f32 = 20.0;
/// Gap between the box and the label.
const SPACING: f32 = 6.0;
const CHECK_MARK: &str = "\u{2714}";

#[derive(Debug, Clone, Copy)]
struct Parts {
    frame: PrimitiveId,
    mark: PrimitiveId,
    label: PrimitiveId,
    hit: PrimitiveId,
}

/// A two-state check box with a label.
///
/// A single transparent hit region covers both the box and the label, so
/// pressing and releasing anywhere on either toggles the box. While focused,
/// releasing `Space` toggles it too.
pub struct CheckBox {
    base: WidgetBase,
    label: String,
    checked: bool,
    parts: Option<Parts>,

    /// Emitted with the new value whenever the checked state changes.
    pub toggled: Signal<bool>,
}

impl CheckBox {
    /// Create an unchecked check box.
    pub fn new(parent: &Window, label: impl Into<String>) -> Result<Self> {
        let mut base = WidgetBase::new(parent);
        base.set_role(Role::Group);
        base.set_selectable(true);
        base.set_size(Size::new(BOX_SIZE, BOX_SIZE));

        let mut checkbox = Self {
            base,
            label: label.into(),
            checked: false,
            parts: None,
            toggled: Signal::new(),
        };
        checkbox.render()?;
        checkbox.normal();
        Ok(checkbox)
    }

    /// Whether the box is checked.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set the checked state.
    ///
    /// Emits [`toggled`](Self::toggled) only if the value changes.
    pub fn set_checked(&mut self, checked: bool) {
        if self.checked == checked {
            return;
        }
        self.checked = checked;
        self.update();
        tracing::debug!(target: targets::WIDGET, widget = %self.base.id(), checked, "checkbox toggled");
        self.toggled.emit(checked);
    }

    /// Flip the checked state.
    pub fn toggle(&mut self) {
        self.set_checked(!self.checked);
    }

    /// The label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Set the label text. The hit region grows or shrinks to match.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.update();
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
        self.paint(Color::from_rgb8(0xdd, 0xdd, 0xdd));
    }
}

impl Widget for CheckBox {
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
        let frame = surface.rect(group, BOX_SIZE, BOX_SIZE)?;
        surface.set_stroke(frame, Stroke::new(Color::BLACK, 1.0));

        let mark = surface.text(group, "")?;
        surface.set_font_size(mark, BOX_SIZE);
        surface.set_fill(mark, Color::BLACK);

        let label = surface.text(group, self.label.as_str())?;
        surface.set_font_size(label, BOX_SIZE);
        surface.set_fill(label, Color::BLACK);

        let hit = surface.rect(group, BOX_SIZE, BOX_SIZE)?;
        surface.set_opacity(hit, 0.0);

        self.base.register_event(hit);
        self.base.set_root(group);
        self.parts = Some(Parts {
            frame,
            mark,
            label,
            hit,
        });
        Ok(())
    }

    fn update(&mut self) {
        if let Some(parts) = self.parts {
            let surface = self.base.surface();

            surface.set_text(parts.mark, if self.checked { CHECK_MARK } else { "" });
            let mark = surface.measure_text(if self.checked { CHECK_MARK } else { "" }, BOX_SIZE);
            surface.move_to(
                parts.mark,
                Point::new((BOX_SIZE - mark.width) / 2.0, (BOX_SIZE - mark.height) / 2.0),
            );

            surface.set_text(parts.label, self.label.as_str());
            surface.move_to(parts.label, Point::new(BOX_SIZE + SPACING, 0.0));

            let label_width = surface.measure_text(&self.label, BOX_SIZE).width;
            surface.set_size(parts.hit, Size::new(BOX_SIZE + SPACING + label_width, BOX_SIZE));
            surface.set_fill(parts.frame, self.base.backcolor());
        }
        self.base.update();
    }

    fn accessible_label(&self) -> Option<String> {
        Some(self.label.clone())
    }

    fn idle_up_state(&mut self, _transition: &Transition) {
        self.normal();
    }

    fn idle_down_state(&mut self, _transition: &Transition) {
        self.down();
    }

    fn pressed_state(&mut self, _transition: &Transition) {
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
        if transition.cause.key() == Some(Key::Space) {
            self.toggle();
        }
    }

    fn press_release_state(&mut self, _transition: &Transition) {
        self.toggle();
    }
}

impl std::fmt::Debug for CheckBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckBox")
            .field("base", &self.base)
            .field("label", &self.label)
            .field("checked", &self.checked)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(CheckBox: Send, Sync);
