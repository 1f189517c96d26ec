//! Core widget trait.

use std::any::Any;

use super::{Role, Transition, WidgetBase, WidgetId, WidgetState};
use crate::error::Result;

/// The contract every widget fulfills.
///
/// A widget embeds a [`WidgetBase`] and implements three things:
///
/// - [`render`](Self::render) creates its primitives once, registers at least
///   one hit region with [`WidgetBase::register_event`] and records the root
///   group with [`WidgetBase::set_root`].
/// - [`update`](Self::update) re-applies visuals from the widget's current
///   fields, then calls [`WidgetBase::update`] to position the root group.
/// - The state hooks. Each `*_state` method runs when the interaction state
///   machine enters the matching [`WidgetState`]; `press_release_state` runs
///   after a press completes over the widget. All hooks default to doing
///   nothing.
///
/// Constructors take the parent [`Window`](crate::window::Window) and call
/// `render()` before returning, so a widget is never observed half-built.
///
/// # Example
///
/// ```
/// use trellis::prelude::*;
/// use trellis::Result;
///
/// struct Swatch {
///     base: WidgetBase,
///     rect: Option<PrimitiveId>,
/// }
///
/// impl Swatch {
///     fn new(parent: &Window) -> Result<Self> {
///         let mut swatch = Self { base: WidgetBase::new(parent), rect: None };
///         swatch.render()?;
///         Ok(swatch)
///     }
/// }
///
/// impl Widget for Swatch {
///     fn widget_base(&self) -> &WidgetBase { &self.base }
///     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
///
///     fn render(&mut self) -> Result<()> {
///         let surface = self.base.surface().clone();
///         let group = surface.group(self.base.parent_group())?;
///         let rect = surface.rect(group, 40.0, 40.0)?;
///         self.base.register_event(rect);
///         self.base.set_root(group);
///         self.rect = Some(rect);
///         self.update();
///         Ok(())
///     }
///
///     fn update(&mut self) {
///         if let Some(rect) = self.rect {
///             self.base.surface().set_fill(rect, self.base.backcolor());
///         }
///         self.base.update();
///     }
///
///     fn hover_state(&mut self, _transition: &Transition) {
///         self.base.set_backcolor(Color::GRAY);
///         self.update();
///     }
/// }
///
/// let mut window = Window::new();
/// let id = window.add(Swatch::new(&window)?)?;
/// window.dispatch_to(id, SignalKind::PointerEnter.into());
/// assert_eq!(window.get(id).map(|w| w.state()), Some(WidgetState::Hover));
/// # Ok::<(), trellis::WidgetError>(())
/// ```
pub trait Widget: Any + Send + Sync {
    /// Get a reference to the widget base.
    fn widget_base(&self) -> &WidgetBase;

    /// Get a mutable reference to the widget base.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// Create the widget's primitives and register its hit regions.
    fn render(&mut self) -> Result<()>;

    /// Re-apply visuals from the widget's current fields.
    ///
    /// Implementations must end by calling [`WidgetBase::update`].
    fn update(&mut self) {
        self.widget_base_mut().update();
    }

    /// Move the whole widget to `(x, y)` in window coordinates.
    fn move_to(&mut self, x: f32, y: f32) {
        self.widget_base_mut().move_to(x, y);
    }

    /// Human-readable label for accessibility output.
    fn accessible_label(&self) -> Option<String> {
        None
    }

    /// Short type name used in debug output.
    fn type_name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    // =========================================================================
    // Convenience accessors
    // =========================================================================

    /// The widget's identifier.
    fn id(&self) -> WidgetId {
        self.widget_base().id()
    }

    /// Semantic role.
    fn role(&self) -> Role {
        self.widget_base().role()
    }

    /// Current interaction state.
    fn state(&self) -> WidgetState {
        self.widget_base().state()
    }

    // =========================================================================
    // State hooks
    // =========================================================================

    /// Entered [`WidgetState::IdleUp`].
    fn idle_up_state(&mut self, _transition: &Transition) {}

    /// Entered [`WidgetState::IdleDown`].
    fn idle_down_state(&mut self, _transition: &Transition) {}

    /// Entered [`WidgetState::Pressed`].
    fn pressed_state(&mut self, _transition: &Transition) {}

    /// Entered [`WidgetState::Hover`].
    fn hover_state(&mut self, _transition: &Transition) {}

    /// Entered [`WidgetState::HoverPressed`].
    fn hover_pressed_state(&mut self, _transition: &Transition) {}

    /// Entered [`WidgetState::PressedOut`].
    fn pressed_out_state(&mut self, _transition: &Transition) {}

    /// Entered [`WidgetState::Move`].
    fn move_state(&mut self, _transition: &Transition) {}

    /// Entered [`WidgetState::KeyUp`]. The key is in `transition.cause`.
    fn key_up_state(&mut self, _transition: &Transition) {}

    /// A press completed over the widget.
    ///
    /// Runs after the hover hook, only when the machine leaves
    /// [`WidgetState::Pressed`] or [`WidgetState::HoverPressed`] on pointer-up.
    fn press_release_state(&mut self, _transition: &Transition) {}
}

/// Downcast a widget trait object to its concrete type.
pub(crate) fn downcast_ref<'a, W: Widget>(widget: &'a (dyn Widget + 'static)) -> Option<&'a W> {
    let any: &dyn Any = widget;
    any.downcast_ref::<W>()
}

/// Mutable variant of [`downcast_ref`].
pub(crate) fn downcast_mut<'a, W: Widget>(
    widget: &'a mut (dyn Widget + 'static),
) -> Option<&'a mut W> {
    let any: &mut dyn Any = widget;
    any.downcast_mut::<W>()
}
