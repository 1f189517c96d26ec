//! The root hosting surface for widgets.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use trellis_core::logging::{span_names, targets};
use trellis_core::{PerfSpan, Signal, ThreadAffinity};
use trellis_render::{Color, DrawCommand, Point, PrimitiveId, Size, Surface, TextMeasure};

use super::WindowConfig;
use super::focus::{self, Direction, FocusChain};
use crate::error::{ConfigResult, Result, WidgetError};
use crate::widget::{
    AccessibleNode, InputSignal, Key, SignalKind, Transition, Widget, WidgetId, dispatch,
    downcast_mut, downcast_ref,
};

static NEXT_WINDOW_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    fn next() -> Self {
        Self(NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw identifier value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pointer router bookkeeping.
#[derive(Debug, Default)]
struct PointerState {
    position: Point,
    /// Widget and hit region currently under the pointer.
    hovered: Option<(WidgetId, PrimitiveId)>,
    /// Widget that received the last pointer-down; it also gets the matching up.
    capture: Option<WidgetId>,
    button_held: bool,
}

/// The root container that hosts widgets.
///
/// A window owns the [`Surface`] its widgets draw on and every widget added
/// to it. It routes input to widgets in two ways:
///
/// - [`dispatch`](Self::dispatch) delivers a signal that arrived on a specific
///   hit region, as a host toolkit with per-element listeners would.
/// - [`pointer_move`](Self::pointer_move), [`pointer_down`](Self::pointer_down)
///   and [`pointer_up`](Self::pointer_up) take raw window coordinates and
///   synthesize enter, leave, drag-enter, move, down and up signals through hit
///   testing. The widget that receives a pointer-down also receives the
///   matching pointer-up, wherever the pointer is.
///
/// Keyboard input goes to the focused widget through [`key_up`](Self::key_up);
/// `Tab` moves focus along the tab order instead.
///
/// # Threading
///
/// All dispatch must happen on the thread that created the window. Debug
/// builds assert this. A window may be moved to another thread as a whole if
/// [`rebind_thread`](Self::rebind_thread) is called there.
pub struct Window {
    id: WindowId,
    config: WindowConfig,
    background: Color,
    surface: Surface,

    widgets: BTreeMap<WidgetId, Box<dyn Widget>>,
    /// Insertion order, used to break tabindex ties.
    order: Vec<WidgetId>,
    hit_map: HashMap<PrimitiveId, WidgetId>,

    focus: FocusChain,
    pointer: PointerState,
    affinity: ThreadAffinity,

    /// Emitted when keyboard focus moves, with the new owner.
    pub focus_changed: Signal<Option<WidgetId>>,
    /// Emitted when the window is resized.
    pub resized: Signal<Size>,
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}

impl Window {
    /// Create a window with the default configuration.
    pub fn new() -> Self {
        Self::build(WindowConfig::default(), Color::WHITE, Surface::new())
    }

    /// Create a window from a configuration.
    ///
    /// Fails with [`ConfigError::InvalidColor`](crate::ConfigError::InvalidColor)
    /// if the background is not a hex color.
    pub fn from_config(config: WindowConfig) -> ConfigResult<Self> {
        let background = config.background_color()?;
        Ok(Self::build(config, background, Surface::new()))
    }

    /// Create a window whose surface measures text with custom metrics.
    pub fn with_text_measure(
        config: WindowConfig,
        measure: impl TextMeasure + 'static,
    ) -> ConfigResult<Self> {
        let background = config.background_color()?;
        Ok(Self::build(config, background, Surface::with_text_measure(measure)))
    }

    fn build(config: WindowConfig, background: Color, surface: Surface) -> Self {
        let id = WindowId::next();
        tracing::debug!(
            target: targets::WINDOW,
            window = %id,
            title = config.title(),
            width = config.width(),
            height = config.height(),
            "created window"
        );
        Self {
            id,
            config,
            background,
            surface,
            widgets: BTreeMap::new(),
            order: Vec::new(),
            hit_map: HashMap::new(),
            focus: FocusChain::default(),
            pointer: PointerState::default(),
            affinity: ThreadAffinity::current(),
            focus_changed: Signal::new(),
            resized: Signal::new(),
        }
    }

    /// The window's identifier.
    #[inline]
    pub fn id(&self) -> WindowId {
        self.id
    }

    /// The surface widgets draw on.
    #[inline]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The group widgets create their root groups under.
    pub fn content(&self) -> PrimitiveId {
        self.surface.root()
    }

    /// The configuration the window was built from, kept current by setters.
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Window title.
    pub fn title(&self) -> &str {
        self.config.title()
    }

    /// Set the window title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let config = std::mem::take(&mut self.config);
        self.config = config.with_title(title);
    }

    /// Window size.
    pub fn size(&self) -> Size {
        self.config.size()
    }

    /// Resize the window.
    ///
    /// Widgets keep their positions and sizes; nothing is laid out again.
    pub fn resize(&mut self, width: u32, height: u32) {
        let config = std::mem::take(&mut self.config);
        self.config = config.with_size(width, height);
        tracing::debug!(target: targets::WINDOW, window = %self.id, width, height, "resized window");
        self.resized.emit(self.config.size());
    }

    /// Background color a backend clears the window with.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Set the background color.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
        let config = std::mem::take(&mut self.config);
        self.config = config.with_background(color.to_hex());
    }

    /// Bind dispatch to the calling thread.
    ///
    /// Call this after moving the window to the thread that will drive it.
    pub fn rebind_thread(&mut self) {
        self.affinity.rebind();
    }

    /// Paint-ordered draw commands for everything in the window.
    pub fn display_list(&self) -> Vec<DrawCommand> {
        self.surface.display_list()
    }

    // =========================================================================
    // Widget bookkeeping
    // =========================================================================

    /// Add a rendered widget to the window.
    ///
    /// The widget's hit regions start routing input to it. Fails if the widget
    /// was constructed for another window or has not rendered.
    pub fn add<W: Widget>(&mut self, widget: W) -> Result<WidgetId> {
        self.add_boxed(Box::new(widget))
    }

    /// Add an already boxed widget.
    pub fn add_boxed(&mut self, widget: Box<dyn Widget>) -> Result<WidgetId> {
        let base = widget.widget_base();
        let id = base.id();
        if base.window() != self.id {
            return Err(WidgetError::ForeignWindow {
                widget: id,
                owner: base.window(),
                target: self.id,
            });
        }
        if !base.is_rendered() {
            return Err(WidgetError::NotRendered(id));
        }

        for region in base.hit_regions() {
            self.hit_map.insert(*region, id);
        }
        tracing::debug!(
            target: targets::WINDOW,
            window = %self.id,
            widget = %id,
            kind = widget.type_name(),
            role = %base.role(),
            regions = base.hit_regions().len(),
            "added widget"
        );
        if self.widgets.insert(id, widget).is_none() {
            self.order.push(id);
        }
        Ok(id)
    }

    /// Remove a widget and its primitives from the window.
    ///
    /// Returns the widget, or `None` if it was not in the window. Removing
    /// twice is harmless.
    pub fn remove(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        let mut widget = self.widgets.remove(&id)?;
        for region in widget.widget_base_mut().detach() {
            self.hit_map.remove(&region);
        }
        self.hit_map.retain(|_, owner| *owner != id);
        self.order.retain(|existing| *existing != id);

        if self.pointer.hovered.is_some_and(|(hovered, _)| hovered == id) {
            self.pointer.hovered = None;
        }
        if self.pointer.capture == Some(id) {
            self.pointer.capture = None;
        }
        if self.focus.focused() == Some(id) {
            self.focus.replace(None);
            self.focus_changed.emit(None);
        }

        tracing::debug!(target: targets::WINDOW, window = %self.id, widget = %id, "removed widget");
        Some(widget)
    }

    /// Whether a widget is in the window.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    /// Number of widgets in the window.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the window has no widgets.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Widget ids in the order they were added.
    pub fn widget_ids(&self) -> &[WidgetId] {
        &self.order
    }

    /// Look up a widget.
    pub fn get(&self, id: WidgetId) -> Option<&dyn Widget> {
        match self.widgets.get(&id) {
            Some(widget) => Some(widget.as_ref()),
            None => None,
        }
    }

    /// Look up a widget mutably.
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut dyn Widget> {
        match self.widgets.get_mut(&id) {
            Some(widget) => Some(widget.as_mut()),
            None => None,
        }
    }

    /// Look up a widget by concrete type.
    pub fn widget<W: Widget>(&self, id: WidgetId) -> Option<&W> {
        self.widgets
            .get(&id)
            .and_then(|widget| downcast_ref::<W>(widget.as_ref()))
    }

    /// Look up a widget mutably by concrete type.
    pub fn widget_mut<W: Widget>(&mut self, id: WidgetId) -> Option<&mut W> {
        self.widgets
            .get_mut(&id)
            .and_then(|widget| downcast_mut::<W>(widget.as_mut()))
    }

    /// The widget owning a hit region.
    pub fn widget_at_region(&self, region: PrimitiveId) -> Option<WidgetId> {
        self.hit_map.get(&region).copied()
    }

    /// The widget whose hit region is topmost under `position`.
    pub fn widget_at(&self, position: Point) -> Option<WidgetId> {
        self.hit(position).map(|(id, _)| id)
    }

    fn hit(&self, position: Point) -> Option<(WidgetId, PrimitiveId)> {
        let region = self.surface.hit_test(position)?;
        self.widget_at_region(region).map(|id| (id, region))
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Deliver a signal that arrived on a hit region.
    ///
    /// The signal's target is set to `region` if it has none. Signals on
    /// regions no widget owns are ignored.
    pub fn dispatch(&mut self, region: PrimitiveId, mut signal: InputSignal) -> Option<Transition> {
        let Some(id) = self.widget_at_region(region) else {
            tracing::trace!(target: targets::WINDOW, ?region, "signal on unowned region ignored");
            return None;
        };
        if signal.target.is_none() {
            signal.target = Some(region);
        }
        self.dispatch_to(id, signal)
    }

    /// Deliver a signal straight to a widget's state machine.
    pub fn dispatch_to(&mut self, id: WidgetId, signal: InputSignal) -> Option<Transition> {
        self.affinity.debug_assert_same_thread();
        let _span = PerfSpan::new(span_names::DISPATCH);
        let Some(widget) = self.widgets.get_mut(&id) else {
            tracing::trace!(target: targets::WINDOW, widget = %id, "signal for unknown widget ignored");
            return None;
        };
        dispatch(widget.as_mut(), signal)
    }

    fn send(
        &mut self,
        out: &mut Vec<Transition>,
        id: WidgetId,
        kind: SignalKind,
        target: Option<PrimitiveId>,
    ) {
        let mut signal = InputSignal::new(kind).with_position(self.pointer.position);
        signal.target = target;
        out.extend(self.dispatch_to(id, signal));
    }

    /// Update which widget is under the pointer, sending leave and enter.
    ///
    /// Returns `true` if the hovered widget changed.
    fn retarget(&mut self, position: Point, out: &mut Vec<Transition>) -> bool {
        self.pointer.position = position;
        let hit = self.hit(position);
        let previous = self.pointer.hovered;

        match (previous, hit) {
            (Some((old, _)), Some((new, region))) if old == new => {
                self.pointer.hovered = Some((new, region));
                false
            }
            (None, None) => false,
            _ => {
                self.pointer.hovered = hit;
                if let Some((old, region)) = previous {
                    self.send(out, old, SignalKind::PointerLeave, Some(region));
                }
                if let Some((new, region)) = hit {
                    let kind = if self.pointer.button_held && self.pointer.capture != Some(new) {
                        SignalKind::DragEnter
                    } else {
                        SignalKind::PointerEnter
                    };
                    self.send(out, new, kind, Some(region));
                }
                true
            }
        }
    }

    /// Route a pointer move in window coordinates.
    pub fn pointer_move(&mut self, position: Point) -> Vec<Transition> {
        let mut out = Vec::new();
        if !self.retarget(position, &mut out) {
            if let Some((id, region)) = self.pointer.hovered {
                self.send(&mut out, id, SignalKind::PointerMove, Some(region));
            }
        }
        out
    }

    /// Route a pointer press in window coordinates.
    ///
    /// Pressing a selectable widget also gives it keyboard focus.
    pub fn pointer_down(&mut self, position: Point) -> Vec<Transition> {
        let mut out = Vec::new();
        self.retarget(position, &mut out);
        self.pointer.button_held = true;
        self.pointer.capture = None;

        if let Some((id, region)) = self.pointer.hovered {
            self.pointer.capture = Some(id);
            self.send(&mut out, id, SignalKind::PointerDown, Some(region));
            if self.widgets.get(&id).is_some_and(|w| w.widget_base().is_selectable()) {
                self.focus(id);
            }
        }
        out
    }

    /// Route a pointer release in window coordinates.
    ///
    /// The widget under the pointer receives the release; so does the widget
    /// that was pressed, if it is a different one.
    pub fn pointer_up(&mut self, position: Point) -> Vec<Transition> {
        let mut out = Vec::new();
        self.retarget(position, &mut out);
        self.pointer.button_held = false;
        let capture = self.pointer.capture.take();

        let hovered = self.pointer.hovered;
        if let Some((id, region)) = hovered {
            self.send(&mut out, id, SignalKind::PointerUp, Some(region));
        }
        if let Some(captured) = capture {
            if hovered.map(|(id, _)| id) != Some(captured) {
                self.send(&mut out, captured, SignalKind::PointerUp, None);
            }
        }
        out
    }

    /// Route a key release.
    ///
    /// `Tab` moves focus to the next widget in tab order. Other keys go to the
    /// focused widget, if any.
    pub fn key_up(&mut self, key: Key) -> Option<Transition> {
        if key == Key::Tab {
            self.focus_next();
            return None;
        }
        let id = self.focus.focused()?;
        self.dispatch_to(id, InputSignal::key_up(key))
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// The widget holding keyboard focus.
    pub fn focused(&self) -> Option<WidgetId> {
        self.focus.focused()
    }

    /// Give keyboard focus to a widget.
    ///
    /// Returns `false` (and leaves focus alone) if the widget is not in the
    /// window or is not selectable.
    pub fn focus(&mut self, id: WidgetId) -> bool {
        let selectable = self
            .widgets
            .get(&id)
            .is_some_and(|w| w.widget_base().is_selectable());
        if !selectable {
            tracing::trace!(target: targets::WINDOW, widget = %id, "widget cannot take focus");
            return false;
        }
        if self.focus.focused() == Some(id) {
            return true;
        }

        if let Some(old) = self.focus.replace(Some(id)) {
            if let Some(widget) = self.widgets.get_mut(&old) {
                widget.widget_base_mut().set_focused(false);
            }
        }
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.widget_base_mut().set_focused(true);
        }
        tracing::debug!(target: targets::WINDOW, window = %self.id, widget = %id, "focus changed");
        self.focus_changed.emit(Some(id));
        true
    }

    /// Remove keyboard focus from whichever widget holds it.
    pub fn clear_focus(&mut self) {
        if let Some(old) = self.focus.replace(None) {
            if let Some(widget) = self.widgets.get_mut(&old) {
                widget.widget_base_mut().set_focused(false);
            }
            tracing::debug!(target: targets::WINDOW, window = %self.id, "focus cleared");
            self.focus_changed.emit(None);
        }
    }

    /// Move focus to the next selectable widget, wrapping around.
    pub fn focus_next(&mut self) -> Option<WidgetId> {
        self.step_focus(Direction::Forward)
    }

    /// Move focus to the previous selectable widget, wrapping around.
    pub fn focus_previous(&mut self) -> Option<WidgetId> {
        self.step_focus(Direction::Backward)
    }

    fn step_focus(&mut self, direction: Direction) -> Option<WidgetId> {
        let order = self.tab_order();
        let next = self.focus.step(&order, direction)?;
        self.focus(next);
        Some(next)
    }

    /// Selectable widgets in focus order: ascending tabindex, then insertion.
    pub fn tab_order(&self) -> Vec<WidgetId> {
        self.ordered(true)
    }

    fn ordered(&self, selectable_only: bool) -> Vec<WidgetId> {
        focus::tab_order(self.order.iter().filter_map(|id| {
            let base = self.widgets.get(id)?.widget_base();
            (!selectable_only || base.is_selectable()).then_some((*id, base.tabindex()))
        }))
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Accessibility description of every widget, in tab order.
    pub fn accessibility_tree(&self) -> Vec<AccessibleNode> {
        self.ordered(false)
            .into_iter()
            .filter_map(|id| {
                let widget = self.widgets.get(&id)?;
                let base = widget.widget_base();
                Some(AccessibleNode {
                    id,
                    role: base.role(),
                    tabindex: base.tabindex(),
                    selectable: base.is_selectable(),
                    focused: base.has_focus(),
                    bounds: base.bounds(),
                    label: widget.accessible_label(),
                })
            })
            .collect()
    }

    /// Human-readable dump of the widgets and their primitives.
    pub fn debug_tree(&self) -> String {
        super::tree_debug::WindowTreeDebug::new(self).to_string()
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("title", &self.config.title())
            .field("widgets", &self.widgets.len())
            .field("focused", &self.focus.focused())
            .finish_non_exhaustive()
    }
}
