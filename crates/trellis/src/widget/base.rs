//! Base widget implementation.
//!
//! [`WidgetBase`] holds the state every widget shares: identity, geometry,
//! accessibility attributes, the current interaction state and the
//! primitives that make up the widget on its window's surface.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use trellis_core::Signal;
use trellis_core::logging::targets;
use trellis_render::{Color, Point, PrimitiveId, Rect, Size, Surface};

use super::{EventArgs, Role, Transition, WidgetState};
use crate::window::{Window, WindowId};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a widget.
///
/// Identifiers are unique for the life of the process and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    pub(crate) fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw identifier value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The base implementation for all widgets.
///
/// Concrete widgets embed a `WidgetBase` and hand it out through
/// [`Widget::widget_base`](super::Widget::widget_base). It is created from the
/// parent [`Window`] so it can share that window's [`Surface`], but it never
/// owns the window.
///
/// # Geometry
///
/// `pos` is where the widget's root group sits in window coordinates. Calling
/// [`update`](Self::update) applies it; [`move_to`](Self::move_to) changes it
/// and applies it in one step.
pub struct WidgetBase {
    id: WidgetId,
    window: WindowId,
    surface: Surface,
    parent_group: PrimitiveId,

    pos: Point,
    size: Size,
    role: Role,
    tabindex: i32,
    selectable: bool,
    backcolor: Color,
    focused: bool,

    state: WidgetState,
    previous_state: Option<WidgetState>,

    root: Option<PrimitiveId>,
    hit_regions: Vec<PrimitiveId>,

    /// Generic notifications raised by the widget (see [`raise`](Self::raise)).
    pub events: Signal<EventArgs>,
    /// Emitted after every state transition, once its hooks have run.
    pub state_changed: Signal<Transition>,
}

impl WidgetBase {
    /// Create a base for a widget hosted by `parent`.
    ///
    /// The widget starts in [`WidgetState::IdleUp`] with no previous state,
    /// role [`Role::None`], tabindex 0, not selectable and a silver
    /// background.
    pub fn new(parent: &Window) -> Self {
        let id = WidgetId::next();
        tracing::trace!(target: targets::WIDGET, widget = %id, window = %parent.id(), "created widget base");
        Self {
            id,
            window: parent.id(),
            surface: parent.surface().clone(),
            parent_group: parent.content(),
            pos: Point::ZERO,
            size: Size::ZERO,
            role: Role::None,
            tabindex: 0,
            selectable: false,
            backcolor: Color::SILVER,
            focused: false,
            state: WidgetState::IdleUp,
            previous_state: None,
            root: None,
            hit_regions: Vec::new(),
            events: Signal::new(),
            state_changed: Signal::new(),
        }
    }

    /// The widget's identifier.
    #[inline]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The window this widget was created for.
    #[inline]
    pub fn window(&self) -> WindowId {
        self.window
    }

    /// The surface shared with the parent window.
    #[inline]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The window group a widget's root group is created under.
    #[inline]
    pub fn parent_group(&self) -> PrimitiveId {
        self.parent_group
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Position of the widget in window coordinates.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// X coordinate.
    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    /// Y coordinate.
    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    /// Nominal size of the widget.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Set the nominal size. The widget applies it on its next update.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Nominal width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    /// Nominal height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Bounds of everything the widget drew, in window coordinates.
    pub fn bounds(&self) -> Option<Rect> {
        self.root.and_then(|root| self.surface.absolute_bounds(root))
    }

    /// Move the root group to `(x, y)`.
    ///
    /// Every primitive of the widget shifts by the same delta. Nothing else
    /// about the widget changes.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.pos = Point::new(x, y);
        self.update();
    }

    /// Apply the base visual state: position the root group.
    ///
    /// Concrete widgets call this at the end of their own update.
    pub fn update(&mut self) {
        if let Some(root) = self.root {
            self.surface.move_to(root, self.pos);
        }
    }

    // =========================================================================
    // Accessibility
    // =========================================================================

    /// Semantic role.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Set the semantic role.
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Externally assigned focus order.
    #[inline]
    pub fn tabindex(&self) -> i32 {
        self.tabindex
    }

    /// Set the focus order. Lower values are visited first.
    pub fn set_tabindex(&mut self, tabindex: i32) {
        self.tabindex = tabindex;
    }

    /// Whether the widget takes keyboard focus.
    #[inline]
    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Set whether the widget takes keyboard focus.
    pub fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }

    /// Whether the widget currently holds keyboard focus.
    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Current visual fill.
    #[inline]
    pub fn backcolor(&self) -> Color {
        self.backcolor
    }

    /// Set the visual fill. The widget applies it on its next update.
    pub fn set_backcolor(&mut self, color: Color) {
        self.backcolor = color;
    }

    // =========================================================================
    // Interaction state
    // =========================================================================

    /// Current interaction state.
    #[inline]
    pub fn state(&self) -> WidgetState {
        self.state
    }

    /// The state occupied immediately before the current one.
    ///
    /// `None` until the first transition.
    #[inline]
    pub fn previous_state(&self) -> Option<WidgetState> {
        self.previous_state
    }

    pub(crate) fn enter_state(&mut self, state: WidgetState) {
        self.previous_state = Some(self.state);
        self.state = state;
    }

    // =========================================================================
    // Primitives and hit regions
    // =========================================================================

    /// The widget's root group, once rendered.
    #[inline]
    pub fn root(&self) -> Option<PrimitiveId> {
        self.root
    }

    /// Record the group that [`move_to`](Self::move_to) relocates.
    pub fn set_root(&mut self, root: PrimitiveId) {
        self.root = Some(root);
    }

    /// Whether `render()` has created the widget's primitives.
    #[inline]
    pub fn is_rendered(&self) -> bool {
        self.root.is_some()
    }

    /// Register a primitive as a hit region feeding this widget's state machine.
    ///
    /// Regions must be registered during `render()`; the window reads them
    /// when the widget is added.
    pub fn register_event(&mut self, region: PrimitiveId) {
        self.surface.set_interactive(region, true);
        if !self.hit_regions.contains(&region) {
            self.hit_regions.push(region);
        }
    }

    /// Hit regions in registration order.
    #[inline]
    pub fn hit_regions(&self) -> &[PrimitiveId] {
        &self.hit_regions
    }

    /// Remove the widget's primitives from the surface.
    ///
    /// Returns the hit regions that were registered. Calling this again is a
    /// no-op that returns nothing.
    pub fn detach(&mut self) -> Vec<PrimitiveId> {
        if let Some(root) = self.root.take() {
            self.surface.remove(root);
            tracing::debug!(target: targets::WIDGET, widget = %self.id, "detached widget primitives");
        }
        self.focused = false;
        std::mem::take(&mut self.hit_regions)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// A snapshot of this widget for event payloads.
    pub fn event_args(&self) -> EventArgs {
        EventArgs::new(self.id, self.role, self.state)
    }

    /// Deliver `args` to every subscriber of [`events`](Self::events).
    pub fn raise(&self, args: EventArgs) {
        self.events.emit(args);
    }
}

impl fmt::Debug for WidgetBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetBase")
            .field("id", &self.id)
            .field("window", &self.window)
            .field("pos", &self.pos)
            .field("size", &self.size)
            .field("role", &self.role)
            .field("tabindex", &self.tabindex)
            .field("selectable", &self.selectable)
            .field("state", &self.state)
            .field("previous_state", &self.previous_state)
            .finish_non_exhaustive()
    }
}
