//! Retained primitive scene.
//!
//! A [`Scene`] is a tree of drawable primitives rooted at a single group.
//! Widgets build their visuals out of groups, rectangles, circles and text
//! nodes, then mutate fill, stroke, opacity, visibility and geometry as their
//! interaction state changes. The scene never rasterizes anything: it answers
//! geometry queries (bounding boxes, hit tests) and flattens itself into a
//! [`DrawCommand`] list that a backend can paint.
//!
//! # Coordinates
//!
//! Every primitive's `position` is relative to its parent group. Moving a group
//! translates its whole subtree. Rectangles, circles and text are positioned by
//! the top-left corner of their bounding box.
//!
//! # Missing primitives
//!
//! Creation operations return [`RenderResult`] because a bad parent is a
//! programming error the caller should see. Mutations on a primitive that no
//! longer exists are no-ops (logged at trace level), so widgets detached from
//! their window can still run their hooks safely.

use slotmap::{SlotMap, new_key_type};

use crate::error::{RenderError, RenderResult};
use crate::types::{Color, Point, Rect, Size, Stroke};

const TARGET: &str = "trellis_render";

new_key_type! {
    /// Identifier of a primitive within a [`Scene`].
    pub struct PrimitiveId;
}

/// The geometric kind of a primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A container whose position translates its children.
    Group,
    /// An axis-aligned rectangle.
    Rect { width: f32, height: f32 },
    /// A circle described by its diameter.
    Circle { diameter: f32 },
    /// A single line of text.
    Text { content: String, font_size: f32 },
}

impl Shape {
    /// Short lowercase name, used in debug output.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Group => "group",
            Shape::Rect { .. } => "rect",
            Shape::Circle { .. } => "circle",
            Shape::Text { .. } => "text",
        }
    }
}

/// A node in the scene tree.
#[derive(Debug, Clone)]
pub struct Primitive {
    shape: Shape,
    parent: Option<PrimitiveId>,
    children: Vec<PrimitiveId>,
    position: Point,
    fill: Option<Color>,
    stroke: Option<Stroke>,
    opacity: f32,
    visible: bool,
    interactive: bool,
}

impl Primitive {
    fn new(shape: Shape, parent: Option<PrimitiveId>) -> Self {
        Self {
            shape,
            parent,
            children: Vec::new(),
            position: Point::ZERO,
            fill: None,
            stroke: None,
            opacity: 1.0,
            visible: true,
            interactive: false,
        }
    }

    /// The primitive's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The parent group, `None` only for the scene root.
    pub fn parent(&self) -> Option<PrimitiveId> {
        self.parent
    }

    /// Children in paint order (later children paint on top).
    pub fn children(&self) -> &[PrimitiveId] {
        &self.children
    }

    /// Position relative to the parent group.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Fill color, if any.
    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    /// Outline, if any.
    pub fn stroke(&self) -> Option<Stroke> {
        self.stroke
    }

    /// Opacity multiplier in `0.0..=1.0`.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whether the primitive (and its subtree) is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether hit testing may return this primitive.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// The text content, for text primitives.
    pub fn text(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}

/// Measures text for layout and bounding boxes.
///
/// Real backends plug in font metrics; the default is an approximation good
/// enough for geometry and hit testing.
pub trait TextMeasure: Send + Sync {
    /// The extent of `text` rendered at `font_size`.
    fn measure(&self, text: &str, font_size: f32) -> Size;
}

/// Fixed-advance text metrics.
///
/// Each character advances by `0.6 × font_size`; a line is `1.2 × font_size`
/// tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateTextMeasure;

impl TextMeasure for ApproximateTextMeasure {
    fn measure(&self, text: &str, font_size: f32) -> Size {
        let chars = text.chars().count() as f32;
        Size::new(chars * font_size * 0.6, font_size * 1.2)
    }
}

/// One entry of a flattened scene, in absolute window coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// The primitive this command paints.
    pub id: PrimitiveId,
    /// Shape to paint.
    pub shape: Shape,
    /// Absolute bounds of the shape.
    pub bounds: Rect,
    /// Fill color, if any.
    pub fill: Option<Color>,
    /// Outline, if any.
    pub stroke: Option<Stroke>,
    /// Effective opacity (product of the primitive's and its ancestors').
    pub opacity: f32,
}

/// A tree of primitives rooted at a single group.
pub struct Scene {
    primitives: SlotMap<PrimitiveId, Primitive>,
    root: PrimitiveId,
    measure: Box<dyn TextMeasure>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("primitives", &self.primitives.len())
            .field("root", &self.root)
            .finish()
    }
}

impl Scene {
    /// Create an empty scene using [`ApproximateTextMeasure`].
    pub fn new() -> Self {
        Self::with_text_measure(ApproximateTextMeasure)
    }

    /// Create an empty scene with custom text metrics.
    pub fn with_text_measure(measure: impl TextMeasure + 'static) -> Self {
        let mut primitives = SlotMap::with_key();
        let root = primitives.insert(Primitive::new(Shape::Group, None));
        Self {
            primitives,
            root,
            measure: Box::new(measure),
        }
    }

    /// The root group.
    pub fn root(&self) -> PrimitiveId {
        self.root
    }

    /// Number of primitives, including the root.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Whether the scene holds only its root.
    pub fn is_empty(&self) -> bool {
        self.primitives.len() == 1
    }

    /// Check whether a primitive exists.
    pub fn contains(&self, id: PrimitiveId) -> bool {
        self.primitives.contains_key(id)
    }

    /// Look up a primitive.
    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives.get(id)
    }

    /// Measure text with the scene's metrics.
    pub fn measure_text(&self, text: &str, font_size: f32) -> Size {
        self.measure.measure(text, font_size)
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Create an empty group under `parent`.
    pub fn group(&mut self, parent: PrimitiveId) -> RenderResult<PrimitiveId> {
        self.insert(parent, Shape::Group)
    }

    /// Create a rectangle under `parent`.
    pub fn rect(&mut self, parent: PrimitiveId, width: f32, height: f32) -> RenderResult<PrimitiveId> {
        self.insert(parent, Shape::Rect { width, height })
    }

    /// Create a circle under `parent`.
    pub fn circle(&mut self, parent: PrimitiveId, diameter: f32) -> RenderResult<PrimitiveId> {
        self.insert(parent, Shape::Circle { diameter })
    }

    /// Create a text node under `parent` with a 16px font.
    pub fn text(&mut self, parent: PrimitiveId, content: impl Into<String>) -> RenderResult<PrimitiveId> {
        self.insert(
            parent,
            Shape::Text {
                content: content.into(),
                font_size: 16.0,
            },
        )
    }

    fn insert(&mut self, parent: PrimitiveId, shape: Shape) -> RenderResult<PrimitiveId> {
        match self.primitives.get(parent) {
            None => return Err(RenderError::UnknownPrimitive(parent)),
            Some(p) if p.shape != Shape::Group => return Err(RenderError::NotAGroup(parent)),
            Some(_) => {}
        }

        let kind = shape.name();
        let id = self.primitives.insert(Primitive::new(shape, Some(parent)));
        if let Some(p) = self.primitives.get_mut(parent) {
            p.children.push(id);
        }
        tracing::trace!(target: TARGET, ?id, ?parent, kind, "created primitive");
        Ok(id)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    fn with_primitive(&mut self, id: PrimitiveId, op: &'static str, f: impl FnOnce(&mut Primitive)) {
        match self.primitives.get_mut(id) {
            Some(p) => f(p),
            None => tracing::trace!(target: TARGET, ?id, op, "ignoring operation on missing primitive"),
        }
    }

    /// Set the fill color (`None` clears it).
    pub fn set_fill(&mut self, id: PrimitiveId, fill: impl Into<Option<Color>>) {
        let fill = fill.into();
        self.with_primitive(id, "set_fill", |p| p.fill = fill);
    }

    /// Set the outline (`None` clears it).
    pub fn set_stroke(&mut self, id: PrimitiveId, stroke: impl Into<Option<Stroke>>) {
        let stroke = stroke.into();
        self.with_primitive(id, "set_stroke", |p| p.stroke = stroke);
    }

    /// Set the opacity, clamped to `0.0..=1.0`.
    pub fn set_opacity(&mut self, id: PrimitiveId, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        self.with_primitive(id, "set_opacity", |p| p.opacity = opacity);
    }

    /// Move the primitive to `position` relative to its parent.
    pub fn move_to(&mut self, id: PrimitiveId, position: Point) {
        self.with_primitive(id, "move_to", |p| p.position = position);
    }

    /// Resize a rectangle, or set a circle's diameter from `size.width`.
    ///
    /// Groups and text size themselves from their content; resizing them is
    /// ignored.
    pub fn set_size(&mut self, id: PrimitiveId, size: Size) {
        self.with_primitive(id, "set_size", |p| match &mut p.shape {
            Shape::Rect { width, height } => {
                *width = size.width;
                *height = size.height;
            }
            Shape::Circle { diameter } => *diameter = size.width,
            Shape::Group | Shape::Text { .. } => {
                tracing::trace!(target: TARGET, "primitive is not resizable");
            }
        });
    }

    /// Replace a text node's content.
    pub fn set_text(&mut self, id: PrimitiveId, text: impl Into<String>) {
        let text = text.into();
        self.with_primitive(id, "set_text", |p| {
            if let Shape::Text { content, .. } = &mut p.shape {
                *content = text;
            }
        });
    }

    /// Set a text node's font size.
    pub fn set_font_size(&mut self, id: PrimitiveId, size: f32) {
        self.with_primitive(id, "set_font_size", |p| {
            if let Shape::Text { font_size, .. } = &mut p.shape {
                *font_size = size;
            }
        });
    }

    /// Show the primitive and its subtree.
    pub fn show(&mut self, id: PrimitiveId) {
        self.with_primitive(id, "show", |p| p.visible = true);
    }

    /// Hide the primitive and its subtree.
    pub fn hide(&mut self, id: PrimitiveId) {
        self.with_primitive(id, "hide", |p| p.visible = false);
    }

    /// Mark the primitive as a hit-test target.
    pub fn set_interactive(&mut self, id: PrimitiveId, interactive: bool) {
        self.with_primitive(id, "set_interactive", |p| p.interactive = interactive);
    }

    /// Remove a primitive and its whole subtree.
    ///
    /// Returns the removed ids (the primitive first). Removing the root or a
    /// missing primitive removes nothing.
    pub fn remove(&mut self, id: PrimitiveId) -> Vec<PrimitiveId> {
        if id == self.root {
            tracing::trace!(target: TARGET, "refusing to remove scene root");
            return Vec::new();
        }
        let Some(parent) = self.primitives.get(id).and_then(Primitive::parent) else {
            return Vec::new();
        };
        if let Some(p) = self.primitives.get_mut(parent) {
            p.children.retain(|child| *child != id);
        }

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(p) = self.primitives.remove(next) {
                stack.extend(p.children.iter().rev().copied());
                removed.push(next);
            }
        }
        tracing::trace!(target: TARGET, ?id, count = removed.len(), "removed primitive subtree");
        removed
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Bounds in the primitive's own coordinate space (origin at its position).
    fn local_extent(&self, id: PrimitiveId) -> Option<Rect> {
        let p = self.primitives.get(id)?;
        let extent = match &p.shape {
            Shape::Rect { width, height } => Rect::new(0.0, 0.0, *width, *height),
            Shape::Circle { diameter } => Rect::new(0.0, 0.0, *diameter, *diameter),
            Shape::Text { content, font_size } => {
                let size = self.measure.measure(content, *font_size);
                Rect::new(0.0, 0.0, size.width, size.height)
            }
            Shape::Group => p
                .children
                .iter()
                .filter_map(|child| self.bbox(*child))
                .reduce(|acc, r| acc.union(&r))
                .unwrap_or(Rect::ZERO),
        };
        Some(extent)
    }

    /// Bounding box in the parent's coordinate space.
    ///
    /// For a group this is the union of its children's boxes, translated by
    /// the group's position.
    pub fn bbox(&self, id: PrimitiveId) -> Option<Rect> {
        let position = self.primitives.get(id)?.position;
        self.local_extent(id)
            .map(|extent| extent.offset(position.x, position.y))
    }

    /// Position in window coordinates.
    pub fn absolute_position(&self, id: PrimitiveId) -> Option<Point> {
        let mut p = self.primitives.get(id)?;
        let mut position = p.position;
        while let Some(parent) = p.parent {
            p = self.primitives.get(parent)?;
            position = position.offset(p.position);
        }
        Some(position)
    }

    /// Bounding box in window coordinates.
    pub fn absolute_bounds(&self, id: PrimitiveId) -> Option<Rect> {
        let origin = self.absolute_position(id)?;
        self.local_extent(id)
            .map(|extent| extent.offset(origin.x, origin.y))
    }

    /// Topmost visible, interactive primitive under `point`.
    ///
    /// Primitives are tested in reverse paint order. Hidden subtrees are
    /// skipped; transparent primitives still hit, so fully transparent
    /// rectangles make good hit regions.
    pub fn hit_test(&self, point: Point) -> Option<PrimitiveId> {
        self.hit_test_node(self.root, Point::ZERO, point)
    }

    fn hit_test_node(&self, id: PrimitiveId, parent_origin: Point, point: Point) -> Option<PrimitiveId> {
        let p = self.primitives.get(id)?;
        if !p.visible {
            return None;
        }
        let origin = parent_origin.offset(p.position);

        if let Some(hit) = p
            .children
            .iter()
            .rev()
            .find_map(|child| self.hit_test_node(*child, origin, point))
        {
            return Some(hit);
        }

        if !p.interactive {
            return None;
        }
        let hit = match &p.shape {
            Shape::Group => false,
            Shape::Circle { diameter } => {
                let radius = diameter / 2.0;
                let center = origin.offset(Point::new(radius, radius));
                center.to_vec2().distance(point.to_vec2()) <= radius
            }
            Shape::Rect { .. } | Shape::Text { .. } => self
                .local_extent(id)
                .is_some_and(|extent| extent.offset(origin.x, origin.y).contains(point)),
        };
        hit.then_some(id)
    }

    /// Flatten the visible scene into paint-ordered draw commands.
    ///
    /// Groups produce no command of their own. Primitives with an effective
    /// opacity of zero are skipped.
    pub fn display_list(&self) -> Vec<DrawCommand> {
        let mut commands = Vec::new();
        self.collect_commands(self.root, Point::ZERO, 1.0, &mut commands);
        commands
    }

    fn collect_commands(&self, id: PrimitiveId, parent_origin: Point, parent_opacity: f32, out: &mut Vec<DrawCommand>) {
        let Some(p) = self.primitives.get(id) else {
            return;
        };
        if !p.visible {
            return;
        }
        let origin = parent_origin.offset(p.position);
        let opacity = parent_opacity * p.opacity;

        if p.shape != Shape::Group && opacity > 0.0 {
            if let Some(extent) = self.local_extent(id) {
                out.push(DrawCommand {
                    id,
                    shape: p.shape.clone(),
                    bounds: extent.offset(origin.x, origin.y),
                    fill: p.fill,
                    stroke: p.stroke,
                    opacity,
                });
            }
        }

        for child in &p.children {
            self.collect_commands(*child, origin, opacity, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scene_has_only_root() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(scene.root()).map(|p| p.shape().clone()), Some(Shape::Group));
    }

    #[test]
    fn test_create_under_non_group_fails() {
        let mut scene = Scene::new();
        let rect = scene.rect(scene.root(), 10.0, 10.0).unwrap();
        assert_eq!(scene.circle(rect, 4.0), Err(RenderError::NotAGroup(rect)));
    }

    #[test]
    fn test_create_under_removed_parent_fails() {
        let mut scene = Scene::new();
        let group = scene.group(scene.root()).unwrap();
        scene.remove(group);
        assert_eq!(scene.rect(group, 1.0, 1.0), Err(RenderError::UnknownPrimitive(group)));
    }

    #[test]
    fn test_group_bbox_is_union_of_children() {
        let mut scene = Scene::new();
        let group = scene.group(scene.root()).unwrap();
        let a = scene.rect(group, 10.0, 10.0).unwrap();
        let b = scene.circle(group, 8.0).unwrap();
        scene.move_to(a, Point::new(5.0, 5.0));
        scene.move_to(b, Point::new(20.0, 0.0));
        scene.move_to(group, Point::new(100.0, 100.0));

        assert_eq!(scene.bbox(group), Some(Rect::new(105.0, 100.0, 23.0, 15.0)));
        assert_eq!(scene.absolute_bounds(a), Some(Rect::new(105.0, 105.0, 10.0, 10.0)));
    }

    struct FixedMeasure;

    impl TextMeasure for FixedMeasure {
        fn measure(&self, text: &str, font_size: f32) -> Size {
            Size::new(text.len() as f32 * 5.0, font_size)
        }
    }

    #[test]
    fn test_text_bbox_uses_measure() {
        let mut scene = Scene::with_text_measure(FixedMeasure);
        let text = scene.text(scene.root(), "abcd").unwrap();
        scene.set_font_size(text, 10.0);
        assert_eq!(scene.bbox(text), Some(Rect::new(0.0, 0.0, 20.0, 10.0)));

        scene.set_text(text, "abcdef");
        assert_eq!(scene.bbox(text), Some(Rect::new(0.0, 0.0, 30.0, 10.0)));
    }

    #[test]
    fn test_mutating_missing_primitive_is_noop() {
        let mut scene = Scene::new();
        let rect = scene.rect(scene.root(), 10.0, 10.0).unwrap();
        scene.remove(rect);
        scene.set_fill(rect, Color::RED);
        scene.move_to(rect, Point::new(1.0, 1.0));
        assert!(scene.get(rect).is_none());
    }

    #[test]
    fn test_remove_subtree() {
        let mut scene = Scene::new();
        let group = scene.group(scene.root()).unwrap();
        let inner = scene.group(group).unwrap();
        let leaf = scene.rect(inner, 1.0, 1.0).unwrap();

        let removed = scene.remove(group);
        assert_eq!(removed.len(), 3);
        assert!(!scene.contains(leaf));
        assert!(scene.is_empty());
        assert!(scene.remove(group).is_empty());
        assert!(scene.remove(scene.root()).is_empty());
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut scene = Scene::new();
        let below = scene.rect(scene.root(), 50.0, 50.0).unwrap();
        let above = scene.rect(scene.root(), 20.0, 20.0).unwrap();
        scene.set_interactive(below, true);
        scene.set_interactive(above, true);

        assert_eq!(scene.hit_test(Point::new(10.0, 10.0)), Some(above));
        assert_eq!(scene.hit_test(Point::new(30.0, 30.0)), Some(below));
        assert_eq!(scene.hit_test(Point::new(60.0, 60.0)), None);
    }

    #[test]
    fn test_hit_test_skips_hidden_and_non_interactive() {
        let mut scene = Scene::new();
        let hidden = scene.rect(scene.root(), 50.0, 50.0).unwrap();
        let passive = scene.rect(scene.root(), 50.0, 50.0).unwrap();
        scene.set_interactive(hidden, true);
        scene.hide(hidden);

        assert_eq!(scene.hit_test(Point::new(10.0, 10.0)), None);
        scene.set_interactive(passive, true);
        scene.set_opacity(passive, 0.0);
        assert_eq!(scene.hit_test(Point::new(10.0, 10.0)), Some(passive));
    }

    #[test]
    fn test_hit_test_circle_uses_radius() {
        let mut scene = Scene::new();
        let circle = scene.circle(scene.root(), 20.0).unwrap();
        scene.set_interactive(circle, true);

        assert_eq!(scene.hit_test(Point::new(10.0, 10.0)), Some(circle));
        assert_eq!(scene.hit_test(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_display_list_order_and_opacity() {
        let mut scene = Scene::new();
        let group = scene.group(scene.root()).unwrap();
        let back = scene.rect(group, 10.0, 10.0).unwrap();
        let front = scene.text(group, "hi").unwrap();
        let invisible = scene.rect(group, 10.0, 10.0).unwrap();
        scene.set_opacity(group, 0.5);
        scene.set_opacity(invisible, 0.0);
        scene.move_to(group, Point::new(3.0, 4.0));

        let list = scene.display_list();
        let ids: Vec<_> = list.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![back, front]);
        assert_eq!(list[0].bounds, Rect::new(3.0, 4.0, 10.0, 10.0));
        assert_eq!(list[0].opacity, 0.5);
    }
}
