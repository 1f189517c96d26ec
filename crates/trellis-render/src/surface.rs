//! Shareable handle to a retained scene.
//!
//! A window owns the canonical [`Surface`]; every widget keeps a clone so its
//! hooks can restyle primitives directly. Clones share one [`Scene`] behind a
//! `parking_lot::Mutex`. Each method holds the lock only for its own duration;
//! never call back into the same surface from inside [`Surface::with`] or
//! [`Surface::with_mut`].

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::RenderResult;
use crate::scene::{DrawCommand, PrimitiveId, Scene, TextMeasure};
use crate::types::{Color, Point, Rect, Size, Stroke};

/// Cloneable handle to a shared [`Scene`].
#[derive(Clone, Default)]
pub struct Surface {
    scene: Arc<Mutex<Scene>>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("scene", &*self.scene.lock())
            .finish()
    }
}

impl Surface {
    /// Create a surface over an empty scene.
    pub fn new() -> Self {
        Self::from_scene(Scene::new())
    }

    /// Create a surface with custom text metrics.
    pub fn with_text_measure(measure: impl TextMeasure + 'static) -> Self {
        Self::from_scene(Scene::with_text_measure(measure))
    }

    /// Wrap an existing scene.
    pub fn from_scene(scene: Scene) -> Self {
        Self {
            scene: Arc::new(Mutex::new(scene)),
        }
    }

    /// Whether two handles refer to the same scene.
    pub fn same_surface(&self, other: &Surface) -> bool {
        Arc::ptr_eq(&self.scene, &other.scene)
    }

    /// Run a read-only query against the scene.
    pub fn with<R>(&self, f: impl FnOnce(&Scene) -> R) -> R {
        f(&self.scene.lock())
    }

    /// Run several mutations under one lock.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Scene) -> R) -> R {
        f(&mut self.scene.lock())
    }

    /// The scene's root group.
    pub fn root(&self) -> PrimitiveId {
        self.scene.lock().root()
    }

    /// Check whether a primitive still exists.
    pub fn contains(&self, id: PrimitiveId) -> bool {
        self.scene.lock().contains(id)
    }

    /// Measure text with the scene's metrics.
    pub fn measure_text(&self, text: &str, font_size: f32) -> Size {
        self.scene.lock().measure_text(text, font_size)
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Create an empty group under `parent`.
    pub fn group(&self, parent: PrimitiveId) -> RenderResult<PrimitiveId> {
        self.scene.lock().group(parent)
    }

    /// Create a rectangle under `parent`.
    pub fn rect(&self, parent: PrimitiveId, width: f32, height: f32) -> RenderResult<PrimitiveId> {
        self.scene.lock().rect(parent, width, height)
    }

    /// Create a circle under `parent`.
    pub fn circle(&self, parent: PrimitiveId, diameter: f32) -> RenderResult<PrimitiveId> {
        self.scene.lock().circle(parent, diameter)
    }

    /// Create a text node under `parent`.
    pub fn text(&self, parent: PrimitiveId, content: impl Into<String>) -> RenderResult<PrimitiveId> {
        self.scene.lock().text(parent, content)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Set or clear the fill color.
    pub fn set_fill(&self, id: PrimitiveId, fill: impl Into<Option<Color>>) {
        self.scene.lock().set_fill(id, fill);
    }

    /// Set or clear the outline.
    pub fn set_stroke(&self, id: PrimitiveId, stroke: impl Into<Option<Stroke>>) {
        self.scene.lock().set_stroke(id, stroke);
    }

    /// Set the opacity.
    pub fn set_opacity(&self, id: PrimitiveId, opacity: f32) {
        self.scene.lock().set_opacity(id, opacity);
    }

    /// Move a primitive relative to its parent.
    pub fn move_to(&self, id: PrimitiveId, position: Point) {
        self.scene.lock().move_to(id, position);
    }

    /// Resize a rectangle or circle.
    pub fn set_size(&self, id: PrimitiveId, size: Size) {
        self.scene.lock().set_size(id, size);
    }

    /// Replace a text node's content.
    pub fn set_text(&self, id: PrimitiveId, text: impl Into<String>) {
        self.scene.lock().set_text(id, text);
    }

    /// Set a text node's font size.
    pub fn set_font_size(&self, id: PrimitiveId, size: f32) {
        self.scene.lock().set_font_size(id, size);
    }

    /// Show a primitive.
    pub fn show(&self, id: PrimitiveId) {
        self.scene.lock().show(id);
    }

    /// Hide a primitive.
    pub fn hide(&self, id: PrimitiveId) {
        self.scene.lock().hide(id);
    }

    /// Show or hide a primitive.
    pub fn set_visible(&self, id: PrimitiveId, visible: bool) {
        let mut scene = self.scene.lock();
        if visible {
            scene.show(id);
        } else {
            scene.hide(id);
        }
    }

    /// Mark a primitive as a hit-test target.
    pub fn set_interactive(&self, id: PrimitiveId, interactive: bool) {
        self.scene.lock().set_interactive(id, interactive);
    }

    /// Remove a primitive and its subtree, returning the removed ids.
    pub fn remove(&self, id: PrimitiveId) -> Vec<PrimitiveId> {
        self.scene.lock().remove(id)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Bounding box in the parent's coordinate space.
    pub fn bbox(&self, id: PrimitiveId) -> Option<Rect> {
        self.scene.lock().bbox(id)
    }

    /// Bounding box in window coordinates.
    pub fn absolute_bounds(&self, id: PrimitiveId) -> Option<Rect> {
        self.scene.lock().absolute_bounds(id)
    }

    /// Position relative to the parent group.
    pub fn position(&self, id: PrimitiveId) -> Option<Point> {
        self.scene.lock().get(id).map(|p| p.position())
    }

    /// Fill color of a primitive.
    pub fn fill(&self, id: PrimitiveId) -> Option<Color> {
        self.scene.lock().get(id).and_then(|p| p.fill())
    }

    /// Whether a primitive is currently shown.
    pub fn is_visible(&self, id: PrimitiveId) -> bool {
        self.scene.lock().get(id).is_some_and(|p| p.is_visible())
    }

    /// Text content of a text primitive.
    pub fn text_of(&self, id: PrimitiveId) -> Option<String> {
        self.scene.lock().get(id).and_then(|p| p.text().map(str::to_owned))
    }

    /// Topmost interactive primitive under `point`.
    pub fn hit_test(&self, point: Point) -> Option<PrimitiveId> {
        self.scene.lock().hit_test(point)
    }

    /// Paint-ordered draw commands for the visible scene.
    pub fn display_list(&self) -> Vec<DrawCommand> {
        self.scene.lock().display_list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_scene() {
        let surface = Surface::new();
        let other = surface.clone();
        let rect = surface.rect(surface.root(), 10.0, 10.0).unwrap();

        other.set_fill(rect, Color::RED);
        assert_eq!(surface.fill(rect), Some(Color::RED));
        assert!(surface.same_surface(&other));
        assert!(!surface.same_surface(&Surface::new()));
    }

    #[test]
    fn test_with_mut_batches_mutations() {
        let surface = Surface::new();
        let root = surface.root();
        let group = surface
            .with_mut(|scene| {
                let group = scene.group(root)?;
                let rect = scene.rect(group, 4.0, 4.0)?;
                scene.move_to(rect, Point::new(2.0, 2.0));
                Ok::<_, crate::RenderError>(group)
            })
            .unwrap();

        assert_eq!(surface.bbox(group), Some(Rect::new(2.0, 2.0, 4.0, 4.0)));
        assert_eq!(surface.with(|scene| scene.len()), 3);
    }

    #[test]
    fn test_set_visible() {
        let surface = Surface::new();
        let rect = surface.rect(surface.root(), 1.0, 1.0).unwrap();
        surface.set_visible(rect, false);
        assert!(!surface.is_visible(rect));
        surface.set_visible(rect, true);
        assert!(surface.is_visible(rect));
    }
}
