//! Heading widget.

use trellis_render::{Color, PrimitiveId, Size};

use crate::error::Result;
use crate::widget::{Role, Widget, WidgetBase};
use crate::window::Window;

const DEFAULT_FONT_SIZE: f32 = 16.0;

/// A static text heading.
///
/// Headings draw no hit region and never change interaction state.
pub struct Heading {
    base: WidgetBase,
    text: String,
    font_size: f32,
    label: Option<PrimitiveId>,
}

impl Heading {
    /// Create an empty heading.
    pub fn new(parent: &Window) -> Result<Self> {
        Self::with_text(parent, "")
    }

    /// Create a heading showing `text`.
    pub fn with_text(parent: &Window, text: impl Into<String>) -> Result<Self> {
        let mut base = WidgetBase::new(parent);
        base.set_role(Role::Heading);
        base.set_backcolor(Color::BLACK);

        let mut heading = Self {
            base,
            text: text.into(),
            font_size: DEFAULT_FONT_SIZE,
            label: None,
        };
        heading.render()?;
        heading.update();
        Ok(heading)
    }

    /// The heading text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the heading text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.update();
    }

    /// The font size.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Set the font size.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
        self.update();
    }
}

impl Widget for Heading {
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
        let label = surface.text(group, self.text.as_str())?;
        self.base.set_root(group);
        self.label = Some(label);
        Ok(())
    }

    fn update(&mut self) {
        if let Some(label) = self.label {
            let surface = self.base.surface();
            surface.set_text(label, self.text.as_str());
            surface.set_font_size(label, self.font_size);
            surface.set_fill(label, self.base.backcolor());
            let measured = surface.measure_text(&self.text, self.font_size);
            self.base.set_size(Size::new(measured.width, measured.height));
        }
        self.base.update();
    }

    fn accessible_label(&self) -> Option<String> {
        Some(self.text.clone())
    }
}

impl std::fmt::Debug for Heading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Heading")
            .field("base", &self.base)
            .field("text", &self.text)
            .field("font_size", &self.font_size)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(Heading: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_defaults() {
        let window = Window::new();
        let heading = Heading::with_text(&window, "Widget Demo").unwrap();
        assert_eq!(heading.text(), "Widget Demo");
        assert_eq!(heading.font_size(), 16.0);
        assert_eq!(heading.role(), Role::Heading);
        assert!(!heading.widget_base().is_selectable());
        assert!(heading.widget_base().hit_regions().is_empty());
        assert!(heading.widget_base().is_rendered());
    }

    #[test]
    fn test_size_follows_text() {
        let window = Window::new();
        let mut heading = Heading::new(&window).unwrap();
        assert_eq!(heading.widget_base().width(), 0.0);

        heading.set_text("Title");
        heading.set_font_size(20.0);
        let expected = window.surface().measure_text("Title", 20.0);
        assert_eq!(heading.widget_base().size(), expected);
        assert_eq!(
            window.surface().text_of(heading.label.unwrap()).as_deref(),
            Some("Title")
        );
    }

    #[test]
    fn test_heading_is_not_hit() {
        let mut window = Window::new();
        let mut heading = Heading::with_text(&window, "Title").unwrap();
        heading.move_to(10.0, 20.0);
        window.add(heading).unwrap();
        assert_eq!(window.widget_at(trellis_render::Point::new(12.0, 25.0)), None);
    }
}
