//! Debug visualization of a window's widgets and primitives.

use std::fmt::{self, Write};

use trellis_render::{PrimitiveId, Scene, Shape};

use super::Window;

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

impl TreeStyle {
    /// `(continuing branch, tee, corner)` connectors.
    fn connectors(self) -> (&'static str, &'static str, &'static str) {
        match self {
            TreeStyle::Ascii => ("|   ", "+-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}   ", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
        }
    }
}

/// Formats a window as a tree: one node per widget, with the widget's
/// primitives nested beneath it.
///
/// ```
/// use trellis::prelude::*;
/// use trellis::window::{TreeStyle, WindowTreeDebug};
///
/// let mut window = Window::new();
/// window.add(Button::new(&window)?)?;
///
/// let dump = WindowTreeDebug::new(&window).with_style(TreeStyle::Ascii).to_string();
/// assert!(dump.contains("Button"));
/// # Ok::<(), trellis::WidgetError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WindowTreeDebug<'a> {
    window: &'a Window,
    style: TreeStyle,
    show_primitives: bool,
}

impl<'a> WindowTreeDebug<'a> {
    /// Create a visualizer with default options.
    pub fn new(window: &'a Window) -> Self {
        Self {
            window,
            style: TreeStyle::default(),
            show_primitives: true,
        }
    }

    /// Set the branch style.
    pub fn with_style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    /// Set whether primitives are listed under each widget.
    pub fn with_primitives(mut self, show: bool) -> Self {
        self.show_primitives = show;
        self
    }

    fn format(&self) -> String {
        let window = self.window;
        let size = window.size();
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Window {:?} [{}] {}x{} ({} widgets)",
            window.title(),
            window.id(),
            size.width,
            size.height,
            window.len()
        );

        // Collect widget lines first; the scene lock is taken once below.
        let widgets: Vec<(String, Option<PrimitiveId>)> = window
            .widget_ids()
            .iter()
            .filter_map(|id| window.get(*id))
            .map(|widget| {
                let base = widget.widget_base();
                let mut line = format!(
                    "{} {} [{}] {} tabindex={} @ ({}, {})",
                    widget.type_name(),
                    base.id(),
                    base.role(),
                    base.state(),
                    base.tabindex(),
                    base.x(),
                    base.y()
                );
                if base.has_focus() {
                    line.push_str(" focused");
                }
                (line, base.root())
            })
            .collect();

        window.surface().with(|scene| {
            let count = widgets.len();
            for (i, (line, root)) in widgets.iter().enumerate() {
                let last = i + 1 == count;
                self.push_line(&mut out, "", last, line);
                if let (true, Some(root)) = (self.show_primitives, root) {
                    let prefix = self.child_prefix("", last);
                    let Some(primitive) = scene.get(*root) else {
                        continue;
                    };
                    let children = primitive.children();
                    for (j, child) in children.iter().enumerate() {
                        self.format_primitive(scene, *child, &prefix, j + 1 == children.len(), &mut out);
                    }
                }
            }
        });
        out
    }

    fn format_primitive(&self, scene: &Scene, id: PrimitiveId, prefix: &str, last: bool, out: &mut String) {
        let Some(p) = scene.get(id) else {
            return;
        };
        let mut line = match p.shape() {
            Shape::Group => "group".to_string(),
            Shape::Rect { width, height } => format!("rect {width}x{height}"),
            Shape::Circle { diameter } => format!("circle d={diameter}"),
            Shape::Text { content, font_size } => format!("text {content:?} {font_size}px"),
        };
        let pos = p.position();
        if pos.x != 0.0 || pos.y != 0.0 {
            let _ = write!(line, " @ ({}, {})", pos.x, pos.y);
        }
        if let Some(fill) = p.fill() {
            let _ = write!(line, " fill={}", fill.to_hex());
        }
        if p.opacity() < 1.0 {
            let _ = write!(line, " opacity={}", p.opacity());
        }
        if p.is_interactive() {
            line.push_str(" [hit]");
        }
        if !p.is_visible() {
            line.push_str(" (hidden)");
        }
        self.push_line(out, prefix, last, &line);

        let child_prefix = self.child_prefix(prefix, last);
        let children = p.children();
        for (i, child) in children.iter().enumerate() {
            self.format_primitive(scene, *child, &child_prefix, i + 1 == children.len(), out);
        }
    }

    fn push_line(&self, out: &mut String, prefix: &str, last: bool, line: &str) {
        let (_, tee, corner) = self.style.connectors();
        out.push_str(prefix);
        out.push_str(if last { corner } else { tee });
        out.push_str(line);
        out.push('\n');
    }

    fn child_prefix(&self, prefix: &str, last: bool) -> String {
        let (branch, _, _) = self.style.connectors();
        let mut next = prefix.to_string();
        next.push_str(if last { "    " } else { branch });
        next
    }
}

impl fmt::Display for WindowTreeDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}
