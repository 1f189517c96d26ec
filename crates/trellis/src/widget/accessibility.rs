//! Accessibility roles and the window's accessibility snapshot.
//!
//! Every widget carries a [`Role`] describing its semantic purpose. A
//! [`Window`](crate::window::Window) can flatten its widgets into
//! [`AccessibleNode`]s for assistive technology bridges or tests.

use std::fmt;

use trellis_render::Rect;

use super::WidgetId;

/// The semantic role of a widget.
///
/// Names follow ARIA role names (see [`Role::as_str`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// No semantic role.
    #[default]
    None,
    /// A clickable button.
    Button,
    /// A group of related controls.
    Group,
    /// A section heading.
    Heading,
    /// A progress indicator.
    ProgressBar,
    /// A scroll bar.
    ScrollBar,
}

impl Role {
    /// ARIA role name.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::None => "none",
            Role::Button => "button",
            Role::Group => "group",
            Role::Heading => "heading",
            Role::ProgressBar => "progressbar",
            Role::ScrollBar => "scrollbar",
        }
    }

    /// Whether this role describes something a user can operate.
    pub fn is_interactive(self) -> bool {
        !matches!(self, Role::None | Role::Heading)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flattened accessibility description of one widget.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessibleNode {
    /// The widget described.
    pub id: WidgetId,
    /// Semantic role.
    pub role: Role,
    /// Externally assigned focus order.
    pub tabindex: i32,
    /// Whether the widget takes part in focus traversal.
    pub selectable: bool,
    /// Whether the widget currently holds keyboard focus.
    pub focused: bool,
    /// Bounds in window coordinates, once rendered.
    pub bounds: Option<Rect>,
    /// Human-readable label, if the widget has one.
    pub label: Option<String>,
}
