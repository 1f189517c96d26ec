//! Keyboard focus tracking for a window.
//!
//! Tab order is explicit: widgets are ordered by their `tabindex`, and widgets
//! sharing a tabindex keep the order they were added to the window. Only
//! selectable widgets take part.

use crate::widget::WidgetId;

/// Tracks which widget holds keyboard focus.
#[derive(Debug, Default)]
pub(crate) struct FocusChain {
    focused: Option<WidgetId>,
}

/// Direction of a focus traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

impl FocusChain {
    #[inline]
    pub(crate) fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Record a new focus owner, returning the previous one.
    pub(crate) fn replace(&mut self, focused: Option<WidgetId>) -> Option<WidgetId> {
        std::mem::replace(&mut self.focused, focused)
    }

    /// The widget focus moves to from the current one, wrapping at the ends.
    ///
    /// With nothing focused (or the focused widget missing from `order`),
    /// forward traversal starts at the first widget and backward traversal at
    /// the last.
    pub(crate) fn step(&self, order: &[WidgetId], direction: Direction) -> Option<WidgetId> {
        if order.is_empty() {
            return None;
        }
        let last = order.len() - 1;
        let current = self
            .focused
            .and_then(|focused| order.iter().position(|id| *id == focused));

        let index = match (current, direction) {
            (None, Direction::Forward) => 0,
            (None, Direction::Backward) => last,
            (Some(i), Direction::Forward) => {
                if i == last {
                    0
                } else {
                    i + 1
                }
            }
            (Some(i), Direction::Backward) => {
                if i == 0 {
                    last
                } else {
                    i - 1
                }
            }
        };
        Some(order[index])
    }
}

/// Sort `(id, tabindex)` pairs, given in insertion order, into tab order.
pub(crate) fn tab_order(entries: impl IntoIterator<Item = (WidgetId, i32)>) -> Vec<WidgetId> {
    let mut entries: Vec<_> = entries.into_iter().collect();
    // Stable: equal tabindex keeps insertion order.
    entries.sort_by_key(|(_, tabindex)| *tabindex);
    entries.into_iter().map(|(id, _)| id).collect()
}
