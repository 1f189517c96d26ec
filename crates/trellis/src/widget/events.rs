//! Event payloads raised by widgets.

use super::{Role, WidgetId, WidgetState};

/// Snapshot identifying the widget that raised an event.
///
/// Carried by [`WidgetBase::events`](super::WidgetBase::events) and by
/// domain signals such as [`Button::clicked`](super::widgets::Button::clicked).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventArgs {
    /// The emitting widget.
    pub source: WidgetId,
    /// Its role at emission time.
    pub role: Role,
    /// Its interaction state at emission time.
    pub state: WidgetState,
}

impl EventArgs {
    /// Create event args for a widget.
    pub fn new(source: WidgetId, role: Role, state: WidgetState) -> Self {
        Self {
            source,
            role,
            state,
        }
    }
}
