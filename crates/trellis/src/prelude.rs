//! Prelude module for Trellis.
//!
//! Re-exports the most commonly used types:
//!
//! ```
//! use trellis::prelude::*;
//! ```
//!
//! This provides access to:
//! - Signal/slot system (`Signal`, `ConnectionId`)
//! - Widget foundation (`Widget`, `WidgetBase`, `WidgetState`, `Transition`)
//! - The concrete widgets (`Button`, `CheckBox`, `RadioGroup`, ...)
//! - Windows (`Window`, `WindowConfig`)
//! - Geometry and color types (`Point`, `Size`, `Rect`, `Color`)

// ============================================================================
// Signal/Slot System
// ============================================================================

pub use trellis_core::{ConnectionId, Signal};

// ============================================================================
// Widget Foundation
// ============================================================================

pub use crate::widget::{
    AccessibleNode, EventArgs, InputSignal, Key, Role, SignalKind, Transition, Widget, WidgetBase,
    WidgetId, WidgetState,
};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::widget::widgets::{
    Button, CheckBox, Heading, ProgressBar, RadioGroup, ScrollBar, ScrollDirection,
};

// ============================================================================
// Windows
// ============================================================================

pub use crate::window::{Window, WindowConfig};

// ============================================================================
// Rendering
// ============================================================================

pub use trellis_render::{Color, Point, PrimitiveId, Rect, Size, Stroke, Surface};
