//! Trellis - a small retained-mode widget toolkit.
//!
//! This is the main umbrella crate. It re-exports the core signal system and
//! the rendering layer, and provides the widget framework itself.
//!
//! Every widget shares one interaction state machine: raw pointer and
//! keyboard signals become named [`WidgetState`](widget::WidgetState)s, and
//! entering a state runs the matching hook on the widget.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! use trellis::prelude::*;
//!
//! let mut window = Window::new();
//!
//! let clicks = Arc::new(AtomicU32::new(0));
//! let button = Button::new(&window)?;
//! let counter = clicks.clone();
//! button.clicked.connect(move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//! window.add(button)?;
//!
//! window.pointer_down(Point::new(10.0, 10.0));
//! window.pointer_up(Point::new(10.0, 10.0));
//! assert_eq!(clicks.load(Ordering::SeqCst), 1);
//! # Ok::<(), trellis::WidgetError>(())
//! ```

pub mod error;
pub mod prelude;
pub mod widget;
pub mod window;

pub use error::{ConfigError, ConfigResult, Result, WidgetError};
pub use trellis_core::*;

/// Rendering layer.
pub mod render {
    pub use trellis_render::*;
}
