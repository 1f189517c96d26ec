//! Window management module.
//!
//! A [`Window`] is the root hosting surface: it owns the render
//! [`Surface`](trellis_render::Surface), every widget added to it, the hit
//! region map used for input routing, and the focus chain.
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut window = Window::from_config(WindowConfig::new("Controls").with_size(640, 480))?;
//!
//! let mut button = Button::new(&window)?;
//! button.move_to(20.0, 20.0);
//! let id = window.add(button)?;
//!
//! // Press and release over the button.
//! window.pointer_down(Point::new(30.0, 30.0));
//! window.pointer_up(Point::new(30.0, 30.0));
//! assert_eq!(window.get(id).map(|w| w.state()), Some(WidgetState::Hover));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod focus;
mod root_window;
mod tree_debug;
mod window_config;

pub use root_window::{Window, WindowId};
pub use tree_debug::{TreeStyle, WindowTreeDebug};
pub use window_config::WindowConfig;
