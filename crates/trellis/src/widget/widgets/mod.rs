//! Standard widgets for Trellis.
//!
//! This module provides the built-in controls:
//!
//! - [`Button`]: Clickable button with a text label
//! - [`CheckBox`]: Two-state box with a label
//! - [`RadioGroup`]: Vertical list of mutually exclusive options
//! - [`ScrollBar`]: Vertical scroll bar with arrow buttons and a thumb
//! - [`ProgressBar`]: Horizontal 0-100 progress indicator
//! - [`Heading`]: Static text heading

mod button;
mod checkbox;
mod heading;
mod progress_bar;
mod radio_group;
mod scroll_bar;

pub use button::Button;
pub use checkbox::CheckBox;
pub use heading::Heading;
pub use progress_bar::ProgressBar;
pub use radio_group::RadioGroup;
pub use scroll_bar::{ScrollBar, ScrollDirection};
