//! Widget system for Trellis.
//!
//! This module provides the widget framework every control is built on:
//!
//! - [`Widget`] trait: render/update/move plus the interaction state hooks
//! - [`WidgetBase`]: shared identity, geometry, accessibility and state
//! - [`WidgetState`] and [`dispatch`]: the interaction state machine
//! - [`EventArgs`] and [`Role`]: event payloads and accessibility roles
//!
//! # Overview
//!
//! A widget is constructed with its parent [`Window`](crate::window::Window)
//! and renders itself immediately: it creates a root group on the window's
//! surface, draws its primitives inside it and registers one or more hit
//! regions. From then on, pointer and keyboard signals arriving on those hit
//! regions are fed through the state machine, which calls the widget's state
//! hooks. Hooks restyle the widget and call [`Widget::update`].
//!
//! # Signals
//!
//! Widgets expose domain notifications as public
//! [`Signal`](trellis_core::Signal) fields (`clicked`, `toggled`, ...).
//! Subscribers run synchronously, after the widget's visuals are up to date.

mod accessibility;
mod base;
mod dispatcher;
mod events;
mod state;
mod traits;

pub mod widgets;

pub use accessibility::{AccessibleNode, Role};
pub use base::{WidgetBase, WidgetId};
pub use dispatcher::dispatch;
pub use events::EventArgs;
pub use state::{InputSignal, Key, SignalKind, Transition, WidgetState};
pub use traits::Widget;

pub(crate) use traits::{downcast_mut, downcast_ref};
