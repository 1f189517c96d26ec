//! Core systems for Trellis.
//!
//! This crate provides the pieces of the Trellis widget toolkit that do not
//! depend on widgets or rendering:
//!
//! - **Signal/Slot System**: Synchronous, ordered subscriber registries
//! - **Logging**: `tracing` targets and span names shared by every crate
//! - **Thread Affinity**: Checks that widget mutation stays on the dispatch thread
//!
//! # Signal/Slot Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;
pub mod thread_check;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use thread_check::ThreadAffinity;
