//! Logging facilities for Trellis.
//!
//! Trellis uses the `tracing` crate for instrumentation. To see logs, install a
//! subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("trellis=debug,trellis::state=trace")
//!         .init();
//!
//!     // Build the window and widgets...
//! }
//! ```
//!
//! Every log line emitted by the toolkit uses one of the [`targets`] below, so
//! subsystems can be filtered independently.

/// Span names used throughout Trellis for tracing.
pub mod span_names {
    /// Signal dispatch through a window.
    pub const DISPATCH: &str = "trellis::dispatch";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "trellis_core::signal";
    /// Interaction state machine target.
    pub const STATE: &str = "trellis::state";
    /// Window bookkeeping, routing and focus target.
    pub const WINDOW: &str = "trellis::window";
    /// Widget lifecycle target.
    pub const WIDGET: &str = "trellis::widget";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing a dispatch or a render pass under a subscriber that
/// records span durations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "trellis::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_under_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let _span = PerfSpan::new(span_names::DISPATCH);
            tracing::debug!(target: targets::STATE, "inside perf span");
        });
    }

    #[test]
    fn test_targets_are_namespaced() {
        for target in [targets::STATE, targets::WINDOW, targets::WIDGET] {
            assert!(target.starts_with("trellis::"));
        }
        assert!(targets::SIGNAL.starts_with("trellis_core::"));
    }
}
