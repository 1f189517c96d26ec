//! Error types for the widget toolkit.

use std::path::PathBuf;

use thiserror::Error;
use trellis_render::RenderError;

use crate::widget::WidgetId;
use crate::window::WindowId;

/// Errors raised while building or attaching widgets.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WidgetError {
    /// A choice widget was given fewer options than it needs.
    #[error("{widget} needs at least {required} options, got {given}")]
    TooFewOptions {
        widget: &'static str,
        required: usize,
        given: usize,
    },

    /// The widget was constructed for a different window.
    #[error("widget {widget} belongs to window {owner}, not window {target}")]
    ForeignWindow {
        widget: WidgetId,
        owner: WindowId,
        target: WindowId,
    },

    /// The widget has not created its primitives yet.
    #[error("widget {0} has not been rendered")]
    NotRendered(WidgetId),

    /// A primitive operation failed while rendering.
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

/// Errors raised while loading window configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for a window.
    #[error("invalid window config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A color string is not a hex color.
    #[error("invalid color {0:?}; expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor(String),
}

/// Result type for widget operations.
pub type Result<T> = std::result::Result<T, WidgetError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
