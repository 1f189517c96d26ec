//! Window configuration and builder.
//!
//! This module provides `WindowConfig`, a builder for window options that can
//! also be loaded from TOML:
//!
//! ```toml
//! title = "Controls"
//! width = 640
//! height = 480
//! background = "#f5f5f5"
//! ```
//!
//! Missing keys fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use trellis_render::{Color, Size};

use crate::error::{ConfigError, ConfigResult};

/// Configuration for creating a [`Window`](super::Window).
///
/// # Example
///
/// ```
/// use trellis::window::{Window, WindowConfig};
///
/// let config = WindowConfig::new("My Application")
///     .with_size(1280, 720)
///     .with_background("#202020");
///
/// let window = Window::from_config(config)?;
/// assert_eq!(window.title(), "My Application");
/// # Ok::<(), trellis::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title.
    title: String,
    /// Width in logical pixels.
    width: u32,
    /// Height in logical pixels.
    height: u32,
    /// Background color as a hex string.
    background: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Trellis".to_string(),
            width: 800,
            height: 600,
            background: "#ffffff".to_string(),
        }
    }
}

impl WindowConfig {
    /// Create a configuration with the given title and default everything else.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the background color as a hex string (`#rgb`, `#rrggbb`, `#rrggbbaa`).
    ///
    /// The string is validated when the window is created.
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    /// The window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Width in logical pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in logical pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size as floating-point window coordinates.
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    /// The background color string as configured.
    pub fn background(&self) -> &str {
        &self.background
    }

    /// Parse the background color.
    pub fn background_color(&self) -> ConfigResult<Color> {
        Color::from_hex(&self.background)
            .ok_or_else(|| ConfigError::InvalidColor(self.background.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WindowConfig::default();
        assert_eq!(config.title(), "Trellis");
        assert_eq!(config.size(), Size::new(800.0, 600.0));
        assert_eq!(config.background_color().unwrap(), Color::WHITE);
    }

    #[test]
    fn test_builder() {
        let config = WindowConfig::new("Demo")
            .with_size(320, 240)
            .with_background("#000");
        assert_eq!(config.title(), "Demo");
        assert_eq!(config.width(), 320);
        assert_eq!(config.height(), 240);
        assert_eq!(config.background_color().unwrap(), Color::from_rgb8(0, 0, 0));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = WindowConfig::from_toml_str("title = \"Partial\"\nwidth = 100\n").unwrap();
        assert_eq!(config.title(), "Partial");
        assert_eq!(config.width(), 100);
        assert_eq!(config.height(), 600);
        assert_eq!(config.background(), "#ffffff");
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = WindowConfig::from_toml_str("width = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_color() {
        let config = WindowConfig::new("x").with_background("not-a-color");
        let err = config.background_color().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor(ref c) if c == "not-a-color"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "title = \"From disk\"").unwrap();
        writeln!(file, "background = \"#81c784\"").unwrap();

        let config = WindowConfig::from_file(file.path()).unwrap();
        assert_eq!(config.title(), "From disk");
        assert_eq!(
            config.background_color().unwrap(),
            Color::from_rgb8(0x81, 0xc7, 0x84)
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = WindowConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
