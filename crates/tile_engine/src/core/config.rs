//! # Configuration System
//!
//! Game-level configuration and the [`Config`] trait used to read and write
//! it. Files are RON or TOML, chosen by extension.
//!
//! ## Example
//!
//! ```rust
//! use tile_engine::core::config::GameConfig;
//!
//! let config = GameConfig::from_ron_str("(title: \"Demo\", screen_width: 640, screen_height: 480)").unwrap();
//! assert_eq!(config.screen_width, 640);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::foundation::geometry::Point2;
use crate::render::Filter;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// Rusty Object Notation (`.ron`)
    Ron,
    /// TOML (`.toml`)
    Toml,
}

impl ConfigFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some("ron") => Ok(Self::Ron),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_string())),
        }
    }
}

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Parse configuration text in the given format
    fn parse(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Render configuration text in the given format
    fn render(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
            }
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }

    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        log::debug!("Loaded configuration from {path}");
        Self::parse(&contents, format)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = self.render(ConfigFormat::from_path(path)?)?;
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Values that parse but make no sense
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// # Game Configuration
///
/// Logical screen size and presentation defaults shared by every component
/// through [`crate::Game::config`]. The camera copies the screen size during
/// the Prepare pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window / game title
    pub title: String,
    /// Logical screen width in pixels
    pub screen_width: u32,
    /// Logical screen height in pixels
    pub screen_height: u32,
    /// Filter used when no camera overrides it
    pub filter: Filter,
    /// Default `env_logger` filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl GameConfig {
    /// Create a configuration with the given title and default everything else
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the logical screen size
    #[must_use]
    pub const fn with_screen_size(mut self, width: u32, height: u32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Set the default filter
    #[must_use]
    pub const fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Parse a RON document
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        let config = Self::parse(contents, ConfigFormat::Ron)?;
        config.validate()?;
        Ok(config)
    }

    /// The logical screen size as a point
    pub fn viewport(&self) -> Point2 {
        Point2::new(
            i32::try_from(self.screen_width).unwrap_or(i32::MAX),
            i32::try_from(self.screen_height).unwrap_or(i32::MAX),
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "screen size must be non-zero, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Tile Engine Game".to_string(),
            screen_width: 320,
            screen_height: 240,
            filter: Filter::Nearest,
            log_filter: "info".to_string(),
        }
    }
}

impl Config for GameConfig {}
