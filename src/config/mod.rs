//! Configuration management for notebar.
//!
//! Handles persistence and loading of user preferences: category order, layout,
//! logging level and storage location.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::note::grouping::{default_category_order, Category};

/// Smallest sidebar width in percent
pub const MIN_SIDEBAR_WIDTH: u8 = 15;
/// Largest sidebar width in percent
pub const MAX_SIDEBAR_WIDTH: u8 = 60;

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Category order and labels
    #[serde(default)]
    pub categories: CategoriesConfig,

    /// Layout configuration
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Log level
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where notes, pins and logs live
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from disk, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate();

        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Clamp out-of-range values and complete the category order.
    pub fn validate(&mut self) {
        self.layout.validate();
        self.categories.validate();
    }

    /// Directory for notes, pins and logs: the configured override or the platform
    /// data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir().context("Could not find data directory")?;
        Ok(data_dir.join("notebar"))
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not find config directory")?;

        Ok(config_dir.join("notebar").join("config.toml"))
    }
}

/// Category display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoriesConfig {
    /// Categories in the order their sections appear
    #[serde(default = "default_category_order")]
    pub order: Vec<Category>,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            order: default_category_order(),
        }
    }
}

impl CategoriesConfig {
    /// Append every built-in category the configured order leaves out, so each key
    /// the grouping can produce has a section.
    pub fn validate(&mut self) {
        for builtin in default_category_order() {
            if !self.order.iter().any(|c| c.key == builtin.key) {
                self.order.push(builtin);
            }
        }
    }
}

/// Layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Sidebar width as percentage (15-60%)
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width_pct: u8,
}

fn default_sidebar_width() -> u8 {
    30
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sidebar_width_pct: default_sidebar_width(),
        }
    }
}

impl LayoutConfig {
    /// Validate and clamp sidebar width to valid range (15-60%)
    pub fn validate(&mut self) {
        self.sidebar_width_pct = self
            .sidebar_width_pct
            .clamp(MIN_SIDEBAR_WIDTH, MAX_SIDEBAR_WIDTH);
    }

    /// Grow or shrink the sidebar by `delta` percent, staying in range.
    /// Returns true if the width changed.
    pub fn resize_sidebar(&mut self, delta: i16) -> bool {
        let before = self.sidebar_width_pct;
        let target = (i16::from(before) + delta)
            .clamp(i16::from(MIN_SIDEBAR_WIDTH), i16::from(MAX_SIDEBAR_WIDTH));
        self.sidebar_width_pct = u8::try_from(target).unwrap_or(before);
        self.sidebar_width_pct != before
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// trace | debug | info | warn | error
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Override for the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}
