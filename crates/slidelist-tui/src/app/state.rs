//! Application state types.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use slidelist_core::ReorderConfig;

use crate::theme::ThemeVariant;

use super::constants::DEFAULT_ROWS_PER_ITEM;

/// Application mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Normal,
    Help,
    Quit,
}

/// User settings persisted to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Color theme.
    pub theme: ThemeVariant,
    /// Terminal rows per list item.
    pub rows_per_item: u16,
    /// Drag and commit behavior.
    pub reorder: ReorderConfig,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: ThemeVariant::default(),
            rows_per_item: DEFAULT_ROWS_PER_ITEM,
            reorder: ReorderConfig::default(),
        }
    }
}

impl UserSettings {
    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("slidelist").join("settings.toml"))
    }

    /// Load settings from disk, or return defaults.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from a specific file, or return defaults.
    ///
    /// Files that fail to parse or hold an invalid reorder config are
    /// ignored.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };

        let settings: Self = match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring malformed settings at {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match settings.reorder.clone().validated() {
            Ok(_) => settings,
            Err(e) => {
                tracing::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to a specific file.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, content)
    }
}
