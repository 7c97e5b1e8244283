use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::CinefindError;
use crate::models::Theme;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Environment variable that overrides `catalog.api_key`.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub history: HistoryConfig,
    pub search: SearchConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub max_entries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Drop catalog responses that belong to a superseded request.
    pub discard_stale_results: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub default_theme: ThemePreference,
}

/// Theme used when nothing has been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
    /// Follow the OS appearance; resolved by the front end.
    System,
}

impl ThemePreference {
    /// The concrete theme, or `None` for `System`.
    pub fn fixed(self) -> Option<Theme> {
        match self {
            Self::Light => Some(Theme::Light),
            Self::Dark => Some(Theme::Dark),
            Self::System => None,
        }
    }
}

impl AppConfig {
    /// Load config: user file (if exists) over built-in defaults, then env overrides.
    pub fn load() -> Result<Self, CinefindError> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path. The user file is merged over the built-in
    /// defaults table by table; a missing file leaves the defaults as is.
    pub fn load_from(path: &Path) -> Result<Self, CinefindError> {
        let mut table = parse_table(DEFAULT_CONFIG)?;
        if path.exists() {
            let user_str = std::fs::read_to_string(path)?;
            merge_tables(&mut table, parse_table(&user_str)?);
        }
        let mut config: AppConfig = toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| CinefindError::Config(e.to_string()))?;
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.catalog.api_key = key.trim().to_string();
            }
        }
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), CinefindError> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CinefindError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Path to the durable key-value file.
    pub fn storage_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().join("storage.json"))
            .unwrap_or_else(|| PathBuf::from("storage.json"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "cinefind")
    }
}

fn parse_table(source: &str) -> Result<toml::Table, CinefindError> {
    toml::from_str(source).map_err(|e| CinefindError::Config(e.to_string()))
}

/// Overlay `user` onto `base`: nested tables merge key by key, everything
/// else replaces.
fn merge_tables(base: &mut toml::Table, user: toml::Table) {
    for (key, value) in user {
        match value {
            toml::Value::Table(incoming) => match base.get_mut(&key) {
                Some(toml::Value::Table(existing)) => merge_tables(existing, incoming),
                _ => {
                    base.insert(key, toml::Value::Table(incoming));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
