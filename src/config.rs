//! Non-secret configuration (XDG paths, endpoint, query parameters).
//! The API key lives in the system credential store; see credential.rs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NewsTuiError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://content.guardianapis.com/search";

/// Search parameters persisted to disk. Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Content search endpoint (e.g. https://content.guardianapis.com/search)
    pub endpoint: String,
    /// Free-text search term sent as `q`
    pub query: String,
    /// Earliest publication date, `YYYY-MM-DD`
    pub from_date: String,
    /// Tag types to include in each result (`show-tags`)
    pub show_tags: String,
    /// Optional tag filter such as `politics/politics`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            query: "debate".to_string(),
            from_date: "2014-01-01".to_string(),
            show_tags: "contributor".to_string(),
            tag: None,
        }
    }
}

/// Per-run overrides, usually from the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub query: Option<String>,
    pub from_date: Option<String>,
    pub tag: Option<String>,
}

impl AppConfig {
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(query) = overrides.query {
            self.query = query;
        }
        if let Some(from_date) = overrides.from_date {
            self.from_date = from_date;
        }
        if overrides.tag.is_some() {
            self.tag = overrides.tag;
        }
        self
    }

    /// Host of the configured endpoint, used to scope the stored API key.
    pub fn endpoint_host(&self) -> Result<String> {
        let url = url::Url::parse(&self.endpoint)
            .map_err(|e| NewsTuiError::Config(format!("Invalid endpoint URL: {e}")))?;
        url.host_str()
            .map(str::to_string)
            .ok_or_else(|| NewsTuiError::Config("Endpoint URL has no host".into()))
    }
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "newstui", "newstui")
        .ok_or_else(|| NewsTuiError::Config("Could not determine config directory".into()))
}

/// Returns the XDG config directory for newstui (e.g. ~/.config/newstui).
pub fn config_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Returns the XDG data directory, where the log file is written.
pub fn data_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().to_path_buf())
}

/// Path to the config file (TOML, non-secret data only).
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load config from disk if it exists.
pub fn load_config() -> Result<Option<AppConfig>> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Option<AppConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(path)
        .map_err(|e| NewsTuiError::Config(format!("Failed to read config: {e}")))?;
    let config: AppConfig = toml::from_str(&s)
        .map_err(|e| NewsTuiError::Config(format!("Invalid config TOML: {e}")))?;
    Ok(Some(config))
}

/// Save config to disk. The API key is never part of it.
pub fn save_config(config: &AppConfig) -> Result<()> {
    save_config_to(config, &config_path()?)
}

pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| NewsTuiError::Config(format!("Failed to create config dir: {e}")))?;
    }
    let s = toml::to_string_pretty(config)
        .map_err(|e| NewsTuiError::Config(format!("Failed to serialize config: {e}")))?;
    std::fs::write(path, s)
        .map_err(|e| NewsTuiError::Config(format!("Failed to write config: {e}")))?;
    Ok(())
}

/// Load the config, writing the defaults on first run so they can be edited.
/// Never fails: an unreadable or unwritable config means running on defaults.
pub fn load_or_init_config() -> AppConfig {
    match config_path() {
        Ok(path) => load_or_init_config_at(&path),
        Err(e) => {
            tracing::warn!(error = %e, "no config location; using defaults");
            AppConfig::default()
        }
    }
}

pub fn load_or_init_config_at(path: &Path) -> AppConfig {
    match load_config_from(path) {
        Ok(Some(config)) => return config,
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring config; using defaults");
            return AppConfig::default();
        }
    }
    let config = AppConfig::default();
    match save_config_to(&config, path) {
        Ok(()) => tracing::info!(path = %path.display(), "wrote default config"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "could not write default config"),
    }
    config
}
