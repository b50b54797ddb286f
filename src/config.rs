use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::DEFAULT_FORK_COUNT;

pub const API_URL_ENV: &str = "FORK_REMOTES_API_URL";
pub const CLONE_BASE_ENV: &str = "FORK_REMOTES_CLONE_BASE";
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Runtime settings. Defaults target github.com.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base of the REST API, e.g. `https://api.github.com`
    pub api_url: String,
    /// Prefix for clone and upstream URLs, e.g. `https://github.com`
    pub clone_base: String,
    pub github_token: Option<String>,
    pub default_fork_count: usize,
    /// Unlimited runs over more forks than this ask for confirmation first
    pub confirm_threshold: u64,
    pub user_agent: String,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_url", &self.api_url)
            .field("clone_base", &self.clone_base)
            .field("github_token", &self.github_token.as_ref().map(|_| "[REDACTED]"))
            .field("default_fork_count", &self.default_fork_count)
            .field("confirm_threshold", &self.confirm_threshold)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            clone_base: "https://github.com".to_string(),
            github_token: None,
            default_fork_count: DEFAULT_FORK_COUNT,
            confirm_threshold: 100,
            user_agent: concat!("fork-remotes/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Get the fork-remotes configuration directory
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fork-remotes"))
}

/// Path of the optional settings file
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Load settings from a specific file, falling back to defaults for
/// missing keys
pub fn load_settings_from_path(config_path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    if settings.default_fork_count == 0 {
        anyhow::bail!(
            "Invalid config file {}: 'default_fork_count' must be positive",
            config_path.display()
        );
    }

    Ok(settings)
}

/// Defaults, then the config file if one exists, then the environment
pub fn load_settings() -> Result<Settings> {
    let mut settings = match config_path() {
        Some(path) if path.exists() => load_settings_from_path(&path)?,
        _ => Settings::default(),
    };
    settings.apply_env(|key| std::env::var(key).ok());
    Ok(settings)
}

impl Settings {
    /// Override fields from environment-style lookups. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(API_URL_ENV) {
            self.api_url = url;
        }
        if let Some(base) = get(CLONE_BASE_ENV) {
            self.clone_base = base;
        }
        if let Some(token) = get(TOKEN_ENV) {
            self.github_token = Some(token);
        }
    }
}
