//! Settings and configuration utilities.
//!
//! Reads `$HOME/.repo-digest/settings.json`, whose `env` table is a fallback for
//! environment variables and whose `defaults` table supplies default option values.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::digest::SummaryMode;

/// Environment variables consulted for the hosting API token, in order.
pub const TOKEN_ENV_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// Settings loaded from `$HOME/.repo-digest/settings.json`.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Environment variable overrides.
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Default option values used when no flag is given.
    #[serde(default)]
    pub defaults: Defaults,
}

/// Option defaults from the settings file.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Defaults {
    /// Maximum number of commits to fetch.
    pub max_commits: Option<usize>,
    /// Summary style.
    pub mode: Option<SummaryMode>,
    /// Bullets kept per category.
    pub top_n: Option<usize>,
    /// Hosting API base URL.
    pub api_url: Option<String>,
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Self::load_from_path(&settings_path)
    }

    /// Loads settings from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str::<Settings>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn get_settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".repo-digest").join("settings.json"))
    }

    /// Returns an environment variable with fallback to settings.
    pub fn get_env_var(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(_) => self.env.get(key).cloned(),
        }
    }

    /// Returns the first of `keys` found in the environment or the settings table.
    ///
    /// All environment variables are checked before falling back to settings.
    pub fn get_env_vars(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .find_map(|key| env::var(key).ok())
            .or_else(|| keys.iter().find_map(|key| self.env.get(*key).cloned()))
    }

    /// Resolves the access token: explicit value, then environment, then settings.
    ///
    /// Blank values count as absent.
    pub fn resolve_token(&self, explicit: Option<String>) -> Option<String> {
        let present = |token: &String| !token.trim().is_empty();
        explicit
            .filter(present)
            .or_else(|| self.get_env_vars(TOKEN_ENV_VARS))
            .filter(present)
    }
}
