use super::keymap::KeyConfig;
use crate::domain::{
    combobox::{ComboConfig, DEFAULT_BLUR_GRACE},
    scroll::ScrollStrategy,
};
use crate::infrastructure::{cache::DEFAULT_TTL, github::DEFAULT_API_BASE};
use crate::theme::PaletteType;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_LABEL: &str = "Search for github usernames...";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub label: String,
    pub debounce_ms: u64,
    pub blur_grace_ms: u64,
    pub cache_ttl_secs: u64,
    pub scroll_strategy: ScrollStrategy,
    pub theme: PaletteType,
    pub token: Option<String>,
    pub keys: KeyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            label: DEFAULT_LABEL.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            blur_grace_ms: DEFAULT_BLUR_GRACE.as_millis() as u64,
            cache_ttl_secs: DEFAULT_TTL.as_secs(),
            scroll_strategy: ScrollStrategy::default(),
            theme: PaletteType::default(),
            token: None,
            keys: KeyConfig::default(),
        }
    }
}

impl Config {
    /// Reads `~/.config/typeahead/config.toml`, falling back to defaults when
    /// the file is missing or invalid. `GITHUB_TOKEN` fills in a missing token.
    #[must_use]
    pub fn load() -> Self {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::from_file(&path).unwrap_or_else(|e| {
                log::warn!("{e:#}; using default configuration");
                Self::default()
            }),
            _ => Self::default(),
        };
        if config.token.is_none() {
            config.token = std::env::var("GITHUB_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty());
        }
        config
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn combo_config(&self) -> ComboConfig {
        ComboConfig {
            blur_grace: Duration::from_millis(self.blur_grace_ms),
            scroll_strategy: self.scroll_strategy,
            ..ComboConfig::default()
        }
    }
}

fn app_dir(base: &str) -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(base);
        path.push("typeahead");
        path
    })
}

pub fn config_path() -> Option<PathBuf> {
    app_dir(".config").map(|dir| dir.join("config.toml"))
}

/// Directory for the response cache and the log file.
pub fn cache_dir() -> Option<PathBuf> {
    app_dir(".cache")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://api.github.com");
        assert_eq!(config.debounce(), Duration::from_millis(500));
        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.combo_config().blur_grace, Duration::from_millis(300));
        assert_eq!(config.scroll_strategy, ScrollStrategy::Precise);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            debounce_ms = 250
            scroll_strategy = "step"
            theme = "nord"

            [keys]
            profile = "emacs"
            "#,
        )
        .unwrap();
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.scroll_strategy, ScrollStrategy::Step);
        assert_eq!(config.theme, PaletteType::Nord);
        assert_eq!(config.keys.profile, "emacs");
        assert_eq!(config.label, DEFAULT_LABEL);
        assert_eq!(config.blur_grace_ms, 300);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        assert!(Config::from_toml_str("debounce_ms = \"soon\"").is_err());
    }

    #[test]
    fn test_from_file() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "api_base_url = \"https://ghe.example.com/api/v3\"\n")?;
        let config = Config::from_file(&path)?;
        assert_eq!(config.api_base_url, "https://ghe.example.com/api/v3");
        Ok(())
    }
}
