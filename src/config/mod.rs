//! Configuration management for Cold Reads

pub mod analytics;
pub mod preferences;
pub mod progress;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::share::ShareData;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site name used in share payloads
    pub site_title: String,

    /// Text shared alongside the page link
    pub share_text: String,

    /// Default toast lifetime in milliseconds
    #[serde(default = "default_toast_ms")]
    pub toast_duration_ms: u64,

    /// Default fade length in milliseconds
    #[serde(default = "default_fade_ms")]
    pub fade_duration_ms: u64,

    /// Dark mode used when nothing has been stored yet
    #[serde(default)]
    pub dark_mode_default: bool,
}

fn default_toast_ms() -> u64 {
    3000
}

fn default_fade_ms() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_title: "Florida Cold Reads".to_string(),
            share_text: "Practice reading comprehension with Florida Cold Reads!".to_string(),
            toast_duration_ms: default_toast_ms(),
            fade_duration_ms: default_fade_ms(),
            dark_mode_default: false,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "coldreads")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "coldreads").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Get the key-value store file path
    pub fn store_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("storage.json"))
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }

    /// Share payload for the page at `url`
    pub fn share_data(&self, url: &str) -> ShareData {
        ShareData {
            title: self.site_title.clone(),
            text: self.share_text.clone(),
            url: url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_names_the_site() {
        let config = Config::default();
        assert_eq!(config.site_title, "Florida Cold Reads");
    }

    #[test]
    fn default_durations_match_site_behaviour() {
        let config = Config::default();
        assert_eq!(config.toast_duration(), Duration::from_millis(3000));
        assert_eq!(config.fade_duration(), Duration::from_millis(300));
    }

    #[test]
    fn config_deserializes_with_missing_durations() {
        let json = r#"{"site_title":"Cold Reads","share_text":"Read with me"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.site_title, "Cold Reads");
        assert_eq!(config.toast_duration_ms, 3000);
        assert!(!config.dark_mode_default);
    }

    #[test]
    fn share_data_uses_page_url() {
        let data = Config::default().share_data("https://coldreads.example/p/7");
        assert_eq!(data.url, "https://coldreads.example/p/7");
        assert_eq!(data.title, "Florida Cold Reads");
    }
}
