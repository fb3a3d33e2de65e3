// Persisted settings and profile registration config

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::{ProfileIdentity, SettingValue, SettingsBackend};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Encoder names and priority used when registering the profile
    #[serde(default)]
    pub profile: ProfileIdentity,

    /// Persisted plugin settings, keyed by setting name
    #[serde(default)]
    pub settings: BTreeMap<String, SettingValue>,
}

impl Config {
    /// Get the path to the default config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "macos") {
            dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".config")
                .join("vp9vod")
        } else {
            dirs::config_dir()
                .context("Could not determine config directory")?
                .join("vp9vod")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from `path`, or return defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to `path`, creating parent directories as needed
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

    /// Create a default config file at `path` if it doesn't exist.
    /// Returns true if a file was written.
    pub fn ensure_default(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        Config::default().save_to(path)?;
        Ok(true)
    }
}

/// Settings persistence backed by a TOML config file.
///
/// Every write is flushed to disk immediately.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    config: Config,
}

impl ConfigFile {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let config = Config::load_from(&path)?;
        Ok(Self { path, config })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl SettingsBackend for ConfigFile {
    fn get_setting(&self, name: &str) -> Option<SettingValue> {
        self.config.settings.get(name).cloned()
    }

    fn set_setting(&mut self, name: &str, value: SettingValue) -> Result<()> {
        self.config.settings.insert(name.to_string(), value);
        self.config.save_to(&self.path)
    }
}
