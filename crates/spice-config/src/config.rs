//! Config file and environment overrides for credentials and paths

use crate::credentials::Credentials;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "SPICE_CONFIG";
pub const CLIENT_ID_ENV: &str = "SPICE_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "SPICE_CLIENT_SECRET";

/// Keys accepted by `Config::get` / `Config::set`
pub const CONFIG_KEYS: &[&str] = &["client-id", "client-secret", "manifest-dir"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Missing credentials: set {0} (config key or environment variable)")]
    MissingCredentials(&'static str),

    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    #[error("Could not determine home directory")]
    NoHomeDir,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_dir: Option<String>,
}

impl Config {
    /// Resolve the config file path, honoring `SPICE_CONFIG`
    pub fn path() -> Result<PathBuf, ConfigError> {
        if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        Ok(config_dir()?.join("spice.toml"))
    }

    /// Load from the default location with environment overrides applied
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from_path(&Self::path()?)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from a specific path; a missing file yields an empty config
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(&Self::path()?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply credential overrides from a variable lookup (normally the process env)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(id) = non_empty(CLIENT_ID_ENV) {
            self.client_id = Some(id);
        }
        if let Some(secret) = non_empty(CLIENT_SECRET_ENV) {
            self.client_secret = Some(secret);
        }
    }

    /// Build the credential pair; both halves must be present
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let client_id = self
            .client_id
            .as_deref()
            .ok_or(ConfigError::MissingCredentials("client-id"))?;
        let secret = self
            .client_secret
            .as_deref()
            .ok_or(ConfigError::MissingCredentials("client-secret"))?;
        Ok(Credentials::new(client_id, secret))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "client-id" => self.client_id.clone(),
            "client-secret" => self.client_secret.clone(),
            "manifest-dir" => self.manifest_dir.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        match key {
            "client-id" => self.client_id = Some(value),
            "client-secret" => self.client_secret = Some(value),
            "manifest-dir" => self.manifest_dir = Some(value),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.client_id.is_none() && self.client_secret.is_none() && self.manifest_dir.is_none()
    }

    /// Displayable key/value pairs; the secret is masked
    pub fn values_iter(&self) -> Vec<(&str, String)> {
        let mut values = Vec::new();
        if let Some(ref val) = self.client_id {
            values.push(("client-id", val.clone()));
        }
        if let Some(ref val) = self.client_secret {
            let masked = Credentials::new("", val.as_str()).masked_secret();
            values.push(("client-secret", masked));
        }
        if let Some(ref val) = self.manifest_dir {
            values.push(("manifest-dir", val.clone()));
        }
        values
    }

    /// Directory submitted manifests are written to
    pub fn get_manifest_dir(&self) -> Result<PathBuf, ConfigError> {
        match self.manifest_dir {
            Some(ref dir) => Ok(PathBuf::from(dir)),
            None => Ok(cache_dir()?.join("manifests")),
        }
    }
}

/// Platform config directory for spice
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    #[cfg(not(target_os = "windows"))]
    let dir = dirs::home_dir()
        .ok_or(ConfigError::NoHomeDir)?
        .join(".config")
        .join("spice");

    #[cfg(target_os = "windows")]
    let dir = dirs::config_dir()
        .ok_or(ConfigError::NoHomeDir)?
        .join("spice");

    Ok(dir)
}

fn cache_dir() -> Result<PathBuf, ConfigError> {
    #[cfg(not(target_os = "windows"))]
    let dir = dirs::home_dir()
        .ok_or(ConfigError::NoHomeDir)?
        .join(".cache")
        .join("spice");

    #[cfg(target_os = "windows")]
    let dir = dirs::cache_dir()
        .ok_or(ConfigError::NoHomeDir)?
        .join("spice");

    Ok(dir)
}
