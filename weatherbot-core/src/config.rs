use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://api.openweathermap.org";
pub const DEFAULT_LOCATIONS_FILE: &str = "locations.json";

pub const CHAT_TOKEN_VAR: &str = "DISCORD_TOKEN";
pub const WEATHER_API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_base = "https://api.openweathermap.org"
/// locations_file = "/var/lib/weatherbot/locations.json"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL shared by the geocoding and One Call endpoints.
    pub api_base: String,

    /// JSON file holding the user id → city mapping.
    pub locations_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            locations_file: PathBuf::from(DEFAULT_LOCATIONS_FILE),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherbot", "weatherbot")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[derive(Debug, Error)]
#[error("environment variable {0} is not set")]
pub struct CredentialsError(pub &'static str);

/// Secrets handed to the bot at startup.
#[derive(Clone)]
pub struct Credentials {
    pub chat_token: String,
    pub weather_api_key: String,
}

impl Credentials {
    /// Read both secrets from the process environment.
    pub fn from_env() -> Result<Self, CredentialsError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CredentialsError> {
        let read = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(CredentialsError(name))
        };

        Ok(Self {
            chat_token: read(CHAT_TOKEN_VAR)?,
            weather_api_key: read(WEATHER_API_KEY_VAR)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("chat_token", &"<redacted>")
            .field("weather_api_key", &"<redacted>")
            .finish()
    }
}
