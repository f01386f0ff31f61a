//! Configuration loading and data folder resolution
//!
//! Resolution priority for every setting:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Default Gemini REST endpoint base
pub const DEFAULT_PROVIDER_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta";

/// Default model chain: primary tried first, secondary on failure
pub const DEFAULT_PRIMARY_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_SECONDARY_MODEL: &str = "gemini-2.0-flash";

/// Environment variable holding the provider API key
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// Optional on-disk configuration, all fields overridable
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub port: Option<u16>,
    pub data_folder: Option<PathBuf>,
    pub provider_base_url: Option<String>,
    pub primary_model: Option<String>,
    pub secondary_model: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,
    /// Folder holding the cache snapshot document
    pub data_folder: PathBuf,
    /// Generation provider REST base URL
    pub provider_base_url: String,
    /// Provider API key; None means generation is disabled and the
    /// service runs on fallback content only
    pub api_key: Option<String>,
    /// Model chain, primary then secondary
    pub primary_model: String,
    pub secondary_model: String,
}

impl Config {
    /// Resolve the full configuration from CLI arguments, environment,
    /// an optional TOML file, and compiled defaults.
    ///
    /// A missing or unreadable config file is not an error; the service
    /// starts on defaults.
    pub fn resolve(
        cli_port: Option<u16>,
        cli_data_folder: Option<PathBuf>,
        env_data_var: &str,
    ) -> Config {
        let toml_config = load_toml_config().unwrap_or_else(|e| {
            tracing::debug!("No usable config file: {}", e);
            TomlConfig::default()
        });

        let port = cli_port.or(toml_config.port).unwrap_or(5760);

        let data_folder = cli_data_folder
            .or_else(|| std::env::var(env_data_var).ok().map(PathBuf::from))
            .or(toml_config.data_folder)
            .unwrap_or_else(default_data_folder);

        let api_key = std::env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty());

        Config {
            port,
            data_folder,
            provider_base_url: toml_config
                .provider_base_url
                .unwrap_or_else(|| DEFAULT_PROVIDER_BASE_URL.to_string()),
            api_key,
            primary_model: toml_config
                .primary_model
                .unwrap_or_else(|| DEFAULT_PRIMARY_MODEL.to_string()),
            secondary_model: toml_config
                .secondary_model
                .unwrap_or_else(|| DEFAULT_SECONDARY_MODEL.to_string()),
        }
    }

    /// Path of the snapshot document inside the data folder
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_folder.join("cache_snapshot.json")
    }
}

/// Load the TOML config file if one exists
fn load_toml_config() -> Result<TomlConfig> {
    let path = find_config_file()?;
    let content = std::fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Probe the platform config locations for talkup/config.toml
fn find_config_file() -> Result<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("talkup").join("config.toml")) {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/talkup/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// OS-dependent default data folder
fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("talkup"))
        .unwrap_or_else(|| PathBuf::from("./talkup_data"))
}
