//! Configuration management.
//!
//! Settings come from an optional TOML file overlaid with `LANTERN_`-prefixed
//! environment variables (`__` separates nested keys).
//!
//! # Configuration File Format
//!
//! ```toml
//! [providers.vhs]
//! endpoint = "http://localhost:3001/api/films/search"
//! label = "VHS"
//!
//! [providers.dvd]
//! endpoint = "http://localhost:3002/api/films/search"
//! label = "DVD"
//!
//! [providers.projector]
//! endpoint = "http://localhost:3003/api/films/search"
//! label = "Projector"
//! enabled = true
//!
//! [http]
//! timeout_seconds = 10
//! connect_timeout_seconds = 5
//!
//! [search]
//! provider_timeout_seconds = 15
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "LANTERN";

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "lantern-search.toml";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Catalog provider endpoints
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Search pipeline settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The three catalog providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default = "default_vhs")]
    pub vhs: ProviderConfig,

    #[serde(default = "default_dvd")]
    pub dvd: ProviderConfig,

    #[serde(default = "default_projector")]
    pub projector: ProviderConfig,
}

impl ProvidersConfig {
    /// Providers with their ids, in VHS, DVD, Projector order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ProviderConfig)> {
        [
            ("vhs", &self.vhs),
            ("dvd", &self.dvd),
            ("projector", &self.projector),
        ]
        .into_iter()
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            vhs: default_vhs(),
            dvd: default_dvd(),
            projector: default_projector(),
        }
    }
}

/// One catalog provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// URL the search query is POSTed to
    pub endpoint: String,

    /// Source label, used for records that carry no distributor
    #[serde(default)]
    pub label: String,

    /// Whether the provider is registered at all
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl ProviderConfig {
    fn local(port: u16, label: &str) -> Self {
        Self {
            endpoint: format!("http://localhost:{}/api/films/search", port),
            label: label.to_string(),
            enabled: true,
        }
    }
}

fn default_vhs() -> ProviderConfig {
    ProviderConfig::local(3001, "VHS")
}

fn default_dvd() -> ProviderConfig {
    ProviderConfig::local(3002, "DVD")
}

fn default_projector() -> ProviderConfig {
    ProviderConfig::local(3003, "Projector")
}

fn default_true() -> bool {
    true
}

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Total time allowed for one provider request
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Time allowed to establish a connection
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    5
}

/// Search pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Upper bound on one provider call, on top of the HTTP timeout (0 disables)
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider_timeout_seconds: default_provider_timeout(),
        }
    }
}

impl SearchConfig {
    /// Provider timeout, if enabled
    pub fn provider_timeout(&self) -> Option<Duration> {
        match self.provider_timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

fn default_provider_timeout() -> u64 {
    15
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
    }

    /// Render configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigFileError> {
        toml::to_string_pretty(self).map_err(|e| ConfigFileError::Serialize(e.to_string()))
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from a file, with environment overrides
///
/// The file is always read as TOML, whatever its extension.
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path).format(config::FileFormat::Toml))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Load configuration from defaults and environment overrides only
pub fn load_from_env() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(environment())
        .build()?
        .try_deserialize()
}

/// Find a configuration file in the default locations
///
/// Looks for `lantern-search.toml` in the working directory first, then for
/// `lantern-search/config.toml` in the platform config directory.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("lantern-search").join("config.toml"))
        .filter(|path| path.is_file())
}
