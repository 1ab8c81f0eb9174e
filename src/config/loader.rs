//! Configuration file loading with precedence handling.

use crate::provider::MAX_MATCHES;
use crate::state::cache::DEFAULT_CACHE_CAPACITY;
use crate::state::controller::{ControllerConfig, DEFAULT_LOOKUP_TIMEOUT};
use crate::state::debounce::DEFAULT_DEBOUNCE;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "TENANTFIND_CONFIG";
/// Environment variable overriding `api_url`.
pub const ENV_API_URL: &str = "TENANTFIND_API_URL";
/// Environment variable overriding `api_token`.
pub const ENV_API_TOKEN: &str = "TENANTFIND_API_TOKEN";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permissions, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; anything unset falls back to the defaults in
/// [`ResolvedConfig::default`]. Lives at `~/.config/tenantfind/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Debounce window in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// Cached queries kept (0 = unbounded).
    #[serde(default)]
    pub cache_capacity: Option<usize>,

    /// Lookup timeout in milliseconds (0 = none).
    #[serde(default)]
    pub lookup_timeout_ms: Option<u64>,

    /// Matches kept per query.
    #[serde(default)]
    pub max_matches: Option<usize>,

    /// Base URL of the admin API, e.g. `https://admin.example.com`.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Bearer token sent to the admin API.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Debounce window.
    pub debounce: Duration,
    /// Cached queries kept (0 = unbounded).
    pub cache_capacity: usize,
    /// Lookup timeout (`None` = wait forever).
    pub lookup_timeout: Option<Duration>,
    /// Matches kept per query.
    pub max_matches: usize,
    /// Admin API base URL; when set, lookups go over HTTP.
    pub api_url: Option<String>,
    /// Bearer token for the admin API.
    pub api_token: Option<String>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            lookup_timeout: Some(DEFAULT_LOOKUP_TIMEOUT),
            max_matches: MAX_MATCHES,
            api_url: None,
            api_token: None,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Controller tunables derived from this config.
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            debounce: self.debounce,
            cache_capacity: self.cache_capacity,
            lookup_timeout: self.lookup_timeout,
        }
    }
}

/// Resolve default log file path.
///
/// `~/.local/state/tenantfind/tenantfind.log` on Linux; falls back to the
/// current directory when no state directory exists.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("tenantfind").join("tenantfind.log")
    } else {
        PathBuf::from("tenantfind.log")
    }
}

/// Resolve default config file path.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tenantfind").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TENANTFIND_CONFIG` environment variable
/// 3. Default path `~/.config/tenantfind/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        debounce: config
            .debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.debounce),
        cache_capacity: config.cache_capacity.unwrap_or(defaults.cache_capacity),
        lookup_timeout: match config.lookup_timeout_ms {
            Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
            None => defaults.lookup_timeout,
        },
        max_matches: config.max_matches.unwrap_or(defaults.max_matches),
        api_url: config.api_url.or(defaults.api_url),
        api_token: config.api_token.or(defaults.api_token),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides (`TENANTFIND_API_URL`,
/// `TENANTFIND_API_TOKEN`).
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(url) = std::env::var(ENV_API_URL) {
        config.api_url = Some(url);
    }
    if let Ok(token) = std::env::var(ENV_API_TOKEN) {
        config.api_token = Some(token);
    }
    config
}

/// Overrides taken from command-line flags. `None` = flag not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--debounce-ms`
    pub debounce_ms: Option<u64>,
    /// `--api-url`
    pub api_url: Option<String>,
    /// `--token`
    pub api_token: Option<String>,
    /// `--log-file`
    pub log_file_path: Option<PathBuf>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(ms) = cli.debounce_ms {
        config.debounce = Duration::from_millis(ms);
    }
    if let Some(url) = cli.api_url {
        config.api_url = Some(url);
    }
    if let Some(token) = cli.api_token {
        config.api_token = Some(token);
    }
    if let Some(path) = cli.log_file_path {
        config.log_file_path = path;
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
