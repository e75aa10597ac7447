//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dashboard::DEFAULT_PAGE_SIZE;
use crate::feed::{DisplayZone, FeedClientConfig, DEFAULT_FEED_URL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Complaint feed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_url")]
    pub url: String,

    /// Unset means no timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            request_timeout_secs: None,
        }
    }
}

impl FeedConfig {
    /// Client settings for this feed
    pub fn client_config(&self) -> FeedClientConfig {
        FeedClientConfig {
            url: self.url.clone(),
            request_timeout_ms: self.request_timeout_secs.map(|s| s * 1000),
        }
    }
}

/// Dashboard rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default)]
    pub timezone: DisplayZone,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            timezone: DisplayZone::Local,
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8083
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from an explicit path, or the default locations, or environment
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => {
                let config = Self::load_with_env(path)?;
                tracing::info!("Loaded config from {:?}", path);
                Ok(config)
            }
            None => Ok(Self::load_default()),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("complaint-dash").join("config.toml")),
            Some(PathBuf::from("/etc/complaint-dash/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup. Unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Feed overrides
        if let Some(url) = lookup("COMPLAINT_DASH_FEED_URL") {
            self.feed.url = url;
        }

        // Dashboard overrides
        if let Some(size) = lookup("COMPLAINT_DASH_PAGE_SIZE") {
            if let Ok(n) = size.parse() {
                self.dashboard.page_size = n;
            }
        }
        if let Some(zone) = lookup("COMPLAINT_DASH_TIMEZONE") {
            match zone.parse() {
                Ok(z) => self.dashboard.timezone = z,
                Err(e) => tracing::warn!("Ignoring COMPLAINT_DASH_TIMEZONE: {}", e),
            }
        }

        // API overrides
        if let Some(host) = lookup("COMPLAINT_DASH_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("COMPLAINT_DASH_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("COMPLAINT_DASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("COMPLAINT_DASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Complaint Dash Configuration
#
# Environment variables override these settings:
# - COMPLAINT_DASH_FEED_URL
# - COMPLAINT_DASH_PAGE_SIZE
# - COMPLAINT_DASH_TIMEZONE
# - COMPLAINT_DASH_API_HOST
# - COMPLAINT_DASH_API_PORT
# - COMPLAINT_DASH_LOG_LEVEL
# - COMPLAINT_DASH_LOG_FORMAT

[feed]
# Complaint endpoint, fetched once per run
url = "http://localhost:5000/api/complaints"

# Request timeout in seconds (omit to wait indefinitely)
# request_timeout_secs = 10

[dashboard]
# Complaint table rows per page
page_size = 5

# Zone for complaint hours and weekdays: local, utc, or an offset like +02:00
timezone = "local"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8083

# Allowed CORS origins
cors_origins = ["http://localhost:3000", "http://127.0.0.1:3000"]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.feed.url, "http://localhost:5000/api/complaints");
        assert!(config.feed.request_timeout_secs.is_none());
        assert_eq!(config.dashboard.page_size, 5);
        assert_eq!(config.dashboard.timezone, DisplayZone::Local);
        assert_eq!(config.api.addr(), "0.0.0.0:8083");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.feed.url, Config::default().feed.url);
        assert_eq!(config.dashboard.page_size, 5);
        assert_eq!(config.api.port, 8083);
        assert_eq!(config.api.cors_origins.len(), 2);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[feed]\nurl = \"http://feed.test/api/complaints\"\nrequest_timeout_secs = 3\n\n[dashboard]\ntimezone = \"+02:00\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.feed.url, "http://feed.test/api/complaints");
        assert_eq!(config.feed.client_config().request_timeout_ms, Some(3000));
        assert_eq!(
            config.dashboard.timezone,
            DisplayZone::Fixed(FixedOffset::east_opt(7200).unwrap())
        );
        assert_eq!(config.dashboard.page_size, 5);
        assert_eq!(config.api.port, 8083);
    }

    #[test]
    fn test_load_invalid_timezone() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dashboard]\ntimezone = \"atlantis\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("COMPLAINT_DASH_FEED_URL", "http://other/api/complaints"),
            ("COMPLAINT_DASH_PAGE_SIZE", "10"),
            ("COMPLAINT_DASH_TIMEZONE", "utc"),
            ("COMPLAINT_DASH_API_PORT", "not-a-port"),
            ("COMPLAINT_DASH_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.feed.url, "http://other/api/complaints");
        assert_eq!(config.dashboard.page_size, 10);
        assert_eq!(config.dashboard.timezone, DisplayZone::Utc);
        assert_eq!(config.api.port, 8083);
        assert_eq!(config.logging.format, "json");
    }
}
