use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured search endpoint.
pub const ENDPOINT_ENV: &str = "NETHYS_ORACLE_ENDPOINT";

pub const DEFAULT_ENDPOINT: &str = "https://elasticsearch.aonprd.com/aon/_search";
pub const DEFAULT_SITE_BASE_URL: &str = "https://2e.aonprd.com";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

/// Search index connection and rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// `_search` endpoint of the reference index.
    pub endpoint: String,
    /// Site that result links point at.
    pub site_base_url: String,
    /// Timeout for a single HTTP request, in seconds.
    pub request_timeout_secs: u64,
    /// Timeout for establishing a connection, in seconds.
    pub connect_timeout_secs: u64,
    /// Deadline for a whole two-stage lookup, in seconds. Unset means none.
    pub deadline_secs: Option<u64>,
    /// Maximum description length in characters.
    pub description_limit: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub default_filter: String,
    /// Override the default log directory.
    pub log_dir: Option<PathBuf>,
    /// Write JSON logs to a daily rolling file.
    pub file_logging: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            site_base_url: DEFAULT_SITE_BASE_URL.to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            deadline_secs: None,
            description_limit: crate::core::nethys::DESCRIPTION_LIMIT,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            log_dir: None,
            file_logging: true,
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_site_base_url(mut self, url: impl Into<String>) -> Self {
        self.site_base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = timeout.as_secs();
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline_secs = deadline.map(|d| d.as_secs());
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/nethys-oracle/config.toml`, then
    /// apply environment overrides.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let mut config = Self::load_from(&Self::config_path());
        config.apply_env_overrides();
        config
    }

    /// Load configuration from an explicit path without environment overrides.
    pub fn load_from(config_path: &std::path::Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}; using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}; using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                log::info!("Using search endpoint from {}", ENDPOINT_ENV);
                self.search.endpoint = endpoint;
            }
        }
    }

    /// Resolved log directory (override or XDG data dir).
    pub fn log_dir(&self) -> PathBuf {
        self.logging.log_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("nethys-oracle").join("logs"))
                .unwrap_or_else(|| PathBuf::from("logs"))
        })
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("nethys-oracle").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
