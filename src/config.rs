//! Client configuration.

use crate::error::ConfigError;
use crate::games::tictactoe::Symbol;
use crate::session::GameSession;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding the server URL.
pub const SERVER_URL_ENV: &str = "STRICTLY_REMOTE_SERVER_URL";

/// Settings for the game client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the opponent service.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    request_timeout_ms: u64,

    /// Interval between background snapshot fetches in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    poll_interval_ms: u64,

    /// Delay between revealing consecutive winning cells in milliseconds.
    #[serde(default = "default_highlight_stagger_ms")]
    highlight_stagger_ms: u64,

    /// Symbol the human plays.
    #[serde(default = "default_human_symbol")]
    human_symbol: Symbol,

    /// Log file used while the terminal UI owns the screen.
    #[serde(default = "default_log_file")]
    log_file: String,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_request_timeout_ms() -> u64 {
    5000
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_highlight_stagger_ms() -> u64 {
    100
}

fn default_human_symbol() -> Symbol {
    Symbol::Ex
}

fn default_log_file() -> String {
    "strictly_remote.log".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_ms: default_request_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            highlight_stagger_ms: default_highlight_stagger_ms(),
            human_symbol: default_human_symbol(),
            log_file: default_log_file(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies the environment override, then an explicit URL if given.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, server_url: Option<String>) -> Self {
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            debug!(url = %url, "Server URL from environment");
            self.server_url = url;
        }
        if let Some(url) = server_url {
            debug!(url = %url, "Server URL from command line");
            self.server_url = url;
        }
        self
    }

    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Poll interval as a duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Highlight stagger as a duration.
    pub fn highlight_stagger(&self) -> Duration {
        Duration::from_millis(self.highlight_stagger_ms)
    }

    /// Session with the configured symbol bindings.
    pub fn session(&self) -> GameSession {
        GameSession::new(self.human_symbol)
    }
}
