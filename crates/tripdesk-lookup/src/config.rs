//! # Lookup Configuration
//!
//! Configuration for the back-office API client and the search behavior.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TRIPDESK_API_URL=https://api.example.com                           │
//! │     TRIPDESK_DEBOUNCE_MS=350                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/backoffice/lookup.toml (Linux)                           │
//! │     ~/Library/Application Support/com.tripdesk.backoffice/lookup.toml  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     localhost API, 350 ms debounce, 10 results                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # lookup.toml
//! [api]
//! base_url = "https://backoffice.example.com/api"
//! # request_timeout_secs = 15   # unset: a hung request never commits
//!
//! [search]
//! debounce_ms = 350
//! min_query_chars = 2
//! max_results = 10
//! server_filtered = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use tripdesk_core::{MAX_SEARCH_RESULTS, MIN_QUERY_CHARS, SEARCH_DEBOUNCE_MS};

use crate::error::{LookupError, LookupResult};

// =============================================================================
// API Settings
// =============================================================================

/// Where the back-office API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL; collection paths are appended (`{base}/customers`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. `None` waits forever.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

// =============================================================================
// Search Settings
// =============================================================================

/// Resolver behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Quiet period after the last keystroke (milliseconds).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Trimmed queries shorter than this clear results without a lookup.
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,

    /// Cap applied to every candidate list.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Whether a bare-list response is already filtered by the backend.
    /// Enveloped responses say so themselves.
    #[serde(default)]
    pub server_filtered: bool,
}

fn default_debounce_ms() -> u64 {
    SEARCH_DEBOUNCE_MS
}

fn default_min_query_chars() -> usize {
    MIN_QUERY_CHARS
}

fn default_max_results() -> usize {
    MAX_SEARCH_RESULTS
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
            max_results: default_max_results(),
            server_filtered: false,
        }
    }
}

impl SearchSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

// =============================================================================
// Main Lookup Configuration
// =============================================================================

/// Complete lookup configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub search: SearchSettings,
}

impl LookupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (lookup.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> LookupResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading lookup config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load lookup config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> LookupResult<()> {
        self.base_url()?;

        if self.search.max_results == 0 {
            return Err(LookupError::InvalidConfig(
                "max_results must be greater than 0".into(),
            ));
        }

        if self.search.min_query_chars == 0 {
            return Err(LookupError::InvalidConfig(
                "min_query_chars must be greater than 0".into(),
            ));
        }

        if self.api.request_timeout_secs == Some(0) {
            return Err(LookupError::InvalidConfig(
                "request_timeout_secs must be greater than 0 when set".into(),
            ));
        }

        Ok(())
    }

    /// Parses the base URL, requiring http or https.
    pub fn base_url(&self) -> LookupResult<Url> {
        let url = Url::parse(&self.api.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(LookupError::InvalidUrl(format!(
                "API URL must use http:// or https://, got: {}://",
                other
            ))),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.api.request_timeout_secs.map(Duration::from_secs)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("TRIPDESK_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Ok(ms) = std::env::var("TRIPDESK_DEBOUNCE_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => self.search.debounce_ms = ms,
                Err(_) => warn!(value = %ms, "Ignoring non-numeric TRIPDESK_DEBOUNCE_MS"),
            }
        }

        if let Ok(max) = std::env::var("TRIPDESK_MAX_RESULTS") {
            match max.parse::<usize>() {
                Ok(max) => self.search.max_results = max,
                Err(_) => warn!(value = %max, "Ignoring non-numeric TRIPDESK_MAX_RESULTS"),
            }
        }

        if let Ok(secs) = std::env::var("TRIPDESK_REQUEST_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => self.api.request_timeout_secs = Some(secs),
                Err(_) => warn!(value = %secs, "Ignoring non-numeric TRIPDESK_REQUEST_TIMEOUT_SECS"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tripdesk", "backoffice")
            .map(|dirs| dirs.config_dir().join("lookup.toml"))
    }
}
