//! # Lookup Error Types
//!
//! Error types for the remote collaborators and the resolver.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Lookup Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Payload             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  RequestFailed  │  │  DeserializationFailed  │ │
//! │  │  InvalidUrl     │  │  HttpStatus     │  │                         │ │
//! │  │ ConfigLoadFailed│  │  Timeout        │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │    Internal     │   Search-path errors never reach the operator:    │
//! │  │                 │   the resolver logs them, counts them and clears  │
//! │  │  ChannelError   │   the result list. Catalog errors put the catalog │
//! │  │  ShuttingDown   │   into its Failed state.                          │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;

/// Lookup error type covering all possible collaborator failures.
#[derive(Debug, Error)]
pub enum LookupError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid lookup configuration.
    #[error("Invalid lookup configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API base URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request could not be sent or the connection dropped.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The backend answered with a non-success status.
    #[error("Backend returned HTTP {status} for {path}")]
    HttpStatus { status: u16, path: String },

    /// The configured request timeout elapsed.
    #[error("Request timed out")]
    Timeout,

    // =========================================================================
    // Payload Errors
    // =========================================================================
    /// The response body was not in any accepted shape.
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// The resolver is shutting down.
    #[error("Resolver is shutting down")]
    ShuttingDown,

    /// Channel send/receive failed.
    #[error("Channel error: {0}")]
    ChannelError(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return LookupError::Timeout;
        }
        if err.is_decode() {
            return LookupError::DeserializationFailed(err.to_string());
        }
        match err.status() {
            Some(status) => LookupError::HttpStatus {
                status: status.as_u16(),
                path: err.url().map(|u| u.path().to_string()).unwrap_or_default(),
            },
            None => LookupError::RequestFailed(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::DeserializationFailed(err.to_string())
    }
}

impl From<url::ParseError> for LookupError {
    fn from(err: url::ParseError) -> Self {
        LookupError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for LookupError {
    fn from(err: std::io::Error) -> Self {
        LookupError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for LookupError {
    fn from(err: toml::de::Error) -> Self {
        LookupError::ConfigLoadFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl LookupError {
    /// Returns true if retyping the query could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LookupError::RequestFailed(_) | LookupError::Timeout
        ) || matches!(self, LookupError::HttpStatus { status, .. } if *status >= 500)
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LookupError::InvalidConfig(_)
                | LookupError::InvalidUrl(_)
                | LookupError::ConfigLoadFailed(_)
        )
    }
}
