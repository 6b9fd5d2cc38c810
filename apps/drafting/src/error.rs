//! # API Error Type
//!
//! Unified error type for drafting commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tripdesk Drafting                      │
//! │                                                                         │
//! │  UI shell / console           Rust Backend                              │
//! │  ──────────────────           ────────────                              │
//! │                                                                         │
//! │  select_service('visa')                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Lookup Error? ─── LookupError::Timeout ───────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Draft Error? ─── CoreError::ServiceNotInCatalog ─ ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "NOT_FOUND", "message": "Service not found: visa" }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Search lookups never reach this type: the resolver swallows their
//! failures and only clears the result list.

use serde::Serialize;
use tripdesk_core::{CoreError, ValidationError};
use tripdesk_lookup::LookupError;

/// Error returned from drafting commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "customer is required"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown service, candidate or similar
    NotFound,

    /// Operator input rejected
    ValidationError,

    /// The service catalog is not loaded
    CatalogUnavailable,

    /// The back-office API failed or answered badly
    BackendError,

    /// Configuration could not be loaded or is invalid
    ConfigError,

    /// Internal error (channel closed, resolver gone)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ServiceNotInCatalog(id) => ApiError::not_found("Service", &id),
            CoreError::CatalogEmpty => {
                ApiError::new(ErrorCode::CatalogUnavailable, "Service catalog is not loaded")
            }
            e @ CoreError::LegNotAvailable { .. } => ApiError::validation(e.to_string()),
            e @ CoreError::UnknownField(_) => ApiError::validation(e.to_string()),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts lookup errors to API errors.
impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::InvalidConfig(_)
            | LookupError::InvalidUrl(_)
            | LookupError::ConfigLoadFailed(_) => {
                ApiError::new(ErrorCode::ConfigError, err.to_string())
            }
            LookupError::RequestFailed(_)
            | LookupError::HttpStatus { .. }
            | LookupError::Timeout
            | LookupError::DeserializationFailed(_) => {
                // Log the actual error but return a generic message
                tracing::error!("Back-office request failed: {}", err);
                ApiError::new(ErrorCode::BackendError, "Back-office request failed")
            }
            LookupError::ShuttingDown | LookupError::ChannelError(_) => {
                ApiError::internal(err.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_not_in_catalog_is_not_found() {
        let err = ApiError::from(CoreError::ServiceNotInCatalog("visa".into()));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Service not found: visa");
    }

    #[test]
    fn test_leg_error_is_validation() {
        let err = ApiError::from(CoreError::LegNotAvailable {
            kind: "one-way".into(),
            index: 1,
        });
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Flight plan one-way has no leg 1");
    }

    #[test]
    fn test_backend_errors_hide_details() {
        let err = ApiError::from(LookupError::HttpStatus {
            status: 502,
            path: "/api/services".into(),
        });
        assert_eq!(err.code, ErrorCode::BackendError);
        assert!(!err.message.contains("502"));
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::validation("customer is required");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "customer is required");
    }
}
