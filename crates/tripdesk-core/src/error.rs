//! # Error Types
//!
//! Domain-specific error types for tripdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tripdesk-core errors (this file)                                      │
//! │  ├── CoreError        - Draft editing / catalog errors                 │
//! │  └── ValidationError  - Submission precondition failures               │
//! │                                                                         │
//! │  tripdesk-lookup errors (separate crate)                               │
//! │  └── LookupError      - Config, HTTP, decoding, channel failures       │
//! │                                                                         │
//! │  drafting app errors                                                   │
//! │  └── ApiError         - What the UI shell sees (serialized)            │
//! │                                                                         │
//! │  NOT HERE: fare computation has no error type. Bad numeric input       │
//! │  degrades to zero and totals clamp at zero.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while editing a draft against the service catalog.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested service id is not in the loaded catalog.
    #[error("Service not found in catalog: {0}")]
    ServiceNotInCatalog(String),

    /// The catalog has not loaded (or failed to load); the selector is
    /// disabled until it is non-empty.
    #[error("Service catalog is empty")]
    CatalogEmpty,

    /// A flight leg index that the active flight-plan variant does not have.
    ///
    /// ## When This Occurs
    /// - Editing leg 2 while the plan is one-way
    /// - Any index above 1
    #[error("Flight plan {kind} has no leg {index}")]
    LegNotAvailable { kind: String, index: usize },

    /// A form field name that does not exist.
    #[error("Unknown draft field: {0}")]
    UnknownField(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are the operator-visible errors, reported before any submission
/// attempt is made.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., stray characters in a PNR).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LegNotAvailable {
            kind: "one-way".to_string(),
            index: 1,
        };
        assert_eq!(err.to_string(), "Flight plan one-way has no leg 1");

        let err = CoreError::ServiceNotInCatalog("visa".to_string());
        assert_eq!(err.to_string(), "Service not found in catalog: visa");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer".to_string(),
        };
        assert_eq!(err.to_string(), "customer is required");

        let err = ValidationError::TooLong {
            field: "gdsPnr".to_string(),
            max: 64,
        };
        assert_eq!(err.to_string(), "gdsPnr must be at most 64 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "service".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
