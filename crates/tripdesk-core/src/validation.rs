//! # Validation Module
//!
//! Submission preconditions for an invoice draft.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Typing (fare fields)                                                  │
//! │  └── NONE. Bad numbers degrade to zero, totals clamp at zero.          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Before submission (THIS MODULE)                                       │
//! │  ├── customer selected                                                 │
//! │  ├── service selected and still in the catalog                         │
//! │  └── booking references / ticket number well-formed                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Backend (submission collaborator)                                     │
//! │  └── persistence rules, tax law                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tripdesk_core::validation::validate_reference;
//!
//! assert!(validate_reference("gdsPnr", "ABC123").is_ok());
//! assert!(validate_reference("gdsPnr", "").is_ok()); // optional
//! assert!(validate_reference("gdsPnr", "AB#12").is_err());
//! ```

use crate::draft::InvoiceDraft;
use crate::error::ValidationError;
use crate::service::ServiceCatalog;
use crate::{MAX_QUERY_CHARS, MAX_REFERENCE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an optional free-text reference (booking id, PNR, ticket no).
///
/// ## Rules
/// - May be empty
/// - At most 64 characters
/// - Letters, digits, `-`, `/` and spaces only
pub fn validate_reference(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.chars().count() > MAX_REFERENCE_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_REFERENCE_LEN,
        });
    }

    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '/' || c == ' ')
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only letters, numbers, hyphens, slashes, and spaces"
                .to_string(),
        });
    }

    Ok(())
}

/// Validates a search query before it may reach the backend.
///
/// ## Rules
/// - Can be empty (clears the results)
/// - Maximum 100 characters, trimmed
///
/// ## Returns
/// The query unchanged; the resolver does its own trimming.
pub fn validate_search_query(query: &str) -> ValidationResult<&str> {
    if query.trim().chars().count() > MAX_QUERY_CHARS {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_CHARS,
        });
    }

    Ok(query)
}

// =============================================================================
// Submission
// =============================================================================

/// Checks everything the submission collaborator requires.
///
/// Stops at the first failure, in form order.
pub fn validate_for_submission(
    draft: &InvoiceDraft,
    catalog: &ServiceCatalog,
) -> ValidationResult<()> {
    if draft.customer.is_none() {
        return Err(ValidationError::Required {
            field: "customer".to_string(),
        });
    }

    let service = draft.service_type_id.trim();
    if service.is_empty() {
        return Err(ValidationError::Required {
            field: "serviceTypeId".to_string(),
        });
    }
    if !catalog.contains(service) {
        return Err(ValidationError::NotAllowed {
            field: "serviceTypeId".to_string(),
            allowed: catalog.options().iter().map(|o| o.id.clone()).collect(),
        });
    }

    validate_reference("bookingId", &draft.booking.booking_id)?;
    validate_reference("gdsPnr", &draft.booking.gds_pnr)?;
    validate_reference("airlinePnr", &draft.booking.airline_pnr)?;
    validate_reference("ticketNumber", &draft.ticket.ticket_number)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
