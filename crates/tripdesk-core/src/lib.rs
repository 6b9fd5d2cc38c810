//! # tripdesk-core: Invoice Drafting Logic
//!
//! Everything the invoice drafting form computes, as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Tripdesk Drafting                                 │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI shell / operator console                  │   │
//! │  │    service picker ──► fare fields ──► customer/vendor search   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                tripdesk-drafting (app layer)                    │   │
//! │  └──────────────┬──────────────────────────────────┬───────────────┘   │
//! │                 │                                  │                    │
//! │  ┌──────────────▼──────────────────┐  ┌───────────▼────────────────┐   │
//! │  │   ★ tripdesk-core (THIS CRATE) ★│  │  tripdesk-lookup           │   │
//! │  │                                 │  │  HTTP collaborators,       │   │
//! │  │  money  service  fare  flight   │  │  debounced EntityResolver  │   │
//! │  │  draft  types  validation       │  │                            │   │
//! │  │                                 │  └────────────────────────────┘   │
//! │  │  NO I/O • NO NETWORK • PURE     │                                   │
//! │  └─────────────────────────────────┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type and the lenient numeric parser
//! - [`service`] - Air-ticket classification and the service catalog
//! - [`fare`] - Derived totals (bill, amount, due, total fares)
//! - [`flight`] - One-way / round-trip / multi-city flight plan
//! - [`draft`] - The invoice draft and its snapshot
//! - [`types`] - Service options, entity kinds, candidates, references
//! - [`validation`] - Submission preconditions
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Never blocks the form**: fare computation cannot fail; garbage input is zero
//! 2. **No I/O**: network access lives in tripdesk-lookup
//! 3. **Integer Money**: amounts are minor units (i64), parsed via exact decimals
//! 4. **Explicit Errors**: editing/validation errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use tripdesk_core::{DraftField, InvoiceDraft, Money, ServiceCatalog, ServiceOption};
//!
//! let catalog = ServiceCatalog::from_options(vec![
//!     ServiceOption::new("air-ticket-domestic", "Domestic Air Ticket"),
//! ]);
//!
//! let mut draft = InvoiceDraft::new();
//! draft.apply_catalog(&catalog);
//! draft.set_field(DraftField::CustomerBaseFare, "1000");
//! draft.set_field(DraftField::CustomerTax, "100");
//! draft.set_field(DraftField::Paid, "1500");
//!
//! let totals = draft.totals(&catalog);
//! assert_eq!(totals.computed_bill, Money::from_major(1100));
//! assert!(totals.due.is_zero()); // overpaid clamps to zero
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod draft;
pub mod error;
pub mod fare;
pub mod flight;
pub mod money;
pub mod service;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tripdesk_core::Money` instead of
// `use tripdesk_core::money::Money`

pub use draft::{DraftField, InvoiceDraft, InvoiceSnapshot};
pub use error::{CoreError, CoreResult, ValidationError};
pub use fare::{compute_totals, BillingFields, DerivedTotals, FareFields, FareInputs};
pub use flight::{FlightLeg, FlightPlan, FlightPlanKind};
pub use money::Money;
pub use service::{is_air_ticket_class, CatalogStatus, ServiceCatalog};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quiet period after the last keystroke before a search lookup is issued.
pub const SEARCH_DEBOUNCE_MS: u64 = 350;

/// Trimmed queries shorter than this clear the results without a lookup.
pub const MIN_QUERY_CHARS: usize = 2;

/// Trimmed queries longer than this clear the results without a lookup.
pub const MAX_QUERY_CHARS: usize = 100;

/// Candidate lists are capped to this many entries, whatever the source.
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Longest accepted booking reference or ticket number.
pub const MAX_REFERENCE_LEN: usize = 64;
