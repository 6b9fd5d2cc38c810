//! # Service Classification
//!
//! Decides whether the selected service type makes the invoice an
//! "air-ticket class" invoice, and keeps the loaded service catalog.
//!
//! ## What Air-Ticket Class Gates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  serviceTypeId ──► catalog entry ──► is_air_ticket_class()             │
//! │                                             │                           │
//! │                     ┌───────────────────────┴─────────────────┐        │
//! │                     ▼ true                                    ▼ false  │
//! │   bill = customer base fare + tax               bill = raw `bill` text │
//! │   flight-segment sub-form enabled               sub-form disabled      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Heuristic
//! Case-insensitive substring test: the id OR the display name contains
//! `"air"` or `"ticket"`. It is deliberately loose (a "Repair" service
//! classifies as air); the catalog ids are expected to follow the
//! `air-ticket-*` naming the backend uses.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::ServiceOption;

/// Substrings that mark a service as airline ticketing.
const AIR_TICKET_MARKERS: [&str; 2] = ["air", "ticket"];

/// Returns true if the service is airline ticketing.
///
/// ## Example
/// ```rust
/// use tripdesk_core::service::is_air_ticket_class;
/// use tripdesk_core::ServiceOption;
///
/// assert!(is_air_ticket_class(&ServiceOption::new("air-ticket-domestic", "Domestic")));
/// assert!(!is_air_ticket_class(&ServiceOption::new("visa-processing", "Visa")));
/// ```
pub fn is_air_ticket_class(service: &ServiceOption) -> bool {
    let id = service.id.to_lowercase();
    let name = service.name.to_lowercase();

    AIR_TICKET_MARKERS
        .iter()
        .any(|marker| id.contains(marker) || name.contains(marker))
}

// =============================================================================
// Catalog Status
// =============================================================================

/// Load state of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CatalogStatus {
    /// Fetch not finished yet.
    #[default]
    Loading,
    /// Options populated from the collaborator.
    Ready,
    /// Fetch failed. No retry; the selector stays disabled.
    Failed { reason: String },
}

// =============================================================================
// Service Catalog
// =============================================================================

/// The service types available to the drafting form.
///
/// Loaded once per drafting session. The selected `serviceTypeId` must
/// always resolve to a member once the catalog is ready.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCatalog {
    options: Vec<ServiceOption>,
    status: CatalogStatus,
}

impl ServiceCatalog {
    /// Creates an empty catalog in the `Loading` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ready catalog from the given options.
    pub fn from_options(options: Vec<ServiceOption>) -> Self {
        let mut catalog = Self::new();
        catalog.replace(options);
        catalog
    }

    /// Replaces the options with a freshly loaded list.
    ///
    /// Duplicate ids keep their first occurrence. A list with no entries
    /// leaves the catalog `Failed`.
    pub fn replace(&mut self, options: Vec<ServiceOption>) {
        let mut unique: Vec<ServiceOption> = Vec::with_capacity(options.len());
        for option in options {
            if !unique.iter().any(|o| o.id == option.id) {
                unique.push(option);
            }
        }
        self.options = unique;
        self.status = if self.options.is_empty() {
            CatalogStatus::Failed {
                reason: CoreError::CatalogEmpty.to_string(),
            }
        } else {
            CatalogStatus::Ready
        };
    }

    /// Records a failed fetch. The catalog is left empty.
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.options.clear();
        self.status = CatalogStatus::Failed {
            reason: reason.into(),
        };
    }

    pub fn options(&self) -> &[ServiceOption] {
        &self.options
    }

    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    /// The service selector is enabled only while the catalog is non-empty.
    pub fn is_selectable(&self) -> bool {
        !self.options.is_empty()
    }

    pub fn first(&self) -> Option<&ServiceOption> {
        self.options.first()
    }

    pub fn find(&self, id: &str) -> Option<&ServiceOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Resolves the selection after a (re)load.
    ///
    /// ## Rules
    /// - `current` is a member → keep it
    /// - `current` is empty or unknown → the first entry
    /// - catalog is empty → `None`
    pub fn resolve_selection(&self, current: &str) -> Option<String> {
        let current = current.trim();
        if self.contains(current) {
            return Some(current.to_string());
        }
        self.first().map(|o| o.id.clone())
    }

    /// Looks up a service the operator picked.
    pub fn select(&self, id: &str) -> CoreResult<&ServiceOption> {
        if !self.is_selectable() {
            return Err(CoreError::CatalogEmpty);
        }
        self.find(id.trim())
            .ok_or_else(|| CoreError::ServiceNotInCatalog(id.to_string()))
    }

    /// Air-ticket classification of a catalog id. Unknown ids are not air.
    pub fn classify(&self, id: &str) -> bool {
        self.find(id).map(is_air_ticket_class).unwrap_or(false)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
