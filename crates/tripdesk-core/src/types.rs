//! # Domain Types
//!
//! Core domain types shared by the drafting engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ServiceOption   │   │   Candidate     │   │   EntityRef     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  kind           │   │  id             │       │
//! │  │  name           │   │  id, name       │   │  name (frozen)  │       │
//! │  └─────────────────┘   │  phone, email   │   │  phone (frozen) │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  EntityKind     │   │  BookingRefs /  │                             │
//! │  │  ─────────────  │   │  TicketInfo     │                             │
//! │  │  Customer       │   │  free text      │                             │
//! │  │  Vendor         │   │                 │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A selected customer/vendor is copied into an `EntityRef` at selection
//! time. It is not re-synced if the underlying record later changes.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Service Option
// =============================================================================

/// One entry of the externally supplied service catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ServiceOption {
    /// Catalog id (the wire `value`).
    pub id: String,
    /// Display name (the wire `label`).
    pub name: String,
}

impl ServiceOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        ServiceOption {
            id: id.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Entity Kind
// =============================================================================

/// Which directory a search field resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Customer,
    Vendor,
}

impl EntityKind {
    /// Collection path segment on the backend (`/customers`, `/vendors`).
    pub const fn collection(&self) -> &'static str {
        match self {
            EntityKind::Customer => "customers",
            EntityKind::Vendor => "vendors",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Customer => write!(f, "customer"),
            EntityKind::Vendor => write!(f, "vendor"),
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" | "customers" => Ok(EntityKind::Customer),
            "vendor" | "vendors" => Ok(EntityKind::Vendor),
            _ => Err(crate::error::ValidationError::NotAllowed {
                field: "kind".to_string(),
                allowed: vec!["customer".to_string(), "vendor".to_string()],
            }),
        }
    }
}

// =============================================================================
// Candidate
// =============================================================================

/// A search hit, normalized from whichever field names the backend used.
///
/// ## Field Mapping
/// ```text
///  field       customer wire          vendor wire
///  ─────────   ────────────────────   ───────────────
///  id          id | customerId        id | _id
///  name        name                   tradeName
///  phone       phone | mobile         contactNo
///  email       email                  -
///  owner_name  -                      ownerName
///  location    -                      tradeLocation
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub kind: EntityKind,
    pub id: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub owner_name: Option<String>,
    pub location: Option<String>,
}

impl Candidate {
    /// Creates a candidate with only an id; the other attributes are filled
    /// by the wire-record conversion.
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Candidate {
            kind,
            id: id.into(),
            name: None,
            phone: None,
            email: None,
            owner_name: None,
            location: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Text shown in the search box once this candidate is picked:
    /// the display name, or the id when the record has no name.
    pub fn display_label(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.id)
    }

    /// Freezes the candidate into the reference stored on the draft.
    pub fn to_entity_ref(&self) -> EntityRef {
        EntityRef {
            id: self.id.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
        }
    }
}

// =============================================================================
// Entity Reference
// =============================================================================

/// A resolved customer/vendor on the draft, with display attributes cached
/// at selection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    pub id: String,
    pub name: Option<String>,
    pub phone: Option<String>,
}

// =============================================================================
// Booking & Ticket Metadata
// =============================================================================

/// Free-text service-booking references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingRefs {
    pub booking_id: String,
    /// GDS record locator.
    pub gds_pnr: String,
    /// Airline record locator.
    pub airline_pnr: String,
}

/// Ticket metadata for air-ticket invoices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TicketInfo {
    pub ticket_number: String,
    pub airline: String,
    pub passenger_name: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_collection() {
        assert_eq!(EntityKind::Customer.collection(), "customers");
        assert_eq!(EntityKind::Vendor.collection(), "vendors");
    }

    #[test]
    fn test_entity_kind_parsing() {
        assert_eq!("Customer".parse::<EntityKind>().unwrap(), EntityKind::Customer);
        assert_eq!("vendors".parse::<EntityKind>().unwrap(), EntityKind::Vendor);
        assert!("agent".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_display_label_falls_back_to_id() {
        let named = Candidate::new(EntityKind::Customer, "C-7").with_name("John Smith");
        assert_eq!(named.display_label(), "John Smith");

        let unnamed = Candidate::new(EntityKind::Customer, "C-8");
        assert_eq!(unnamed.display_label(), "C-8");

        let blank = Candidate::new(EntityKind::Vendor, "V-1").with_name("  ");
        assert_eq!(blank.display_label(), "V-1");
    }

    #[test]
    fn test_to_entity_ref_copies_display_attributes() {
        let candidate = Candidate::new(EntityKind::Customer, "C-7")
            .with_name("John Smith")
            .with_phone("01700000000")
            .with_email("john@example.com");

        let entity = candidate.to_entity_ref();
        assert_eq!(entity.id, "C-7");
        assert_eq!(entity.name.as_deref(), Some("John Smith"));
        assert_eq!(entity.phone.as_deref(), Some("01700000000"));
    }
}
