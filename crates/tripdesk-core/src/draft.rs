//! # Invoice Draft
//!
//! The mutable working record behind the drafting form, and the snapshot
//! handed to the submission collaborator.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Draft Lifecycle                                   │
//! │                                                                         │
//! │   screen opens ──► InvoiceDraft::new() ──► operator edits fields        │
//! │                                                │                        │
//! │                          every edit ──► snapshot() recomputes totals    │
//! │                                                │                        │
//! │   navigation away / submitted ──► reset() ──► fresh empty draft         │
//! │                                  (catalog's first service selected)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Numeric fields are stored as the raw text the operator typed. Parsing
//! happens only inside fare computation, so a half-typed value such as
//! `"12."` survives round trips through the UI untouched.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::fare::{compute_totals, BillingFields, DerivedTotals, FareFields, FareInputs};
use crate::flight::FlightPlan;
use crate::service::ServiceCatalog;
use crate::types::{BookingRefs, EntityRef, TicketInfo};

// =============================================================================
// Invoice Draft
// =============================================================================

/// One invoice being composed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    #[ts(as = "String")]
    pub id: Uuid,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub invoice_date: NaiveDate,

    pub booking: BookingRefs,
    pub ticket: TicketInfo,

    /// Catalog id of the selected service; empty until the catalog loads.
    pub service_type_id: String,

    pub customer: Option<EntityRef>,
    pub vendor: Option<EntityRef>,

    pub billing: BillingFields,
    pub customer_fare: FareFields,
    pub vendor_fare: FareFields,

    pub flight_plan: FlightPlan,
}

impl Default for InvoiceDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceDraft {
    /// Creates an empty draft dated today.
    pub fn new() -> Self {
        let now = Utc::now();
        InvoiceDraft {
            id: Uuid::new_v4(),
            created_at: now,
            invoice_date: now.date_naive(),
            booking: BookingRefs::default(),
            ticket: TicketInfo::default(),
            service_type_id: String::new(),
            customer: None,
            vendor: None,
            billing: BillingFields::default(),
            customer_fare: FareFields::default(),
            vendor_fare: FareFields::default(),
            flight_plan: FlightPlan::default(),
        }
    }

    /// Points `service_type_id` at a catalog member.
    ///
    /// Called after every catalog (re)load. Leaves the selection alone while
    /// the catalog is empty.
    pub fn apply_catalog(&mut self, catalog: &ServiceCatalog) {
        if let Some(id) = catalog.resolve_selection(&self.service_type_id) {
            self.service_type_id = id;
        }
    }

    /// Selects a service the operator picked from the catalog.
    pub fn select_service(&mut self, catalog: &ServiceCatalog, id: &str) -> CoreResult<()> {
        let option = catalog.select(id)?;
        self.service_type_id = option.id.clone();
        Ok(())
    }

    /// Writes raw text into one of the numeric fields.
    pub fn set_field(&mut self, field: DraftField, text: impl Into<String>) {
        *self.field_mut(field) = text.into();
    }

    /// Reads the raw text of one of the numeric fields.
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Bill => &self.billing.bill,
            DraftField::Commission => &self.billing.commission,
            DraftField::Discount => &self.billing.discount,
            DraftField::Paid => &self.billing.paid,
            DraftField::CustomerBaseFare => &self.customer_fare.base_fare,
            DraftField::CustomerTax => &self.customer_fare.tax,
            DraftField::CustomerCommission => &self.customer_fare.commission,
            DraftField::Ait => &self.customer_fare.ait,
            DraftField::ServiceCharge => &self.customer_fare.service_charge,
            DraftField::VendorBaseFare => &self.vendor_fare.base_fare,
            DraftField::VendorTax => &self.vendor_fare.tax,
            DraftField::VendorCommission => &self.vendor_fare.commission,
            DraftField::VendorAit => &self.vendor_fare.ait,
            DraftField::VendorServiceCharge => &self.vendor_fare.service_charge,
        }
    }

    fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Bill => &mut self.billing.bill,
            DraftField::Commission => &mut self.billing.commission,
            DraftField::Discount => &mut self.billing.discount,
            DraftField::Paid => &mut self.billing.paid,
            DraftField::CustomerBaseFare => &mut self.customer_fare.base_fare,
            DraftField::CustomerTax => &mut self.customer_fare.tax,
            DraftField::CustomerCommission => &mut self.customer_fare.commission,
            DraftField::Ait => &mut self.customer_fare.ait,
            DraftField::ServiceCharge => &mut self.customer_fare.service_charge,
            DraftField::VendorBaseFare => &mut self.vendor_fare.base_fare,
            DraftField::VendorTax => &mut self.vendor_fare.tax,
            DraftField::VendorCommission => &mut self.vendor_fare.commission,
            DraftField::VendorAit => &mut self.vendor_fare.ait,
            DraftField::VendorServiceCharge => &mut self.vendor_fare.service_charge,
        }
    }

    /// Whether the selected service is air-ticket class.
    pub fn is_air_ticket_class(&self, catalog: &ServiceCatalog) -> bool {
        catalog.classify(&self.service_type_id)
    }

    /// Recomputes the derived totals for the current field values.
    pub fn totals(&self, catalog: &ServiceCatalog) -> DerivedTotals {
        compute_totals(FareInputs {
            air_ticket_class: self.is_air_ticket_class(catalog),
            billing: &self.billing,
            customer_fare: &self.customer_fare,
            vendor_fare: &self.vendor_fare,
        })
    }

    /// The fully computed artifact for display or submission.
    pub fn snapshot(&self, catalog: &ServiceCatalog) -> InvoiceSnapshot {
        InvoiceSnapshot {
            air_ticket_class: self.is_air_ticket_class(catalog),
            totals: self.totals(catalog),
            draft: self.clone(),
        }
    }

    /// Discards everything and starts over, keeping the catalog's first
    /// service selected.
    pub fn reset(&mut self, catalog: &ServiceCatalog) {
        *self = InvoiceDraft::new();
        self.apply_catalog(catalog);
    }
}

// =============================================================================
// Invoice Snapshot
// =============================================================================

/// The draft plus everything derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSnapshot {
    pub draft: InvoiceDraft,
    pub totals: DerivedTotals,
    pub air_ticket_class: bool,
}

// =============================================================================
// Draft Field
// =============================================================================

/// Every free-text numeric field on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum DraftField {
    Bill,
    Commission,
    Discount,
    Paid,
    CustomerBaseFare,
    CustomerTax,
    CustomerCommission,
    Ait,
    ServiceCharge,
    VendorBaseFare,
    VendorTax,
    VendorCommission,
    VendorAit,
    VendorServiceCharge,
}

impl DraftField {
    pub const ALL: [DraftField; 14] = [
        DraftField::Bill,
        DraftField::Commission,
        DraftField::Discount,
        DraftField::Paid,
        DraftField::CustomerBaseFare,
        DraftField::CustomerTax,
        DraftField::CustomerCommission,
        DraftField::Ait,
        DraftField::ServiceCharge,
        DraftField::VendorBaseFare,
        DraftField::VendorTax,
        DraftField::VendorCommission,
        DraftField::VendorAit,
        DraftField::VendorServiceCharge,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            DraftField::Bill => "bill",
            DraftField::Commission => "commission",
            DraftField::Discount => "discount",
            DraftField::Paid => "paid",
            DraftField::CustomerBaseFare => "customer-base-fare",
            DraftField::CustomerTax => "customer-tax",
            DraftField::CustomerCommission => "customer-commission",
            DraftField::Ait => "ait",
            DraftField::ServiceCharge => "service-charge",
            DraftField::VendorBaseFare => "vendor-base-fare",
            DraftField::VendorTax => "vendor-tax",
            DraftField::VendorCommission => "vendor-commission",
            DraftField::VendorAit => "vendor-ait",
            DraftField::VendorServiceCharge => "vendor-service-charge",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts kebab-case (`customer-base-fare`), snake_case and the camelCase
/// form names (`customerBaseFare`).
impl FromStr for DraftField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squashed: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        DraftField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str().replace('-', "") == squashed)
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
