//! # Fare Computation
//!
//! Derives every read-only total on the drafting form from the raw field
//! text. One pure function, called after any tracked field changes.
//!
//! ## Derivation Graph
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Derived Totals                                   │
//! │                                                                         │
//! │  air-ticket class?                                                     │
//! │     ├─ yes: computed_bill = customer base fare + customer tax          │
//! │     └─ no:  computed_bill = bill                                       │
//! │                                                                         │
//! │  amount = max(0, computed_bill + commission - discount)                │
//! │  due    = max(0, amount - paid)                                        │
//! │                                                                         │
//! │  customer_total_fare = max(0, (base + tax - commission) + ait + svc)   │
//! │  vendor_total_fare   = same formula over the vendor-side fields        │
//! │                                                                         │
//! │  Every input is parsed with Money::parse_lenient (garbage → 0).        │
//! │  Every output is clamped at zero. Nothing here can fail.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Trigger List
//! The totals depend on: the service classification, the four billing
//! fields, and the ten fare-group fields. Flight-plan data, booking
//! references and customer/vendor selection are never read.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Raw Field Groups
// =============================================================================

/// Generic billing group, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillingFields {
    pub bill: String,
    pub commission: String,
    pub discount: String,
    pub paid: String,
}

/// One side (customer or vendor) of the air-fare group, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FareFields {
    pub base_fare: String,
    pub tax: String,
    pub commission: String,
    /// Advance income tax.
    pub ait: String,
    pub service_charge: String,
}

impl FareFields {
    /// `max(0, (base + tax - commission) + ait + service charge)`.
    ///
    /// Commission only reduces the base+tax subtotal; AIT and the service
    /// charge are added after it and never reduced.
    pub fn total_fare(&self) -> Money {
        let subtotal = Money::parse_lenient(&self.base_fare) + Money::parse_lenient(&self.tax)
            - Money::parse_lenient(&self.commission);

        (subtotal + Money::parse_lenient(&self.ait) + Money::parse_lenient(&self.service_charge))
            .clamp_non_negative()
    }

    /// Base fare plus tax, used as the bill for air-ticket invoices.
    pub fn base_plus_tax(&self) -> Money {
        (Money::parse_lenient(&self.base_fare) + Money::parse_lenient(&self.tax))
            .clamp_non_negative()
    }
}

// =============================================================================
// Inputs & Outputs
// =============================================================================

/// Everything the totals depend on, borrowed from the draft.
#[derive(Debug, Clone, Copy)]
pub struct FareInputs<'a> {
    pub air_ticket_class: bool,
    pub billing: &'a BillingFields,
    pub customer_fare: &'a FareFields,
    pub vendor_fare: &'a FareFields,
}

/// The derived, read-only totals shown on the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DerivedTotals {
    pub computed_bill: Money,
    pub amount: Money,
    pub due: Money,
    pub customer_total_fare: Money,
    pub vendor_total_fare: Money,
}

/// Recomputes all derived totals.
///
/// ## Example
/// ```rust
/// use tripdesk_core::fare::{compute_totals, BillingFields, FareFields, FareInputs};
///
/// let billing = BillingFields {
///     bill: "500".into(),
///     commission: "50".into(),
///     discount: "600".into(),
///     paid: "".into(),
/// };
/// let fares = FareFields::default();
///
/// let totals = compute_totals(FareInputs {
///     air_ticket_class: false,
///     billing: &billing,
///     customer_fare: &fares,
///     vendor_fare: &fares,
/// });
/// assert!(totals.amount.is_zero()); // 500 + 50 - 600 clamps to 0
/// ```
pub fn compute_totals(inputs: FareInputs<'_>) -> DerivedTotals {
    let computed_bill = if inputs.air_ticket_class {
        inputs.customer_fare.base_plus_tax()
    } else {
        Money::parse_lenient(&inputs.billing.bill).clamp_non_negative()
    };

    let amount = (computed_bill + Money::parse_lenient(&inputs.billing.commission)
        - Money::parse_lenient(&inputs.billing.discount))
    .clamp_non_negative();

    let due = (amount - Money::parse_lenient(&inputs.billing.paid)).clamp_non_negative();

    DerivedTotals {
        computed_bill,
        amount,
        due,
        customer_total_fare: inputs.customer_fare.total_fare(),
        vendor_total_fare: inputs.vendor_fare.total_fare(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn billing(bill: &str, commission: &str, discount: &str, paid: &str) -> BillingFields {
        BillingFields {
            bill: bill.into(),
            commission: commission.into(),
            discount: discount.into(),
            paid: paid.into(),
        }
    }

    fn fares(base: &str, tax: &str, commission: &str, ait: &str, svc: &str) -> FareFields {
        FareFields {
            base_fare: base.into(),
            tax: tax.into(),
            commission: commission.into(),
            ait: ait.into(),
            service_charge: svc.into(),
        }
    }

    fn totals(air: bool, billing: &BillingFields, customer: &FareFields) -> DerivedTotals {
        compute_totals(FareInputs {
            air_ticket_class: air,
            billing,
            customer_fare: customer,
            vendor_fare: &FareFields::default(),
        })
    }

    #[test]
    fn test_amount_clamps_at_zero() {
        let t = totals(false, &billing("500", "50", "600", ""), &FareFields::default());
        assert_eq!(t.computed_bill, Money::from_major(500));
        assert_eq!(t.amount, Money::zero());
    }

    #[test]
    fn test_due_clamps_at_zero() {
        let t = totals(false, &billing("1000", "", "", "1500"), &FareFields::default());
        assert_eq!(t.amount, Money::from_major(1000));
        assert_eq!(t.due, Money::zero());
    }

    #[test]
    fn test_amount_and_due_happy_path() {
        let t = totals(false, &billing("1000", "100", "50", "300"), &FareFields::default());
        assert_eq!(t.amount, Money::from_major(1050));
        assert_eq!(t.due, Money::from_major(750));
    }

    #[test]
    fn test_customer_total_fare_formula() {
        let customer = fares("1000", "100", "50", "20", "30");
        assert_eq!(customer.total_fare(), Money::from_major(1100));
    }

    #[test]
    fn test_commission_never_reduces_ait_or_service_charge() {
        // (100 + 0 - 500) clamps only at the end: -400 + 20 + 30 = -350 → 0
        let customer = fares("100", "", "500", "20", "30");
        assert_eq!(customer.total_fare(), Money::zero());

        let customer = fares("100", "", "50", "20", "30");
        assert_eq!(customer.total_fare(), Money::from_major(100));
    }

    #[test]
    fn test_air_ticket_bill_ignores_generic_bill() {
        let customer = fares("1000", "100", "", "", "");
        let first = totals(true, &billing("5", "", "", ""), &customer);
        let second = totals(true, &billing("99999", "", "", ""), &customer);

        assert_eq!(first.computed_bill, Money::from_major(1100));
        assert_eq!(first, second);
    }

    #[test]
    fn test_air_ticket_bill_follows_base_and_tax() {
        let b = billing("", "", "", "");
        let before = totals(true, &b, &fares("1000", "100", "", "", ""));
        let after_base = totals(true, &b, &fares("1200", "100", "", "", ""));
        let after_tax = totals(true, &b, &fares("1000", "150", "", "", ""));

        assert_eq!(before.computed_bill, Money::from_major(1100));
        assert_eq!(after_base.computed_bill, Money::from_major(1300));
        assert_eq!(after_tax.computed_bill, Money::from_major(1150));
    }

    #[test]
    fn test_garbage_input_degrades_to_zero() {
        let t = totals(false, &billing("abc", "??", "", "-"), &fares("x", "", "", "", ""));
        assert_eq!(t, DerivedTotals::default());
    }

    #[test]
    fn test_negative_bill_clamps() {
        let t = totals(false, &billing("-250", "", "", ""), &FareFields::default());
        assert_eq!(t.computed_bill, Money::zero());
        assert_eq!(t.amount, Money::zero());
    }

    #[test]
    fn test_vendor_side_is_independent() {
        let vendor = fares("900", "100", "10", "5", "0");
        let t = compute_totals(FareInputs {
            air_ticket_class: true,
            billing: &BillingFields::default(),
            customer_fare: &FareFields::default(),
            vendor_fare: &vendor,
        });
        assert_eq!(t.vendor_total_fare, Money::from_major(995));
        assert_eq!(t.customer_total_fare, Money::zero());
        assert_eq!(t.computed_bill, Money::zero());
    }
}
