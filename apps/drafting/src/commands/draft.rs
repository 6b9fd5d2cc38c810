//! # Draft Commands
//!
//! Editing the invoice draft and reading back its computed snapshot.
//!
//! Every edit returns the full [`InvoiceSnapshot`] so the form can redraw
//! its derived totals without a second round trip.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operator types "1,200" into Customer Base Fare                         │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  set_draft_field('customer-base-fare', '1,200')                         │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  1. Raw text stored as typed                                   │    │
//! │  │  2. Totals recomputed (air ticket? bill = base fare + tax)     │    │
//! │  │  3. Snapshot returned                                          │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  Bill / Amount / Due boxes redraw                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use tracing::{debug, info};

use tripdesk_core::validation::validate_for_submission;
use tripdesk_core::{
    BookingRefs, DraftField, EntityKind, FlightLeg, FlightPlanKind, InvoiceDraft, InvoiceSnapshot,
    TicketInfo,
};

use crate::error::ApiError;
use crate::state::{CatalogState, DraftState, SearchState};

/// Accepted invoice/segment date format.
const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(field: &str, text: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| ApiError::validation(format!("{} must be a date (YYYY-MM-DD)", field)))
}

/// Runs an edit against the draft and returns the recomputed snapshot.
fn edit<F>(catalog: &CatalogState, draft: &DraftState, f: F) -> Result<InvoiceSnapshot, ApiError>
where
    F: FnOnce(&mut InvoiceDraft) -> Result<(), ApiError>,
{
    catalog.with_catalog(|c| {
        draft.with_draft_mut(|d| {
            f(d)?;
            Ok::<_, ApiError>(d.snapshot(c))
        })
    })
}

/// Writes raw text into one numeric field.
///
/// ## Arguments
/// * `field` - Field name, e.g. `customer-base-fare` (case and `_`/`-` insensitive)
/// * `value` - Text exactly as typed; never rejected
pub fn set_draft_field(
    catalog: &CatalogState,
    draft: &DraftState,
    field: &str,
    value: &str,
) -> Result<InvoiceSnapshot, ApiError> {
    debug!(field, value, "set_draft_field command");

    let field: DraftField = field.parse()?;
    edit(catalog, draft, |d| {
        d.set_field(field, value);
        Ok(())
    })
}

/// Sets the invoice date.
pub fn set_invoice_date(
    catalog: &CatalogState,
    draft: &DraftState,
    date: &str,
) -> Result<InvoiceSnapshot, ApiError> {
    debug!(date, "set_invoice_date command");

    let date = parse_date("invoiceDate", date)?;
    edit(catalog, draft, |d| {
        d.invoice_date = date;
        Ok(())
    })
}

/// Replaces the booking references.
///
/// Format checks run at submission time, not here.
pub fn set_booking_refs(
    catalog: &CatalogState,
    draft: &DraftState,
    booking: BookingRefs,
) -> Result<InvoiceSnapshot, ApiError> {
    debug!(?booking, "set_booking_refs command");
    edit(catalog, draft, |d| {
        d.booking = booking;
        Ok(())
    })
}

/// Replaces the ticket metadata.
pub fn set_ticket_info(
    catalog: &CatalogState,
    draft: &DraftState,
    ticket: TicketInfo,
) -> Result<InvoiceSnapshot, ApiError> {
    debug!(?ticket, "set_ticket_info command");
    edit(catalog, draft, |d| {
        d.ticket = ticket;
        Ok(())
    })
}

/// Switches the flight plan variant (`one-way`, `round-trip`, `multi-city`).
pub fn set_flight_kind(
    catalog: &CatalogState,
    draft: &DraftState,
    kind: &str,
) -> Result<InvoiceSnapshot, ApiError> {
    debug!(kind, "set_flight_kind command");

    let kind: FlightPlanKind = kind.parse()?;
    edit(catalog, draft, |d| {
        d.flight_plan.switch_to(kind);
        Ok(())
    })
}

/// Writes one leg of the active flight plan.
///
/// ## Arguments
/// * `index` - 0 for the first leg, 1 for the return/second segment
/// * `date` - Optional `YYYY-MM-DD`; blank clears the date
pub fn set_flight_leg(
    catalog: &CatalogState,
    draft: &DraftState,
    index: usize,
    origin: &str,
    destination: &str,
    date: Option<&str>,
) -> Result<InvoiceSnapshot, ApiError> {
    debug!(index, origin, destination, ?date, "set_flight_leg command");

    let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(text) => Some(parse_date("flightDate", text)?),
        None => None,
    };
    let leg = FlightLeg::new(origin, destination, date);

    edit(catalog, draft, |d| {
        d.flight_plan.set_leg(index, leg)?;
        Ok(())
    })
}

/// Gets the current draft with its derived totals.
pub fn get_draft_snapshot(catalog: &CatalogState, draft: &DraftState) -> InvoiceSnapshot {
    debug!("get_draft_snapshot command");
    catalog.with_catalog(|c| draft.with_draft(|d| d.snapshot(c)))
}

/// Discards the draft and both search fields.
///
/// ## When Used
/// - Operator navigates away from the drafting screen
/// - After the submission collaborator accepted the invoice
pub async fn reset_draft(
    catalog: &CatalogState,
    draft: &DraftState,
    search: &SearchState,
) -> Result<InvoiceSnapshot, ApiError> {
    debug!("reset_draft command");

    let snapshot = catalog.with_catalog(|c| {
        draft.with_draft_mut(|d| {
            d.reset(c);
            d.snapshot(c)
        })
    });

    search.resolver(EntityKind::Customer).clear().await?;
    search.resolver(EntityKind::Vendor).clear().await?;

    info!(draft_id = %snapshot.draft.id, "Draft reset");
    Ok(snapshot)
}

/// Checks submission preconditions.
///
/// ## Returns
/// The snapshot to hand to the submission collaborator, or the first
/// operator-visible validation failure
pub fn check_submission(
    catalog: &CatalogState,
    draft: &DraftState,
) -> Result<InvoiceSnapshot, ApiError> {
    debug!("check_submission command");

    catalog.with_catalog(|c| {
        draft.with_draft(|d| {
            validate_for_submission(d, c)?;
            Ok::<_, ApiError>(d.snapshot(c))
        })
    })
}
