//! End-to-end drafting session tests against in-memory collaborators.

mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tripdesk_core::{BookingRefs, CatalogStatus, EntityKind, FlightPlanKind, Money};
use tripdesk_drafting_lib::commands::{catalog, draft, search};
use tripdesk_drafting_lib::error::ErrorCode;

use common::{directory, session, session_with, DownCatalog};

const WAIT: Duration = Duration::from_secs(5);

// =============================================================================
// Service catalog
// =============================================================================

#[tokio::test]
async fn test_catalog_load_selects_first_service() {
    let s = session();

    let response = catalog::load_service_catalog(&s.catalog, &s.draft).await;
    assert_eq!(response.status, CatalogStatus::Ready);
    assert!(response.selectable);
    assert_eq!(response.services.len(), 3);
    assert_eq!(response.selected_service_id, "air-ticket-domestic");

    let snapshot = draft::get_draft_snapshot(&s.catalog, &s.draft);
    assert!(snapshot.air_ticket_class);
}

#[tokio::test]
async fn test_catalog_failure_leaves_selector_empty() {
    let s = session_with(Arc::new(DownCatalog), directory());

    let response = catalog::load_service_catalog(&s.catalog, &s.draft).await;
    assert!(matches!(response.status, CatalogStatus::Failed { .. }));
    assert!(!response.selectable);
    assert!(response.selected_service_id.is_empty());

    let err = catalog::select_service(&s.catalog, &s.draft, "visa-processing").unwrap_err();
    assert_eq!(err.code, ErrorCode::CatalogUnavailable);
}

#[tokio::test]
async fn test_empty_catalog_is_a_failed_load() {
    let s = session_with(Arc::new(common::StaticCatalog(Vec::new())), directory());

    let response = catalog::load_service_catalog(&s.catalog, &s.draft).await;
    assert!(matches!(response.status, CatalogStatus::Failed { .. }));
    assert!(!response.selectable);
    assert!(response.selected_service_id.is_empty());
}

#[tokio::test]
async fn test_select_unknown_service_is_not_found() {
    let s = session();
    catalog::load_service_catalog(&s.catalog, &s.draft).await;

    let err = catalog::select_service(&s.catalog, &s.draft, "cruise").unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);

    let listed = catalog::list_services(&s.catalog, &s.draft);
    assert_eq!(listed.selected_service_id, "air-ticket-domestic");
}

// =============================================================================
// Fare computation through the session
// =============================================================================

#[tokio::test]
async fn test_air_ticket_bill_follows_customer_fare() {
    let s = session();
    catalog::load_service_catalog(&s.catalog, &s.draft).await;

    for (field, value) in [
        ("bill", "99999"),
        ("customer-base-fare", "1,000"),
        ("customer-tax", "200"),
        ("commission", "50"),
        ("discount", "100"),
        ("paid", "500"),
    ] {
        draft::set_draft_field(&s.catalog, &s.draft, field, value).unwrap();
    }

    let totals = draft::get_draft_snapshot(&s.catalog, &s.draft).totals;
    assert_eq!(totals.computed_bill, Money::from_major(1200));
    assert_eq!(totals.amount, Money::from_major(1150));
    assert_eq!(totals.due, Money::from_major(650));
}

#[tokio::test]
async fn test_non_air_service_uses_generic_bill() {
    let s = session();
    catalog::load_service_catalog(&s.catalog, &s.draft).await;
    catalog::select_service(&s.catalog, &s.draft, "visa-processing").unwrap();

    draft::set_draft_field(&s.catalog, &s.draft, "bill", "500").unwrap();
    draft::set_draft_field(&s.catalog, &s.draft, "commission", "50").unwrap();
    let snapshot = draft::set_draft_field(&s.catalog, &s.draft, "discount", "600").unwrap();

    assert!(!snapshot.air_ticket_class);
    assert_eq!(snapshot.totals.computed_bill, Money::from_major(500));
    assert!(snapshot.totals.amount.is_zero());
    assert!(snapshot.totals.due.is_zero());
}

#[tokio::test]
async fn test_garbage_input_degrades_to_zero() {
    let s = session();
    catalog::load_service_catalog(&s.catalog, &s.draft).await;

    let snapshot =
        draft::set_draft_field(&s.catalog, &s.draft, "customer_base_fare", "12abc").unwrap();
    assert!(snapshot.totals.computed_bill.is_zero());
    assert_eq!(snapshot.draft.customer_fare.base_fare, "12abc");
}

#[tokio::test]
async fn test_unknown_field_is_rejected() {
    let s = session();
    let err = draft::set_draft_field(&s.catalog, &s.draft, "fuel-surcharge", "10").unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
}

// =============================================================================
// Dates & flight plan
// =============================================================================

#[tokio::test]
async fn test_invoice_date() {
    let s = session();

    let snapshot = draft::set_invoice_date(&s.catalog, &s.draft, "2026-10-16").unwrap();
    assert_eq!(
        snapshot.draft.invoice_date,
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    );

    let err = draft::set_invoice_date(&s.catalog, &s.draft, "16/10/2026").unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
}

#[tokio::test]
async fn test_round_trip_seeds_return_leg() {
    let s = session();
    catalog::load_service_catalog(&s.catalog, &s.draft).await;
    draft::set_draft_field(&s.catalog, &s.draft, "customer-base-fare", "800").unwrap();

    let before =
        draft::set_flight_leg(&s.catalog, &s.draft, 0, "dac", "cxb", Some("2026-11-01")).unwrap();
    let after = draft::set_flight_kind(&s.catalog, &s.draft, "round-trip").unwrap();

    assert_eq!(after.draft.flight_plan.kind(), FlightPlanKind::RoundTrip);
    let outbound = after.draft.flight_plan.leg(0).unwrap();
    let inbound = after.draft.flight_plan.leg(1).unwrap();
    assert_eq!(outbound.origin, "DAC");
    assert_eq!(inbound.origin, "CXB");
    assert_eq!(inbound.destination, "DAC");
    assert_eq!(inbound.date, None);

    assert_eq!(before.totals, after.totals);
}

#[tokio::test]
async fn test_second_leg_rejected_on_one_way() {
    let s = session();

    let err = draft::set_flight_leg(&s.catalog, &s.draft, 1, "CXB", "DAC", None).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let err = draft::set_flight_kind(&s.catalog, &s.draft, "open-jaw").unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
}

// =============================================================================
// Entity search
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_customer_search_and_pick() {
    let s = session();

    let generation = search::search_entities(&s.search, EntityKind::Customer, "john")
        .await
        .unwrap();
    let results = search::await_search_results(&s.search, EntityKind::Customer, generation, WAIT)
        .await
        .unwrap();
    assert_eq!(results.results.len(), 1);
    assert_eq!(results.results[0].id, "C-1");

    let snapshot =
        search::select_candidate(&s.catalog, &s.draft, &s.search, EntityKind::Customer, "C-1")
            .await
            .unwrap();
    let customer = snapshot.draft.customer.unwrap();
    assert_eq!(customer.name.as_deref(), Some("John Smith"));
    assert_eq!(customer.phone.as_deref(), Some("01711000000"));

    let field = search::get_search_results(&s.search, EntityKind::Customer);
    assert_eq!(field.query, "John Smith");
    assert!(field.results.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_vendor_search_matches_owner_name() {
    let backend = directory();
    let s = session_with(Arc::new(common::StaticCatalog(common::services())), backend.clone());

    let generation = search::search_entities(&s.search, EntityKind::Vendor, "rahim")
        .await
        .unwrap();
    let results = search::await_search_results(&s.search, EntityKind::Vendor, generation, WAIT)
        .await
        .unwrap();

    assert_eq!(results.results.len(), 1);
    assert_eq!(results.results[0].name.as_deref(), Some("Sky Travels"));

    // The customer field never saw a lookup.
    let queries = backend.queries.lock().unwrap().clone();
    assert_eq!(queries, vec![(EntityKind::Vendor, "rahim".to_string())]);
}

#[tokio::test(start_paused = true)]
async fn test_short_query_does_not_search() {
    let backend = directory();
    let s = session_with(Arc::new(common::StaticCatalog(common::services())), backend.clone());

    let generation = search::search_entities(&s.search, EntityKind::Customer, "j")
        .await
        .unwrap();
    let results = search::await_search_results(&s.search, EntityKind::Customer, generation, WAIT)
        .await
        .unwrap();

    assert!(results.results.is_empty());
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(backend.queries.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_pick_unknown_candidate_is_not_found() {
    let s = session();
    let err = search::select_candidate(&s.catalog, &s.draft, &s.search, EntityKind::Vendor, "V-9")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test(start_paused = true)]
async fn test_overlong_query_supersedes_previous_text() {
    let backend = directory();
    let s = session_with(Arc::new(common::StaticCatalog(common::services())), backend.clone());

    search::search_entities(&s.search, EntityKind::Customer, "john")
        .await
        .unwrap();
    let query = format!("john{}", "x".repeat(100));
    let generation = search::search_entities(&s.search, EntityKind::Customer, &query)
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(backend.queries.lock().unwrap().is_empty());

    let field = search::await_search_results(&s.search, EntityKind::Customer, generation, WAIT)
        .await
        .unwrap();
    assert_eq!(field.query, query);
    assert!(field.results.is_empty());
}

// =============================================================================
// Submission & reset
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_check_submission_preconditions() {
    let s = session();
    catalog::load_service_catalog(&s.catalog, &s.draft).await;

    let err = draft::check_submission(&s.catalog, &s.draft).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert_eq!(err.message, "customer is required");

    let generation = search::search_entities(&s.search, EntityKind::Customer, "mary")
        .await
        .unwrap();
    search::await_search_results(&s.search, EntityKind::Customer, generation, WAIT)
        .await
        .unwrap();
    search::select_candidate(&s.catalog, &s.draft, &s.search, EntityKind::Customer, "C-2")
        .await
        .unwrap();

    draft::set_booking_refs(
        &s.catalog,
        &s.draft,
        BookingRefs {
            booking_id: "BK-1001".into(),
            gds_pnr: "AB#12".into(),
            airline_pnr: String::new(),
        },
    )
    .unwrap();
    let err = draft::check_submission(&s.catalog, &s.draft).unwrap_err();
    assert!(err.message.contains("gdsPnr"));

    draft::set_booking_refs(
        &s.catalog,
        &s.draft,
        BookingRefs {
            booking_id: "BK-1001".into(),
            gds_pnr: "AB1234".into(),
            airline_pnr: String::new(),
        },
    )
    .unwrap();
    let snapshot = draft::check_submission(&s.catalog, &s.draft).unwrap();
    assert_eq!(snapshot.draft.customer.unwrap().id, "C-2");
}

#[tokio::test(start_paused = true)]
async fn test_reset_discards_draft_and_search_fields() {
    let s = session();
    catalog::load_service_catalog(&s.catalog, &s.draft).await;
    catalog::select_service(&s.catalog, &s.draft, "hotel-booking").unwrap();
    let before = draft::set_draft_field(&s.catalog, &s.draft, "bill", "750").unwrap();

    let generation = search::search_entities(&s.search, EntityKind::Vendor, "sky")
        .await
        .unwrap();
    search::await_search_results(&s.search, EntityKind::Vendor, generation, WAIT)
        .await
        .unwrap();

    let after = draft::reset_draft(&s.catalog, &s.draft, &s.search).await.unwrap();

    assert_ne!(after.draft.id, before.draft.id);
    assert_eq!(after.draft.service_type_id, "air-ticket-domestic");
    assert!(after.draft.billing.bill.is_empty());
    assert!(after.totals.amount.is_zero());

    let vendor_field = search::get_search_results(&s.search, EntityKind::Vendor);
    assert!(vendor_field.query.is_empty());
    assert!(vendor_field.results.is_empty());

    s.shutdown().await;
}
