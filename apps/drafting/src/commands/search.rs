//! # Search Commands
//!
//! Customer and vendor search fields.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  keystroke ──► search_entities(kind, text) ──► generation               │
//! │                                                    │                    │
//! │                  (debounce, lookup, commit)        ▼                    │
//! │                                                                         │
//! │  dropdown  ◄── get_search_results(kind)  /  await_search_results(...)  │
//! │                                                                         │
//! │  click hit ──► select_candidate(kind, id) ──► draft.customer / vendor  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookup failures never surface here: they only empty the dropdown.

use std::time::Duration;

use tracing::{debug, info};

use tripdesk_core::{EntityKind, InvoiceSnapshot};
use tripdesk_lookup::SearchSnapshot;

use crate::error::ApiError;
use crate::state::{CatalogState, DraftState, SearchState};

/// Feeds new text into a search field.
///
/// Every call supersedes the previous text, whatever its length. Queries
/// too short or too long clear the results instead of searching.
///
/// ## Returns
/// The generation assigned to this text; pass it to
/// [`await_search_results`] to wait for its results.
pub async fn search_entities(
    search: &SearchState,
    kind: EntityKind,
    query: &str,
) -> Result<u64, ApiError> {
    debug!(%kind, query, "search_entities command");

    Ok(search.resolver(kind).set_query(query).await?)
}

/// Current state of a search field.
pub fn get_search_results(search: &SearchState, kind: EntityKind) -> SearchSnapshot {
    debug!(%kind, "get_search_results command");
    search.resolver(kind).snapshot()
}

/// Waits up to `wait` for `generation` to settle.
///
/// A lookup still running when the wait ends is not an error; the snapshot
/// as it stands is returned.
pub async fn await_search_results(
    search: &SearchState,
    kind: EntityKind,
    generation: u64,
    wait: Duration,
) -> Result<SearchSnapshot, ApiError> {
    let resolver = search.resolver(kind);
    match tokio::time::timeout(wait, resolver.settled(generation)).await {
        Ok(settled) => Ok(settled?),
        Err(_) => {
            debug!(%kind, generation, "Search still pending after wait");
            Ok(resolver.snapshot())
        }
    }
}

/// Puts a candidate from the current results onto the draft.
///
/// ## Arguments
/// * `candidate_id` - Id of one of the candidates currently shown
///
/// ## Returns
/// Updated snapshot with the customer/vendor reference set
pub async fn select_candidate(
    catalog: &CatalogState,
    draft: &DraftState,
    search: &SearchState,
    kind: EntityKind,
    candidate_id: &str,
) -> Result<InvoiceSnapshot, ApiError> {
    debug!(%kind, candidate_id, "select_candidate command");

    let resolver = search.resolver(kind);
    let candidate = resolver
        .snapshot()
        .results
        .into_iter()
        .find(|c| c.id == candidate_id)
        .ok_or_else(|| ApiError::not_found("Candidate", candidate_id))?;

    let entity = resolver.select(&candidate).await?;
    info!(%kind, id = %entity.id, "Candidate selected");

    Ok(catalog.with_catalog(|c| {
        draft.with_draft_mut(|d| {
            match kind {
                EntityKind::Customer => d.customer = Some(entity),
                EntityKind::Vendor => d.vendor = Some(entity),
            }
            d.snapshot(c)
        })
    }))
}
