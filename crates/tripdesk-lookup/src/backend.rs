//! # Collaborator Traits
//!
//! The seams between the drafting engine and the back-office API.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   EntityResolver ──► Arc<dyn EntitySearchBackend> ──┬──► ApiClient     │
//! │                                                     └──► test doubles  │
//! │                                                                         │
//! │   CatalogState   ──► Arc<dyn CatalogSource> ────────┬──► ApiClient     │
//! │                                                     └──► test doubles  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;

use tripdesk_core::{Candidate, EntityKind, ServiceOption};

use crate::error::LookupResult;

/// One search response, before the fallback filter and the cap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPayload {
    pub candidates: Vec<Candidate>,
    /// The backend already filtered by the query.
    pub server_filtered: bool,
}

impl SearchPayload {
    pub fn unfiltered(candidates: Vec<Candidate>) -> Self {
        SearchPayload {
            candidates,
            server_filtered: false,
        }
    }

    pub fn filtered(candidates: Vec<Candidate>) -> Self {
        SearchPayload {
            candidates,
            server_filtered: true,
        }
    }
}

/// Customer/vendor directory search.
///
/// `query` is passed through untrimmed, as the operator typed it.
#[async_trait]
pub trait EntitySearchBackend: Send + Sync {
    async fn search(&self, kind: EntityKind, query: &str) -> LookupResult<SearchPayload>;
}

/// Service catalog source, fetched once per drafting session.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_services(&self) -> LookupResult<Vec<ServiceOption>>;
}
