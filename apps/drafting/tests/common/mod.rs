//! Shared collaborators for drafting session tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use tripdesk_core::{Candidate, EntityKind, ServiceOption};
use tripdesk_drafting_lib::state::ConfigState;
use tripdesk_drafting_lib::DraftingSession;
use tripdesk_lookup::{
    CatalogSource, EntitySearchBackend, LookupError, LookupResult, ResolverConfig, SearchPayload,
};

/// Catalog source answering from a fixed list.
pub struct StaticCatalog(pub Vec<ServiceOption>);

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch_services(&self) -> LookupResult<Vec<ServiceOption>> {
        Ok(self.0.clone())
    }
}

/// Catalog source that always fails.
pub struct DownCatalog;

#[async_trait]
impl CatalogSource for DownCatalog {
    async fn fetch_services(&self) -> LookupResult<Vec<ServiceOption>> {
        Err(LookupError::HttpStatus {
            status: 503,
            path: "/api/services".into(),
        })
    }
}

/// Unfiltered customer/vendor directory.
pub struct Directory {
    pub customers: Vec<Candidate>,
    pub vendors: Vec<Candidate>,
    pub queries: Mutex<Vec<(EntityKind, String)>>,
}

#[async_trait]
impl EntitySearchBackend for Directory {
    async fn search(&self, kind: EntityKind, query: &str) -> LookupResult<SearchPayload> {
        self.queries.lock().unwrap().push((kind, query.to_string()));
        let candidates = match kind {
            EntityKind::Customer => self.customers.clone(),
            EntityKind::Vendor => self.vendors.clone(),
        };
        Ok(SearchPayload::unfiltered(candidates))
    }
}

pub fn services() -> Vec<ServiceOption> {
    vec![
        ServiceOption::new("air-ticket-domestic", "Domestic Air Ticket"),
        ServiceOption::new("visa-processing", "Visa Processing"),
        ServiceOption::new("hotel-booking", "Hotel Booking"),
    ]
}

pub fn directory() -> Arc<Directory> {
    let mut sky = Candidate::new(EntityKind::Vendor, "V-1").with_name("Sky Travels");
    sky.owner_name = Some("Rahim Uddin".to_string());

    Arc::new(Directory {
        customers: vec![
            Candidate::new(EntityKind::Customer, "C-1")
                .with_name("John Smith")
                .with_phone("01711000000"),
            Candidate::new(EntityKind::Customer, "C-2").with_name("Mary Jones"),
        ],
        vendors: vec![sky, Candidate::new(EntityKind::Vendor, "V-2").with_name("Blue Sea Tours")],
        queries: Mutex::new(Vec::new()),
    })
}

pub fn session_with(catalog: Arc<dyn CatalogSource>, backend: Arc<Directory>) -> DraftingSession {
    DraftingSession::new(
        catalog,
        backend,
        ResolverConfig::default(),
        ConfigState::default(),
    )
}

pub fn session() -> DraftingSession {
    session_with(Arc::new(StaticCatalog(services())), directory())
}
