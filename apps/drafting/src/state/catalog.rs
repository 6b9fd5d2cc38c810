//! # Catalog State
//!
//! The service catalog for this session and the collaborator that loads it.
//!
//! The catalog is fetched once per session. It is read far more often than
//! written (every snapshot classifies the selected service), but a plain
//! `Mutex` keeps the locking story identical to [`DraftState`](super::DraftState).
//! When both are needed the catalog lock is taken first.

use std::sync::{Arc, Mutex, PoisonError};

use tripdesk_core::ServiceCatalog;
use tripdesk_lookup::CatalogSource;

/// Service catalog plus its source.
pub struct CatalogState {
    catalog: Mutex<ServiceCatalog>,
    source: Arc<dyn CatalogSource>,
}

impl CatalogState {
    /// Creates a state with an empty catalog in the `Loading` state.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        CatalogState {
            catalog: Mutex::new(ServiceCatalog::new()),
            source,
        }
    }

    /// The collaborator that fetches services.
    pub fn source(&self) -> Arc<dyn CatalogSource> {
        Arc::clone(&self.source)
    }

    /// Executes a function with read access to the catalog.
    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ServiceCatalog) -> R,
    {
        let catalog = self.catalog.lock().unwrap_or_else(PoisonError::into_inner);
        f(&catalog)
    }

    /// Executes a function with write access to the catalog.
    pub fn with_catalog_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ServiceCatalog) -> R,
    {
        let mut catalog = self.catalog.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut catalog)
    }
}

impl std::fmt::Debug for CatalogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.with_catalog(|c| {
            f.debug_struct("CatalogState")
                .field("status", c.status())
                .field("options", &c.options().len())
                .finish()
        })
    }
}
