//! # Catalog Commands
//!
//! Loading the service catalog and picking a service.
//!
//! ## Catalog Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Lifecycle                                    │
//! │                                                                         │
//! │  ┌──────────┐  load_service_catalog  ┌──────────┐                      │
//! │  │ Loading  │───────── ok ──────────►│  Ready   │──► first service     │
//! │  │          │                        │          │    selected          │
//! │  └────┬─────┘                        └──────────┘                      │
//! │       │ error                                                           │
//! │       ▼                                                                 │
//! │  ┌──────────┐                                                           │
//! │  │  Failed  │  selector stays empty, logged only, no retry             │
//! │  └──────────┘                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use tripdesk_core::{CatalogStatus, InvoiceSnapshot, ServiceCatalog, ServiceOption};

use crate::error::ApiError;
use crate::state::{CatalogState, DraftState};

/// Catalog response for the service selector.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub status: CatalogStatus,
    pub services: Vec<ServiceOption>,
    /// The selector is disabled while this is false.
    pub selectable: bool,
    pub selected_service_id: String,
}

impl CatalogResponse {
    fn build(catalog: &ServiceCatalog, selected_service_id: String) -> Self {
        CatalogResponse {
            status: catalog.status().clone(),
            services: catalog.options().to_vec(),
            selectable: catalog.is_selectable(),
            selected_service_id,
        }
    }
}

/// Fetches the service catalog and points the draft at a member of it.
///
/// A failed fetch is not an error for the caller: the catalog moves to
/// `Failed`, the failure is logged and the selector stays empty.
pub async fn load_service_catalog(catalog: &CatalogState, draft: &DraftState) -> CatalogResponse {
    debug!("load_service_catalog command");

    // Fetch without holding any lock.
    let fetched = catalog.source().fetch_services().await;

    catalog.with_catalog_mut(|c| match fetched {
        Ok(options) => {
            c.replace(options);
            if c.is_selectable() {
                info!(services = c.options().len(), "Service catalog loaded");
            } else {
                warn!("Service catalog loaded with no services");
            }
        }
        Err(e) => {
            warn!(error = %e, "Service catalog failed to load");
            c.mark_failed(e.to_string());
        }
    });

    catalog.with_catalog(|c| {
        let selected = draft.with_draft_mut(|d| {
            d.apply_catalog(c);
            d.service_type_id.clone()
        });
        CatalogResponse::build(c, selected)
    })
}

/// Current catalog contents and selection.
pub fn list_services(catalog: &CatalogState, draft: &DraftState) -> CatalogResponse {
    debug!("list_services command");
    catalog.with_catalog(|c| {
        let selected = draft.with_draft(|d| d.service_type_id.clone());
        CatalogResponse::build(c, selected)
    })
}

/// Selects a service from the catalog.
///
/// ## Returns
/// Updated snapshot (the service class may change how the bill is derived)
pub fn select_service(
    catalog: &CatalogState,
    draft: &DraftState,
    service_id: &str,
) -> Result<InvoiceSnapshot, ApiError> {
    debug!(service_id, "select_service command");

    catalog.with_catalog(|c| {
        draft.with_draft_mut(|d| {
            d.select_service(c, service_id)?;
            Ok::<_, ApiError>(d.snapshot(c))
        })
    })
}
