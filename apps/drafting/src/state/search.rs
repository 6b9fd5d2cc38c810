//! # Search State
//!
//! The two entity search fields of the drafting form.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SearchState                                                            │
//! │                                                                         │
//! │   customer ──► ResolverHandle ──► resolver actor (own generation)       │
//! │   vendor   ──► ResolverHandle ──► resolver actor (own generation)       │
//! │                                                                         │
//! │   Typing in one field never supersedes a lookup in the other.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handles are internally synchronized, so no mutex here.

use std::sync::Arc;

use tripdesk_core::EntityKind;
use tripdesk_lookup::{EntityResolver, EntitySearchBackend, ResolverConfig, ResolverHandle};

/// Resolver handles for the customer and vendor fields.
#[derive(Clone)]
pub struct SearchState {
    customer: ResolverHandle,
    vendor: ResolverHandle,
}

impl SearchState {
    /// Spawns one resolver per field. Must be called inside a tokio runtime.
    pub fn spawn(backend: Arc<dyn EntitySearchBackend>, config: ResolverConfig) -> Self {
        SearchState {
            customer: EntityResolver::spawn(EntityKind::Customer, backend.clone(), config.clone()),
            vendor: EntityResolver::spawn(EntityKind::Vendor, backend, config),
        }
    }

    /// The resolver behind the field for `kind`.
    pub fn resolver(&self, kind: EntityKind) -> &ResolverHandle {
        match kind {
            EntityKind::Customer => &self.customer,
            EntityKind::Vendor => &self.vendor,
        }
    }

    /// Stops both resolvers.
    pub async fn shutdown(&self) {
        // Already-stopped resolvers are fine here.
        let _ = self.customer.shutdown().await;
        let _ = self.vendor.shutdown().await;
    }
}
