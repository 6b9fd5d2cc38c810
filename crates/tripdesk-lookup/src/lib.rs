//! # tripdesk-lookup: Remote Collaborators for Invoice Drafting
//!
//! Everything in the drafting flow that waits on the network lives here:
//! the service catalog fetch and the customer/vendor search fields.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Lookup Layer                                    │
//! │                                                                         │
//! │   keystrokes                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────┐   Arc<dyn EntitySearchBackend>   ┌─────────────┐ │
//! │  │  EntityResolver  │─────────────────────────────────►│  ApiClient  │ │
//! │  │  (one per field) │                                  │  (reqwest)  │ │
//! │  │                  │◄──────── SearchPayload ──────────│             │ │
//! │  │  debounce        │                                  │ /customers  │ │
//! │  │  generation gate │   Arc<dyn CatalogSource>         │ /vendors    │ │
//! │  │  filter + cap    │                                  │ /services   │ │
//! │  └────────┬─────────┘   drafting app ─────────────────►│             │ │
//! │           │                                            └──────┬──────┘ │
//! │           ▼ watch<SearchSnapshot>                             │        │
//! │      search dropdown                                   records.rs     │
//! │                                                        (wire shapes)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`backend`] - Collaborator traits (`EntitySearchBackend`, `CatalogSource`)
//! - [`config`] - Lookup configuration (API URL, debounce, result cap)
//! - [`error`] - Lookup error types
//! - [`filter`] - Local fallback filter and result cap
//! - [`http`] - reqwest implementation of both collaborators
//! - [`records`] - Wire record shapes and their field aliases
//! - [`resolver`] - Debounced, race-safe search actor
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tripdesk_core::EntityKind;
//! use tripdesk_lookup::{ApiClient, EntityResolver, LookupConfig, ResolverConfig};
//!
//! let config = LookupConfig::load_or_default(None);
//! let client = Arc::new(ApiClient::new(&config)?);
//!
//! let customers = EntityResolver::spawn(
//!     EntityKind::Customer,
//!     client.clone(),
//!     ResolverConfig::from(&config.search),
//! );
//!
//! let generation = customers.set_query("john").await?;
//! let snapshot = customers.settled(generation).await?;
//! println!("{} candidates", snapshot.results.len());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod config;
pub mod error;
pub mod filter;
pub mod http;
pub mod records;
pub mod resolver;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{CatalogSource, EntitySearchBackend, SearchPayload};
pub use config::{ApiSettings, LookupConfig, SearchSettings};
pub use error::{LookupError, LookupResult};
pub use http::ApiClient;
pub use resolver::{EntityResolver, ResolverConfig, ResolverHandle, SearchSnapshot, SearchStats};
