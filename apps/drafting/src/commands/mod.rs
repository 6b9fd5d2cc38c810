//! # Commands Module
//!
//! Every operation the UI shell (or the operator console) can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── Service catalog load/list/select
//! ├── draft.rs    ◄─── Field edits, flight plan, snapshot, reset, check
//! ├── search.rs   ◄─── Customer/vendor search and selection
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  UI shell / console                                                     │
//! │  ──────────────────                                                     │
//! │  set_draft_field(&session.catalog, &session.draft,                      │
//! │                  "customer-base-fare", "1,200")                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Rust command                                                           │
//! │  ────────────                                                           │
//! │  takes only the states it needs, returns Result<T, ApiError>            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  T and ApiError both serialize to camelCase JSON                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Command Signatures
//! ```rust,ignore
//! // Catalog
//! async fn load_service_catalog(catalog: &CatalogState, draft: &DraftState) -> CatalogResponse
//! fn select_service(catalog, draft, service_id: &str) -> Result<InvoiceSnapshot, ApiError>
//!
//! // Draft
//! fn set_draft_field(catalog, draft, field: &str, value: &str) -> Result<InvoiceSnapshot, ApiError>
//! fn check_submission(catalog, draft) -> Result<InvoiceSnapshot, ApiError>
//!
//! // Search
//! async fn search_entities(search, kind, query: &str) -> Result<u64, ApiError>
//! async fn select_candidate(catalog, draft, search, kind, id: &str) -> Result<InvoiceSnapshot, ApiError>
//! ```

pub mod catalog;
pub mod config;
pub mod draft;
pub mod search;
