//! # State Module
//!
//! Manages state for one drafting session.
//!
//! Instead of a single `AppState` struct containing everything, each concern
//! gets its own state type and each command takes only the states it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     DraftingSession                             │   │
//! │  │  session.draft / session.catalog / session.search / .config     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │       ┌──────────────────┬───┴──────────────┬──────────────────┐       │
//! │       ▼                  ▼                  ▼                  ▼        │
//! │  ┌────────────┐  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐  │
//! │  │ DraftState │  │ CatalogState │  │ SearchState  │  │ ConfigState │  │
//! │  │            │  │              │  │              │  │             │  │
//! │  │ Mutex<     │  │ Mutex<       │  │ customer +   │  │ agency,     │  │
//! │  │  Invoice   │  │  Service     │  │ vendor       │  │ currency    │  │
//! │  │  Draft>    │  │  Catalog>    │  │ resolvers    │  │             │  │
//! │  └────────────┘  └──────────────┘  └──────────────┘  └─────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DraftState / CatalogState: Mutex, catalog locked before draft       │
//! │  • SearchState: actor handles, internally synchronized                 │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod draft;
mod search;

pub use catalog::CatalogState;
pub use config::ConfigState;
pub use draft::DraftState;
pub use search::SearchState;
