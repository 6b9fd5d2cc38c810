//! # Tripdesk Drafting Library
//!
//! Session layer for the invoice drafting screen. A UI shell (or the
//! operator console in `main.rs`) builds one [`DraftingSession`] and calls
//! the functions in [`commands`] against it.
//!
//! ## Module Organization
//! ```text
//! tripdesk_drafting_lib/
//! ├── lib.rs          ◄─── You are here (session setup, logging)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── draft.rs    ◄─── Draft state (Mutex<InvoiceDraft>)
//! │   ├── catalog.rs  ◄─── Service catalog state + source
//! │   ├── search.rs   ◄─── Customer/vendor resolver handles
//! │   └── config.rs   ◄─── Display configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Service catalog commands
//! │   ├── draft.rs    ◄─── Draft editing commands
//! │   ├── search.rs   ◄─── Entity search commands
//! │   └── config.rs   ◄─── Configuration retrieval
//! ├── console.rs      ◄─── Operator console line parser/dispatcher
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod console;
pub mod error;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, Subscriber};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use tripdesk_lookup::{ApiClient, CatalogSource, EntitySearchBackend, LookupConfig, ResolverConfig};

use error::ApiError;
use state::{CatalogState, ConfigState, DraftState, SearchState};

/// Extra time the console allows a lookup beyond the debounce period.
const SEARCH_WAIT_MARGIN: Duration = Duration::from_secs(10);

/// Everything one drafting screen holds.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Session Startup                                   │
/// │                                                                         │
/// │  1. Load LookupConfig ─────────────────────────────────────────────────► │
/// │     • defaults < lookup.toml < TRIPDESK_* env                           │
/// │                                                                         │
/// │  2. Build ApiClient ───────────────────────────────────────────────────► │
/// │     • serves as both CatalogSource and EntitySearchBackend              │
/// │                                                                         │
/// │  3. Initialize State Objects ──────────────────────────────────────────► │
/// │     • DraftState: empty draft dated today                               │
/// │     • CatalogState: Loading                                             │
/// │     • SearchState: customer + vendor resolvers spawned                  │
/// │                                                                         │
/// │  4. load_service_catalog ──────────────────────────────────────────────► │
/// │     • first service selected, or selector left empty on failure         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub struct DraftingSession {
    pub draft: DraftState,
    pub catalog: CatalogState,
    pub search: SearchState,
    pub config: ConfigState,
    search_wait: Duration,
}

impl DraftingSession {
    /// Builds a session from explicit collaborators. Must be called inside
    /// a tokio runtime (the resolvers are spawned here).
    pub fn new(
        catalog_source: Arc<dyn CatalogSource>,
        search_backend: Arc<dyn EntitySearchBackend>,
        resolver: ResolverConfig,
        config: ConfigState,
    ) -> Self {
        let search_wait = resolver.debounce + SEARCH_WAIT_MARGIN;

        DraftingSession {
            draft: DraftState::new(),
            catalog: CatalogState::new(catalog_source),
            search: SearchState::spawn(search_backend, resolver),
            config,
            search_wait,
        }
    }

    /// Builds a session talking to the configured back-office API.
    pub fn connect(lookup: &LookupConfig) -> Result<Self, ApiError> {
        lookup.validate()?;
        let client = Arc::new(ApiClient::new(lookup)?);

        info!(api = %lookup.api.base_url, "Drafting session connecting");

        Ok(DraftingSession::new(
            client.clone(),
            client,
            ResolverConfig::from(&lookup.search),
            ConfigState::from_env(lookup.api.base_url.clone()),
        ))
    }

    /// How long the console waits for a search to settle.
    pub fn search_wait(&self) -> Duration {
        self.search_wait
    }

    /// Stops the resolvers. Pending debounce timers are discarded.
    pub async fn shutdown(&self) {
        self.search.shutdown().await;
        info!("Drafting session closed");
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout carries the console's JSON output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tripdesk=trace` - Show trace for tripdesk crates only
/// - Default: `info,tripdesk=debug,reqwest=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    log_subscriber(filter).init();
}

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tripdesk=debug,reqwest=warn";

fn log_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_default_filter_applies() {
        let subscriber = log_subscriber(EnvFilter::new(DEFAULT_LOG_FILTER));

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "tripdesk_lookup::resolver", Level::DEBUG));
            assert!(!tracing::enabled!(target: "tripdesk_lookup::resolver", Level::TRACE));
            assert!(tracing::enabled!(target: "hyper::client", Level::INFO));
            assert!(!tracing::enabled!(target: "hyper::client", Level::DEBUG));
            assert!(!tracing::enabled!(target: "reqwest::connect", Level::INFO));
            assert!(tracing::enabled!(target: "reqwest::connect", Level::WARN));
        });
    }
}
