//! # Entity Resolver
//!
//! Turns the text typed into a customer or vendor search field into a short
//! list of candidate records. One resolver per field; the customer and
//! vendor resolvers share nothing.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Entity Resolver                                  │
//! │                                                                         │
//! │   ResolverHandle ── Query / Select / Clear ──► ┌──────────────────┐     │
//! │        ▲                                       │  resolver actor  │     │
//! │        │ watch<SearchSnapshot>                 │                  │     │
//! │        └───────────────────────────────────────│  generation: u64 │     │
//! │                                                │  debounce timer  │     │
//! │                                                └───┬──────────▲───┘     │
//! │                                    timer fires     │          │         │
//! │                                    spawn lookup    ▼          │         │
//! │                                   ┌─────────────────────┐     │         │
//! │                                   │ backend.search(...) │─────┘         │
//! │                                   │ (tagged with the    │ LookupOutcome │
//! │                                   │  generation)        │               │
//! │                                   └─────────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Per-Query Algorithm
//! ```text
//!  new text ──► generation += 1, pending timer dropped
//!      │
//!      ├─ trimmed < 2 chars ──► results cleared, no lookup
//!      ├─ trimmed > 100 chars ─► results cleared, no lookup
//!      │
//!      └─ else ──► timer armed (350 ms)
//!                      │  another keystroke first? start over
//!                      ▼
//!                  lookup issued, loading = true
//!                      │
//!                      ▼
//!          outcome.generation == generation ?
//!             ├─ no  ──► dropped (stale), counted, nothing else touched
//!             └─ yes ──► Ok:  filter (unless server-filtered), cap, commit
//!                        Err: results cleared, failure counted, logged only
//! ```
//!
//! There is no network cancellation. An old request may still be in flight
//! when a new one starts; the generation check at commit time is what keeps
//! it from landing.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use tripdesk_core::validation::validate_search_query;
use tripdesk_core::{Candidate, EntityKind, EntityRef};
use tripdesk_core::{MAX_SEARCH_RESULTS, MIN_QUERY_CHARS, SEARCH_DEBOUNCE_MS};

use crate::backend::{EntitySearchBackend, SearchPayload};
use crate::config::SearchSettings;
use crate::error::{LookupError, LookupResult};
use crate::filter::narrow;

// =============================================================================
// Resolver Configuration
// =============================================================================

/// Timing and sizing for one resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Quiet period before a lookup is issued.
    pub debounce: Duration,
    /// Trimmed queries shorter than this never reach the backend.
    pub min_query_chars: usize,
    /// Cap on every committed result list.
    pub max_results: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            debounce: Duration::from_millis(SEARCH_DEBOUNCE_MS),
            min_query_chars: MIN_QUERY_CHARS,
            max_results: MAX_SEARCH_RESULTS,
        }
    }
}

impl From<&SearchSettings> for ResolverConfig {
    fn from(settings: &SearchSettings) -> Self {
        ResolverConfig {
            debounce: settings.debounce(),
            min_query_chars: settings.min_query_chars,
            max_results: settings.max_results,
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Counters for one resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    pub lookups_issued: u64,
    pub committed: u64,
    pub stale_dropped: u64,
    pub failures: u64,
}

/// What a search field shows right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnapshot {
    pub kind: EntityKind,
    /// Visible text in the field.
    pub query: String,
    /// Generation of the latest query/selection/clear.
    pub generation: u64,
    /// A lookup is waiting for the quiet period to elapse.
    pub debouncing: bool,
    /// A lookup for the current generation is in flight.
    pub loading: bool,
    pub results: Vec<Candidate>,
    pub stats: SearchStats,
}

impl SearchSnapshot {
    fn empty(kind: EntityKind) -> Self {
        SearchSnapshot {
            kind,
            query: String::new(),
            generation: 0,
            debouncing: false,
            loading: false,
            results: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    /// Nothing pending for this snapshot's generation.
    pub fn is_settled(&self) -> bool {
        !self.debouncing && !self.loading
    }
}

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug)]
enum ResolverCommand {
    /// The field text changed.
    Query { text: String, ack: oneshot::Sender<u64> },
    /// A candidate was picked from the dropdown.
    Select { label: String, ack: oneshot::Sender<u64> },
    /// The field was emptied programmatically (draft reset).
    Clear { ack: oneshot::Sender<u64> },
    Shutdown,
}

/// A finished lookup, tagged with the generation that issued it.
#[derive(Debug)]
struct LookupOutcome {
    generation: u64,
    query: String,
    result: LookupResult<SearchPayload>,
}

// =============================================================================
// Resolver Handle
// =============================================================================

/// Handle for driving one search field.
///
/// Cloning is cheap. The actor stops once every handle is dropped or
/// [`ResolverHandle::shutdown`] is called.
#[derive(Clone)]
pub struct ResolverHandle {
    kind: EntityKind,
    cmd_tx: mpsc::Sender<ResolverCommand>,
    snapshot_rx: watch::Receiver<SearchSnapshot>,
}

impl ResolverHandle {
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    async fn request(
        &self,
        build: impl FnOnce(oneshot::Sender<u64>) -> ResolverCommand,
    ) -> LookupResult<u64> {
        let (ack, ack_rx) = oneshot::channel();
        self.cmd_tx
            .send(build(ack))
            .await
            .map_err(|_| LookupError::ShuttingDown)?;
        ack_rx
            .await
            .map_err(|_| LookupError::ChannelError("Resolver dropped the acknowledgement".into()))
    }

    /// Feeds new field text. Returns the generation assigned to it.
    pub async fn set_query(&self, text: impl Into<String>) -> LookupResult<u64> {
        let text = text.into();
        self.request(|ack| ResolverCommand::Query { text, ack }).await
    }

    /// Picks a candidate: the field shows its label, the dropdown closes,
    /// and the returned reference is what goes onto the draft.
    pub async fn select(&self, candidate: &Candidate) -> LookupResult<EntityRef> {
        let label = candidate.display_label().to_string();
        self.request(|ack| ResolverCommand::Select { label, ack })
            .await?;
        Ok(candidate.to_entity_ref())
    }

    /// Empties the field and the result list.
    pub async fn clear(&self) -> LookupResult<u64> {
        self.request(|ack| ResolverCommand::Clear { ack }).await
    }

    /// Current state of the field.
    pub fn snapshot(&self) -> SearchSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver that sees every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Waits until `generation` is no longer debouncing or loading, or has
    /// been superseded.
    ///
    /// A lookup that hangs never settles; callers that cannot wait forever
    /// wrap this in `tokio::time::timeout`.
    pub async fn settled(&self, generation: u64) -> LookupResult<SearchSnapshot> {
        let mut rx = self.snapshot_rx.clone();
        let snapshot = rx
            .wait_for(|s| s.generation > generation || s.is_settled())
            .await
            .map_err(|_| LookupError::ShuttingDown)?
            .clone();
        Ok(snapshot)
    }

    /// Stops the actor. Pending timers are discarded.
    pub async fn shutdown(&self) -> LookupResult<()> {
        self.cmd_tx
            .send(ResolverCommand::Shutdown)
            .await
            .map_err(|_| LookupError::ShuttingDown)
    }
}

// =============================================================================
// Entity Resolver
// =============================================================================

/// The resolver actor for one search field.
pub struct EntityResolver {
    kind: EntityKind,
    backend: Arc<dyn EntitySearchBackend>,
    config: ResolverConfig,

    generation: u64,
    query: String,
    /// Debounce deadline of the current generation.
    pending: Option<Instant>,
    /// Generation whose lookup is in flight and still current.
    in_flight: Option<u64>,
    results: Vec<Candidate>,
    stats: SearchStats,

    snapshot_tx: watch::Sender<SearchSnapshot>,
    outcome_tx: mpsc::UnboundedSender<LookupOutcome>,
}

impl EntityResolver {
    /// Starts a resolver and returns its handle. Must be called inside a
    /// tokio runtime.
    pub fn spawn(
        kind: EntityKind,
        backend: Arc<dyn EntitySearchBackend>,
        config: ResolverConfig,
    ) -> ResolverHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(SearchSnapshot::empty(kind));

        let resolver = EntityResolver {
            kind,
            backend,
            config,
            generation: 0,
            query: String::new(),
            pending: None,
            in_flight: None,
            results: Vec::new(),
            stats: SearchStats::default(),
            snapshot_tx,
            outcome_tx,
        };

        tokio::spawn(resolver.run(cmd_rx, outcome_rx));

        ResolverHandle {
            kind,
            cmd_tx,
            snapshot_rx,
        }
    }

    /// Main resolver loop.
    async fn run(
        mut self,
        mut cmd_rx: mpsc::Receiver<ResolverCommand>,
        mut outcome_rx: mpsc::UnboundedReceiver<LookupOutcome>,
    ) {
        debug!(kind = %self.kind, "Entity resolver started");

        loop {
            let deadline = self.pending;

            tokio::select! {
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(ResolverCommand::Shutdown) | None => break,
                        Some(cmd) => self.handle_command(cmd),
                    }
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.issue_lookup();
                }
                Some(outcome) = outcome_rx.recv() => {
                    self.handle_outcome(outcome);
                }
            }
        }

        info!(kind = %self.kind, stats = ?self.stats, "Entity resolver stopped");
    }

    fn handle_command(&mut self, cmd: ResolverCommand) {
        match cmd {
            ResolverCommand::Query { text, ack } => {
                self.begin_generation(text);

                if self.query.trim().chars().count() < self.config.min_query_chars {
                    self.results.clear();
                    debug!(kind = %self.kind, generation = self.generation, "Query too short, results cleared");
                } else if let Err(e) = validate_search_query(&self.query) {
                    self.results.clear();
                    debug!(kind = %self.kind, generation = self.generation, error = %e, "Query rejected, results cleared");
                } else {
                    self.pending = Some(Instant::now() + self.config.debounce);
                }

                self.publish();
                let _ = ack.send(self.generation);
            }
            ResolverCommand::Select { label, ack } => {
                self.begin_generation(label);
                self.results.clear();
                debug!(kind = %self.kind, query = %self.query, "Candidate selected");

                self.publish();
                let _ = ack.send(self.generation);
            }
            ResolverCommand::Clear { ack } => {
                self.begin_generation(String::new());
                self.results.clear();

                self.publish();
                let _ = ack.send(self.generation);
            }
            ResolverCommand::Shutdown => {}
        }
    }

    /// Supersedes everything pending or in flight.
    fn begin_generation(&mut self, text: String) {
        self.generation += 1;
        self.query = text;
        self.pending = None;
        self.in_flight = None;
    }

    fn issue_lookup(&mut self) {
        self.pending = None;
        self.in_flight = Some(self.generation);
        self.stats.lookups_issued += 1;

        let generation = self.generation;
        let query = self.query.clone();
        let kind = self.kind;
        let backend = Arc::clone(&self.backend);
        let outcome_tx = self.outcome_tx.clone();

        debug!(%kind, %query, generation, "Issuing lookup");

        tokio::spawn(async move {
            let result = backend.search(kind, &query).await;
            // The resolver may be gone; nothing to report to then.
            let _ = outcome_tx.send(LookupOutcome {
                generation,
                query,
                result,
            });
        });

        self.publish();
    }

    fn handle_outcome(&mut self, outcome: LookupOutcome) {
        if outcome.generation != self.generation {
            self.stats.stale_dropped += 1;
            debug!(
                kind = %self.kind,
                query = %outcome.query,
                generation = outcome.generation,
                current = self.generation,
                "Dropped stale lookup response"
            );
            self.publish();
            return;
        }

        self.in_flight = None;

        match outcome.result {
            Ok(payload) => {
                self.results = narrow(
                    payload.candidates,
                    &outcome.query,
                    payload.server_filtered,
                    self.config.max_results,
                );
                self.stats.committed += 1;
                debug!(
                    kind = %self.kind,
                    query = %outcome.query,
                    generation = outcome.generation,
                    count = self.results.len(),
                    "Committed lookup results"
                );
            }
            Err(e) => {
                self.results.clear();
                self.stats.failures += 1;
                warn!(
                    kind = %self.kind,
                    query = %outcome.query,
                    generation = outcome.generation,
                    error = %e,
                    "Lookup failed, results cleared"
                );
            }
        }

        self.publish();
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(SearchSnapshot {
            kind: self.kind,
            query: self.query.clone(),
            generation: self.generation,
            debouncing: self.pending.is_some(),
            loading: self.in_flight.is_some(),
            results: self.results.clone(),
            stats: self.stats,
        });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
