//! # Draft State
//!
//! Holds the invoice draft being composed in this session.
//!
//! ## Thread Safety
//! The draft is wrapped in `Mutex<T>` because several commands edit it and
//! only one edit should apply at a time. Lock order is always catalog first,
//! then draft (see [`CatalogState`](super::CatalogState)).
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft State Operations                               │
//! │                                                                         │
//! │  Operator Action          Command                 Draft Change          │
//! │  ───────────────          ───────                 ────────────          │
//! │                                                                         │
//! │  Type in fare box ───────► set_draft_field() ───► field text replaced  │
//! │                                                                         │
//! │  Pick service ───────────► select_service() ────► serviceTypeId        │
//! │                                                                         │
//! │  Switch trip type ───────► set_flight_kind() ───► flightPlan variant   │
//! │                                                                         │
//! │  Pick customer ──────────► select_candidate() ──► customer ref         │
//! │                                                                         │
//! │  Leave screen ───────────► reset_draft() ───────► fresh draft          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Mutex, PoisonError};

use tripdesk_core::InvoiceDraft;

/// The draft for one drafting session.
#[derive(Debug, Default)]
pub struct DraftState {
    draft: Mutex<InvoiceDraft>,
}

impl DraftState {
    /// Creates a state holding a fresh empty draft.
    pub fn new() -> Self {
        DraftState {
            draft: Mutex::new(InvoiceDraft::new()),
        }
    }

    /// Executes a function with read access to the draft.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let id = draft_state.with_draft(|d| d.id);
    /// ```
    pub fn with_draft<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&InvoiceDraft) -> R,
    {
        // A panic mid-edit leaves plain text fields behind; still usable.
        let draft = self.draft.lock().unwrap_or_else(PoisonError::into_inner);
        f(&draft)
    }

    /// Executes a function with write access to the draft.
    pub fn with_draft_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut InvoiceDraft) -> R,
    {
        let mut draft = self.draft.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut draft)
    }
}
