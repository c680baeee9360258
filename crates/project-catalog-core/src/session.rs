//! Filter session: input changes, deferred recomputation, latest request wins.
//!
//! Every change from the input surface is applied to the [`FilterState`]
//! immediately and is stamped with a new sequence number. The recomputation
//! for that change may run later (another tick, another task). When it
//! finishes, its [`FilterOutcome`] is offered back to the session, which
//! applies it only if no newer change has been submitted in the meantime.
//!
//! ```text
//! submit(P1) -> seq 1 ─┐
//! submit(P2) -> seq 2 ─┼─ complete(seq 2)  applied, display settles on P2
//!                      └─ complete(seq 1)  stale, discarded
//! ```
//!
//! The session has no clock and no runtime; callers decide when to compute.

use std::sync::Arc;

use crate::category::CategoryFilter;
use crate::display::DisplayState;
use crate::filter::FilterCriteria;
use crate::models::Project;
use crate::state::FilterState;

/// A single user action on the input surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    /// A category tab was selected.
    Category(CategoryFilter),
    /// The search box now holds this text.
    Query(String),
    /// "Clear filters": reset both to defaults.
    Clear,
}

impl FilterChange {
    fn apply(self, state: &mut FilterState) {
        match self {
            FilterChange::Category(c) => state.set_category(c),
            FilterChange::Query(q) => state.set_query(q),
            FilterChange::Clear => state.clear(),
        }
    }
}

/// A recomputation request issued by [`FilterSession::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTicket {
    pub seq: u64,
    pub criteria: FilterCriteria,
}

impl FilterTicket {
    /// Run the filter for this ticket. Pure; may be called on any task.
    ///
    /// Matching records are copied into the outcome's list here, off the
    /// input path.
    pub fn compute(&self, source: &[Project]) -> FilterOutcome {
        FilterOutcome {
            seq: self.seq,
            projects: self.criteria.apply(source).into_iter().cloned().collect(),
        }
    }
}

/// The finished result of a ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub seq: u64,
    pub projects: Arc<[Project]>,
}

pub struct FilterSession {
    source: Arc<[Project]>,
    state: FilterState,
    latest_seq: u64,
    display: DisplayState,
}

impl FilterSession {
    /// Start a session showing the whole source list.
    pub fn new(source: Arc<[Project]>) -> Self {
        let state = FilterState::default();
        let display = DisplayState::settled(0, &state, Arc::clone(&source));
        Self {
            source,
            state,
            latest_seq: 0,
            display,
        }
    }

    pub fn source(&self) -> Arc<[Project]> {
        Arc::clone(&self.source)
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn is_pending(&self) -> bool {
        self.display.pending
    }

    /// Whether `seq` is still the newest request.
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest_seq
    }

    /// Accept an input change.
    ///
    /// Applies the transition and builds the pending snapshot, which shares
    /// the previous result list. No records are filtered or copied; the
    /// cost is the query string and a reference count.
    pub fn submit(&mut self, change: FilterChange) -> FilterTicket {
        change.apply(&mut self.state);
        self.latest_seq += 1;
        self.display = DisplayState::pending(self.latest_seq, &self.state, &self.display);
        FilterTicket {
            seq: self.latest_seq,
            criteria: self.state.criteria(),
        }
    }

    /// Offer a finished outcome. Returns `false` if it was superseded.
    pub fn complete(&mut self, outcome: FilterOutcome) -> bool {
        if !self.is_current(outcome.seq) {
            return false;
        }
        self.display = DisplayState::settled(outcome.seq, &self.state, outcome.projects);
        true
    }

    /// Submit and settle in one step.
    pub fn apply_now(&mut self, change: FilterChange) -> &DisplayState {
        let ticket = self.submit(change);
        let outcome = ticket.compute(&self.source);
        self.complete(outcome);
        &self.display
    }
}
