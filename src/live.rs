//! Live filtering on tokio.
//!
//! [`LiveFilter`] drives a [`FilterSession`] for an interactive input
//! surface. `submit` returns as soon as the change is recorded; the filter
//! itself runs on a spawned task after the configured settle delay. Every
//! display change (pending, settled) is published on a `watch` channel.
//!
//! A task whose request has been superseded skips the computation if it
//! notices in time, and otherwise has its result discarded by the session.
//! Subscribers therefore only ever see settled results for the newest
//! request.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;

use project_catalog_core::display::DisplayState;
use project_catalog_core::models::Project;
use project_catalog_core::session::{FilterChange, FilterSession};

pub struct LiveFilter {
    session: Arc<Mutex<FilterSession>>,
    tx: Arc<watch::Sender<DisplayState>>,
    settle: Duration,
}

fn lock(session: &Mutex<FilterSession>) -> MutexGuard<'_, FilterSession> {
    session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl LiveFilter {
    pub fn new(source: Arc<[Project]>, settle: Duration) -> Self {
        let session = FilterSession::new(source);
        let (tx, _rx) = watch::channel(session.display().clone());
        Self {
            session: Arc::new(Mutex::new(session)),
            tx: Arc::new(tx),
            settle,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> DisplayState {
        self.tx.borrow().clone()
    }

    /// Record an input change and schedule its recomputation.
    ///
    /// The published pending snapshot shares the previous result list, so
    /// the cost here does not grow with the catalog. Must be called from
    /// within a tokio runtime. Returns the request's sequence number.
    pub fn submit(&self, change: FilterChange) -> u64 {
        let (ticket, source) = {
            let mut session = lock(&self.session);
            let ticket = session.submit(change);
            self.tx.send_replace(session.display().clone());
            (ticket, session.source())
        };

        let seq = ticket.seq;
        tracing::debug!(
            seq,
            category = %ticket.criteria.category,
            query = %ticket.criteria.query,
            "filter request submitted"
        );

        let session = Arc::clone(&self.session);
        let tx = Arc::clone(&self.tx);
        let settle = self.settle;

        tokio::spawn(async move {
            if settle.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(settle).await;
            }

            if !lock(&session).is_current(ticket.seq) {
                tracing::debug!(seq = ticket.seq, "filter request superseded before running");
                return;
            }

            let outcome = ticket.compute(&source);
            let count = outcome.projects.len();

            let mut session = lock(&session);
            if session.complete(outcome) {
                tx.send_replace(session.display().clone());
                tracing::debug!(seq = ticket.seq, count, "filter request settled");
            } else {
                tracing::debug!(seq = ticket.seq, "stale filter result discarded");
            }
        });

        seq
    }

    /// Wait until the newest request has settled and return its display.
    pub async fn settled(&self) -> DisplayState {
        let mut rx = self.subscribe();
        loop {
            {
                let view = rx.borrow_and_update();
                if !view.pending {
                    return view.clone();
                }
            }
            if rx.changed().await.is_err() {
                return self.current();
            }
        }
    }
}
