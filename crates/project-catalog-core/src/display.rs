//! What the display surface shows for a filter result.
//!
//! The surface is in one of three states: showing results, pending (a newer
//! filter request has not settled yet), or empty. The messages below are
//! the exact strings rendered for each.

use std::sync::Arc;

use serde::Serialize;

use crate::category::CategoryFilter;
use crate::models::Project;
use crate::state::FilterState;

pub const PENDING_MESSAGE: &str = "Filtering...";
pub const EMPTY_TITLE: &str = "No projects found";

/// `Showing 3 projects`, `Showing 1 project for "harbour"`.
pub fn count_message(count: usize, query: &str) -> String {
    let plural = if count == 1 { "" } else { "s" };
    if query.is_empty() {
        format!("Showing {} project{}", count, plural)
    } else {
        format!("Showing {} project{} for \"{}\"", count, plural, query)
    }
}

/// Placeholder text for an empty result.
///
/// A non-empty query blames the search term; otherwise the category.
pub fn empty_message(query: &str) -> String {
    if query.is_empty() {
        "No projects found in this category.".to_string()
    } else {
        format!(
            "No projects match \"{}\". Try a different search term.",
            query
        )
    }
}

/// A snapshot handed to the display surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    /// Sequence number of the request this snapshot belongs to.
    pub seq: u64,
    pub pending: bool,
    pub category: CategoryFilter,
    pub query: String,
    /// Settled results. While pending, the last settled results, shared
    /// with the snapshot they came from.
    pub projects: Arc<[Project]>,
    pub count: usize,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    pub can_clear: bool,
}

impl DisplayState {
    pub fn settled(seq: u64, state: &FilterState, projects: Arc<[Project]>) -> Self {
        let count = projects.len();
        let query = state.search_query().to_string();
        Self {
            seq,
            pending: false,
            category: state.active_category(),
            message: count_message(count, &query),
            empty_message: (count == 0).then(|| empty_message(&query)),
            query,
            projects,
            count,
            can_clear: state.can_clear(),
        }
    }

    /// The pending snapshot for request `seq`. Shares the previous result
    /// list rather than copying it.
    pub fn pending(seq: u64, state: &FilterState, previous: &DisplayState) -> Self {
        Self {
            seq,
            pending: true,
            category: state.active_category(),
            query: state.search_query().to_string(),
            projects: Arc::clone(&previous.projects),
            count: previous.count,
            message: PENDING_MESSAGE.to_string(),
            empty_message: None,
            can_clear: state.can_clear(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.pending && self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_projects() -> Arc<[Project]> {
        Arc::from(Vec::<Project>::new())
    }

    #[test]
    fn count_message_pluralizes() {
        assert_eq!(count_message(0, ""), "Showing 0 projects");
        assert_eq!(count_message(1, ""), "Showing 1 project");
        assert_eq!(count_message(6, ""), "Showing 6 projects");
    }

    #[test]
    fn count_message_quotes_query() {
        assert_eq!(
            count_message(1, "melbourne"),
            "Showing 1 project for \"melbourne\""
        );
    }

    #[test]
    fn empty_message_variants() {
        assert_eq!(
            empty_message("zzz-no-match"),
            "No projects match \"zzz-no-match\". Try a different search term."
        );
        assert_eq!(empty_message(""), "No projects found in this category.");
    }

    #[test]
    fn settled_empty_state() {
        let mut state = FilterState::new();
        state.set_query("zzz");
        let view = DisplayState::settled(4, &state, no_projects());
        assert!(view.is_empty());
        assert_eq!(view.seq, 4);
        assert!(view.empty_message.unwrap().contains("\"zzz\""));
        assert!(view.can_clear);
    }

    #[test]
    fn pending_keeps_previous_results() {
        let state = FilterState::new();
        let settled = DisplayState::settled(1, &state, no_projects());
        let mut next = state.clone();
        next.set_query("sydney");
        let pending = DisplayState::pending(2, &next, &settled);
        assert!(pending.pending);
        assert!(!pending.is_empty());
        assert_eq!(pending.message, PENDING_MESSAGE);
        assert_eq!(pending.query, "sydney");
        assert!(Arc::ptr_eq(&pending.projects, &settled.projects));
    }
}
