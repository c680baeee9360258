//! Filter state owned by the input surface.
//!
//! The state only changes through [`FilterState::set_category`],
//! [`FilterState::set_query`] and [`FilterState::clear`].

use serde::{Deserialize, Serialize};

use crate::category::CategoryFilter;
use crate::filter::FilterCriteria;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    active_category: CategoryFilter,
    /// Raw query as typed; whitespace is kept for display.
    search_query: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_category(&self) -> CategoryFilter {
        self.active_category
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.active_category = category;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Reset both the category and the query to their defaults.
    pub fn clear(&mut self) {
        self.active_category = CategoryFilter::All;
        self.search_query.clear();
    }

    /// Whether the "clear filters" action should be offered.
    pub fn can_clear(&self) -> bool {
        !self.active_category.is_all() || !self.search_query.is_empty()
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.active_category, self.search_query.clone())
    }
}
