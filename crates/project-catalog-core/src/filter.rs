//! The catalog filter.
//!
//! Narrows a fixed project list by category and by a free-text query.
//! Two independent predicates, both of which must pass:
//!
//! 1. **Category**: `all` admits every project, otherwise the project's
//!    category must equal the selected one.
//! 2. **Text**: a query that is empty after trimming admits every project.
//!    Otherwise the trimmed, lowercased query must be a substring of the
//!    lowercased title, location, or description.
//!
//! The result borrows from the source and keeps its relative order.
//! Lowercasing uses [`str::to_lowercase`]; there is no locale-aware folding.

use serde::{Deserialize, Serialize};

use crate::category::CategoryFilter;
use crate::models::Project;

/// A (category, query) pair. The query is kept as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub category: CategoryFilter,
    pub query: String,
}

impl FilterCriteria {
    pub fn new(category: CategoryFilter, query: impl Into<String>) -> Self {
        Self {
            category,
            query: query.into(),
        }
    }

    pub fn apply<'a>(&self, source: &'a [Project]) -> Vec<&'a Project> {
        filter_projects(source, self.category, &self.query)
    }
}

/// Select the projects passing both predicates, in source order.
pub fn filter_projects<'a>(
    source: &'a [Project],
    category: CategoryFilter,
    query: &str,
) -> Vec<&'a Project> {
    let needle = search_needle(query);

    source
        .iter()
        .filter(|p| category.admits(p.category))
        .filter(|p| match needle.as_deref() {
            Some(n) => contains_needle(p, n),
            None => true,
        })
        .collect()
}

/// Returns true if `project` passes the text predicate for `query`.
pub fn matches_query(project: &Project, query: &str) -> bool {
    match search_needle(query) {
        Some(n) => contains_needle(project, &n),
        None => true,
    }
}

/// The lowercased, trimmed query, or `None` when there is nothing to match.
fn search_needle(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn contains_needle(project: &Project, needle: &str) -> bool {
    [&project.title, &project.location, &project.description]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Convert text into a URL slug.
///
/// Lowercases, drops everything except word characters, whitespace and
/// hyphens, collapses runs of whitespace, underscores and hyphens into a
/// single `-`, and strips leading and trailing hyphens.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_sep = false;

    for c in lowered.chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_sep = true;
        } else if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c);
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    fn project(id: &str, title: &str, category: Category, location: &str, desc: &str) -> Project {
        Project {
            id: id.to_string(),
            title: title.to_string(),
            slug: slugify(title),
            category,
            location: location.to_string(),
            year: "2024".to_string(),
            description: desc.to_string(),
            challenge: None,
            solution: None,
            result: None,
            images: Vec::new(),
            featured: false,
            specs: Vec::new(),
        }
    }

    fn sample() -> Vec<Project> {
        vec![
            project(
                "3",
                "Eastgate Retail Precinct",
                Category::Retail,
                "Brisbane",
                "A vibrant mixed-use retail development.",
            ),
            project(
                "2",
                "Harbour View Medical Centre",
                Category::Healthcare,
                "Melbourne",
                "A state-of-the-art medical facility.",
            ),
        ]
    }

    fn ids(result: &[&Project]) -> Vec<String> {
        result.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn category_only() {
        let list = sample();
        let out = filter_projects(&list, CategoryFilter::Only(Category::Retail), "");
        assert_eq!(ids(&out), vec!["3"]);
    }

    #[test]
    fn query_matches_location_case_insensitively() {
        let list = sample();
        let out = filter_projects(&list, CategoryFilter::All, "melbourne");
        assert_eq!(ids(&out), vec!["2"]);
    }

    #[test]
    fn query_matches_title_and_description() {
        let list = sample();
        assert_eq!(
            ids(&filter_projects(&list, CategoryFilter::All, "EASTGATE")),
            vec!["3"]
        );
        assert_eq!(
            ids(&filter_projects(&list, CategoryFilter::All, "medical fac")),
            vec!["2"]
        );
    }

    #[test]
    fn no_match_is_empty() {
        let list = sample();
        assert!(filter_projects(&list, CategoryFilter::All, "zzz-no-match").is_empty());
    }

    #[test]
    fn both_predicates_must_pass() {
        let list = sample();
        let out = filter_projects(&list, CategoryFilter::Only(Category::Healthcare), "brisbane");
        assert!(out.is_empty());
    }

    #[test]
    fn whitespace_query_is_no_filter() {
        let list = sample();
        let out = filter_projects(&list, CategoryFilter::All, "  ");
        assert_eq!(ids(&out), vec!["3", "2"]);
    }

    #[test]
    fn query_is_trimmed_before_matching() {
        let list = sample();
        let out = filter_projects(&list, CategoryFilter::All, "  brisbane\t");
        assert_eq!(ids(&out), vec!["3"]);
    }

    #[test]
    fn substring_is_unanchored() {
        let list = sample();
        let out = filter_projects(&list, CategoryFilter::All, "arbou");
        assert_eq!(ids(&out), vec!["2"]);
    }

    #[test]
    fn results_borrow_source_records() {
        let list = sample();
        let out = filter_projects(&list, CategoryFilter::All, "");
        assert!(std::ptr::eq(out[0], &list[0]));
        assert!(std::ptr::eq(out[1], &list[1]));
    }

    #[test]
    fn empty_source() {
        let out = filter_projects(&[], CategoryFilter::Only(Category::Education), "x");
        assert!(out.is_empty());
    }

    #[test]
    fn matches_query_helper() {
        let list = sample();
        assert!(matches_query(&list[0], ""));
        assert!(matches_query(&list[0], "Vibrant"));
        assert!(!matches_query(&list[0], "hospital"));
    }

    #[test]
    fn criteria_apply() {
        let list = sample();
        let criteria = FilterCriteria::new(CategoryFilter::All, "retail");
        assert_eq!(ids(&criteria.apply(&list)), vec!["3"]);
    }

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's Up!"), "whats-up");
        assert_eq!(slugify("Too   Many   Spaces"), "too-many-spaces");
        assert_eq!(slugify("hello_world_test"), "hello-world-test");
        assert_eq!(slugify("--hello--"), "hello");
        assert_eq!(slugify("Project 2024 Release"), "project-2024-release");
    }
}
