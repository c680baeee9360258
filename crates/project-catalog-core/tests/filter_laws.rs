//! Algebraic properties of the catalog filter and the filter session,
//! checked against the full six-project catalog.

use std::sync::Arc;

use project_catalog_core::category::{Category, CategoryFilter};
use project_catalog_core::filter::{filter_projects, FilterCriteria};
use project_catalog_core::models::Project;
use project_catalog_core::session::{FilterChange, FilterSession};

fn project(id: &str, title: &str, category: Category, location: &str, desc: &str) -> Project {
    Project {
        id: id.to_string(),
        title: title.to_string(),
        slug: format!("p-{}", id),
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

fn catalog() -> Vec<Project> {
    vec![
        project(
            "1",
            "Meridian Business Centre",
            Category::Commercial,
            "Sydney CBD",
            "A landmark 12-storey commercial tower featuring sustainable design principles.",
        ),
        project(
            "2",
            "Harbour View Medical Centre",
            Category::Healthcare,
            "Melbourne",
            "A state-of-the-art medical facility designed for patient comfort.",
        ),
        project(
            "3",
            "Eastgate Retail Precinct",
            Category::Retail,
            "Brisbane",
            "A vibrant mixed-use retail development combining premium shopping with dining.",
        ),
        project(
            "4",
            "Phoenix Industrial Park",
            Category::Industrial,
            "Western Sydney",
            "A modern logistics and warehousing complex designed for efficiency.",
        ),
        project(
            "5",
            "The Grand Hotel Renovation",
            Category::Hospitality,
            "Gold Coast",
            "Complete refurbishment of a heritage-listed hotel.",
        ),
        project(
            "6",
            "Sunrise Learning Centre",
            Category::Education,
            "Adelaide",
            "An innovative early learning centre with sustainable design.",
        ),
    ]
}

fn all_filters() -> Vec<CategoryFilter> {
    std::iter::once(CategoryFilter::All)
        .chain(Category::ALL.iter().map(|c| CategoryFilter::Only(*c)))
        .collect()
}

const QUERIES: &[&str] = &[
    "",
    "  ",
    "centre",
    "SYDNEY",
    " sustainable ",
    "design",
    "zzz-no-match",
    "a",
];

fn ids(result: &[&Project]) -> Vec<String> {
    result.iter().map(|p| p.id.clone()).collect()
}

fn position(list: &[Project], p: &Project) -> usize {
    list.iter()
        .position(|q| std::ptr::eq(q, p))
        .expect("result must borrow from the source")
}

#[test]
fn identity_law() {
    let list = catalog();
    let out = filter_projects(&list, CategoryFilter::All, "");
    assert_eq!(out.len(), list.len());
    for (a, b) in out.iter().zip(list.iter()) {
        assert!(std::ptr::eq(*a, b));
    }
}

#[test]
fn category_only_law() {
    let list = catalog();
    for c in Category::ALL {
        let out = filter_projects(&list, CategoryFilter::Only(c), "");
        let expected: Vec<String> = list
            .iter()
            .filter(|p| p.category == c)
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(ids(&out), expected, "category {}", c);
    }
}

#[test]
fn text_only_law() {
    let list = catalog();
    for q in QUERIES {
        let needle = q.trim().to_lowercase();
        let expected: Vec<String> = list
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.title.to_lowercase().contains(&needle)
                    || p.location.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(
            ids(&filter_projects(&list, CategoryFilter::All, q)),
            expected,
            "query {:?}",
            q
        );
    }
}

#[test]
fn conjunction_law() {
    let list = catalog();
    for c in all_filters() {
        for q in QUERIES {
            let by_cat = ids(&filter_projects(&list, c, ""));
            let by_text = ids(&filter_projects(&list, CategoryFilter::All, q));
            let expected: Vec<String> = by_cat
                .into_iter()
                .filter(|id| by_text.contains(id))
                .collect();
            assert_eq!(ids(&filter_projects(&list, c, q)), expected);
        }
    }
}

#[test]
fn output_is_a_subsequence_of_input() {
    let list = catalog();
    for c in all_filters() {
        for q in QUERIES {
            let out = filter_projects(&list, c, q);
            let positions: Vec<usize> = out.iter().map(|p| position(&list, p)).collect();
            assert!(
                positions.windows(2).all(|w| w[0] < w[1]),
                "reordered for ({}, {:?})",
                c,
                q
            );
        }
    }
}

#[test]
fn idempotence_and_determinism() {
    let list = catalog();
    for c in all_filters() {
        for q in QUERIES {
            let first = ids(&filter_projects(&list, c, q));
            let second = ids(&filter_projects(&list, c, q));
            assert_eq!(first, second);

            let narrowed: Vec<Project> = filter_projects(&list, c, q).into_iter().cloned().collect();
            assert_eq!(ids(&filter_projects(&narrowed, c, q)), first);
        }
    }
}

#[test]
fn source_is_never_mutated() {
    let list = catalog();
    let before = list.clone();
    for c in all_filters() {
        for q in QUERIES {
            let _ = FilterCriteria::new(c, *q).apply(&list);
        }
    }
    assert_eq!(list, before);
}

#[test]
fn clear_round_trips_after_any_filter() {
    let list = catalog();
    let source: Arc<[Project]> = list.clone().into();
    for c in all_filters() {
        for q in QUERIES {
            let mut session = FilterSession::new(source.clone());
            session.apply_now(FilterChange::Category(c));
            session.apply_now(FilterChange::Query(q.to_string()));
            let view = session.apply_now(FilterChange::Clear);
            assert_eq!(&view.projects[..], &list[..]);
            assert!(!view.can_clear);
        }
    }
}

#[test]
fn no_stale_overwrite() {
    let list = catalog();
    let source: Arc<[Project]> = list.clone().into();
    let mut session = FilterSession::new(source.clone());

    let p1 = session.submit(FilterChange::Category(Category::Retail.into()));
    let p2 = session.submit(FilterChange::Query("melbourne".into()));

    // P2 settles first, then P1's late result arrives.
    assert!(session.complete(p2.compute(&source)));
    assert!(!session.complete(p1.compute(&source)));

    let expected: Vec<Project> = filter_projects(&list, CategoryFilter::Only(Category::Retail), "melbourne")
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(&session.display().projects[..], &expected[..]);
    assert!(session.display().is_empty());
    assert_eq!(
        session.display().empty_message.as_deref(),
        Some("No projects match \"melbourne\". Try a different search term.")
    );
}

#[test]
fn scenario_from_brochure_pair() {
    let list = vec![
        project("a", "Eastgate Retail Precinct", Category::Retail, "Brisbane", "Retail."),
        project("b", "Harbour View Medical Centre", Category::Healthcare, "Melbourne", "Medical."),
    ];
    assert_eq!(
        ids(&filter_projects(&list, CategoryFilter::Only(Category::Retail), "")),
        vec!["a"]
    );
    assert_eq!(ids(&filter_projects(&list, CategoryFilter::All, "melbourne")), vec!["b"]);
    assert!(filter_projects(&list, CategoryFilter::All, "zzz-no-match").is_empty());
    assert!(filter_projects(&list, CategoryFilter::Only(Category::Healthcare), "brisbane").is_empty());
    assert_eq!(ids(&filter_projects(&list, CategoryFilter::All, "  ")), vec!["a", "b"]);
}
