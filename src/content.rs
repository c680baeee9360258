//! Catalog content loading and validation.
//!
//! The catalog is read once at startup, either from the bundled
//! `content/catalog.json` or from a file named in `[catalog].path`, and is
//! immutable afterwards. Projects are shared as `Arc<[Project]>` so filter
//! tasks can hold the source without copying it.

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use project_catalog_core::category::{Category, CategoryFilter};
use project_catalog_core::filter::slugify;
use project_catalog_core::models::{Project, Service, SiteContent, Stat, TeamMember, Testimonial};

use crate::config::Config;

const BUNDLED_CATALOG: &str = include_str!("../content/catalog.json");

/// Parse and validate the bundled catalog.
pub fn bundled_content() -> Result<SiteContent> {
    let content: SiteContent =
        serde_json::from_str(BUNDLED_CATALOG).context("Failed to parse bundled catalog")?;
    validate(&content)?;
    Ok(content)
}

/// Load site content from `path`, or the bundled catalog when `None`.
///
/// The format is chosen by extension: `.json` or `.toml`.
pub fn load_content(path: Option<&Path>) -> Result<SiteContent> {
    let path = match path {
        Some(p) => p,
        None => return bundled_content(),
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

    let content: SiteContent = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?,
        Some("toml") => toml::from_str(&raw)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?,
        _ => bail!(
            "Unsupported catalog format: {}. Use a .json or .toml file.",
            path.display()
        ),
    };

    validate(&content)?;
    Ok(content)
}

/// Check the record invariants the filter and detail pages rely on.
pub fn validate(content: &SiteContent) -> Result<()> {
    let mut ids = HashSet::new();
    let mut slugs = HashSet::new();

    for (i, p) in content.projects.iter().enumerate() {
        if p.id.trim().is_empty() {
            bail!("project #{} has an empty id", i + 1);
        }
        if !ids.insert(p.id.as_str()) {
            bail!("duplicate project id: {}", p.id);
        }
        if p.title.trim().is_empty() {
            bail!("project {} has an empty title", p.id);
        }
        if p.slug.is_empty() || slugify(&p.slug) != p.slug {
            bail!(
                "project {} has invalid slug '{}' (expected something like '{}')",
                p.id,
                p.slug,
                slugify(&p.title)
            );
        }
        if !slugs.insert(p.slug.as_str()) {
            bail!("duplicate project slug: {}", p.slug);
        }
    }

    Ok(())
}

/// The loaded, read-only catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Arc<[Project]>,
    services: Arc<[Service]>,
    team: Arc<[TeamMember]>,
    testimonials: Arc<[Testimonial]>,
    stats: Arc<[Stat]>,
}

impl Catalog {
    pub fn new(content: SiteContent) -> Self {
        Self {
            projects: content.projects.into(),
            services: content.services.into(),
            team: content.team.into(),
            testimonials: content.testimonials.into(),
            stats: content.stats.into(),
        }
    }

    /// Load and validate the catalog named by the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let content = load_content(config.catalog.path.as_deref())?;
        Ok(Self::new(content))
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// The shared source list, for filter sessions.
    pub fn source(&self) -> Arc<[Project]> {
        Arc::clone(&self.projects)
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn team(&self) -> &[TeamMember] {
        &self.team
    }

    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    pub fn stats(&self) -> &[Stat] {
        &self.stats
    }

    /// Featured projects, in catalog order.
    pub fn featured(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.featured).collect()
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.slug == slug)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Project count per filter tab, `all` first.
    pub fn category_counts(&self) -> Vec<(CategoryFilter, usize)> {
        let mut counts = vec![(CategoryFilter::All, self.projects.len())];
        for c in Category::ALL {
            let n = self.projects.iter().filter(|p| p.category == c).count();
            counts.push((CategoryFilter::Only(c), n));
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn bundled_catalog_is_valid() {
        let content = bundled_content().unwrap();
        assert_eq!(content.projects.len(), 6);
        assert_eq!(content.services.len(), 6);
        assert_eq!(content.team.len(), 4);
        assert_eq!(content.testimonials.len(), 3);
        assert_eq!(content.stats.len(), 4);
    }

    #[test]
    fn featured_and_lookup() {
        let catalog = Catalog::new(bundled_content().unwrap());
        let featured: Vec<&str> = catalog.featured().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(featured, vec!["1", "2", "3"]);

        let p = catalog.find_by_slug("eastgate-retail-precinct").unwrap();
        assert_eq!(p.location, "Brisbane");
        assert_eq!(catalog.find_by_id("2").unwrap().title, "Harbour View Medical Centre");
        assert!(catalog.find_by_slug("missing").is_none());
    }

    #[test]
    fn category_counts_cover_every_tab() {
        let catalog = Catalog::new(bundled_content().unwrap());
        let counts = catalog.category_counts();
        assert_eq!(counts.len(), 7);
        assert_eq!(counts[0], (CategoryFilter::All, 6));
        assert!(counts[1..].iter().all(|(_, n)| *n == 1));
    }

    #[test]
    fn loads_toml_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        fs::write(
            &path,
            r#"
[[projects]]
id = "a"
title = "Depot"
slug = "depot"
category = "industrial"
location = "Perth"
description = "A depot."
"#,
        )
        .unwrap();
        let content = load_content(Some(&path)).unwrap();
        assert_eq!(content.projects.len(), 1);
        assert!(content.services.is_empty());
    }

    #[test]
    fn rejects_unknown_extension() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.yaml");
        fs::write(&path, "projects: []").unwrap();
        let err = load_content(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Unsupported catalog format"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut content = bundled_content().unwrap();
        let mut dup = content.projects[0].clone();
        dup.slug = "another-slug".to_string();
        content.projects.push(dup);
        let err = validate(&content).unwrap_err();
        assert!(err.to_string().contains("duplicate project id"));
    }

    #[test]
    fn rejects_bad_slug_and_empty_title() {
        let mut content = bundled_content().unwrap();
        content.projects[0].slug = "Not A Slug".to_string();
        assert!(validate(&content).unwrap_err().to_string().contains("invalid slug"));

        let mut content = bundled_content().unwrap();
        content.projects[1].title = "  ".to_string();
        assert!(validate(&content).unwrap_err().to_string().contains("empty title"));
    }

    #[test]
    fn missing_project_list_is_empty_catalog() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.json");
        fs::write(&path, "{}").unwrap();
        let catalog = Catalog::new(load_content(Some(&path)).unwrap());
        assert!(catalog.projects().is_empty());
        assert_eq!(catalog.category_counts()[0], (CategoryFilter::All, 0));
    }
}
