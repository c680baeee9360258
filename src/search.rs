//! Catalog commands for the CLI: `search`, `get`, `categories`, `check`.
//!
//! Output goes to stdout, either as text for humans or as JSON
//! (`--format json`) for scripts.

use anyhow::{bail, Result};
use clap::ValueEnum;
use serde::Serialize;

use project_catalog_core::category::{category_label, CategoryFilter};
use project_catalog_core::display::{count_message, empty_message, EMPTY_TITLE};
use project_catalog_core::models::Project;
use project_catalog_core::state::FilterState;

use crate::config::Config;
use crate::content::Catalog;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
pub struct SearchOutput<'a> {
    pub category: CategoryFilter,
    pub query: String,
    pub count: usize,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    pub projects: Vec<&'a Project>,
}

/// Filter `catalog` for the CLI. The category is parsed strictly.
pub fn search_catalog<'a>(
    catalog: &'a Catalog,
    query: &str,
    category: Option<&str>,
) -> Result<SearchOutput<'a>> {
    let mut state = FilterState::new();
    if let Some(c) = category {
        state.set_category(CategoryFilter::parse(c)?);
    }
    state.set_query(query);

    let projects = state.criteria().apply(catalog.projects());
    let count = projects.len();

    Ok(SearchOutput {
        category: state.active_category(),
        query: query.to_string(),
        count,
        message: count_message(count, query),
        empty_message: (count == 0).then(|| empty_message(query)),
        projects,
    })
}

pub fn run_search(
    config: &Config,
    query: Option<String>,
    category: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let catalog = Catalog::from_config(config)?;
    let query = query.unwrap_or_default();
    let output = search_catalog(&catalog, &query, category.as_deref())?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Text => print_results(&output),
    }

    Ok(())
}

fn print_results(output: &SearchOutput<'_>) {
    println!("{}", output.message);
    println!();

    if let Some(empty) = &output.empty_message {
        println!("{}", EMPTY_TITLE);
        println!("{}", empty);
        return;
    }

    for (i, p) in output.projects.iter().enumerate() {
        println!(
            "{}. {} / {} / {}",
            i + 1,
            p.title,
            p.category.label(),
            p.location
        );
        println!("    year: {}", p.year);
        println!("    slug: {}", p.slug);
        println!("    excerpt: \"{}\"", excerpt(&p.description, 120));
        println!();
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    let trimmed = flat.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

pub fn run_get(config: &Config, slug: &str, format: OutputFormat) -> Result<()> {
    let catalog = Catalog::from_config(config)?;
    let project = match catalog.find_by_slug(slug) {
        Some(p) => p,
        None => bail!("project not found: {}", slug),
    };

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(project)?);
        return Ok(());
    }

    println!("--- Project ---");
    println!("id:        {}", project.id);
    println!("title:     {}", project.title);
    println!("category:  {}", category_label(project.category.as_str()));
    println!("location:  {}", project.location);
    println!("year:      {}", project.year);
    println!("featured:  {}", project.featured);
    println!();
    println!("{}", project.description);

    for (heading, section) in [
        ("Challenge", &project.challenge),
        ("Solution", &project.solution),
        ("Result", &project.result),
    ] {
        if let Some(text) = section {
            println!();
            println!("--- {} ---", heading);
            println!("{}", text);
        }
    }

    if !project.specs.is_empty() {
        println!();
        println!("--- Specs ---");
        for spec in &project.specs {
            println!("{:<20} {}", spec.label, spec.value);
        }
    }

    if !project.images.is_empty() {
        println!();
        println!("--- Images ({}) ---", project.images.len());
        for image in &project.images {
            println!("{} ({})", image.url, image.alt);
        }
    }

    Ok(())
}

pub fn run_categories(config: &Config) -> Result<()> {
    let catalog = Catalog::from_config(config)?;

    println!("{:<14} {:<16} PROJECTS", "CATEGORY", "LABEL");
    for (filter, count) in catalog.category_counts() {
        println!("{:<14} {:<16} {}", filter.as_str(), filter.label(), count);
    }

    Ok(())
}

pub fn run_check(config: &Config) -> Result<()> {
    let catalog = Catalog::from_config(config)?;

    let origin = match &config.catalog.path {
        Some(p) => p.display().to_string(),
        None => "bundled".to_string(),
    };

    println!("Catalog OK ({})", origin);
    println!("  projects:      {}", catalog.projects().len());
    println!("  featured:      {}", catalog.featured().len());
    println!("  services:      {}", catalog.services().len());
    println!("  team:          {}", catalog.team().len());
    println!("  testimonials:  {}", catalog.testimonials().len());
    println!("  stats:         {}", catalog.stats().len());

    Ok(())
}
