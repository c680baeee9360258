//! Core data models for the catalog.
//!
//! [`Project`] is the record the catalog filter operates on. The remaining
//! types are read-only site content served alongside it; they are never
//! filtered.

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// A completed project in the catalog.
///
/// Projects are loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Stable unique identifier.
    pub id: String,
    /// Display name (non-empty).
    pub title: String,
    /// URL segment for the detail page.
    pub slug: String,
    pub category: Category,
    pub location: String,
    #[serde(default)]
    pub year: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default)]
    pub images: Vec<ProjectImage>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub specs: Vec<ProjectSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectImage {
    pub url: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// A labelled figure on the project detail page (e.g. `Size: 28,000 sqm`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub quote: String,
    pub author: String,
    pub role: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A headline company figure (`150+ Projects Completed`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

/// Everything the site serves, as read from a content file.
///
/// A list missing from the file is an empty list, never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub team: Vec<TeamMember>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub stats: Vec<Stat>,
}
