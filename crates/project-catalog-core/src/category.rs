//! Project categories and the category selector.
//!
//! The category set is closed: every project belongs to exactly one of six
//! groups. The selector adds the `"all"` tab on top of that set.
//!
//! Two parsing policies exist for the selector:
//!
//! | Function | Unknown value |
//! |----------|---------------|
//! | [`CategoryFilter::parse`] | error listing the valid values |
//! | [`CategoryFilter::normalize`] | treated as `"all"` |
//!
//! The strict form is used where a human typed the value (CLI, content
//! files). The lenient form is used by the HTTP input surface.

use anyhow::{bail, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Wire value of the "every category" tab.
pub const ALL_VALUE: &str = "all";

/// Label of the "every category" tab.
pub const ALL_LABEL: &str = "All Projects";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Commercial,
    Industrial,
    Retail,
    Hospitality,
    Healthcare,
    Education,
}

impl Category {
    /// All categories, in tab order.
    pub const ALL: [Category; 6] = [
        Category::Commercial,
        Category::Industrial,
        Category::Retail,
        Category::Hospitality,
        Category::Healthcare,
        Category::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Commercial => "commercial",
            Category::Industrial => "industrial",
            Category::Retail => "retail",
            Category::Hospitality => "hospitality",
            Category::Healthcare => "healthcare",
            Category::Education => "education",
        }
    }

    /// Human-readable label shown on the filter tabs.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Commercial => "Commercial",
            Category::Industrial => "Industrial",
            Category::Retail => "Retail",
            Category::Hospitality => "Hospitality",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        match Category::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
        {
            Some(c) => Ok(*c),
            None => bail!(
                "Unknown category: '{}'. Must be one of: {}.",
                s,
                valid_values()
            ),
        }
    }
}

fn valid_values() -> String {
    let mut values = vec![ALL_VALUE];
    values.extend(Category::ALL.iter().map(|c| c.as_str()));
    values.join(", ")
}

/// Label for a category wire value; unknown values are returned unchanged.
pub fn category_label(value: &str) -> String {
    Category::ALL
        .iter()
        .find(|c| c.as_str() == value)
        .map(|c| c.label().to_string())
        .unwrap_or_else(|| value.to_string())
}

/// The active category selector: every category, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Strict parse. `"all"` or a category wire value; anything else errors.
    pub fn parse(value: &str) -> Result<Self> {
        if value.trim().eq_ignore_ascii_case(ALL_VALUE) {
            return Ok(CategoryFilter::All);
        }
        let category = value.parse::<Category>()?;
        Ok(CategoryFilter::Only(category))
    }

    /// Fail-soft parse: unrecognized values select every category.
    pub fn normalize(value: &str) -> Self {
        Self::parse(value).unwrap_or(CategoryFilter::All)
    }

    /// The category predicate.
    pub fn admits(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => ALL_VALUE,
            CategoryFilter::Only(c) => c.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => ALL_LABEL,
            CategoryFilter::Only(c) => c.label(),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        CategoryFilter::parse(s)
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CategoryFilter::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A filter tab: wire value and label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTab {
    pub value: CategoryFilter,
    pub label: &'static str,
}

/// The tabs offered by the input surface: "All Projects" first, then each
/// category in [`Category::ALL`] order.
pub fn tabs() -> Vec<CategoryTab> {
    std::iter::once(CategoryFilter::All)
        .chain(Category::ALL.iter().map(|c| CategoryFilter::Only(*c)))
        .map(|value| CategoryTab {
            value,
            label: value.label(),
        })
        .collect()
}
