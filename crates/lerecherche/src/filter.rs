// Category filter for search results

use lecorpus::Category;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Filter-bar selection applied after ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// No filtering
    #[default]
    All,

    /// Documents only
    Documents,

    /// Characters only
    Characters,

    /// Locations only
    Locations,

    /// Notes only
    Notes,
}

impl CategoryFilter {
    /// Every filter, in filter-bar order
    pub const ALL: [CategoryFilter; 5] = [
        CategoryFilter::All,
        CategoryFilter::Documents,
        CategoryFilter::Characters,
        CategoryFilter::Locations,
        CategoryFilter::Notes,
    ];

    /// The category this filter keeps, or `None` for [`CategoryFilter::All`]
    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Documents => Some(Category::Document),
            CategoryFilter::Characters => Some(Category::Character),
            CategoryFilter::Locations => Some(Category::Location),
            CategoryFilter::Notes => Some(Category::Note),
        }
    }

    /// Whether an entity of `category` passes
    pub fn accepts(&self, category: Category) -> bool {
        self.category().map_or(true, |wanted| wanted == category)
    }

    /// Filter-bar label
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Documents => "documents",
            CategoryFilter::Characters => "characters",
            CategoryFilter::Locations => "locations",
            CategoryFilter::Notes => "notes",
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        match category {
            Category::Document => CategoryFilter::Documents,
            Category::Character => CategoryFilter::Characters,
            Category::Location => CategoryFilter::Locations,
            Category::Note => CategoryFilter::Notes,
        }
    }
}

impl From<Option<Category>> for CategoryFilter {
    fn from(category: Option<Category>) -> Self {
        category.map_or(CategoryFilter::All, CategoryFilter::from)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryFilter {
    type Err = lecorpus::UnknownCategory;

    /// Accepts filter-bar labels (`"characters"`) and category names (`"character"`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if normalized == "all" {
            return Ok(CategoryFilter::All);
        }

        let singular = normalized.strip_suffix('s').unwrap_or(&normalized);
        singular
            .parse::<Category>()
            .map(CategoryFilter::from)
            .map_err(|_| lecorpus::UnknownCategory(s.to_string()))
    }
}
