// Corpus entity types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed classification of a corpus entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Manuscript chapter or other prose document
    Document,

    /// Character sheet
    Character,

    /// Place in the story world
    Location,

    /// Free-form worldbuilding note
    Note,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 4] = [
        Category::Document,
        Category::Character,
        Category::Location,
        Category::Note,
    ];

    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Document => "document",
            Category::Character => "character",
            Category::Location => "location",
            Category::Note => "note",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Document => "Document",
            Category::Character => "Character",
            Category::Location => "Location",
            Category::Note => "Note",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" => Ok(Category::Document),
            "character" => Ok(Category::Character),
            "location" => Ok(Category::Location),
            "note" => Ok(Category::Note),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// A document, character, location or note in the corpus
///
/// Entities are immutable once constructed. `tags` keeps insertion order and
/// duplicates; `last_modified` is an opaque display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier within a corpus; absent in input means empty,
    /// which [`Corpus::new`](crate::Corpus::new) rejects
    #[serde(default)]
    pub id: String,

    /// Title
    pub title: String,

    /// Body text
    #[serde(alias = "content")]
    pub body: String,

    /// Ordered tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Last-modified marker, shown as-is
    #[serde(default, alias = "lastModified")]
    pub last_modified: String,

    /// Entity category
    #[serde(alias = "type")]
    pub category: Category,
}

impl Entity {
    /// Create a new entity with no tags and an empty last-modified marker
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            tags: Vec::new(),
            last_modified: String::new(),
            category,
        }
    }

    /// Set tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the last-modified marker
    pub fn with_last_modified(mut self, last_modified: impl Into<String>) -> Self {
        self.last_modified = last_modified.into();
        self
    }
}
