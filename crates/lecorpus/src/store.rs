// Corpus store
//
// *Le Magasin* (The Store) - Fixed, ordered entity sequence validated at build time

use crate::entity::{Category, Entity};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Corpus construction errors
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Entity with a missing or duplicate identifier
    #[error("Invalid entity at position {position}: {reason}")]
    InvalidEntity {
        /// Position of the offending entity in the input sequence
        position: usize,

        /// What is wrong with it
        reason: String,
    },

    /// Malformed JSON input
    #[error("Failed to parse corpus JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable, ordered collection of entities
///
/// Identifiers are unique and non-empty; this is checked once in
/// [`Corpus::new`], so a `Corpus` value is always valid.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Entities in declaration order
    entities: Vec<Arc<Entity>>,

    /// Identifier to position mapping
    id_index: HashMap<String, usize>,
}

impl Corpus {
    /// Build a corpus, rejecting empty or duplicate identifiers
    pub fn new(entities: Vec<Entity>) -> Result<Self, CorpusError> {
        let mut id_index = HashMap::with_capacity(entities.len());

        for (position, entity) in entities.iter().enumerate() {
            if entity.id.trim().is_empty() {
                return Err(CorpusError::InvalidEntity {
                    position,
                    reason: "missing identifier".to_string(),
                });
            }

            if let Some(first) = id_index.insert(entity.id.clone(), position) {
                return Err(CorpusError::InvalidEntity {
                    position,
                    reason: format!(
                        "duplicate identifier '{}' (first declared at position {})",
                        entity.id, first
                    ),
                });
            }
        }

        tracing::debug!("Built corpus with {} entities", entities.len());

        Ok(Self {
            entities: entities.into_iter().map(Arc::new).collect(),
            id_index,
        })
    }

    /// Parse a JSON array of entities and validate it
    pub fn from_json(json: &str) -> Result<Self, CorpusError> {
        let entities: Vec<Entity> = serde_json::from_str(json)?;
        Self::new(entities)
    }

    /// All entities in original order
    pub fn all(&self) -> &[Arc<Entity>] {
        &self.entities
    }

    /// Entities of one category, in original order
    pub fn by_category(&self, category: Category) -> Vec<Arc<Entity>> {
        self.entities
            .iter()
            .filter(|entity| entity.category == category)
            .cloned()
            .collect()
    }

    /// Look up an entity by identifier
    pub fn get(&self, id: &str) -> Option<&Arc<Entity>> {
        self.id_index.get(id).map(|&position| &self.entities[position])
    }

    /// Iterate entities in original order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Entity>> {
        self.entities.iter()
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the corpus is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
