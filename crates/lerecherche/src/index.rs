// Search index
//
// *L'Index* (The Index) - Pre-folded field text for one corpus snapshot

use crate::query::NormalizedText;
use lecorpus::{Corpus, Entity};
use std::sync::Arc;

/// One entity with its fields folded for matching
#[derive(Debug, Clone)]
pub struct IndexedEntity {
    /// Source entity
    pub entity: Arc<Entity>,

    /// Position in the corpus
    pub position: usize,

    /// Folded title
    pub title: NormalizedText,

    /// Folded body
    pub body: NormalizedText,

    /// Folded tags, one per source tag
    pub tags: Vec<NormalizedText>,
}

impl IndexedEntity {
    fn new(entity: Arc<Entity>, position: usize) -> Self {
        let title = NormalizedText::new(&entity.title);
        let body = NormalizedText::new(&entity.body);
        let tags = entity.tags.iter().map(|tag| NormalizedText::new(tag)).collect();

        Self {
            entity,
            position,
            title,
            body,
            tags,
        }
    }
}

/// Searchable view of a corpus snapshot
///
/// Built once and never mutated. When the corpus changes, build a new index
/// and replace the old one as a whole.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<IndexedEntity>,
}

impl SearchIndex {
    /// Index a sequence of entities, keeping their order
    pub fn build(entities: &[Arc<Entity>]) -> Self {
        let entries: Vec<IndexedEntity> = entities
            .iter()
            .enumerate()
            .map(|(position, entity)| IndexedEntity::new(Arc::clone(entity), position))
            .collect();

        tracing::debug!("Built search index over {} entities", entries.len());

        Self { entries }
    }

    /// Index a validated corpus
    pub fn from_corpus(corpus: &Corpus) -> Self {
        Self::build(corpus.all())
    }

    /// Indexed entities in corpus order
    pub fn entries(&self) -> &[IndexedEntity] {
        &self.entries
    }

    /// Number of indexed entities
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
