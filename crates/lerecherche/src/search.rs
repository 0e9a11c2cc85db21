// Core search engine implementation

use crate::filter::CategoryFilter;
use crate::fuzzy::{self, FuzzyMatch};
use crate::index::{IndexedEntity, SearchIndex};
use crate::query::{NormalizedText, QueryPattern};
use crate::ranking::{Score, SearchField, WeightedScorer};
use lecorpus::{Category, Entity};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default match tolerance: entities scoring above it are dropped
pub const DEFAULT_THRESHOLD: f32 = 0.3;

/// Default absolute cap on edit errors per field
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 8;

/// Search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Relative weight of the title field
    pub title_weight: f32,

    /// Relative weight of the body field
    pub body_weight: f32,

    /// Relative weight of the tags field
    pub tags_weight: f32,

    /// Match tolerance in [0, 1]
    pub threshold: f32,

    /// Upper bound on edit errors for a single field match
    pub max_edit_distance: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            title_weight: 0.4,
            body_weight: 0.3,
            tags_weight: 0.3,
            threshold: DEFAULT_THRESHOLD,
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
        }
    }
}

impl SearchConfig {
    /// Check weights and threshold
    pub fn validate(&self) -> Result<(), Error> {
        let weights = [
            ("title_weight", self.title_weight),
            ("body_weight", self.body_weight),
            ("tags_weight", self.tags_weight),
        ];

        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a finite, non-negative number (got {weight})"
                )));
            }
        }

        if weights.iter().all(|(_, weight)| *weight == 0.0) {
            return Err(Error::InvalidConfig(
                "at least one field weight must be positive".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidConfig(format!(
                "threshold must be within [0, 1] (got {})",
                self.threshold
            )));
        }

        Ok(())
    }

    /// Edit errors tolerated for a pattern of `pattern_len` characters
    pub fn allowed_errors(&self, pattern_len: usize) -> usize {
        let relative = (pattern_len as f32 * self.threshold).floor() as usize;
        relative.min(self.max_edit_distance)
    }
}

/// Where a query matched inside one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMatch {
    /// Matched field
    pub field: SearchField,

    /// Index of the matched tag, for [`SearchField::Tags`]
    pub tag_index: Option<usize>,

    /// Field distance (0-1)
    pub distance: f32,

    /// Matched char range in the source field value, half-open
    pub span: Option<(usize, usize)>,
}

/// Search result
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Matched entity
    pub entity: Arc<Entity>,

    /// Position of the entity in the corpus
    pub position: usize,

    /// Relevance distance: 0 is a perfect match, lower is better
    pub score: f32,

    /// Per-field breakdown of `score`
    pub breakdown: Score,

    /// Match locations for highlighting (empty for listings)
    pub matches: Vec<FieldMatch>,
}

impl SearchResult {
    /// Match quality as a display percentage, `round((1 - score) * 100)`
    pub fn match_percent(&self) -> u8 {
        ((1.0 - self.score.clamp(0.0, 1.0)) * 100.0).round() as u8
    }

    fn listed(entry: &IndexedEntity) -> Self {
        Self {
            entity: Arc::clone(&entry.entity),
            position: entry.position,
            score: 0.0,
            breakdown: Score::default(),
            matches: Vec::new(),
        }
    }
}

/// Fuzzy multi-field search engine
///
/// Holds configuration only. Indexes are separate values owned by the caller
/// and passed into every query.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    config: SearchConfig,
    scorer: WeightedScorer,
}

impl SearchEngine {
    /// Create a new search engine with the default configuration
    pub fn new() -> Self {
        let config = SearchConfig::default();
        let scorer = Self::scorer_for(&config);
        Self { config, scorer }
    }

    /// Create with a custom, validated configuration
    pub fn with_config(config: SearchConfig) -> Result<Self, Error> {
        config.validate()?;
        let scorer = Self::scorer_for(&config);
        Ok(Self { config, scorer })
    }

    fn scorer_for(config: &SearchConfig) -> WeightedScorer {
        WeightedScorer::new()
            .with_weights(config.title_weight, config.body_weight, config.tags_weight)
            .with_threshold(config.threshold)
    }

    /// Active configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Build an index over `entities`
    pub fn build_index(&self, entities: &[Arc<Entity>]) -> SearchIndex {
        SearchIndex::build(entities)
    }

    /// Execute a query with an optional category post-filter
    ///
    /// An empty or whitespace-only query lists every entity that passes the
    /// filter, in corpus order, with score 0. Otherwise entities are fuzzily
    /// matched against title, body and each tag, scored, and those within the
    /// threshold are returned best first, ties in corpus order.
    pub fn search(
        &self,
        index: &SearchIndex,
        query: &str,
        category: Option<Category>,
    ) -> Vec<SearchResult> {
        self.search_filtered(index, query, CategoryFilter::from(category))
    }

    /// Execute a query with a filter-bar selection
    pub fn search_filtered(
        &self,
        index: &SearchIndex,
        query: &str,
        filter: CategoryFilter,
    ) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            return index
                .entries()
                .iter()
                .filter(|entry| filter.accepts(entry.entity.category))
                .map(SearchResult::listed)
                .collect();
        }

        // Typed text that folds away entirely (lone combining marks) matches nothing.
        let Some(pattern) = QueryPattern::parse(query) else {
            return Vec::new();
        };

        let mut results: Vec<SearchResult> = index
            .entries()
            .iter()
            .filter_map(|entry| self.score_entry(entry, &pattern))
            .collect();

        // Stable: equal scores keep corpus order.
        results.sort_by(|a, b| a.score.total_cmp(&b.score));

        let ranked = results.len();
        results.retain(|result| filter.accepts(result.entity.category));

        tracing::debug!(
            "Query {:?} matched {} entities ({} after filter {})",
            pattern.original,
            ranked,
            results.len(),
            filter
        );

        results
    }

    fn score_entry(&self, entry: &IndexedEntity, pattern: &QueryPattern) -> Option<SearchResult> {
        let max_errors = self.config.allowed_errors(pattern.len());
        let mut matches = Vec::with_capacity(SearchField::ALL.len());

        if let Some(found) = fuzzy::find(&pattern.chars, &entry.title.chars, max_errors) {
            matches.push(field_match(SearchField::Title, None, &entry.title, found, pattern));
        }

        if let Some(found) = fuzzy::find(&pattern.chars, &entry.body.chars, max_errors) {
            matches.push(field_match(SearchField::Body, None, &entry.body, found, pattern));
        }

        // Each tag is its own haystack, so a match never straddles two tags.
        let best_tag = entry
            .tags
            .iter()
            .enumerate()
            .filter_map(|(i, tag)| {
                fuzzy::find(&pattern.chars, &tag.chars, max_errors).map(|found| (i, tag, found))
            })
            .min_by_key(|(_, _, found)| found.errors);
        if let Some((i, tag, found)) = best_tag {
            matches.push(field_match(SearchField::Tags, Some(i), tag, found, pattern));
        }

        let breakdown = self
            .scorer
            .score(matches.iter().map(|m| (m.field, m.distance)))?;

        Some(SearchResult {
            entity: Arc::clone(&entry.entity),
            position: entry.position,
            score: breakdown.overall,
            breakdown,
            matches,
        })
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn field_match(
    field: SearchField,
    tag_index: Option<usize>,
    text: &NormalizedText,
    found: FuzzyMatch,
    pattern: &QueryPattern,
) -> FieldMatch {
    FieldMatch {
        field,
        tag_index,
        distance: found.distance(pattern.len()),
        span: text.source_span(found.start, found.end),
    }
}

/// Search errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rejected configuration
    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(entities: Vec<Entity>) -> SearchIndex {
        let entities: Vec<Arc<Entity>> = entities.into_iter().map(Arc::new).collect();
        SearchIndex::build(&entities)
    }

    fn ids(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.entity.id.as_str()).collect()
    }

    #[test]
    fn test_search_engine_basic() {
        let engine = SearchEngine::new();
        let index = index(vec![
            Entity::new("1", "Hello there", "greeting", Category::Note),
            Entity::new("2", "Goodbye", "farewell", Category::Note),
        ]);

        let results = engine.search(&index, "hello", None);
        assert_eq!(ids(&results), vec!["1"]);
        assert!(results[0].score < 1e-6);
        assert_eq!(results[0].matches[0].field, SearchField::Title);
        assert_eq!(results[0].matches[0].span, Some((0, 5)));
    }

    #[test]
    fn test_search_ranking() {
        let engine = SearchEngine::new();
        let index = index(vec![
            Entity::new("plural", "Lanterns", "", Category::Note),
            Entity::new("singular", "Lantern", "", Category::Note),
        ]);

        let results = engine.search(&index, "lanterx", None);
        // "lanterx" is one substitution away from both titles
        assert_eq!(ids(&results), vec!["plural", "singular"]);

        let results = engine.search(&index, "lantern", None);
        assert_eq!(ids(&results), vec!["plural", "singular"]);
        assert!(results.iter().all(|r| r.score < 1e-6));
        assert_eq!(results[0].score, results[1].score);

        let results = engine.search(&index, "lanterns", None);
        assert_eq!(ids(&results), vec!["plural", "singular"]);
        assert!(results[0].score < results[1].score);
    }

    #[test]
    fn test_empty_query_lists_filtered_entities() {
        let engine = SearchEngine::new();
        let index = index(vec![
            Entity::new("1", "A", "", Category::Document),
            Entity::new("2", "B", "", Category::Character),
            Entity::new("3", "C", "", Category::Document),
        ]);

        let results = engine.search(&index, "   ", Some(Category::Document));
        assert_eq!(ids(&results), vec!["1", "3"]);
        assert!(results.iter().all(|r| r.score == 0.0 && r.matches.is_empty()));
        assert_eq!(results[1].position, 2);
    }

    #[test]
    fn test_query_does_not_span_tags() {
        let engine = SearchEngine::new();
        let index = index(vec![
            Entity::new("1", "Untitled", "", Category::Note).with_tags(["coffee", "shop"])
        ]);

        assert!(engine.search(&index, "coffee shop", None).is_empty());

        let results = engine.search(&index, "shop", None);
        assert_eq!(results[0].matches[0].field, SearchField::Tags);
        assert_eq!(results[0].matches[0].tag_index, Some(1));
    }

    #[test]
    fn test_filter_does_not_change_scores() {
        let engine = SearchEngine::new();
        let index = index(vec![
            Entity::new("1", "Sarah", "", Category::Document),
            Entity::new("2", "Sarahs", "", Category::Character),
        ]);

        let unfiltered = engine.search(&index, "sarahs", None);
        let filtered = engine.search(&index, "sarahs", Some(Category::Document));

        assert_eq!(ids(&filtered), vec!["1"]);
        let before = unfiltered.iter().find(|r| r.entity.id == "1").unwrap();
        assert_eq!(before.score, filtered[0].score);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SearchConfig {
            threshold: 1.5,
            ..SearchConfig::default()
        };
        assert!(matches!(
            SearchEngine::with_config(config),
            Err(Error::InvalidConfig(_))
        ));

        let config = SearchConfig {
            title_weight: 0.0,
            body_weight: 0.0,
            tags_weight: 0.0,
            ..SearchConfig::default()
        };
        assert!(SearchEngine::with_config(config).is_err());

        let config = SearchConfig {
            body_weight: -0.1,
            ..SearchConfig::default()
        };
        assert!(SearchEngine::with_config(config).is_err());
    }

    #[test]
    fn test_allowed_errors() {
        let config = SearchConfig::default();
        assert_eq!(config.allowed_errors(1), 0);
        assert_eq!(config.allowed_errors(5), 1);
        assert_eq!(config.allowed_errors(12), 3);
        assert_eq!(config.allowed_errors(100), DEFAULT_MAX_EDIT_DISTANCE);
    }

    #[test]
    fn test_zero_threshold_requires_exact_substring() {
        let engine = SearchEngine::with_config(SearchConfig {
            threshold: 0.0,
            ..SearchConfig::default()
        })
        .unwrap();
        let index = index(vec![Entity::new("1", "Maple Street", "", Category::Location)]);

        assert_eq!(engine.search(&index, "street", None).len(), 1);
        assert!(engine.search(&index, "streat", None).is_empty());
    }

    #[test]
    fn test_match_percent() {
        let engine = SearchEngine::new();
        let index = index(vec![Entity::new("1", "abcdefghij", "", Category::Note)]);

        // One error in ten: 0.3 * (0.1 / 0.3) ^ 0.4
        let results = engine.search(&index, "abcdefghix", None);
        assert!((results[0].score - 0.193_32).abs() < 1e-4);
        assert_eq!(results[0].match_percent(), 81);
    }

    #[test]
    fn test_exact_title_outranks_exact_body_mention() {
        let engine = SearchEngine::new();
        let index = index(vec![
            Entity::new(
                "harbor",
                "Harbor Notes",
                "we climbed the old lighthouse at dawn",
                Category::Note,
            ),
            Entity::new("lighthouse", "The Old Lighthouse", "", Category::Location)
                .with_tags(["old lighthouses"]),
        ]);

        let results = engine.search(&index, "The Old Lighthouse", None);
        assert_eq!(ids(&results), vec!["lighthouse", "harbor"]);
        assert!(results[0].score < 1e-6);
        assert!(results[0].breakdown.tags.is_some());
    }

    #[test]
    fn test_partial_extra_field_does_not_demote_title_hit() {
        let engine = SearchEngine::new();
        let index = index(vec![
            Entity::new("1", "ba a", "a a", Category::Note),
        ]);

        let results = engine.search(&index, "ba a", None);
        assert_eq!(ids(&results), vec!["1"]);
        assert!(results[0].breakdown.body.is_some());
        assert!(results[0].score < 1e-6);
    }

    #[test]
    fn test_mark_only_query_matches_nothing() {
        let engine = SearchEngine::new();
        let index = index(vec![
            Entity::new("1", "Cafe", "", Category::Location),
            Entity::new("2", "Elodie", "", Category::Character),
        ]);

        assert!(engine.search(&index, "\u{0301}", None).is_empty());
        assert!(engine.search(&index, " \u{0301}\u{0308} ", None).is_empty());
        assert_eq!(engine.search(&index, " \t", None).len(), 2);
    }
}
