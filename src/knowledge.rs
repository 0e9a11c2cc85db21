// Knowledge Base
//
// *La Base de Connaissances* (The Knowledge Base) - Corpus, index and graph queried together

use crate::config::CarnetConfig;
use crate::errors::{LeCarnetError, Result};
use lecorpus::Corpus;
use legraphe::{GraphStatistics, KnowledgeGraph, SelectionView};
use lerecherche::{CategoryFilter, SearchEngine, SearchIndex, SearchResult};
use std::sync::{Arc, PoisonError, RwLock};

/// A corpus together with the index built from it
#[derive(Debug)]
pub struct Snapshot {
    /// Source corpus
    pub corpus: Corpus,

    /// Index over `corpus`
    pub index: SearchIndex,
}

/// Search engine, searchable corpus and story graph for one workspace
///
/// The corpus snapshot sits behind `RwLock<Arc<_>>`: a rebuild produces a
/// complete new snapshot and swaps it in, so a reader holding an earlier
/// [`Snapshot`] keeps a consistent view until it drops it.
#[derive(Debug)]
pub struct KnowledgeBase {
    engine: SearchEngine,
    snapshot: RwLock<Arc<Snapshot>>,
    graph: KnowledgeGraph,
}

impl KnowledgeBase {
    /// Create a knowledge base with the default search configuration
    pub fn new(corpus: Corpus, graph: KnowledgeGraph) -> Self {
        Self::assemble(SearchEngine::new(), corpus, graph)
    }

    /// Create a knowledge base with a workspace configuration
    pub fn with_config(corpus: Corpus, graph: KnowledgeGraph, config: &CarnetConfig) -> Result<Self> {
        config.validate()?;
        let engine = SearchEngine::with_config(config.search.clone())?;
        Ok(Self::assemble(engine, corpus, graph))
    }

    /// Knowledge base over the built-in sample workspace
    pub fn sample(config: &CarnetConfig) -> Result<Self> {
        let corpus = crate::sample::sample_corpus()?;
        let graph = crate::sample::sample_graph()?;
        Self::with_config(corpus, graph, config)
    }

    fn assemble(engine: SearchEngine, corpus: Corpus, graph: KnowledgeGraph) -> Self {
        let index = engine.build_index(corpus.all());
        Self {
            engine,
            snapshot: RwLock::new(Arc::new(Snapshot { corpus, index })),
            graph,
        }
    }

    /// Current corpus and index
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replace the corpus, rebuilding its index before the swap
    pub fn rebuild_index(&self, corpus: Corpus) {
        let index = self.engine.build_index(corpus.all());
        let fresh = Arc::new(Snapshot { corpus, index });

        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = fresh;
        drop(guard);

        tracing::debug!("Swapped in rebuilt search index");
    }

    /// Search the current snapshot
    pub fn search(&self, query: &str, filter: CategoryFilter) -> Vec<SearchResult> {
        let snapshot = self.snapshot();
        self.engine.search_filtered(&snapshot.index, query, filter)
    }

    /// Selection view of a graph node
    pub fn neighbors_of(&self, id: &str) -> Result<SelectionView> {
        self.graph.neighbors_of(id).map_err(LeCarnetError::from)
    }

    /// Graph statistics
    pub fn statistics(&self) -> GraphStatistics {
        self.graph.statistics()
    }

    /// Story graph
    pub fn graph(&self) -> &KnowledgeGraph {
        &self.graph
    }

    /// Search engine
    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lecorpus::{Category, Entity};

    fn sample() -> KnowledgeBase {
        KnowledgeBase::sample(&CarnetConfig::default()).unwrap()
    }

    #[test]
    fn test_search_sample() {
        let kb = sample();
        let results = kb.search("sarah jonson", CategoryFilter::All);
        assert!(!results.is_empty());
        assert_eq!(results[0].entity.id, "2");
        assert!(results[0].score <= 0.3);

        assert!(kb.search("xyzzy", CategoryFilter::All).is_empty());
    }

    #[test]
    fn test_rebuild_swaps_snapshot() {
        let kb = sample();
        let before = kb.snapshot();

        let corpus = Corpus::new(vec![Entity::new(
            "9",
            "Lighthouse Keeper",
            "Watches the harbor at night.",
            Category::Character,
        )])
        .unwrap();
        kb.rebuild_index(corpus);

        // Earlier readers keep their view
        assert_eq!(before.corpus.len(), 5);
        assert_eq!(before.index.len(), 5);

        let after = kb.snapshot();
        assert_eq!(after.corpus.len(), 1);
        assert_eq!(after.index.len(), 1);
        assert_eq!(kb.search("lighthouse", CategoryFilter::All)[0].entity.id, "9");
        assert!(kb.search("sarah johnson", CategoryFilter::All).is_empty());
    }

    #[test]
    fn test_concurrent_readers_see_whole_snapshots() {
        let kb = Arc::new(sample());

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let kb = Arc::clone(&kb);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        let snapshot = kb.snapshot();
                        assert_eq!(snapshot.corpus.len(), snapshot.index.len());
                    }
                })
            })
            .collect();

        for _ in 0..10 {
            kb.rebuild_index(crate::sample::sample_corpus().unwrap());
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }

    #[test]
    fn test_new_uses_default_engine() {
        let kb = KnowledgeBase::new(
            crate::sample::sample_corpus().unwrap(),
            KnowledgeGraph::default(),
        );
        assert_eq!(kb.engine().config(), &lerecherche::SearchConfig::default());
        assert_eq!(kb.snapshot().index.len(), 5);
        assert_eq!(kb.statistics().total_nodes, 0);
        assert_eq!(kb.search("sarah jonson", CategoryFilter::All)[0].entity.id, "2");
    }

    #[test]
    fn test_unknown_node_is_recoverable() {
        let err = sample().neighbors_of("nobody").unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = CarnetConfig::default();
        config.search.threshold = -0.1;
        let err = KnowledgeBase::sample(&config).unwrap_err();
        assert!(matches!(err, LeCarnetError::Config { .. }));
        assert!(err.suggestion().is_some());
    }
}
