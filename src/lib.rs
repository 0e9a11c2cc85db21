//! LeCarnet - Knowledge Index Core for a Writing Workspace
//!
//! Fuzzy, weighted multi-field search over a small tagged corpus, plus a
//! typed story graph with neighbor lookup and statistics.
//!
//! # Crates
//!
//! - [`lecorpus`] - Corpus Store: entities, categories and validation
//! - [`lerecherche`] - Search & Rank Engine (feature `search`)
//! - [`legraphe`] - Graph Model (feature `graph`)
//!
//! # Example
//!
//! ```no_run
//! use lecarnet::{CarnetConfig, CategoryFilter, KnowledgeBase};
//!
//! let kb = KnowledgeBase::sample(&CarnetConfig::default())?;
//! for result in kb.search("sarah jonson", CategoryFilter::All) {
//!     println!("{}% {}", result.match_percent(), result.entity.title);
//! }
//! # Ok::<(), lecarnet::LeCarnetError>(())
//! ```

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub use lecorpus;
pub use lecorpus::{Category, Corpus, CorpusError, Entity};

#[cfg(feature = "search")]
pub use lerecherche;
#[cfg(feature = "search")]
pub use lerecherche::{CategoryFilter, SearchConfig, SearchEngine, SearchIndex, SearchResult};

#[cfg(feature = "graph")]
pub use legraphe;
#[cfg(feature = "graph")]
pub use legraphe::{
    GraphEdge, GraphError, GraphNode, GraphStatistics, KnowledgeGraph, NodeCategory,
    SelectionView,
};

/// Workspace-level error type.
pub mod errors;
/// Built-in sample workspace.
pub mod sample;

/// TOML workspace configuration.
#[cfg(feature = "search")]
pub mod config;

/// Corpus, index and graph queried together.
#[cfg(all(feature = "search", feature = "graph"))]
pub mod knowledge;

/// Demo command-line interface.
#[cfg(feature = "cli")]
pub mod cli;

pub use errors::{LeCarnetError, Result};

#[cfg(feature = "search")]
pub use config::CarnetConfig;

#[cfg(all(feature = "search", feature = "graph"))]
pub use knowledge::{KnowledgeBase, Snapshot};
