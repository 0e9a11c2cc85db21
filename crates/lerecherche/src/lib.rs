// lerecherche - Search & Rank Engine
//
// *La Recherche* (The Search) - Typo-tolerant, weighted multi-field search over a corpus

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod filter;
pub mod fuzzy;
pub mod index;
pub mod query;
pub mod ranking;
pub mod search;

pub use filter::CategoryFilter;
pub use fuzzy::FuzzyMatch;
pub use index::{IndexedEntity, SearchIndex};
pub use query::{NormalizedText, QueryPattern};
pub use ranking::{Score, SearchField, WeightedScorer};
pub use search::{
    Error, FieldMatch, SearchConfig, SearchEngine, SearchResult, DEFAULT_MAX_EDIT_DISTANCE,
    DEFAULT_THRESHOLD,
};
