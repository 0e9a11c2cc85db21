// lecorpus - Corpus Store
//
// *Le Corpus* (The Corpus) - Immutable, validated collection of tagged entities

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Entity and category types.
pub mod entity;
/// Validated, ordered entity collection.
pub mod store;

pub use entity::{Category, Entity, UnknownCategory};
pub use store::{Corpus, CorpusError};
