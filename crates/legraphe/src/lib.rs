//! legraphe - Story World Graph
//!
//! *Le Graphe* (The Graph) - Typed node/edge model with neighbor lookup and statistics

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Graph model, construction and validation.
pub mod graph;
/// Rendering hints and renderer element export.
pub mod presentation;
/// Node selection and undirected neighbor lookup.
pub mod selection;
/// Per-category node statistics.
pub mod stats;

pub use graph::{
    EdgeIndex, GraphDocument, GraphEdge, GraphError, GraphNode, KnowledgeGraph, NodeCategory,
    NodeIndex, NodeRecord,
};
pub use presentation::{edge_id, NodeShape, PresentationHint, RenderElement};
pub use selection::{Connection, SelectionView};
pub use stats::GraphStatistics;
