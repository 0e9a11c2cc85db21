// Graph statistics

use crate::graph::{KnowledgeGraph, NodeCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Index;

/// Node and edge totals with a per-category breakdown
///
/// Every category has an entry, zero when the graph has none of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStatistics {
    /// Number of nodes
    pub total_nodes: usize,

    /// Number of edges
    pub total_edges: usize,

    /// Node count per category
    pub by_category: BTreeMap<NodeCategory, usize>,
}

impl GraphStatistics {
    /// Node count for one category
    pub fn count(&self, category: NodeCategory) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}

impl Index<NodeCategory> for GraphStatistics {
    type Output = usize;

    fn index(&self, category: NodeCategory) -> &usize {
        self.by_category.get(&category).unwrap_or(&0)
    }
}

impl KnowledgeGraph {
    /// Count nodes per category
    pub fn statistics(&self) -> GraphStatistics {
        let mut by_category: BTreeMap<NodeCategory, usize> =
            NodeCategory::ALL.iter().map(|c| (*c, 0)).collect();

        for node in self.nodes() {
            *by_category.entry(node.category).or_insert(0) += 1;
        }

        GraphStatistics {
            total_nodes: self.node_count(),
            total_edges: self.edge_count(),
            by_category,
        }
    }
}
