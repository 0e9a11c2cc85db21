// Node selection and neighbor lookup

use crate::graph::{GraphError, KnowledgeGraph, NodeCategory};
use crate::presentation::edge_id;
use serde::{Deserialize, Serialize};

/// One edge seen from the selected node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Renderer id of the edge
    pub edge_id: String,

    /// Id of the node at the other end
    pub neighbor_id: String,

    /// Label of the node at the other end
    pub neighbor_label: String,

    /// Relationship label
    pub relationship: String,

    /// Whether the selected node is the declared source
    pub outgoing: bool,
}

/// Details panel for a selected node
///
/// Neighbors follow edge declaration order and are not deduplicated: two
/// edges to the same node list it twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionView {
    /// Node id
    pub id: String,

    /// Display label
    pub label: String,

    /// Node category
    pub category: NodeCategory,

    /// Number of edges touching the node
    pub connection_count: usize,

    /// Labels of the nodes at the other end of each edge
    pub neighbors: Vec<String>,

    /// Per-edge detail, parallel to `neighbors`
    pub connections: Vec<Connection>,
}

impl SelectionView {
    /// "Connected to: A, B, A" style summary
    pub fn neighbor_summary(&self) -> String {
        self.neighbors.join(", ")
    }
}

impl KnowledgeGraph {
    /// Selection view for `id`, treating edges as undirected
    pub fn neighbors_of(&self, id: &str) -> Result<SelectionView, GraphError> {
        let idx = self
            .find(id)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
        let node = self
            .get_node(idx)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;

        let mut neighbors = Vec::new();
        let mut connections = Vec::new();

        for &edge_idx in self.incident_edges(idx) {
            let (Some(edge), Some((source, target))) =
                (self.get_edge(edge_idx), self.endpoints(edge_idx))
            else {
                continue;
            };

            let outgoing = source == idx;
            let other = if outgoing { target } else { source };
            let Some(other_node) = self.get_node(other) else {
                continue;
            };

            neighbors.push(other_node.label.clone());
            connections.push(Connection {
                edge_id: edge_id(edge_idx.index()),
                neighbor_id: other_node.id.clone(),
                neighbor_label: other_node.label.clone(),
                relationship: edge.relationship.clone(),
                outgoing,
            });
        }

        Ok(SelectionView {
            id: node.id.clone(),
            label: node.label.clone(),
            category: node.category,
            connection_count: connections.len(),
            neighbors,
            connections,
        })
    }
}
