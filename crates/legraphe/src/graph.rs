// Knowledge graph implementation

use crate::presentation::PresentationHint;
use petgraph::stable_graph::StableGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Node index type
pub type NodeIndex = petgraph::stable_graph::NodeIndex;

/// Edge index type
pub type EdgeIndex = petgraph::stable_graph::EdgeIndex;

/// Node category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    /// Manuscript document
    Document,

    /// Story character
    Character,

    /// Place
    Location,

    /// Abstract idea (magic system, prophecy, ...)
    Concept,
}

impl NodeCategory {
    /// Every category, in legend order
    pub const ALL: [NodeCategory; 4] = [
        NodeCategory::Document,
        NodeCategory::Character,
        NodeCategory::Location,
        NodeCategory::Concept,
    ];

    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeCategory::Document => "document",
            NodeCategory::Character => "character",
            NodeCategory::Location => "location",
            NodeCategory::Concept => "concept",
        }
    }

    /// Plural legend label
    pub fn legend_label(&self) -> &'static str {
        match self {
            NodeCategory::Document => "Documents",
            NodeCategory::Character => "Characters",
            NodeCategory::Location => "Locations",
            NodeCategory::Concept => "Concepts",
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeCategory {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" | "documents" => Ok(NodeCategory::Document),
            "character" | "characters" => Ok(NodeCategory::Character),
            "location" | "locations" => Ok(NodeCategory::Location),
            "concept" | "concepts" => Ok(NodeCategory::Concept),
            _ => Err(GraphError::UnknownCategory(s.to_string())),
        }
    }
}

/// Node in the knowledge graph
///
/// Identity only. Size and color live in [`PresentationHint`], stored beside
/// the node by the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique identifier
    pub id: String,

    /// Display label
    pub label: String,

    /// Node category
    #[serde(alias = "type")]
    pub category: NodeCategory,
}

impl GraphNode {
    /// Create a new node
    pub fn new(id: impl Into<String>, label: impl Into<String>, category: NodeCategory) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category,
        }
    }
}

/// Relationship between two nodes
///
/// Direction is kept for labelling; connectivity treats edges as undirected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Source node id
    pub source: String,

    /// Target node id
    pub target: String,

    /// Relationship label ("meets", "visits", ...)
    pub relationship: String,
}

impl GraphEdge {
    /// Create a new edge
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        relationship: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relationship: relationship.into(),
        }
    }
}

/// Graph construction and query errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Two nodes share an identifier
    #[error("Duplicate node id '{0}'")]
    DuplicateNode(String),

    /// Edge endpoint does not name a node
    #[error("Edge #{index} ({from} -> {to}) references unknown node '{missing}'")]
    DanglingEdge {
        /// Declaration index of the edge
        index: usize,

        /// Declared source id
        from: String,

        /// Declared target id
        to: String,

        /// The endpoint that does not exist
        missing: String,
    },

    /// Query for a node that does not exist
    #[error("Unknown node '{0}'")]
    UnknownNode(String),

    /// Unrecognized category name
    #[error("Unknown node category '{0}'")]
    UnknownCategory(String),

    /// Malformed JSON graph document
    #[error("Failed to parse graph JSON: {0}")]
    Json(String),
}

/// Node entry of a JSON graph document, with optional rendering hints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node identity
    #[serde(flatten)]
    pub node: GraphNode,

    /// Rendering size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,

    /// Rendering color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Serialized form of a graph: `{ "nodes": [...], "edges": [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Nodes in declaration order
    pub nodes: Vec<NodeRecord>,

    /// Edges in declaration order
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

/// Typed node/edge graph over the story world
///
/// Immutable after [`KnowledgeGraph::build`]. Node and edge declaration order
/// is preserved and drives every ordered query.
#[derive(Debug, Clone)]
pub struct KnowledgeGraph {
    /// Internal graph structure
    graph: StableGraph<GraphNode, GraphEdge>,

    /// Node id to index mapping
    id_index: HashMap<String, NodeIndex>,

    /// Incident edges per node, in edge declaration order
    incidence: HashMap<NodeIndex, Vec<EdgeIndex>>,

    /// Rendering hints by node id
    hints: HashMap<String, PresentationHint>,
}

impl KnowledgeGraph {
    /// Build a graph from nodes and edges
    ///
    /// Fails with [`GraphError::DuplicateNode`] or [`GraphError::DanglingEdge`];
    /// no partially built graph is ever returned.
    pub fn build(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Result<Self, GraphError> {
        Self::assemble(nodes.into_iter().map(|node| (node, None)), edges)
    }

    /// Build a graph whose nodes carry rendering hints
    pub fn build_with_hints(
        nodes: Vec<(GraphNode, PresentationHint)>,
        edges: Vec<GraphEdge>,
    ) -> Result<Self, GraphError> {
        Self::assemble(nodes.into_iter().map(|(node, hint)| (node, Some(hint))), edges)
    }

    /// Build a graph from a parsed document
    pub fn from_document(document: GraphDocument) -> Result<Self, GraphError> {
        let nodes = document.nodes.into_iter().map(|record| {
            let hint = match (record.size, record.color) {
                (None, None) => None,
                (size, color) => {
                    let defaults = PresentationHint::default_for(record.node.category);
                    Some(PresentationHint {
                        size: size.unwrap_or(defaults.size),
                        color: color.unwrap_or(defaults.color),
                    })
                }
            };
            (record.node, hint)
        });
        Self::assemble(nodes, document.edges)
    }

    /// Parse and build a graph from JSON
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let document: GraphDocument =
            serde_json::from_str(json).map_err(|e| GraphError::Json(e.to_string()))?;
        Self::from_document(document)
    }

    fn assemble<I>(nodes: I, edges: Vec<GraphEdge>) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (GraphNode, Option<PresentationHint>)>,
    {
        let mut graph = StableGraph::new();
        let mut id_index = HashMap::new();
        let mut incidence: HashMap<NodeIndex, Vec<EdgeIndex>> = HashMap::new();
        let mut hints = HashMap::new();

        for (node, hint) in nodes {
            if id_index.contains_key(&node.id) {
                return Err(GraphError::DuplicateNode(node.id));
            }
            if let Some(hint) = hint {
                hints.insert(node.id.clone(), hint);
            }
            let id = node.id.clone();
            let idx = graph.add_node(node);
            id_index.insert(id, idx);
            incidence.insert(idx, Vec::new());
        }

        for (index, edge) in edges.into_iter().enumerate() {
            let lookup = |id: &str| {
                id_index.get(id).copied().ok_or_else(|| GraphError::DanglingEdge {
                    index,
                    from: edge.source.clone(),
                    to: edge.target.clone(),
                    missing: id.to_string(),
                })
            };
            let from = lookup(&edge.source)?;
            let to = lookup(&edge.target)?;

            let edge_idx = graph.add_edge(from, to, edge);
            incidence.entry(from).or_default().push(edge_idx);
            if to != from {
                incidence.entry(to).or_default().push(edge_idx);
            }
        }

        tracing::debug!(
            "Built knowledge graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self {
            graph,
            id_index,
            incidence,
            hints,
        })
    }

    /// Find a node index by id
    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        self.id_index.get(id).copied()
    }

    /// Get node by index
    pub fn get_node(&self, idx: NodeIndex) -> Option<&GraphNode> {
        self.graph.node_weight(idx)
    }

    /// Get edge by index
    pub fn get_edge(&self, idx: EdgeIndex) -> Option<&GraphEdge> {
        self.graph.edge_weight(idx)
    }

    /// Get node by id
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.find(id).and_then(|idx| self.get_node(idx))
    }

    /// Endpoints of an edge as (source, target)
    pub fn endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    /// Nodes in declaration order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Edges in declaration order
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.graph.edge_indices().map(move |idx| &self.graph[idx])
    }

    /// Edge indices in declaration order
    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    /// Edges touching a node, in declaration order; self-loops appear once
    pub fn incident_edges(&self, idx: NodeIndex) -> &[EdgeIndex] {
        self.incidence.get(&idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rendering hint supplied for a node, if any
    pub fn hint(&self, id: &str) -> Option<&PresentationHint> {
        self.hints.get(id)
    }

    /// Nodes of one category, in declaration order
    pub fn filter_by_category(&self, category: NodeCategory) -> Vec<&GraphNode> {
        self.nodes().filter(|node| node.category == category).collect()
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get edge count
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for KnowledgeGraph {
    fn default() -> Self {
        Self {
            graph: StableGraph::new(),
            id_index: HashMap::new(),
            incidence: HashMap::new(),
            hints: HashMap::new(),
        }
    }
}
