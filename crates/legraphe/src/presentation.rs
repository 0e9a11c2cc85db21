// Rendering hints and renderer export
//
// Cosmetic data handed to the graph renderer. Nothing here affects queries.

use crate::graph::{KnowledgeGraph, NodeCategory};
use serde::{Deserialize, Serialize};

/// Size and color suggestion for drawing a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationHint {
    /// Node diameter in renderer units
    pub size: f32,

    /// CSS color
    pub color: String,
}

impl PresentationHint {
    /// Create a new hint
    pub fn new(size: f32, color: impl Into<String>) -> Self {
        Self {
            size,
            color: color.into(),
        }
    }

    /// Hint used for nodes declared without one
    pub fn default_for(category: NodeCategory) -> Self {
        let color = match category {
            NodeCategory::Document => "#3b82f6",
            NodeCategory::Character => "#8b5cf6",
            NodeCategory::Location => "#10b981",
            NodeCategory::Concept => "#f59e0b",
        };
        Self::new(30.0, color)
    }
}

/// Node outline per category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeShape {
    /// Documents
    RoundRectangle,

    /// Characters
    Ellipse,

    /// Locations
    Diamond,

    /// Concepts
    Triangle,
}

impl From<NodeCategory> for NodeShape {
    fn from(category: NodeCategory) -> Self {
        match category {
            NodeCategory::Document => NodeShape::RoundRectangle,
            NodeCategory::Character => NodeShape::Ellipse,
            NodeCategory::Location => NodeShape::Diamond,
            NodeCategory::Concept => NodeShape::Triangle,
        }
    }
}

/// One element of the renderer's element list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "group", rename_all = "lowercase")]
pub enum RenderElement {
    /// A node with its resolved hint and shape
    Nodes {
        /// Node id
        id: String,

        /// Display label
        label: String,

        /// Category name
        category: NodeCategory,

        /// Outline
        shape: NodeShape,

        /// Size
        size: f32,

        /// Color
        color: String,
    },

    /// An edge with a stable id
    Edges {
        /// `edge-{declaration index}`
        id: String,

        /// Source node id
        source: String,

        /// Target node id
        target: String,

        /// Relationship label
        relationship: String,
    },
}

/// Stable renderer id for the edge declared at `index`
pub fn edge_id(index: usize) -> String {
    format!("edge-{}", index)
}

impl KnowledgeGraph {
    /// Nodes then edges, in declaration order, ready for a renderer
    ///
    /// Nodes without an explicit hint get [`PresentationHint::default_for`]
    /// their category. No coordinates are produced; layout is the renderer's job.
    pub fn render_elements(&self) -> Vec<RenderElement> {
        let nodes = self.nodes().map(|node| {
            let hint = self
                .hint(&node.id)
                .cloned()
                .unwrap_or_else(|| PresentationHint::default_for(node.category));
            RenderElement::Nodes {
                id: node.id.clone(),
                label: node.label.clone(),
                category: node.category,
                shape: NodeShape::from(node.category),
                size: hint.size,
                color: hint.color,
            }
        });

        let edges = self.edges().enumerate().map(|(index, edge)| RenderElement::Edges {
            id: edge_id(index),
            source: edge.source.clone(),
            target: edge.target.clone(),
            relationship: edge.relationship.clone(),
        });

        nodes.chain(edges).collect()
    }
}
