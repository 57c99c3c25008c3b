//! Layout input and output graphs.

use mirror_types::MindMapRecord;
use serde::Serialize;

use crate::{NODE_HEIGHT, NODE_WIDTH};

/// A node to be placed, with its fixed box size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    /// Unique node id.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
}

impl LayoutNode {
    /// A node with the standard mind-map box size.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            width: NODE_WIDTH,
            height: NODE_HEIGHT,
        }
    }
}

/// A directed parent → child edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutEdge {
    /// `e-<source>-<target>`.
    pub id: String,
    /// Parent node id.
    pub source: String,
    /// Child node id.
    pub target: String,
}

impl LayoutEdge {
    /// An edge with the conventional id.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("e-{source}-{target}"),
            source,
            target,
        }
    }
}

/// Unpositioned nodes and edges, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TreeGraph {
    /// Nodes; order breaks ties among siblings.
    pub nodes: Vec<LayoutNode>,
    /// Edges; order breaks ties among siblings.
    pub edges: Vec<LayoutEdge>,
}

impl TreeGraph {
    /// Flatten a mind map: root first, then each branch followed by its leaves.
    ///
    /// Edges follow the record's nesting (root → branch, branch → leaf);
    /// the `parentId` fields are not consulted.
    pub fn from_mind_map(record: &MindMapRecord) -> Self {
        let mut graph = TreeGraph::default();
        let root = &record.root_node;
        graph.nodes.push(LayoutNode::new(&root.id, &root.label));

        for branch in &record.branches {
            graph.nodes.push(LayoutNode::new(&branch.id, &branch.label));
            graph.edges.push(LayoutEdge::new(&root.id, &branch.id));
            for leaf in &branch.children {
                graph.nodes.push(LayoutNode::new(&leaf.id, &leaf.label));
                graph.edges.push(LayoutEdge::new(&branch.id, &leaf.id));
            }
        }
        graph
    }
}

/// Top-left corner of a node's box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal offset; grows to the right.
    pub x: f64,
    /// Vertical offset; grows downward.
    pub y: f64,
}

/// A node with its assigned position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    /// Unique node id.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Top-left corner of the box.
    pub position: Point,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
    /// Depth from the node's root.
    pub rank: usize,
}

/// Positioned nodes (input order) plus the unchanged edge list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutGraph {
    /// One entry per input node, in input order.
    pub nodes: Vec<PositionedNode>,
    /// The input edges, unchanged.
    pub edges: Vec<LayoutEdge>,
}

impl LayoutGraph {
    /// Position of a node by id.
    pub fn position(&self, id: &str) -> Option<Point> {
        self.node(id).map(|n| n.position)
    }

    /// A positioned node by id.
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
