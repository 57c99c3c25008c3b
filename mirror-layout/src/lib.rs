#![deny(missing_docs)]
//! Mind-map graph layout.
//!
//! Turns a [`MindMapRecord`] into a [`LayoutGraph`]: every node gets a
//! top-left position in a layered, top-to-bottom tree, and the parent/child
//! edges are carried over unchanged.
//!
//! ```
//! use mirror_layout::layout_mind_map;
//! use mirror_types::MindMapRecord;
//!
//! let record: MindMapRecord = serde_json::from_str(
//!     r#"{"rootNode":{"id":"root","label":"Novel"},"branches":[]}"#,
//! ).unwrap();
//! let graph = layout_mind_map(&record).unwrap();
//! assert_eq!(graph.position("root").unwrap().y, 0.0);
//! ```

pub mod error;
pub mod graph;
pub mod layout;

pub use error::LayoutError;
pub use graph::{LayoutEdge, LayoutGraph, LayoutNode, Point, PositionedNode, TreeGraph};
pub use layout::{LayoutConfig, layout};

use mirror_types::MindMapRecord;

/// Width of every mind-map node box.
pub const NODE_WIDTH: f64 = 180.0;
/// Height of every mind-map node box.
pub const NODE_HEIGHT: f64 = 60.0;
/// Minimum horizontal gap between neighbouring subtrees.
pub const NODE_SEP: f64 = 40.0;
/// Vertical gap between ranks.
pub const RANK_SEP: f64 = 80.0;

/// Lay out a mind map with the standard box size and spacing.
pub fn layout_mind_map(record: &MindMapRecord) -> Result<LayoutGraph, LayoutError> {
    layout(&TreeGraph::from_mind_map(record), LayoutConfig::default())
}
