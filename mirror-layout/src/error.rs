//! Layout errors.

/// Input the layout cannot place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Two nodes share an id.
    #[error("duplicate node id: {0}")]
    DuplicateId(String),
    /// An edge names a node that is not in the graph.
    #[error("edge references unknown node: {0}")]
    UnknownNode(String),
}
