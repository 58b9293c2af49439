//! Error types for the layout engine.
//!
//! Two failure classes exist: a node that is not in the graph, and input
//! that a layout strategy cannot work with. Both are raised at the point
//! of detection and propagated unchanged through the controller.

use thiserror::Error;

use crate::graph::NodeId;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors raised by the graph model and layout strategies.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// An operation referenced a node absent from the graph.
    #[error("{0} not found in graph")]
    NotFound(NodeId),

    /// The graph or configuration cannot be laid out as requested.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

impl LayoutError {
    /// Whether this is an [`InvalidInput`] failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Reasons a layout refuses its input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    /// Barycentric layout on a graph with no cycle and no ring override.
    #[error("no fixed ring available: graph has no cycle and no ring override")]
    NoRing,

    /// The ring override is an empty sequence.
    #[error("fixed ring override is empty")]
    EmptyRing,

    /// The ring override lists the same node twice.
    #[error("fixed ring override lists {0} more than once")]
    DuplicateRingNode(NodeId),

    /// A free node has no incident edges.
    #[error("free {0} has degree zero")]
    IsolatedNode(NodeId),

    /// A free node cannot reach any ring node.
    #[error(
        "free {0} is not connected to the fixed ring; only the ring's component can be laid out"
    )]
    UnreachableNode(NodeId),

    /// The layout radius is not a positive finite number.
    #[error("area radius must be positive and finite, got {0}")]
    AreaRadius(f32),

    /// The layout origin has a non-finite component.
    #[error("origin must have finite coordinates")]
    Origin,
}
