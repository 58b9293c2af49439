//! Direction-agnostic adjacency.
//!
//! Layout has no notion of edge direction: incoming and outgoing edges pull
//! on a node equally. This helper hides the directed/undirected split from
//! the layout strategies.

use std::collections::HashSet;

use super::{GraphEngine, NodeId};
use crate::error::Result;

/// All nodes sharing an edge with `node`, regardless of direction.
///
/// For directed graphs this is the union of successors and predecessors,
/// successors first, without duplicates. For undirected graphs it is the
/// neighbor list.
pub fn all_neighbors(graph: &GraphEngine, node: NodeId) -> Result<Vec<NodeId>> {
    let mut neighbors = graph.neighbors(node)?;
    if graph.is_directed() {
        let predecessors = graph.predecessors(node)?;
        let mut seen: HashSet<NodeId> = neighbors.iter().copied().collect();
        neighbors.reserve(predecessors.len());
        neighbors.extend(predecessors.into_iter().filter(|&p| seen.insert(p)));
    }
    Ok(neighbors)
}
