//! GraphEngine - Core graph data structure.
//!
//! The GraphEngine stores the graph topology using petgraph's StableGraph,
//! keeps one typed [`NodeRecord`] per node as the node weight, and carries
//! the optional fixed-ring override used by the barycentric layout.
//!
//! Edges are stored directed. For undirected graphs the query methods look
//! at both edge directions, so `a-b` added once is visible from either end.

use glam::Vec3;
use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

use super::node::{Color, NodeId, NodeRecord};
use crate::error::{LayoutError, Result};

/// The core graph engine.
///
/// This struct manages:
/// - Graph topology via petgraph
/// - Per-node records (position, color)
/// - ID mapping between caller IDs and internal indices
/// - The optional fixed-ring override
#[derive(Debug, Clone)]
pub struct GraphEngine {
    /// The underlying graph structure. Edge weights are unused.
    graph: StableGraph<NodeRecord, (), petgraph::Directed>,

    /// Map from caller NodeId to petgraph NodeIndex
    node_id_to_index: HashMap<NodeId, NodeIndex>,

    /// Whether edges have a direction
    directed: bool,

    /// Precomputed ring of anchor nodes, used instead of cycle search
    fixed_ring: Option<Vec<NodeId>>,
}

impl GraphEngine {
    /// Create an empty directed graph.
    pub fn new_directed() -> Self {
        Self::with_capacity(true, 0, 0)
    }

    /// Create an empty undirected graph.
    pub fn new_undirected() -> Self {
        Self::with_capacity(false, 0, 0)
    }

    /// Create a graph with pre-allocated capacity.
    pub fn with_capacity(directed: bool, node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            graph: StableGraph::with_capacity(node_capacity, edge_capacity),
            node_id_to_index: HashMap::with_capacity(node_capacity),
            directed,
            fixed_ring: None,
        }
    }

    /// Whether edges have a direction.
    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    // =========================================================================
    // Node Operations
    // =========================================================================

    /// Add a node. Returns false if a node with this ID already exists.
    pub fn add_node(&mut self, id: NodeId) -> bool {
        if self.node_id_to_index.contains_key(&id) {
            return false;
        }
        let index = self.graph.add_node(NodeRecord::new(id));
        self.node_id_to_index.insert(id, index);
        true
    }

    /// Add several nodes, returning how many were new.
    pub fn add_nodes(&mut self, ids: &[u32]) -> u32 {
        self.node_id_to_index.reserve(ids.len());
        ids.iter()
            .filter(|&&raw| self.add_node(NodeId(raw)))
            .count() as u32
    }

    /// Whether the node exists.
    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_id_to_index.contains_key(&id)
    }

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Node IDs in insertion order (the graph iteration order).
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph
            .node_indices()
            .filter_map(|index| self.graph.node_weight(index).map(|record| record.id))
    }

    /// Get a node's record.
    pub fn node(&self, id: NodeId) -> Result<&NodeRecord> {
        let index = self.index_of(id)?;
        self.graph
            .node_weight(index)
            .ok_or(LayoutError::NotFound(id))
    }

    /// Get a node's position, `None` if it has not been placed yet.
    pub fn position(&self, id: NodeId) -> Result<Option<Vec3>> {
        Ok(self.node(id)?.position)
    }

    /// Set a node's position.
    pub fn set_position(&mut self, id: NodeId, position: Vec3) -> Result<()> {
        self.record_mut(id)?.position = Some(position);
        Ok(())
    }

    /// Forget a node's position.
    pub fn clear_position(&mut self, id: NodeId) -> Result<()> {
        self.record_mut(id)?.position = None;
        Ok(())
    }

    /// Get a node's display color.
    pub fn color(&self, id: NodeId) -> Result<Color> {
        Ok(self.node(id)?.color)
    }

    /// Set a node's display color.
    pub fn set_color(&mut self, id: NodeId, color: Color) -> Result<()> {
        self.record_mut(id)?.color = color;
        Ok(())
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    /// Add an edge between two existing nodes.
    ///
    /// Returns false if the edge is already present (for undirected graphs,
    /// in either direction).
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<bool> {
        let source_index = self.index_of(source)?;
        let target_index = self.index_of(target)?;

        let exists = self.graph.find_edge(source_index, target_index).is_some()
            || (!self.directed && self.graph.find_edge(target_index, source_index).is_some());
        if exists {
            return Ok(false);
        }

        self.graph.add_edge(source_index, target_index, ());
        Ok(true)
    }

    /// Add edges from pairs [src0, tgt0, src1, tgt1, ...].
    ///
    /// Pairs naming a missing node are skipped. Returns the number of new edges.
    pub fn add_edges_from_pairs(&mut self, edges: &[u32]) -> u32 {
        edges
            .chunks_exact(2)
            .filter(|pair| matches!(self.add_edge(NodeId(pair[0]), NodeId(pair[1])), Ok(true)))
            .count() as u32
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All edges as (source, target) pairs in insertion order.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.graph
            .edge_indices()
            .filter_map(|edge| {
                let (source, target) = self.graph.edge_endpoints(edge)?;
                Some((self.id_at(source)?, self.id_at(target)?))
            })
            .collect()
    }

    /// Adjacent nodes: successors for directed graphs, all neighbors otherwise.
    ///
    /// Ordered by the edge that first connected each neighbor.
    pub fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let index = self.index_of(id)?;
        let mut adjacent = self.adjacent(index, Direction::Outgoing);
        if !self.directed {
            adjacent.extend(self.adjacent(index, Direction::Incoming));
        }
        Ok(self.ordered_unique(adjacent))
    }

    /// Nodes with an edge into this node.
    ///
    /// In an undirected graph every neighbor is also a predecessor, so this
    /// returns the same list as [`GraphEngine::neighbors`].
    pub fn predecessors(&self, id: NodeId) -> Result<Vec<NodeId>> {
        if !self.directed {
            return self.neighbors(id);
        }
        let index = self.index_of(id)?;
        let adjacent = self.adjacent(index, Direction::Incoming);
        Ok(self.ordered_unique(adjacent))
    }

    /// Number of incident edges. A self-loop counts twice.
    pub fn degree(&self, id: NodeId) -> Result<usize> {
        let index = self.index_of(id)?;
        Ok(self.graph.edges_directed(index, Direction::Outgoing).count()
            + self.graph.edges_directed(index, Direction::Incoming).count())
    }

    // =========================================================================
    // Fixed Ring Override
    // =========================================================================

    /// Attach a precomputed ring of anchor nodes.
    ///
    /// Not validated here; the barycentric layout checks it at initialization.
    pub fn set_fixed_ring(&mut self, ring: Vec<NodeId>) {
        self.fixed_ring = Some(ring);
    }

    pub fn fixed_ring(&self) -> Option<&[NodeId]> {
        self.fixed_ring.as_deref()
    }

    pub fn clear_fixed_ring(&mut self) {
        self.fixed_ring = None;
    }

    // =========================================================================
    // Buffer Access
    // =========================================================================

    /// Positions as [x0, y0, z0, x1, ...] in node order.
    ///
    /// Unplaced nodes are written as [`super::UNPLACED`].
    pub fn position_buffer(&self) -> Vec<f32> {
        let mut buffer = Vec::with_capacity(self.graph.node_count() * 3);
        for record in self.records() {
            buffer.extend_from_slice(&record.position_or_sentinel());
        }
        buffer
    }

    /// Colors as [r0, g0, b0, r1, ...] in node order.
    pub fn color_buffer(&self) -> Vec<f32> {
        let mut buffer = Vec::with_capacity(self.graph.node_count() * 3);
        for record in self.records() {
            buffer.extend_from_slice(&record.color.to_array());
        }
        buffer
    }

    // =========================================================================
    // Utilities
    // =========================================================================

    /// Axis-aligned bounding box (min, max) of all placed nodes.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        self.records()
            .filter_map(|record| record.position)
            .fold(None, |bounds, p| match bounds {
                None => Some((p, p)),
                Some((min, max)) => Some((min.min(p), max.max(p))),
            })
    }

    /// Clear all nodes, edges and the ring override.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.node_id_to_index.clear();
        self.fixed_ring = None;
    }

    /// Node records in insertion order.
    fn records(&self) -> impl Iterator<Item = &NodeRecord> + '_ {
        self.graph
            .node_indices()
            .filter_map(|index| self.graph.node_weight(index))
    }

    fn index_of(&self, id: NodeId) -> Result<NodeIndex> {
        self.node_id_to_index
            .get(&id)
            .copied()
            .ok_or(LayoutError::NotFound(id))
    }

    fn id_at(&self, index: NodeIndex) -> Option<NodeId> {
        self.graph.node_weight(index).map(|record| record.id)
    }

    fn record_mut(&mut self, id: NodeId) -> Result<&mut NodeRecord> {
        let index = self.index_of(id)?;
        self.graph
            .node_weight_mut(index)
            .ok_or(LayoutError::NotFound(id))
    }

    /// Neighbor indices across edges in one direction, tagged with the edge index.
    fn adjacent(&self, index: NodeIndex, direction: Direction) -> Vec<(EdgeIndex, NodeIndex)> {
        self.graph
            .edges_directed(index, direction)
            .map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                (edge.id(), other)
            })
            .collect()
    }

    /// Sort by edge index (insertion order) and keep the first occurrence of each node.
    fn ordered_unique(&self, mut adjacent: Vec<(EdgeIndex, NodeIndex)>) -> Vec<NodeId> {
        adjacent.sort_by_key(|&(edge, _)| edge);
        let mut seen = HashSet::with_capacity(adjacent.len());
        adjacent
            .into_iter()
            .filter(|&(_, node)| seen.insert(node))
            .filter_map(|(_, node)| self.id_at(node))
            .collect()
    }
}

impl Default for GraphEngine {
    fn default() -> Self {
        Self::new_undirected()
    }
}
