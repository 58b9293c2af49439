//! Graph data structures and operations.
//!
//! This module provides the graph model the layout engine works on: topology
//! stored in petgraph's StableGraph, a typed record per node (position and
//! color), and the optional fixed-ring override consumed by the barycentric
//! layout.

mod engine;
pub mod neighbors;
mod node;

pub use engine::GraphEngine;
pub use neighbors::all_neighbors;
pub use node::{Color, NodeId, NodeRecord, UNPLACED};
