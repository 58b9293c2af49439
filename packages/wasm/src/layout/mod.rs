//! Layout algorithms for graph visualization.
//!
//! A layout strategy assigns 3D positions to nodes in two phases: a one-time
//! `initialize` (possibly expensive, e.g. a cycle search) and a cheap,
//! repeatable `step` that the renderer calls once per frame to animate the
//! layout settling.

pub mod barycentric;
pub mod controller;
pub mod cycles;
pub mod random;

pub use barycentric::BarycentricLayout;
pub use controller::LayoutController;
pub use cycles::find_cycles;
pub use random::RandomLayout;

use crate::error::Result;
use crate::graph::GraphEngine;

/// Built-in strategy variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Uniform scatter in a cube, static after initialization.
    Random,
    /// Ring of anchors with free nodes relaxed to their neighbors' mean.
    Barycentric,
}

impl StrategyKind {
    /// Resolve a strategy name, case-insensitively.
    ///
    /// Unrecognized names resolve to [`StrategyKind::Random`].
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "barycentric" => StrategyKind::Barycentric,
            _ => StrategyKind::Random,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::Barycentric => "barycentric",
        }
    }
}

/// What a single `step` did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Nodes that received their first position.
    pub placed: usize,
    /// Previously placed nodes whose position changed.
    pub moved: usize,
    /// Largest distance a previously placed node moved.
    pub max_displacement: f32,
}

impl StepReport {
    /// True when nothing new was placed and no node moved further than `tolerance`.
    pub fn is_converged(&self, tolerance: f32) -> bool {
        self.placed == 0 && self.max_displacement <= tolerance
    }
}

/// A pluggable layout algorithm.
///
/// `step` must stay bounded (one pass over the nodes at most) and must never
/// write a non-finite position.
pub trait LayoutStrategy {
    fn kind(&self) -> StrategyKind;

    /// Assign initial positions to some or all nodes.
    fn initialize(&mut self, graph: &mut GraphEngine) -> Result<()>;

    /// Run one incremental refinement pass. May be a no-op.
    fn step(&mut self, graph: &mut GraphEngine) -> Result<StepReport>;
}
