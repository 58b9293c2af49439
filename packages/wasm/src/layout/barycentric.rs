//! Barycentric (Tutte-style) layout around a fixed ring.
//!
//! # Algorithm Overview
//!
//! 1. **Ring selection:** use the graph's fixed-ring override if present,
//!    otherwise the longest cycle reported by [`find_cycles`].
//! 2. **Ring placement:** node `i` of a `k`-node ring goes to angle
//!    `2πi/k` on a circle of radius `area_radius` around the origin, in the
//!    plane `z = origin.z`.
//! 3. **Relaxation:** each `step` moves every free node to the mean of its
//!    neighbors' positions, in place and in graph order (Gauss–Seidel), so
//!    later nodes in a sweep already see earlier updates. Repeated sweeps
//!    converge to the barycentric embedding relative to the ring.
//!
//! Free nodes get no position from `initialize`; the first sweep that sees a
//! placed neighbor places them. Graphs where some free node can never be
//! reached from the ring are rejected up front.
//!
//! # References
//!
//! - Tutte, "How to draw a graph" (1963)

use std::collections::{HashSet, VecDeque};
use std::f32::consts::TAU;

use glam::Vec3;

use super::cycles::{find_cycles, longest_cycle};
use super::{LayoutStrategy, StepReport, StrategyKind};
use crate::config::LayoutConfig;
use crate::error::{InvalidInput, LayoutError, Result};
use crate::graph::{GraphEngine, NodeId, all_neighbors};

pub struct BarycentricLayout {
    /// Radius of the anchor circle (default: 3.0).
    area_radius: f32,
    origin: Vec3,
    /// Anchor nodes, in placement order.
    fixed: Vec<NodeId>,
    /// Every other node, in graph order.
    free: Vec<NodeId>,
}

impl BarycentricLayout {
    /// Fails if `config` does not validate.
    pub fn new(config: &LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            area_radius: config.area_radius,
            origin: config.origin(),
            fixed: Vec::new(),
            free: Vec::new(),
        })
    }

    /// The anchor ring chosen by the last `initialize`.
    pub fn ring(&self) -> &[NodeId] {
        &self.fixed
    }

    /// Nodes repositioned by `step`.
    pub fn free_nodes(&self) -> &[NodeId] {
        &self.free
    }

    /// Resolve the anchor ring: override first, then the longest cycle.
    fn select_ring(graph: &GraphEngine) -> Result<Vec<NodeId>> {
        if let Some(ring) = graph.fixed_ring() {
            if ring.is_empty() {
                return Err(InvalidInput::EmptyRing.into());
            }
            let mut seen = HashSet::with_capacity(ring.len());
            for &node in ring {
                if !graph.contains_node(node) {
                    return Err(LayoutError::NotFound(node));
                }
                if !seen.insert(node) {
                    return Err(InvalidInput::DuplicateRingNode(node).into());
                }
            }
            log::debug!("using fixed ring override of {} nodes", ring.len());
            return Ok(ring.to_vec());
        }

        let cycles = find_cycles(graph)?;
        let found = cycles.len();
        let ring = longest_cycle(cycles).ok_or(InvalidInput::NoRing)?;
        log::debug!("selected {}-node ring out of {} cycles", ring.len(), found);
        Ok(ring)
    }

    /// Every free node must have an edge and a path to the ring.
    fn check_free_nodes(graph: &GraphEngine, fixed: &[NodeId], free: &[NodeId]) -> Result<()> {
        for &node in free {
            if graph.degree(node)? == 0 {
                return Err(InvalidInput::IsolatedNode(node).into());
            }
        }

        let mut reached: HashSet<NodeId> = fixed.iter().copied().collect();
        let mut queue: VecDeque<NodeId> = fixed.iter().copied().collect();
        while let Some(node) = queue.pop_front() {
            for neighbor in all_neighbors(graph, node)? {
                if reached.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        match free.iter().find(|&node| !reached.contains(node)) {
            Some(&node) => Err(InvalidInput::UnreachableNode(node).into()),
            None => Ok(()),
        }
    }

    fn place_ring(&self, graph: &mut GraphEngine) -> Result<()> {
        let k = self.fixed.len() as f32;
        for (i, &node) in self.fixed.iter().enumerate() {
            let theta = i as f32 / k * TAU;
            let position = self.origin
                + Vec3::new(self.area_radius * theta.cos(), self.area_radius * theta.sin(), 0.0);
            graph.set_position(node, position)?;
        }
        Ok(())
    }

    /// Mean position of the placed neighbors of `node`, excluding itself.
    fn barycenter(graph: &GraphEngine, node: NodeId) -> Result<Option<Vec3>> {
        let mut sum = Vec3::ZERO;
        let mut count = 0u32;
        for neighbor in all_neighbors(graph, node)? {
            if neighbor == node {
                continue;
            }
            if let Some(position) = graph.position(neighbor)? {
                sum += position;
                count += 1;
            }
        }
        Ok((count > 0).then(|| sum / count as f32))
    }
}

impl LayoutStrategy for BarycentricLayout {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Barycentric
    }

    fn initialize(&mut self, graph: &mut GraphEngine) -> Result<()> {
        let fixed = Self::select_ring(graph)?;
        let ring: HashSet<NodeId> = fixed.iter().copied().collect();
        let free: Vec<NodeId> = graph.node_ids().filter(|node| !ring.contains(node)).collect();

        Self::check_free_nodes(graph, &fixed, &free)?;

        self.fixed = fixed;
        self.free = free;
        self.place_ring(graph)?;

        log::info!(
            "barycentric layout: {} ring nodes, {} free nodes",
            self.fixed.len(),
            self.free.len()
        );
        Ok(())
    }

    fn step(&mut self, graph: &mut GraphEngine) -> Result<StepReport> {
        let mut report = StepReport::default();

        for &node in &self.free {
            let Some(target) = Self::barycenter(graph, node)? else {
                continue;
            };
            match graph.position(node)? {
                None => report.placed += 1,
                Some(previous) => {
                    let displacement = previous.distance(target);
                    if displacement > 0.0 {
                        report.moved += 1;
                        report.max_displacement = report.max_displacement.max(displacement);
                    }
                }
            }
            graph.set_position(node, target)?;
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn build(mut graph: GraphEngine, edges: &[(u32, u32)]) -> GraphEngine {
        for &(a, b) in edges {
            graph.add_node(NodeId(a));
            graph.add_node(NodeId(b));
            graph.add_edge(NodeId(a), NodeId(b)).unwrap();
        }
        graph
    }

    fn ids(raw: &[u32]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId).collect()
    }

    fn pos(graph: &GraphEngine, id: u32) -> Vec3 {
        graph.position(NodeId(id)).unwrap().expect("node placed")
    }

    fn layout() -> BarycentricLayout {
        BarycentricLayout::new(&LayoutConfig::default()).unwrap()
    }

    /// Triangle 1-2-3 with pendant 4 on node 1.
    fn triangle_with_pendant() -> GraphEngine {
        build(GraphEngine::new_undirected(), &[(1, 2), (2, 3), (3, 1), (1, 4)])
    }

    #[test]
    fn test_ring_placement_spacing() {
        let mut graph = build(
            GraphEngine::new_undirected(),
            &[(1, 2), (2, 3), (3, 4), (4, 5), (5, 1)],
        );
        let mut layout = layout();
        layout.initialize(&mut graph).unwrap();

        let ring = layout.ring().to_vec();
        let k = ring.len();
        assert_eq!(k, 5);
        for (i, &node) in ring.iter().enumerate() {
            let p = graph.position(node).unwrap().unwrap();
            assert!((p.length() - 3.0).abs() < EPS);
            assert_eq!(p.z, 0.0);

            let expected = i as f32 * TAU / k as f32;
            let angle = p.y.atan2(p.x).rem_euclid(TAU);
            let diff = (angle - expected).abs();
            assert!(diff < 1e-4 || (TAU - diff) < 1e-4, "angle {angle} != {expected}");
        }
    }

    #[test]
    fn test_triangle_with_pendant() {
        let mut graph = triangle_with_pendant();
        let mut layout = layout();
        layout.initialize(&mut graph).unwrap();

        assert_eq!(layout.ring(), &ids(&[1, 2, 3])[..]);
        assert_eq!(layout.free_nodes(), &ids(&[4])[..]);

        let p1 = pos(&graph, 1);
        assert!((p1 - Vec3::new(3.0, 0.0, 0.0)).length() < EPS);
        let p2 = pos(&graph, 2);
        let expected2 = Vec3::new(3.0 * (TAU / 3.0).cos(), 3.0 * (TAU / 3.0).sin(), 0.0);
        assert!((p2 - expected2).length() < EPS);
        assert_eq!(graph.position(NodeId(4)), Ok(None));

        let report = layout.step(&mut graph).unwrap();
        assert_eq!(report.placed, 1);
        assert_eq!(pos(&graph, 4), p1);

        let report = layout.step(&mut graph).unwrap();
        assert_eq!(pos(&graph, 4), p1);
        assert!(report.is_converged(0.0));
    }

    #[test]
    fn test_fixed_point_is_stable() {
        // Free nodes 4 and 5 hang off the ring only, so one sweep reaches equilibrium
        let mut graph = build(
            GraphEngine::new_undirected(),
            &[(1, 2), (2, 3), (3, 1), (4, 1), (4, 2), (5, 2), (5, 3)],
        );
        graph.set_fixed_ring(ids(&[1, 2, 3]));
        let mut layout = layout();
        layout.initialize(&mut graph).unwrap();
        layout.step(&mut graph).unwrap();

        let before = graph.position_buffer();
        let report = layout.step(&mut graph).unwrap();
        assert_eq!(graph.position_buffer(), before);
        assert_eq!(report.moved, 0);
        assert_eq!(report.max_displacement, 0.0);
    }

    #[test]
    fn test_path_converges_to_interpolation() {
        // Square ring 1-2-3-4 with free path 1-5-6-7-3 across it
        let mut graph = build(
            GraphEngine::new_undirected(),
            &[(1, 2), (2, 3), (3, 4), (4, 1), (1, 5), (5, 6), (6, 7), (7, 3)],
        );
        graph.set_fixed_ring(ids(&[1, 2, 3, 4]));
        let mut layout = layout();
        layout.initialize(&mut graph).unwrap();

        let mut converged = false;
        for _ in 0..500 {
            if layout.step(&mut graph).unwrap().is_converged(1e-6) {
                converged = true;
                break;
            }
        }
        assert!(converged);

        // Harmonic embedding of a path is evenly spaced between its ends
        let a = pos(&graph, 1);
        let b = pos(&graph, 3);
        for (i, node) in [5, 6, 7].into_iter().enumerate() {
            let t = (i + 1) as f32 / 4.0;
            assert!((pos(&graph, node) - a.lerp(b, t)).length() < 1e-4);
        }
    }

    #[test]
    fn test_free_nodes_reached_over_several_sweeps() {
        // Free chain listed before the node that touches the ring
        let mut graph = GraphEngine::new_undirected();
        graph.add_nodes(&[10, 11, 12, 1, 2, 3]);
        for (a, b) in [(1, 2), (2, 3), (3, 1), (10, 11), (11, 12), (12, 1)] {
            graph.add_edge(NodeId(a), NodeId(b)).unwrap();
        }
        let mut layout = layout();
        layout.initialize(&mut graph).unwrap();
        assert_eq!(layout.free_nodes(), &ids(&[10, 11, 12])[..]);

        let first = layout.step(&mut graph).unwrap();
        assert_eq!(first.placed, 1);
        assert_eq!(graph.position(NodeId(10)), Ok(None));

        layout.step(&mut graph).unwrap();
        layout.step(&mut graph).unwrap();
        for node in graph.node_ids() {
            assert!(graph.position(node).unwrap().unwrap().is_finite());
        }
    }

    #[test]
    fn test_directed_graph_uses_both_directions() {
        let mut graph = build(
            GraphEngine::new_directed(),
            &[(1, 2), (2, 3), (3, 4), (4, 1), (5, 1), (3, 5)],
        );
        let mut layout = layout();
        layout.initialize(&mut graph).unwrap();
        assert_eq!(layout.ring(), &ids(&[1, 2, 3, 4])[..]);

        layout.step(&mut graph).unwrap();
        // 5 has an outgoing edge to 1 and an incoming edge from 3
        let expected = (pos(&graph, 1) + pos(&graph, 3)) / 2.0;
        assert!((pos(&graph, 5) - expected).length() < EPS);
    }

    #[test]
    fn test_reciprocal_pair_counts_once() {
        // 1 -> 4 and 4 -> 1 are one neighbor: degree 3, two distinct neighbors
        let mut graph = build(
            GraphEngine::new_directed(),
            &[(1, 2), (2, 3), (3, 1), (1, 4), (4, 1), (4, 2)],
        );
        let mut layout = layout();
        layout.initialize(&mut graph).unwrap();
        assert_eq!(layout.ring(), &ids(&[1, 2, 3])[..]);
        assert_eq!(graph.degree(NodeId(4)).unwrap(), 3);

        layout.step(&mut graph).unwrap();
        let expected = (pos(&graph, 1) + pos(&graph, 2)) / 2.0;
        assert!((pos(&graph, 4) - expected).length() < EPS);
    }

    #[test]
    fn test_override_ring_used_verbatim() {
        let mut graph = triangle_with_pendant();
        graph.set_fixed_ring(ids(&[4, 1]));
        let mut layout = layout();
        layout.initialize(&mut graph).unwrap();

        assert_eq!(layout.ring(), &ids(&[4, 1])[..]);
        assert_eq!(layout.free_nodes(), &ids(&[2, 3])[..]);
        assert!((pos(&graph, 4) - Vec3::new(3.0, 0.0, 0.0)).length() < EPS);
        assert!((pos(&graph, 1) - Vec3::new(-3.0, 0.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_longest_cycle_is_ring() {
        // Triangle 1-2-3 joined to square 4-5-6-7 via 3-4
        let mut graph = build(
            GraphEngine::new_undirected(),
            &[(1, 2), (2, 3), (3, 1), (3, 4), (4, 5), (5, 6), (6, 7), (7, 4)],
        );
        let mut layout = layout();
        layout.initialize(&mut graph).unwrap();
        assert_eq!(layout.ring().len(), 4);
    }

    #[test]
    fn test_acyclic_graph_rejected() {
        let mut graph = build(GraphEngine::new_directed(), &[(1, 2), (2, 3)]);
        let err = layout().initialize(&mut graph).unwrap_err();
        assert_eq!(err, LayoutError::InvalidInput(InvalidInput::NoRing));
        assert_eq!(graph.bounds(), None);
    }

    #[test]
    fn test_isolated_free_node_rejected() {
        let mut graph = triangle_with_pendant();
        graph.add_node(NodeId(9));
        let err = layout().initialize(&mut graph).unwrap_err();
        assert_eq!(err, LayoutError::InvalidInput(InvalidInput::IsolatedNode(NodeId(9))));
        // Nothing was written before failing
        assert_eq!(graph.bounds(), None);
    }

    #[test]
    fn test_unreachable_free_node_rejected() {
        let mut graph = triangle_with_pendant();
        graph.add_nodes(&[8, 9]);
        graph.add_edge(NodeId(8), NodeId(9)).unwrap();
        let err = layout().initialize(&mut graph).unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidInput(InvalidInput::UnreachableNode(NodeId(8)))
        );
    }

    #[test]
    fn test_bad_override_rejected() {
        let mut graph = triangle_with_pendant();

        graph.set_fixed_ring(Vec::new());
        assert_eq!(
            layout().initialize(&mut graph).unwrap_err(),
            LayoutError::InvalidInput(InvalidInput::EmptyRing)
        );

        graph.set_fixed_ring(ids(&[1, 2, 99]));
        assert_eq!(
            layout().initialize(&mut graph).unwrap_err(),
            LayoutError::NotFound(NodeId(99))
        );

        graph.set_fixed_ring(ids(&[1, 2, 1]));
        assert_eq!(
            layout().initialize(&mut graph).unwrap_err(),
            LayoutError::InvalidInput(InvalidInput::DuplicateRingNode(NodeId(1)))
        );
    }

    #[test]
    fn test_custom_origin_and_radius() {
        let mut graph = triangle_with_pendant();
        let config = LayoutConfig {
            area_radius: 5.0,
            origin: [1.0, 2.0, 3.0],
            ..Default::default()
        };
        let mut layout = BarycentricLayout::new(&config).unwrap();
        layout.initialize(&mut graph).unwrap();

        let origin = Vec3::new(1.0, 2.0, 3.0);
        for &node in layout.ring() {
            let p = graph.position(node).unwrap().unwrap();
            assert!((p.distance(origin) - 5.0).abs() < EPS);
            assert_eq!(p.z, 3.0);
        }
    }
}
