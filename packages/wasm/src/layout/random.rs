//! Uniform random scatter.
//!
//! Every node gets a position drawn independently per axis from
//! `U(-area_radius, area_radius)` around the origin. The layout is one-shot:
//! `step` does nothing.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{LayoutStrategy, StepReport, StrategyKind};
use crate::config::{Axis, LayoutConfig};
use crate::error::Result;
use crate::graph::GraphEngine;

pub struct RandomLayout {
    area_radius: f32,
    origin: Vec3,
    /// Axis held at the origin's coordinate, for a flat scatter.
    flat_axis: Option<Axis>,
    rng: SmallRng,
}

impl RandomLayout {
    /// Fails if `config` does not validate.
    pub fn new(config: &LayoutConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Ok(Self {
            area_radius: config.area_radius,
            origin: config.origin(),
            flat_axis: config.flat_axis,
            rng,
        })
    }

    fn sample(&mut self) -> Vec3 {
        let r = self.area_radius;
        let mut offset = Vec3::new(
            self.rng.gen_range(-r..=r),
            self.rng.gen_range(-r..=r),
            self.rng.gen_range(-r..=r),
        );
        if let Some(axis) = self.flat_axis {
            offset[axis.index()] = 0.0;
        }
        self.origin + offset
    }
}

impl LayoutStrategy for RandomLayout {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Random
    }

    fn initialize(&mut self, graph: &mut GraphEngine) -> Result<()> {
        let nodes: Vec<_> = graph.node_ids().collect();
        for &node in &nodes {
            let position = self.sample();
            graph.set_position(node, position)?;
        }
        log::debug!(
            "random layout placed {} nodes within radius {}",
            nodes.len(),
            self.area_radius
        );
        Ok(())
    }

    fn step(&mut self, _graph: &mut GraphEngine) -> Result<StepReport> {
        Ok(StepReport::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;

    fn graph_with_nodes(n: u32) -> GraphEngine {
        let mut graph = GraphEngine::new_undirected();
        for i in 0..n {
            graph.add_node(NodeId(i));
        }
        graph
    }

    fn seeded(seed: u64) -> LayoutConfig {
        LayoutConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_nodes_placed_within_cube() {
        let mut graph = graph_with_nodes(200);
        let mut layout = RandomLayout::new(&LayoutConfig::default()).unwrap();

        for _ in 0..20 {
            layout.initialize(&mut graph).unwrap();
            for node in graph.node_ids() {
                let p = graph.position(node).unwrap().expect("placed");
                assert!(p.is_finite());
                for c in p.to_array() {
                    assert!((-3.0..=3.0).contains(&c), "{c} outside cube");
                }
            }
        }
    }

    #[test]
    fn test_per_axis_uniformity() {
        let n = 20_000u32;
        let mut graph = graph_with_nodes(n);
        let mut layout = RandomLayout::new(&seeded(7)).unwrap();
        layout.initialize(&mut graph).unwrap();

        // Ten equal-width bins over [-3, 3] per axis
        let bins = 10;
        let mut counts = vec![[0usize; 3]; bins];
        for node in graph.node_ids() {
            let p = graph.position(node).unwrap().unwrap();
            for (axis, c) in p.to_array().into_iter().enumerate() {
                let bin = (((c + 3.0) / 6.0) * bins as f32).floor() as usize;
                counts[bin.min(bins - 1)][axis] += 1;
            }
        }

        let expected = n as f32 / bins as f32;
        for bin in &counts {
            for &count in bin {
                let deviation = (count as f32 - expected).abs() / expected;
                assert!(deviation < 0.1, "bin count {count} too far from {expected}");
            }
        }
    }

    #[test]
    fn test_seed_is_deterministic() {
        let mut a = graph_with_nodes(10);
        let mut b = graph_with_nodes(10);
        RandomLayout::new(&seeded(42)).unwrap().initialize(&mut a).unwrap();
        RandomLayout::new(&seeded(42)).unwrap().initialize(&mut b).unwrap();
        assert_eq!(a.position_buffer(), b.position_buffer());
    }

    #[test]
    fn test_origin_and_flat_axis() {
        let mut graph = graph_with_nodes(50);
        let config = LayoutConfig {
            area_radius: 1.5,
            origin: [10.0, -4.0, 2.0],
            flat_axis: Some(Axis::Z),
            seed: Some(3),
            ..Default::default()
        };
        RandomLayout::new(&config).unwrap().initialize(&mut graph).unwrap();

        for node in graph.node_ids() {
            let p = graph.position(node).unwrap().unwrap();
            assert!((8.5..=11.5).contains(&p.x));
            assert!((-5.5..=-2.5).contains(&p.y));
            assert_eq!(p.z, 2.0);
        }
    }

    #[test]
    fn test_step_is_noop() {
        let mut graph = graph_with_nodes(5);
        let mut layout = RandomLayout::new(&seeded(1)).unwrap();
        layout.initialize(&mut graph).unwrap();
        let before = graph.position_buffer();

        let report = layout.step(&mut graph).unwrap();
        assert_eq!(report, StepReport::default());
        assert_eq!(graph.position_buffer(), before);
    }
}
