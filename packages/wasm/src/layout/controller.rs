//! Strategy selection and per-frame driving.
//!
//! The controller resolves a strategy by name once, then exposes exactly the
//! two calls a render loop needs: `initialize` once, `run_step` every frame.
//! The render loop owns the clock and decides when to stop stepping.

use super::{BarycentricLayout, LayoutStrategy, RandomLayout, StepReport, StrategyKind};
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::graph::GraphEngine;

pub struct LayoutController {
    strategy: Box<dyn LayoutStrategy>,
}

impl LayoutController {
    /// Build the strategy named `name` (case-insensitive).
    ///
    /// Unknown names fall back to the random layout. Fails if `config` does
    /// not validate.
    pub fn new(name: &str, config: &LayoutConfig) -> Result<Self> {
        let kind = StrategyKind::from_name(name);
        if kind.name() != name.to_lowercase() {
            log::debug!("unknown layout strategy {name:?}, using {}", kind.name());
        }
        let strategy: Box<dyn LayoutStrategy> = match kind {
            StrategyKind::Barycentric => Box::new(BarycentricLayout::new(config)?),
            StrategyKind::Random => Box::new(RandomLayout::new(config)?),
        };
        Ok(Self { strategy })
    }

    /// Build the strategy named by `config.strategy`.
    pub fn from_config(config: &LayoutConfig) -> Result<Self> {
        Self::new(&config.strategy, config)
    }

    /// Drive a caller-supplied strategy.
    pub fn with_strategy(strategy: Box<dyn LayoutStrategy>) -> Self {
        Self { strategy }
    }

    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// One-time setup; call before the first `run_step`.
    pub fn initialize(&mut self, graph: &mut GraphEngine) -> Result<()> {
        log::debug!("initializing {} layout", self.strategy.kind().name());
        self.strategy.initialize(graph)
    }

    /// One refinement pass; call once per frame.
    pub fn run_step(&mut self, graph: &mut GraphEngine) -> Result<StepReport> {
        self.strategy.step(graph)
    }
}
