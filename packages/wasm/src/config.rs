//! Layout session configuration.
//!
//! Read once at session start, typically from a plain JS object:
//!
//! ```json
//! { "strategy": "barycentric", "areaRadius": 3.0, "origin": [0, 0, 0], "maxSteps": 500 }
//! ```
//!
//! Every field is optional.

use glam::Vec3;
use serde::Deserialize;

use crate::error::{InvalidInput, Result};

/// Coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Configuration for a layout session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Strategy name, matched case-insensitively (default: "random").
    pub strategy: String,
    /// Half-width of the random cube and radius of the barycentric ring (default: 3.0).
    pub area_radius: f32,
    /// Center of the layout (default: [0, 0, 0]).
    pub origin: [f32; 3],
    /// RNG seed for the random strategy; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Axis pinned to the origin by the random strategy, for planar scatters.
    pub flat_axis: Option<Axis>,
    /// Cap on steps run by the WASM facade; `None` means unlimited.
    pub max_steps: Option<u32>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            strategy: "random".to_string(),
            area_radius: 3.0,
            origin: [0.0; 3],
            seed: None,
            flat_axis: None,
            max_steps: None,
        }
    }
}

impl LayoutConfig {
    /// Default configuration for the named strategy.
    pub fn for_strategy(name: &str) -> Self {
        Self {
            strategy: name.to_string(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        Vec3::from_array(self.origin)
    }

    /// Reject radii and origins that would produce non-finite positions.
    pub fn validate(&self) -> Result<()> {
        if !(self.area_radius.is_finite() && self.area_radius > 0.0) {
            return Err(InvalidInput::AreaRadius(self.area_radius).into());
        }
        if !self.origin().is_finite() {
            return Err(InvalidInput::Origin.into());
        }
        Ok(())
    }
}
