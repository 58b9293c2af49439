//! Node type and related structures.
//!
//! Nodes are the vertices in the graph. Each node has:
//! - A caller-supplied unique identifier
//! - An optional 3D position, written only by the layout strategies
//! - A display color, written only by the caller

use std::fmt;

use glam::Vec3;

/// Sentinel written into flat position buffers for nodes without a position.
pub const UNPLACED: f32 = f32::MAX;

/// Node identifier.
///
/// Chosen by the caller when the node is added; it wraps a u32 for
/// efficient storage and WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// RGB display color with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    /// Create a color, clamping each channel into [0, 1].
    ///
    /// NaN channels become 0.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        let channel = |c: f32| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) };
        Self {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Per-node record stored as the petgraph node weight.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub id: NodeId,
    /// Layout position; `None` until a strategy places the node.
    pub position: Option<Vec3>,
    pub color: Color,
}

impl NodeRecord {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            position: None,
            color: Color::default(),
        }
    }

    /// Position as `[x, y, z]`, or three [`UNPLACED`] sentinels.
    pub fn position_or_sentinel(&self) -> [f32; 3] {
        self.position
            .map(|p| p.to_array())
            .unwrap_or([UNPLACED; 3])
    }
}
