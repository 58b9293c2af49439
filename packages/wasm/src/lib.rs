//! Graph Viewer layout engine - WASM Module
//!
//! This crate assigns 3D positions to graph nodes for an interactive viewer
//! and refines them incrementally, one bounded step per rendered frame. It
//! is compiled to WebAssembly and exposes a JavaScript-friendly API via
//! wasm-bindgen; windowing, camera and drawing stay on the JavaScript side.
//!
//! # Architecture
//!
//! - `graph`: Graph model on petgraph's StableGraph with typed node records
//! - `layout`: Cycle search, layout strategies and the per-frame controller
//! - `config`: Session configuration, deserialized from JS objects
//! - `error`: Typed failures shared by all of the above

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod graph;
pub mod layout;

pub use config::LayoutConfig;
pub use error::{LayoutError, Result};

use graph::{Color, GraphEngine, NodeId};
use layout::{LayoutController, StepReport};

/// Initialize the WASM module: panic messages and `log` output go to the console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// Main entry point for the layout engine.
///
/// Owns the graph and the layout session. The JavaScript render loop calls
/// `step()` once per frame and reads positions back with `getPositions()`.
#[wasm_bindgen]
pub struct GraphLayoutWasm {
    engine: GraphEngine,
    controller: Option<LayoutController>,
    /// Step budget from `maxSteps`; `None` means unlimited.
    max_steps: Option<u32>,
    steps_taken: u32,
    last_report: Option<StepReport>,
}

#[wasm_bindgen]
impl GraphLayoutWasm {
    /// Create an empty graph.
    #[wasm_bindgen(constructor)]
    pub fn new(directed: bool) -> Self {
        let engine = if directed {
            GraphEngine::new_directed()
        } else {
            GraphEngine::new_undirected()
        };
        Self {
            engine,
            controller: None,
            max_steps: None,
            steps_taken: 0,
            last_report: None,
        }
    }

    // =========================================================================
    // Graph Construction
    // =========================================================================

    /// Add a node. Returns false if the ID is already in use.
    ///
    /// Nodes added after `initializeLayout` are not picked up until the
    /// layout is initialized again.
    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self, node_id: u32) -> bool {
        self.engine.add_node(NodeId(node_id))
    }

    /// Add nodes from a Uint32Array of IDs. Returns the number added.
    #[wasm_bindgen(js_name = addNodes)]
    pub fn add_nodes(&mut self, node_ids: &[u32]) -> u32 {
        self.engine.add_nodes(node_ids)
    }

    /// Add an edge. Returns false if it already exists.
    #[wasm_bindgen(js_name = addEdge)]
    pub fn add_edge(&mut self, source: u32, target: u32) -> std::result::Result<bool, JsError> {
        Ok(self.engine.add_edge(NodeId(source), NodeId(target))?)
    }

    /// Add edges from a Uint32Array of pairs [src0, tgt0, src1, tgt1, ...].
    ///
    /// Pairs naming unknown nodes are skipped. Returns the number added.
    #[wasm_bindgen(js_name = addEdgesFromPairs)]
    pub fn add_edges_from_pairs(&mut self, edges: &[u32]) -> u32 {
        self.engine.add_edges_from_pairs(edges)
    }

    /// Set a node's display color; channels are clamped to [0, 1].
    #[wasm_bindgen(js_name = setNodeColor)]
    pub fn set_node_color(
        &mut self,
        node_id: u32,
        r: f32,
        g: f32,
        b: f32,
    ) -> std::result::Result<(), JsError> {
        Ok(self.engine.set_color(NodeId(node_id), Color::new(r, g, b))?)
    }

    /// Forget a node's position so the next `initializeLayout` treats it
    /// as unplaced.
    #[wasm_bindgen(js_name = clearNodePosition)]
    pub fn clear_node_position(&mut self, node_id: u32) -> std::result::Result<(), JsError> {
        Ok(self.engine.clear_position(NodeId(node_id))?)
    }

    /// Attach a precomputed anchor ring for the barycentric layout.
    #[wasm_bindgen(js_name = setFixedRing)]
    pub fn set_fixed_ring(&mut self, node_ids: &[u32]) {
        self.engine
            .set_fixed_ring(node_ids.iter().copied().map(NodeId).collect());
    }

    #[wasm_bindgen(js_name = clearFixedRing)]
    pub fn clear_fixed_ring(&mut self) {
        self.engine.clear_fixed_ring();
    }

    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.engine.node_count() as u32
    }

    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.engine.edge_count() as u32
    }

    #[wasm_bindgen(js_name = isDirected)]
    pub fn is_directed(&self) -> bool {
        self.engine.is_directed()
    }

    /// Node IDs in buffer order.
    #[wasm_bindgen(js_name = nodeIds)]
    pub fn node_ids(&self) -> Vec<u32> {
        self.engine.node_ids().map(NodeId::raw).collect()
    }

    /// Edges as [src0, tgt0, src1, tgt1, ...].
    #[wasm_bindgen(js_name = edgePairs)]
    pub fn edge_pairs(&self) -> Vec<u32> {
        self.engine
            .edges()
            .into_iter()
            .flat_map(|(source, target)| [source.raw(), target.raw()])
            .collect()
    }

    // =========================================================================
    // Layout Session
    // =========================================================================

    /// Start a layout session.
    ///
    /// `config` is a plain object (see [`LayoutConfig`]); `undefined` or
    /// `null` selects the defaults.
    #[wasm_bindgen(js_name = initializeLayout)]
    pub fn initialize_layout(&mut self, config: JsValue) -> std::result::Result<(), JsError> {
        let config: LayoutConfig = if config.is_undefined() || config.is_null() {
            LayoutConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsError::new(&e.to_string()))?
        };
        Ok(self.start_session(config)?)
    }

    /// Run one layout step.
    ///
    /// Returns false without doing anything before `initializeLayout` or once
    /// the step budget is spent.
    pub fn step(&mut self) -> std::result::Result<bool, JsError> {
        Ok(self.advance()?.is_some())
    }

    #[wasm_bindgen(js_name = stepsTaken)]
    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    /// Whether the last step placed nothing new and moved no node further
    /// than `tolerance`.
    #[wasm_bindgen(js_name = isConverged)]
    pub fn is_converged(&self, tolerance: f32) -> bool {
        self.last_report
            .is_some_and(|report| report.is_converged(tolerance))
    }

    /// Name of the active strategy, if a session is running.
    pub fn strategy(&self) -> Option<String> {
        self.controller
            .as_ref()
            .map(|controller| controller.kind().name().to_string())
    }

    // =========================================================================
    // Renderer Read Side
    // =========================================================================

    /// Positions as a Float32Array [x0, y0, z0, x1, ...] in `nodeIds()` order.
    ///
    /// Nodes without a position yet hold 3.402823e+38.
    #[wasm_bindgen(js_name = getPositions)]
    pub fn get_positions(&self) -> Float32Array {
        Float32Array::from(&self.engine.position_buffer()[..])
    }

    /// Colors as a Float32Array [r0, g0, b0, r1, ...] in `nodeIds()` order.
    #[wasm_bindgen(js_name = getColors)]
    pub fn get_colors(&self) -> Float32Array {
        Float32Array::from(&self.engine.color_buffer()[..])
    }

    /// Bounding box of placed nodes as [min_x, min_y, min_z, max_x, max_y, max_z].
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self) -> Option<Vec<f32>> {
        self.bounds()
    }

    /// Clear the graph and end the session.
    pub fn clear(&mut self) {
        self.engine.clear();
        self.controller = None;
        self.max_steps = None;
        self.steps_taken = 0;
        self.last_report = None;
    }
}

impl GraphLayoutWasm {
    /// Validate `config`, build its strategy and run `initialize`.
    ///
    /// On failure no session is active.
    pub fn start_session(&mut self, config: LayoutConfig) -> Result<()> {
        self.controller = None;
        self.steps_taken = 0;
        self.last_report = None;

        let mut controller = LayoutController::from_config(&config)?;
        controller.initialize(&mut self.engine)?;

        log::info!(
            "{} layout session started on {} nodes, {} edges",
            controller.kind().name(),
            self.engine.node_count(),
            self.engine.edge_count()
        );
        self.max_steps = config.max_steps;
        self.controller = Some(controller);
        Ok(())
    }

    /// Run one step if a session is active and the budget allows it.
    pub fn advance(&mut self) -> Result<Option<StepReport>> {
        let Some(controller) = self.controller.as_mut() else {
            return Ok(None);
        };
        if self.max_steps.is_some_and(|max| self.steps_taken >= max) {
            return Ok(None);
        }

        let report = controller.run_step(&mut self.engine)?;
        self.steps_taken = self.steps_taken.saturating_add(1);
        if self.max_steps == Some(self.steps_taken) {
            log::debug!("step budget of {} exhausted", self.steps_taken);
        }
        self.last_report = Some(report);
        Ok(Some(report))
    }

    pub fn engine(&self) -> &GraphEngine {
        &self.engine
    }

    pub fn bounds(&self) -> Option<Vec<f32>> {
        self.engine.bounds().map(|(min, max)| {
            vec![min.x, min.y, min.z, max.x, max.y, max.z]
        })
    }
}

impl Default for GraphLayoutWasm {
    fn default() -> Self {
        Self::new(false)
    }
}
