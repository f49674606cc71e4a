//! Translation of an [`EdgePlan`] into the element schemas of concrete
//! graph renderers.

mod cytoscape;
mod svelte_flow;
mod vis_network;

pub use cytoscape::to_cytoscape;
pub use svelte_flow::to_svelte_flow;
pub use vis_network::to_vis_network;

use crate::plan::EdgePlan;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use storygraph_core::{DialogueGraph, NodeId};
use storygraph_storage::{NodePositions, Position};

pub const GRID_COLUMNS: usize = 5;
pub const GRID_SPACING_X: f32 = 220.0;
pub const GRID_SPACING_Y: f32 = 140.0;

/// Fallback slot for the `index`-th node when no position was saved.
pub fn grid_position(index: usize) -> Position {
    Position::new(
        (index % GRID_COLUMNS) as f32 * GRID_SPACING_X,
        (index / GRID_COLUMNS) as f32 * GRID_SPACING_Y,
    )
}

/// f32 layout values widened for JSON without binary noise (`0.2`, not
/// `0.20000000298023224`).
pub(crate) fn json_number(value: f32) -> f64 {
    (f64::from(value) * 1000.0).round() / 1000.0
}

pub fn position_or_grid(positions: &NodePositions, id: &NodeId, index: usize) -> Position {
    positions
        .get(id)
        .copied()
        .unwrap_or_else(|| grid_position(index))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Renderer {
    /// The plan itself, no adapter.
    #[default]
    Plan,
    Cytoscape,
    VisNetwork,
    SvelteFlow,
}

impl Renderer {
    pub const ALL: [Renderer; 4] = [
        Renderer::Plan,
        Renderer::Cytoscape,
        Renderer::VisNetwork,
        Renderer::SvelteFlow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Renderer::Plan => "plan",
            Renderer::Cytoscape => "cytoscape",
            Renderer::VisNetwork => "vis",
            Renderer::SvelteFlow => "flow",
        }
    }

    pub fn render(
        &self,
        plan: &EdgePlan,
        graph: &DialogueGraph,
        positions: &NodePositions,
    ) -> Result<Value, serde_json::Error> {
        match self {
            Renderer::Plan => serde_json::to_value(plan),
            Renderer::Cytoscape => Ok(to_cytoscape(plan, graph, positions)),
            Renderer::VisNetwork => Ok(to_vis_network(plan, graph, positions)),
            Renderer::SvelteFlow => Ok(to_svelte_flow(plan, graph, positions)),
        }
    }
}

impl fmt::Display for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Renderer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plan" => Ok(Renderer::Plan),
            "cytoscape" | "cy" => Ok(Renderer::Cytoscape),
            "vis" | "vis-network" => Ok(Renderer::VisNetwork),
            "flow" | "svelte-flow" => Ok(Renderer::SvelteFlow),
            other => Err(format!("unknown renderer: {}", other)),
        }
    }
}
