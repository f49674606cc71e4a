//! Edge style planning.
//!
//! Turns a dialogue graph into the renderer-agnostic list of node and edge
//! records: labels for every edge, then curvature for every group of
//! parallel edges.

use crate::curvature::{CurveAssignment, CurveType, CurvatureAssigner, LabelSide};
use crate::group::EdgeGrouper;
use crate::settings::PlannerSettings;
use crate::summarize::Summarize;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use storygraph_core::{DialogueEdge, DialogueGraph, EdgeId, EdgeKind, GraphError, NodeId};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDisplay {
    pub id: NodeId,
    pub label: String,
}

/// Display text for one edge, kept in parts so multi-line renderers can
/// stack them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeLabel {
    pub summary: String,
    /// First requirement of the edge, if any.
    pub annotation: Option<String>,
}

impl EdgeLabel {
    pub fn plain(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            annotation: None,
        }
    }

    pub fn join(&self, separator: &str) -> String {
        match (&self.annotation, self.summary.is_empty()) {
            (Some(annotation), false) => format!("{}{}{}", self.summary, separator, annotation),
            (Some(annotation), true) => annotation.clone(),
            (None, _) => self.summary.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
    pub label: String,
    pub summary: String,
    pub annotation: Option<String>,
    pub curve_type: CurveType,
    pub roundness: f32,
    pub label_side: Option<LabelSide>,
    pub self_loop: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgePlan {
    pub nodes: Vec<NodeDisplay>,
    pub edges: Vec<StyledEdge>,
}

pub struct EdgeStylePlanner {
    settings: PlannerSettings,
    summarizer: Arc<dyn Summarize>,
    grouper: EdgeGrouper,
    curvature: CurvatureAssigner,
}

impl Default for EdgeStylePlanner {
    fn default() -> Self {
        Self::new(PlannerSettings::default())
    }
}

impl EdgeStylePlanner {
    pub fn new(settings: PlannerSettings) -> Self {
        Self {
            summarizer: Arc::new(settings.summarizer()),
            grouper: EdgeGrouper::new(),
            curvature: settings.curvature(),
            settings,
        }
    }

    /// Replace the built-in keyword summarizer, e.g. with a remote service.
    pub fn with_summarizer<S>(mut self, summarizer: S) -> Self
    where
        S: Summarize + 'static,
    {
        self.summarizer = Arc::new(summarizer);
        self
    }

    pub fn plan(&self, graph: &DialogueGraph) -> Result<EdgePlan, GraphError> {
        graph.validate()?;

        let nodes: Vec<NodeDisplay> = graph
            .nodes
            .iter()
            .map(|node| NodeDisplay {
                id: node.id.clone(),
                label: node.display_label().to_string(),
            })
            .collect();

        let ordered = traversal_order(graph);

        // Summaries may be computed out of order; collect() keeps input order.
        let labels: Vec<EdgeLabel> = ordered
            .par_iter()
            .map(|edge| self.label_for(edge))
            .collect();

        let mut curves = vec![CurveAssignment::neutral(); ordered.len()];
        let groups = self.grouper.group(&ordered);
        for ((source, target), members) in groups.iter() {
            let assigned = self.curvature.assign(members.len(), source == target);
            for (&index, mut curve) in members.iter().zip(assigned) {
                if self.settings.straight_conditionals
                    && members.len() == 1
                    && !curve.self_loop
                    && ordered[index].kind == EdgeKind::Conditional
                {
                    curve.curve_type = CurveType::Straight;
                }
                curves[index] = curve;
            }
        }

        let edges: Vec<StyledEdge> = ordered
            .iter()
            .zip(labels)
            .zip(curves)
            .map(|((edge, label), curve)| StyledEdge {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                kind: edge.kind,
                label: label.join(&self.settings.annotation_separator),
                summary: label.summary,
                annotation: label.annotation,
                curve_type: curve.curve_type,
                roundness: curve.roundness,
                label_side: curve.label_side,
                self_loop: curve.self_loop,
            })
            .collect();

        debug!(
            graph = %graph.id,
            nodes = nodes.len(),
            edges = edges.len(),
            groups = groups.len(),
            "Planned edge styles"
        );

        Ok(EdgePlan { nodes, edges })
    }

    pub fn label_for(&self, edge: &DialogueEdge) -> EdgeLabel {
        match edge.kind {
            EdgeKind::Choice | EdgeKind::Conditional => EdgeLabel {
                summary: self.summarize(edge),
                annotation: edge.first_condition().map(str::to_string),
            },
            EdgeKind::Failure => EdgeLabel::plain(self.settings.failure_label.clone()),
            EdgeKind::Linear => EdgeLabel::default(),
        }
    }

    fn summarize(&self, edge: &DialogueEdge) -> String {
        let text = match edge.text.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => return String::new(),
        };

        match self.summarizer.summarize(text) {
            Ok(summary) => summary,
            Err(err) => {
                warn!(edge = %edge.id, "Summarizer failed, using raw text: {:#}", err);
                text.to_string()
            }
        }
    }
}

/// Edges in node insertion order; per source node by kind (choices,
/// conditionals, failures, then linear flow), keeping declaration order
/// within a kind.
pub fn traversal_order(graph: &DialogueGraph) -> Vec<&DialogueEdge> {
    let node_rank: HashMap<&NodeId, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (&node.id, i))
        .collect();

    let mut ordered: Vec<&DialogueEdge> = graph.edges.iter().collect();
    ordered.sort_by_key(|edge| {
        (
            node_rank.get(&edge.source).copied().unwrap_or(usize::MAX),
            edge.kind.traversal_rank(),
        )
    });
    ordered
}
