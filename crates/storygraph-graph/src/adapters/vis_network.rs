use super::json_number;
use crate::curvature::{CurveType, LabelSide};
use crate::plan::{EdgePlan, StyledEdge};
use crate::style::{get_edge_style, get_node_style};
use serde_json::{Value, json};
use storygraph_core::DialogueGraph;
use storygraph_storage::NodePositions;

/// Loop radius in pixels at roundness 1.0.
const SELF_REFERENCE_SCALE: f32 = 40.0;

/// `{nodes, edges}` for `new vis.Network(container, data, options)`.
pub fn to_vis_network(plan: &EdgePlan, graph: &DialogueGraph, positions: &NodePositions) -> Value {
    let nodes: Vec<Value> = graph
        .nodes
        .iter()
        .map(|node| {
            let style = get_node_style(node, graph.is_entry(&node.id));
            let mut item = json!({
                "id": node.id,
                "label": node.display_label(),
                "title": node.text,
                "color": {
                    "background": style.fill.to_hex(),
                    "border": style.border.to_hex(),
                },
                "font": { "color": style.text.to_hex() },
            });
            if let Some(position) = positions.get(&node.id) {
                item["x"] = json!(json_number(position.x));
                item["y"] = json!(json_number(position.y));
            }
            item
        })
        .collect();

    let edges: Vec<Value> = plan.edges.iter().map(edge_item).collect();

    json!({ "nodes": nodes, "edges": edges })
}

fn edge_item(edge: &StyledEdge) -> Value {
    let style = get_edge_style(edge.kind);
    let mut item = json!({
        "id": edge.id,
        "from": edge.source,
        "to": edge.target,
        "label": edge.label,
        "arrows": if style.arrow_head { "to" } else { "" },
        "dashes": style.dashed,
        "width": json_number(style.width),
        "color": { "color": style.color.to_hex() },
        "smooth": smooth(edge),
        "font": { "align": font_align(edge.label_side) },
    });
    if edge.self_loop {
        item["selfReference"] = json!({
            "size": json_number(edge.roundness * SELF_REFERENCE_SCALE),
            "angle": std::f64::consts::FRAC_PI_4,
        });
    }
    item
}

fn smooth(edge: &StyledEdge) -> Value {
    let kind = match edge.curve_type {
        CurveType::Straight => return json!({ "enabled": false }),
        CurveType::Default => "dynamic",
        CurveType::Clockwise => "curvedCW",
        CurveType::CounterClockwise => "curvedCCW",
    };
    json!({
        "enabled": true,
        "type": kind,
        "roundness": json_number(edge.roundness),
    })
}

fn font_align(side: Option<LabelSide>) -> &'static str {
    match side {
        Some(LabelSide::Top) => "top",
        Some(LabelSide::Bottom) => "bottom",
        Some(LabelSide::Middle) => "middle",
        None => "horizontal",
    }
}
