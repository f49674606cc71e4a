use super::json_number;
use crate::curvature::{CurveType, LabelSide};
use crate::plan::{EdgePlan, StyledEdge};
use crate::style::{get_edge_style, get_node_style};
use serde_json::{Map, Value, json};
use storygraph_core::{DialogueGraph, EdgeKind};
use storygraph_storage::NodePositions;

/// Control-point distance, in pixels, of an edge with roundness 1.0.
const CONTROL_POINT_SCALE: f32 = 120.0;
const LABEL_MARGIN: f32 = 10.0;

/// `{elements, style}` for `cytoscape({...})`. Node positions are only
/// emitted when saved so a layout extension can place the rest.
pub fn to_cytoscape(plan: &EdgePlan, graph: &DialogueGraph, positions: &NodePositions) -> Value {
    let mut elements = Vec::with_capacity(graph.nodes.len() + plan.edges.len());

    for node in &graph.nodes {
        let style = get_node_style(node, graph.is_entry(&node.id));
        let mut element = json!({
            "group": "nodes",
            "data": {
                "id": node.id,
                "label": node.display_label(),
                "speaker": node.speaker,
                "text": node.text,
            },
            "style": {
                "background-color": style.fill.to_hex(),
                "border-color": style.border.to_hex(),
                "color": style.text.to_hex(),
            },
        });
        if let Some(position) = positions.get(&node.id) {
            element["position"] = json!({
                "x": json_number(position.x),
                "y": json_number(position.y),
            });
        }
        elements.push(element);
    }

    for edge in &plan.edges {
        elements.push(json!({
            "group": "edges",
            "data": {
                "id": edge.id,
                "source": edge.source,
                "target": edge.target,
                "label": edge.label,
                "type": edge.kind.tag(),
            },
            "style": Value::Object(edge_style(edge)),
        }));
    }

    json!({
        "elements": elements,
        "style": stylesheet(),
    })
}

fn edge_style(edge: &StyledEdge) -> Map<String, Value> {
    let mut style = Map::new();

    if edge.self_loop {
        style.insert("curve-style".into(), json!("bezier"));
        style.insert("loop-direction".into(), json!("-45deg"));
        style.insert("loop-sweep".into(), json!("-90deg"));
        style.insert(
            "control-point-step-size".into(),
            json!(json_number(edge.roundness * CONTROL_POINT_SCALE)),
        );
    } else {
        match edge.curve_type {
            CurveType::Default => {}
            CurveType::Straight => {
                style.insert("curve-style".into(), json!("straight"));
            }
            CurveType::Clockwise | CurveType::CounterClockwise => {
                let sign = if edge.curve_type == CurveType::Clockwise {
                    1.0
                } else {
                    -1.0
                };
                style.insert("curve-style".into(), json!("unbundled-bezier"));
                style.insert(
                    "control-point-distances".into(),
                    json!([json_number(sign * edge.roundness * CONTROL_POINT_SCALE)]),
                );
                style.insert("control-point-weights".into(), json!([0.5]));
            }
        }
    }

    let margin = match edge.label_side {
        Some(LabelSide::Top) => Some(-LABEL_MARGIN),
        Some(LabelSide::Bottom) => Some(LABEL_MARGIN),
        Some(LabelSide::Middle) | None => None,
    };
    if let Some(margin) = margin {
        style.insert("text-margin-y".into(), json!(json_number(margin)));
    }

    style
}

/// Base selectors plus one rule per edge kind.
fn stylesheet() -> Vec<Value> {
    let mut sheet = vec![
        json!({
            "selector": "node",
            "style": { "label": "data(label)" },
        }),
        json!({
            "selector": "edge",
            "style": {
                "label": "data(label)",
                "curve-style": "bezier",
            },
        }),
    ];

    for kind in EdgeKind::ALL {
        let style = get_edge_style(kind);
        let color = style.color.to_hex();
        sheet.push(json!({
            "selector": format!("edge[type='{}']", kind.tag()),
            "style": {
                "line-color": color,
                "target-arrow-color": color,
                "line-style": if style.dashed { "dashed" } else { "solid" },
                "target-arrow-shape": if style.arrow_head { "triangle" } else { "none" },
                "width": json_number(style.width),
            },
        }));
    }

    sheet
}
