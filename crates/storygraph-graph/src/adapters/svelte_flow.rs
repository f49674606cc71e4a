use super::{json_number, position_or_grid};
use crate::curvature::CurveType;
use crate::plan::EdgePlan;
use crate::style::{EdgeStyle, get_edge_style};
use serde_json::{Value, json};
use std::collections::HashMap;
use storygraph_core::{DialogueEdge, DialogueGraph, EdgeId};
use storygraph_storage::NodePositions;

/// Name of the custom node component registered with `<SvelteFlow>`.
pub const NODE_TYPE: &str = "dialogueNode";
const MARKER_SIZE: u32 = 20;

/// `{nodes, edges}` for Svelte Flow. Every node gets a position: the saved
/// one, or its grid slot.
pub fn to_svelte_flow(plan: &EdgePlan, graph: &DialogueGraph, positions: &NodePositions) -> Value {
    let nodes: Vec<Value> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let position = position_or_grid(positions, &node.id, index);
            json!({
                "id": node.id,
                "type": NODE_TYPE,
                "position": {
                    "x": json_number(position.x),
                    "y": json_number(position.y),
                },
                "data": {
                    "name": node.display_label(),
                    "speaker": node.speaker,
                    "text": node.text,
                    "conditions_in": node.conditions_in,
                    "events_out": node.events_out,
                    "choices": node.choices,
                    "next_node": node.next_node,
                    "tags": node.tags,
                    "isEntry": graph.is_entry(&node.id),
                },
            })
        })
        .collect();

    let raw: HashMap<&EdgeId, &DialogueEdge> = graph.edges.iter().map(|e| (&e.id, e)).collect();

    let edges: Vec<Value> = plan
        .edges
        .iter()
        .map(|edge| {
            let style = get_edge_style(edge.kind);
            let (conditions, events) = raw
                .get(&edge.id)
                .map(|e| (e.conditions.as_slice(), e.events.as_slice()))
                .unwrap_or_default();
            let edge_type = match edge.curve_type {
                CurveType::Straight => "straight",
                _ => "bezier",
            };
            json!({
                "id": edge.id,
                "source": edge.source,
                "target": edge.target,
                "type": edge_type,
                "label": edge.label,
                "markerEnd": marker_end(&style),
                "data": {
                    "type": edge.kind,
                    "conditions_in": conditions,
                    "events_out": events,
                    "curveType": edge.curve_type,
                    "roundness": json_number(edge.roundness),
                    "labelSide": edge.label_side,
                    "selfLoop": edge.self_loop,
                },
                "animated": style.animated,
            })
        })
        .collect();

    json!({ "nodes": nodes, "edges": edges })
}

fn marker_end(style: &EdgeStyle) -> Value {
    if !style.arrow_head {
        return Value::Null;
    }
    json!({
        "type": "arrow",
        "color": style.color.to_hex(),
        "width": MARKER_SIZE,
        "height": MARKER_SIZE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::grid_position;
    use crate::plan::EdgeStylePlanner;
    use crate::settings::PlannerSettings;
    use storygraph_core::{DialogueNode, EdgeKind, NodeId};
    use storygraph_storage::Position;

    fn graph() -> DialogueGraph {
        let mut graph = DialogueGraph::new("merchant");
        graph
            .add_node(DialogueNode::new("d1").with_speaker("NPC_merchant"))
            .add_node(DialogueNode::new("d2"))
            .add_edge(
                DialogueEdge::new("link_1", "d1", "d2", EdgeKind::Conditional)
                    .with_text("Show me your goods.")
                    .with_condition("coins > 3"),
            )
            .add_edge(DialogueEdge::new("next", "d2", "d1", EdgeKind::Linear));
        graph.entry_node = Some(NodeId::new("d1"));
        graph
    }

    #[test]
    fn test_nodes_use_saved_or_grid_positions() {
        let graph = graph();
        let plan = EdgeStylePlanner::default().plan(&graph).unwrap();
        let mut positions = NodePositions::new();
        positions.insert(NodeId::new("d1"), Position::new(5.5, 6.0));

        let doc = to_svelte_flow(&plan, &graph, &positions);
        let nodes = doc["nodes"].as_array().unwrap();
        assert_eq!(nodes[0]["type"], NODE_TYPE);
        assert_eq!(nodes[0]["position"], json!({ "x": 5.5, "y": 6.0 }));
        assert_eq!(nodes[0]["data"]["isEntry"], true);
        assert_eq!(nodes[0]["data"]["speaker"], "NPC_merchant");

        let slot = grid_position(1);
        assert_eq!(
            nodes[1]["position"],
            json!({ "x": json_number(slot.x), "y": json_number(slot.y) })
        );
        assert_eq!(nodes[1]["data"]["isEntry"], false);
    }

    #[test]
    fn test_edges_carry_plan_and_annotations() {
        let graph = graph();
        let planner = EdgeStylePlanner::new(PlannerSettings {
            straight_conditionals: true,
            ..PlannerSettings::default()
        });
        let plan = planner.plan(&graph).unwrap();
        let doc = to_svelte_flow(&plan, &graph, &NodePositions::new());
        let edges = doc["edges"].as_array().unwrap();

        let link = &edges[0];
        assert_eq!(link["type"], "straight");
        assert_eq!(link["label"], "show goods | coins > 3");
        assert_eq!(link["data"]["type"], "Conditional");
        assert_eq!(link["data"]["conditions_in"], json!(["coins > 3"]));
        assert_eq!(link["animated"], false);

        let next = &edges[1];
        assert_eq!(next["type"], "bezier");
        assert_eq!(next["animated"], true);
        assert_eq!(next["label"], "");
        assert_eq!(next["markerEnd"]["color"], "#aaaaaa");
        assert_eq!(next["data"]["labelSide"], Value::Null);
    }

    #[test]
    fn test_marker_follows_arrow_head() {
        let mut style = get_edge_style(EdgeKind::Failure);
        assert_eq!(marker_end(&style)["color"], "#ff0000");
        style.arrow_head = false;
        assert_eq!(marker_end(&style), Value::Null);
    }
}
