use storygraph_core::{DialogueGraph, EdgeKind};
use storygraph_graph::{CurveType, EdgeStylePlanner, LabelSide, Renderer, StyledEdge};
use storygraph_storage::NodePositions;

const FIRST_QUIET_MORNING: &str =
    include_str!("../../storygraph-core/tests/fixtures/first_quiet_morning.json");
const LUKA_SESSION: &str = include_str!("../../storygraph-core/tests/fixtures/luka_session.json");

fn edge<'a>(edges: &'a [StyledEdge], id: &str) -> &'a StyledEdge {
    edges
        .iter()
        .find(|e| e.id.as_str() == id)
        .unwrap_or_else(|| panic!("no edge {}", id))
}

#[test]
fn test_first_quiet_morning_labels() -> anyhow::Result<()> {
    let graph = DialogueGraph::from_json_str(FIRST_QUIET_MORNING)?;
    let plan = EdgeStylePlanner::default().plan(&graph)?;

    assert_eq!(plan.nodes.len(), 10);
    assert_eq!(plan.edges.len(), graph.edges.len());

    assert_eq!(edge(&plan.edges, "1262").label, "go village | mood >= 2");
    assert_eq!(edge(&plan.edges, "1263").label, "go check myrtle");
    assert_eq!(edge(&plan.edges, "1268").label, "ask alchemist");
    assert_eq!(
        edge(&plan.edges, "1269").label,
        "chamomile insomnia give | chamomile >= 1"
    );
    assert_eq!(edge(&plan.edges, "1270").label, "Myrtle_relation <= 2");
    assert_eq!(edge(&plan.edges, "1267").label, "");
    Ok(())
}

#[test]
fn test_first_quiet_morning_curves() -> anyhow::Result<()> {
    let graph = DialogueGraph::from_json_str(FIRST_QUIET_MORNING)?;
    let plan = EdgeStylePlanner::default().plan(&graph)?;

    // The only parallel pair: two ways of asking Myrtle.
    let ask = edge(&plan.edges, "1268");
    let give = edge(&plan.edges, "1269");
    assert_eq!(ask.curve_type, CurveType::CounterClockwise);
    assert_eq!(ask.label_side, Some(LabelSide::Bottom));
    assert_eq!(give.curve_type, CurveType::Clockwise);
    assert_eq!(give.label_side, Some(LabelSide::Top));
    assert!((ask.roundness - 0.3).abs() < 1e-5);

    let fanned = plan
        .edges
        .iter()
        .filter(|e| e.curve_type != CurveType::Default)
        .count();
    assert_eq!(fanned, 2);
    Ok(())
}

#[test]
fn test_plan_is_deterministic() -> anyhow::Result<()> {
    let graph = DialogueGraph::from_json_str(FIRST_QUIET_MORNING)?;
    let planner = EdgeStylePlanner::default();
    let first = planner.plan(&graph)?;
    for _ in 0..5 {
        assert_eq!(planner.plan(&graph)?, first);
    }
    Ok(())
}

#[test]
fn test_session_document_plan() -> anyhow::Result<()> {
    let graph = DialogueGraph::from_json_str(LUKA_SESSION)?;
    let plan = EdgeStylePlanner::default().plan(&graph)?;

    let ids: Vec<&str> = plan.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "greeting/choice/0",
            "greeting/choice/1",
            "greeting/choice/2",
            "greeting/failure/1",
            "schedule/next",
            "refused/next",
        ]
    );

    let bribe = edge(&plan.edges, "greeting/choice/1");
    assert_eq!(bribe.label, "bribe ferryman two | coins >= 2");
    assert_eq!(bribe.curve_type, CurveType::Default);

    let failure = edge(&plan.edges, "greeting/failure/1");
    assert_eq!(failure.kind, EdgeKind::Failure);
    assert_eq!(failure.label, "(fail)");

    let wait = edge(&plan.edges, "greeting/choice/2");
    assert!(wait.self_loop);
    assert_eq!(wait.label_side, Some(LabelSide::Middle));
    assert_eq!(wait.label, "wait quietly");
    Ok(())
}

#[test]
fn test_every_renderer_emits_every_edge() -> anyhow::Result<()> {
    let graph = DialogueGraph::from_json_str(FIRST_QUIET_MORNING)?;
    let plan = EdgeStylePlanner::default().plan(&graph)?;
    let positions = NodePositions::new();

    for renderer in Renderer::ALL {
        let doc = renderer.render(&plan, &graph, &positions)?;
        let edge_count = match renderer {
            Renderer::Cytoscape => doc["elements"]
                .as_array()
                .map(|e| e.iter().filter(|el| el["group"] == "edges").count()),
            _ => doc["edges"].as_array().map(Vec::len),
        };
        assert_eq!(edge_count, Some(15), "renderer {}", renderer);
    }
    Ok(())
}
