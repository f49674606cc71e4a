use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

const FIRST_QUIET_MORNING: &str =
    include_str!("../../storygraph-core/tests/fixtures/first_quiet_morning.json");
const LUKA_SESSION: &str = include_str!("../../storygraph-core/tests/fixtures/luka_session.json");

fn storygraph(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_storygraph"))
        .args(args)
        .output()
        .expect("failed to run storygraph")
}

fn write_fixture(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_plan_prints_json_to_stdout() {
    let dir = tempdir().unwrap();
    let story = write_fixture(dir.path(), "story.json", FIRST_QUIET_MORNING);
    let positions = dir.path().join("positions.json");

    let output = storygraph(&["plan", &story, "--positions", positions.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["nodes"].as_array().unwrap().len(), 10);
    assert_eq!(plan["edges"].as_array().unwrap().len(), 15);
    assert_eq!(plan["edges"][0]["label"], "go village | mood >= 2");
    assert!(!positions.exists());
}

#[test]
fn test_plan_writes_renderer_output_and_positions() {
    let dir = tempdir().unwrap();
    let story = write_fixture(dir.path(), "luka.json", LUKA_SESSION);
    let config = write_fixture(
        dir.path(),
        "settings.json",
        r#"{ "failure_label": "fails", "max_keywords": 2 }"#,
    );
    let positions = dir.path().join("layout").join("positions.json");
    let out = dir.path().join("flow.json");

    let output = storygraph(&[
        "plan",
        &story,
        "--renderer",
        "flow",
        "--config",
        &config,
        "--positions",
        positions.to_str().unwrap(),
        "--save-positions",
        "--output",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());

    let flow: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let edges = flow["edges"].as_array().unwrap();
    assert_eq!(edges[0]["label"], "ask luka");
    let failure = edges
        .iter()
        .find(|e| e["id"] == "greeting/failure/1")
        .unwrap();
    assert_eq!(failure["label"], "fails");

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&positions).unwrap()).unwrap();
    assert_eq!(saved.as_object().unwrap().len(), 4);
    assert_eq!(saved["schedule"], serde_json::json!({ "x": 220.0, "y": 0.0 }));
}

#[test]
fn test_validate_reports_dangling_edge() {
    let dir = tempdir().unwrap();
    let good = write_fixture(dir.path(), "good.json", FIRST_QUIET_MORNING);
    let bad = write_fixture(
        dir.path(),
        "bad.json",
        r#"{ "nodes": [{ "id": "a" }], "links": [{ "id": "l", "type": "Linear", "prev_node": "a", "next_node": "b" }] }"#,
    );

    let output = storygraph(&["validate", &good]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "167390: 10 nodes, 15 edges"
    );

    let output = storygraph(&["validate", &bad]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a valid dialogue graph"), "{}", stderr);
}

#[test]
fn test_save_positions_keeps_unreadable_file() {
    let dir = tempdir().unwrap();
    let story = write_fixture(dir.path(), "luka.json", LUKA_SESSION);
    let truncated = r#"{ "greeting": {"x": 5, "y": 6}, "#;
    let positions = write_fixture(dir.path(), "pos.json", truncated);
    let out = dir.path().join("plan.json");

    let output = storygraph(&[
        "plan",
        &story,
        "-p",
        &positions,
        "--save-positions",
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Refusing to overwrite"), "{}", stderr);
    assert_eq!(fs::read_to_string(&positions).unwrap(), truncated);
    assert!(!out.exists());

    // Without --save-positions the broken file is only skipped.
    let output = storygraph(&["plan", &story, "-p", &positions]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(fs::read_to_string(&positions).unwrap(), truncated);
}
