//! Loading dialogue graphs from JSON documents.
//!
//! Two shapes are accepted:
//! - the structured `{ id, nodes: [...], links: [...] }` document, which maps
//!   directly onto [`DialogueGraph`];
//! - the session export, an object keyed by node id whose bodies carry `ID`,
//!   `Choices[]` and an optional `NextNodeID`. Edges are derived from the
//!   choices and successor fields, in document order.

use crate::{DialogueEdge, DialogueGraph, DialogueNode, EdgeKind, GraphError, NodeId};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    Structured,
    Session,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SessionNode {
    #[serde(default, rename = "ID")]
    id: Option<Value>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    speaker: Option<String>,
    #[serde(default)]
    choices: Option<Vec<SessionChoice>>,
    #[serde(default, rename = "NextNodeID")]
    next_node_id: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SessionChoice {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    requirements: Option<Vec<String>>,
    #[serde(default, rename = "NextNodeID")]
    next_node_id: Option<Value>,
    #[serde(default, rename = "FailureNodeID")]
    failure_node_id: Option<Value>,
}

/// Node references in session exports are strings or numbers; null and
/// empty strings mean "no successor".
fn node_ref(value: &Option<Value>) -> Option<NodeId> {
    match value.as_ref()? {
        Value::String(s) if !s.trim().is_empty() => Some(NodeId::new(s.trim())),
        Value::Number(n) => Some(NodeId::new(n.to_string())),
        _ => None,
    }
}

pub fn detect_shape(value: &Value) -> Result<DocumentShape, GraphError> {
    let Some(object) = value.as_object() else {
        return Err(GraphError::Parse(
            "expected a JSON object at the document root".to_string(),
        ));
    };

    let has_array = |key: &str| object.get(key).is_some_and(Value::is_array);
    if has_array("nodes") && has_array("links") {
        return Ok(DocumentShape::Structured);
    }

    if object.values().all(Value::is_object) {
        return Ok(DocumentShape::Session);
    }

    Err(GraphError::Parse(
        "document is neither a {nodes, links} graph nor a session export".to_string(),
    ))
}

impl DialogueGraph {
    pub fn from_json_str(source: &str) -> Result<Self, GraphError> {
        let value: Value = serde_json::from_str(source)?;
        let shape = detect_shape(&value)?;
        debug!(?shape, "Detected dialogue document shape");

        match shape {
            DocumentShape::Structured => Ok(serde_json::from_value(value)?),
            // Re-parse from the source text: `Value` does not keep key order,
            // and node order is the document's key order.
            DocumentShape::Session => {
                let nodes: IndexMap<String, SessionNode> = serde_json::from_str(source)?;
                Ok(Self::from_session(nodes))
            }
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GraphError> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut graph = Self::from_json_str(&content)?;
        if graph.id.is_empty() {
            if let Some(stem) = path.as_ref().file_stem() {
                graph.id = stem.to_string_lossy().into_owned();
            }
        }
        Ok(graph)
    }

    fn from_session(session: IndexMap<String, SessionNode>) -> Self {
        let mut graph = DialogueGraph::default();

        for (key, body) in session {
            let choices = body.choices.unwrap_or_default();

            let mut node = DialogueNode::new(key.clone());
            node.name = match body.id {
                Some(Value::String(s)) => Some(s),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };
            node.text = body.text.unwrap_or_default();
            node.speaker = body.speaker;
            node.next_node = node_ref(&body.next_node_id);
            node.choices = choices
                .iter()
                .map(|c| c.text.clone().unwrap_or_default())
                .collect();

            for (index, choice) in choices.iter().enumerate() {
                let conditions = choice.requirements.clone().unwrap_or_default();

                if let Some(target) = node_ref(&choice.next_node_id) {
                    let mut edge = DialogueEdge::new(
                        format!("{key}/choice/{index}"),
                        key.clone(),
                        target.0,
                        EdgeKind::Choice,
                    );
                    edge.text = choice.text.clone();
                    edge.conditions = conditions.clone();
                    graph.edges.push(edge);
                }

                if let Some(target) = node_ref(&choice.failure_node_id) {
                    let mut edge = DialogueEdge::new(
                        format!("{key}/failure/{index}"),
                        key.clone(),
                        target.0,
                        EdgeKind::Failure,
                    );
                    edge.text = choice.text.clone();
                    edge.conditions = conditions;
                    graph.edges.push(edge);
                }
            }

            if let Some(next) = &node.next_node {
                graph.edges.push(DialogueEdge::new(
                    format!("{key}/next"),
                    key.clone(),
                    next.0.clone(),
                    EdgeKind::Linear,
                ));
            }

            graph.nodes.push(node);
        }

        graph
    }
}
