//! Dialogue graph model.
//!
//! The serde layout matches the structured `{nodes, links}` document, so a
//! graph can be read from and written back to that shape without a separate
//! wire type.

use crate::error::Endpoint;
use crate::{EdgeId, EdgeKind, GraphError, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueNode {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    /// Outgoing choice texts, informational only.
    #[serde(default)]
    pub choices: Vec<String>,
    /// Linear successor, informational only; edges are the source of truth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_node: Option<NodeId>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub conditions_in: Vec<String>,
    #[serde(default)]
    pub events_out: Vec<String>,
}

impl DialogueNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(id),
            name: None,
            text: String::new(),
            speaker: None,
            choices: Vec::new(),
            next_node: None,
            tags: Vec::new(),
            conditions_in: Vec::new(),
            events_out: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }

    /// Label shown on the node: its name when set, otherwise its id.
    pub fn display_label(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.id.as_str(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueEdge {
    pub id: EdgeId,
    #[serde(rename = "prev_node")]
    pub source: NodeId,
    #[serde(rename = "next_node")]
    pub target: NodeId,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Precondition expressions, opaque to this crate.
    #[serde(default, rename = "conditions_in")]
    pub conditions: Vec<String>,
    /// Side-effect expressions, opaque to this crate.
    #[serde(default, rename = "events_out")]
    pub events: Vec<String>,
}

impl DialogueEdge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        kind: EdgeKind,
    ) -> Self {
        Self {
            id: EdgeId::new(id),
            source: NodeId::new(source),
            target: NodeId::new(target),
            kind,
            text: None,
            conditions: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// The first precondition, if it has any content. Only this one is ever
    /// shown next to an edge label.
    pub fn first_condition(&self) -> Option<&str> {
        self.conditions
            .first()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
    }
}

impl AsRef<DialogueEdge> for DialogueEdge {
    fn as_ref(&self) -> &DialogueEdge {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueGraph {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub nodes: Vec<DialogueNode>,
    #[serde(default, rename = "links")]
    pub edges: Vec<DialogueEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_node: Option<NodeId>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub conditions_in: Vec<String>,
}

impl DialogueGraph {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn add_node(&mut self, node: DialogueNode) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn add_edge(&mut self, edge: DialogueEdge) -> &mut Self {
        self.edges.push(edge);
        self
    }

    pub fn node(&self, id: &NodeId) -> Option<&DialogueNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn outgoing<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a DialogueEdge> + 'a {
        self.edges.iter().filter(move |e| &e.source == id)
    }

    pub fn is_entry(&self, id: &NodeId) -> bool {
        self.entry_node.as_ref() == Some(id)
    }

    /// Check referential integrity. Reports the first defect found, scanning
    /// nodes, then edges in declaration order, then the entry node.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut node_ids: HashSet<&NodeId> = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !node_ids.insert(&node.id) {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
        }

        let mut edge_ids: HashSet<&EdgeId> = HashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if !edge_ids.insert(&edge.id) {
                return Err(GraphError::DuplicateEdge(edge.id.clone()));
            }
            for (endpoint, node) in [
                (Endpoint::Source, &edge.source),
                (Endpoint::Target, &edge.target),
            ] {
                if !node_ids.contains(node) {
                    return Err(GraphError::DanglingEdge {
                        edge: edge.id.clone(),
                        endpoint,
                        node: node.clone(),
                    });
                }
            }
        }

        if let Some(entry) = &self.entry_node {
            if !node_ids.contains(entry) {
                return Err(GraphError::UnknownEntryNode(entry.clone()));
            }
        }

        Ok(())
    }
}
