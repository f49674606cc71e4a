use crate::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which end of an edge failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endpoint {
    Source,
    Target,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Source => write!(f, "source"),
            Endpoint::Target => write!(f, "target"),
        }
    }
}

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Failed to parse dialogue document: {0}")]
    Parse(String),
    #[error("Failed to read dialogue document: {0}")]
    Io(#[from] std::io::Error),
    #[error("Edge {edge} has {endpoint} {node} which is not a node of this graph")]
    DanglingEdge {
        edge: EdgeId,
        endpoint: Endpoint,
        node: NodeId,
    },
    #[error("Duplicate node id: {0}")]
    DuplicateNode(NodeId),
    #[error("Duplicate edge id: {0}")]
    DuplicateEdge(EdgeId),
    #[error("Entry node {0} is not a node of this graph")]
    UnknownEntryNode(NodeId),
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Parse(err.to_string())
    }
}
