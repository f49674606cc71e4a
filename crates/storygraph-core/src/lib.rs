use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod document;
pub mod error;
pub mod graph;

pub use error::GraphError;
pub use graph::{DialogueEdge, DialogueGraph, DialogueNode};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Kind of transition between two dialogue beats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Auto-advance to the next beat.
    Linear,
    /// Player-selectable option.
    Choice,
    /// Transition gated on game state.
    Conditional,
    /// Where a choice leads when its requirements are not met.
    Failure,
}

/// Error type for enum conversion failures
#[derive(Error, Debug, Clone)]
pub enum EnumConversionError {
    #[error("Invalid EdgeKind value: {0}")]
    InvalidEdgeKind(String),
}

impl EdgeKind {
    pub const ALL: [EdgeKind; 4] = [
        EdgeKind::Choice,
        EdgeKind::Conditional,
        EdgeKind::Failure,
        EdgeKind::Linear,
    ];

    /// Short tag used in renderer element data and stylesheet selectors.
    pub fn tag(self) -> &'static str {
        match self {
            EdgeKind::Linear => "flow",
            EdgeKind::Choice => "choice",
            EdgeKind::Conditional => "conditional",
            EdgeKind::Failure => "failure",
        }
    }

    /// Position of this kind among a node's outgoing edges.
    pub fn traversal_rank(self) -> u8 {
        match self {
            EdgeKind::Choice => 0,
            EdgeKind::Conditional => 1,
            EdgeKind::Failure => 2,
            EdgeKind::Linear => 3,
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl TryFrom<&str> for EdgeKind {
    type Error = EnumConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "linear" | "flow" => Ok(EdgeKind::Linear),
            "choice" => Ok(EdgeKind::Choice),
            "conditional" => Ok(EdgeKind::Conditional),
            "failure" | "fail" => Ok(EdgeKind::Failure),
            _ => Err(EnumConversionError::InvalidEdgeKind(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_kind_from_tag() {
        for kind in EdgeKind::ALL {
            assert_eq!(EdgeKind::try_from(kind.tag()).unwrap(), kind);
        }
        assert_eq!(EdgeKind::try_from("Choice").unwrap(), EdgeKind::Choice);
        assert!(EdgeKind::try_from("teleport").is_err());
    }

    #[test]
    fn test_traversal_rank_order() {
        let mut kinds = vec![
            EdgeKind::Linear,
            EdgeKind::Failure,
            EdgeKind::Choice,
            EdgeKind::Conditional,
        ];
        kinds.sort_by_key(|k| k.traversal_rank());
        assert_eq!(kinds, EdgeKind::ALL.to_vec());
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&NodeId::new("d1")).unwrap();
        assert_eq!(json, r#""d1""#);
        let id: EdgeId = serde_json::from_str(r#""link_1""#).unwrap();
        assert_eq!(id.as_str(), "link_1");
    }
}
