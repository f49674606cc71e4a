use indexmap::IndexMap;
use storygraph_core::{DialogueEdge, NodeId};

/// Ordered (source, target) pair. A→B and B→A are different keys.
pub type EdgeKey = (NodeId, NodeId);

/// Edges bucketed by directed endpoint pair.
///
/// Buckets appear in the order their first edge was seen and hold indices
/// into the grouped slice, in input order. A bucket is never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeGroups {
    groups: IndexMap<EdgeKey, Vec<usize>>,
}

impl EdgeGroups {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, source: &NodeId, target: &NodeId) -> Option<&[usize]> {
        self.groups
            .get(&(source.clone(), target.clone()))
            .map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EdgeKey, &[usize])> {
        self.groups.iter().map(|(key, members)| (key, members.as_slice()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeGrouper;

impl EdgeGrouper {
    pub fn new() -> Self {
        Self
    }

    pub fn group<E>(&self, edges: &[E]) -> EdgeGroups
    where
        E: AsRef<DialogueEdge>,
    {
        let mut groups: IndexMap<EdgeKey, Vec<usize>> = IndexMap::new();
        for (index, edge) in edges.iter().enumerate() {
            let edge = edge.as_ref();
            groups
                .entry((edge.source.clone(), edge.target.clone()))
                .or_default()
                .push(index);
        }
        EdgeGroups { groups }
    }
}
