use crate::{NodePositions, PositionRepository, StorageError};
use parking_lot::RwLock;
use std::sync::Arc;

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryPositions {
    inner: Arc<RwLock<NodePositions>>,
}

impl MemoryPositions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_positions(positions: NodePositions) -> Self {
        Self {
            inner: Arc::new(RwLock::new(positions)),
        }
    }

    pub fn snapshot(&self) -> NodePositions {
        self.inner.read().clone()
    }
}

impl PositionRepository for MemoryPositions {
    fn load(&self) -> Result<NodePositions, StorageError> {
        Ok(self.snapshot())
    }

    fn save(&self, positions: &NodePositions) -> Result<(), StorageError> {
        *self.inner.write() = positions.clone();
        Ok(())
    }
}
