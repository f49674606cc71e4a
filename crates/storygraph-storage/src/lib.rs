use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use storygraph_core::NodeId;
use thiserror::Error;
use tracing::warn;

mod debounce;
mod file;
mod memory;

pub use debounce::{DEFAULT_DEBOUNCE, DebouncedWriter};
pub use file::JsonFilePositions;
pub use memory::MemoryPositions;

/// Directory created under the platform data dir for saved layouts.
pub const APP_DIR_NAME: &str = "storygraph";
pub const POSITIONS_FILE_NAME: &str = "nodePositions.json";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid positions document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not find platform local data directory")]
    NoDataDir,
    #[error("Position writer has shut down")]
    WriterClosed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Saved node positions keyed by node id. Only rendering hints.
pub type NodePositions = BTreeMap<NodeId, Position>;

/// Where saved layouts live.
pub trait PositionRepository: Send + Sync {
    fn load(&self) -> Result<NodePositions, StorageError>;
    fn save(&self, positions: &NodePositions) -> Result<(), StorageError>;
}

impl<R: PositionRepository + ?Sized> PositionRepository for Arc<R> {
    fn load(&self) -> Result<NodePositions, StorageError> {
        (**self).load()
    }

    fn save(&self, positions: &NodePositions) -> Result<(), StorageError> {
        (**self).save(positions)
    }
}

impl<R: PositionRepository + ?Sized> PositionRepository for Box<R> {
    fn load(&self) -> Result<NodePositions, StorageError> {
        (**self).load()
    }

    fn save(&self, positions: &NodePositions) -> Result<(), StorageError> {
        (**self).save(positions)
    }
}

/// Load saved positions, treating an unreadable store as empty.
pub fn load_or_default(repo: &dyn PositionRepository) -> NodePositions {
    match repo.load() {
        Ok(positions) => positions,
        Err(err) => {
            warn!("Failed to load saved node positions: {}", err);
            NodePositions::new()
        }
    }
}

#[cfg(test)]
mod tests;
