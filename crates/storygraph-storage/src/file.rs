use crate::{APP_DIR_NAME, NodePositions, POSITIONS_FILE_NAME, PositionRepository, StorageError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Positions stored as a single JSON object `{ "<node id>": { "x": .., "y": .. } }`.
#[derive(Debug, Clone)]
pub struct JsonFilePositions {
    path: PathBuf,
}

impl JsonFilePositions {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `<data_local_dir>/storygraph/nodePositions.json`.
    pub fn default_location() -> Result<PathBuf, StorageError> {
        let mut base = dirs::data_local_dir().ok_or(StorageError::NoDataDir)?;
        base.push(APP_DIR_NAME);
        base.push(POSITIONS_FILE_NAME);
        Ok(base)
    }

    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::new(Self::default_location()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PositionRepository for JsonFilePositions {
    fn load(&self) -> Result<NodePositions, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            // First run: nothing saved yet.
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(NodePositions::new());
            }
            Err(err) => return Err(err.into()),
        };

        if content.trim().is_empty() {
            return Ok(NodePositions::new());
        }

        let positions: NodePositions = serde_json::from_str(&content)?;
        debug!(
            "Loaded {} node positions from {:?}",
            positions.len(),
            self.path
        );
        Ok(positions)
    }

    fn save(&self, positions: &NodePositions) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(positions)?;
        fs::write(&self.path, content)?;
        debug!("Saved {} node positions to {:?}", positions.len(), self.path);
        Ok(())
    }
}
