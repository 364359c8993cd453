use crate::domain::Task;
use crate::persistence::atomic_write;
use std::path::PathBuf;
use thiserror::Error;

/// Errors at the snapshot boundary. These degrade durability only; the
/// in-memory collection stays the source of truth.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access task snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("task snapshot is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to write task snapshot: {0}")]
    Write(String),
}

/// Where the task collection is persisted and loaded from.
///
/// Every mutating operation hands the full resulting collection to
/// `persist` after the local state has already changed; a remote
/// document store plugs in behind this same trait.
pub trait TaskStore {
    fn load_initial(&self) -> Result<Vec<Task>, StoreError>;
    fn persist(&self, tasks: &[Task]) -> Result<(), StoreError>;
}

/// JSON snapshot on disk, written atomically.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TaskStore for JsonStore {
    fn load_initial(&self) -> Result<Vec<Task>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn persist(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(tasks)?;
        atomic_write(&self.path, &json).map_err(|e| StoreError::Write(e.to_string()))
    }
}
