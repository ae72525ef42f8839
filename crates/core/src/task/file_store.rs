//! File-based task storage implementation
//!
//! Stores the task sequence as a JSON array in a file on disk. Every load
//! reads the file fresh; every save rewrites it in full. A missing file is
//! equivalent to an empty sequence.

use async_trait::async_trait;
use std::path::PathBuf;

use super::model::Task;
use super::repository::TaskStore;
use crate::Result;

/// File-backed task store using a single JSON array
pub struct FileTaskStore {
    path: PathBuf,
}

impl FileTaskStore {
    /// Create a store backed by the given path.
    ///
    /// The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TaskStore for FileTaskStore {
    async fn load(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            tracing::debug!("task file {:?} does not exist yet, starting empty", self.path);
            return Ok(Vec::new());
        }
        let content = tokio::fs::read_to_string(&self.path).await?;
        let tasks: Vec<Task> = serde_json::from_str(&content)?;
        Ok(tasks)
    }

    async fn save(&self, tasks: &[Task]) -> Result<()> {
        let content = serde_json::to_string_pretty(tasks)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}
