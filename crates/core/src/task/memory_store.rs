//! In-memory task storage implementation
//!
//! Owns its sequence behind a lock; nothing is shared globally. Used by the
//! non-persisted service variant and by tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::model::Task;
use super::repository::TaskStore;
use crate::Result;

/// In-memory task store
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl MemoryTaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an initial sequence
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks),
        }
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn load(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.read().await.clone())
    }

    async fn save(&self, tasks: &[Task]) -> Result<()> {
        *self.tasks.write().await = tasks.to_vec();
        Ok(())
    }
}
