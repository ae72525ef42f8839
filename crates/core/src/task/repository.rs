//! Task storage trait
//!
//! Defines the interface the service uses to load and persist the task
//! sequence. Each request works on a full snapshot; `save` replaces the
//! persisted sequence wholesale.

use async_trait::async_trait;

use super::model::Task;
use crate::Result;

/// Storage interface for the authoritative task sequence
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Load the full task sequence, in stored order
    async fn load(&self) -> Result<Vec<Task>>;

    /// Replace the persisted sequence
    async fn save(&self, tasks: &[Task]) -> Result<()>;
}
