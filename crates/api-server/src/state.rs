//! Application state

use std::path::PathBuf;
use std::sync::Arc;

use tb_core::task::{
    FileTaskStore, MemoryTaskStore, Task, TaskPriority, TaskService, TaskStatus,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    service: TaskService,
    paginate: bool,
}

impl AppState {
    /// File-backed state rooted at the given data directory
    pub fn new(data_dir: PathBuf) -> Self {
        let store = Arc::new(FileTaskStore::new(data_dir.join("tasks.json")));
        Self::with_service(TaskService::new(store), true)
    }

    /// In-memory state seeded with the given tasks
    pub fn in_memory(seed: Vec<Task>) -> Self {
        let store = Arc::new(MemoryTaskStore::with_tasks(seed));
        Self::with_service(TaskService::new(store), true)
    }

    /// Wrap an explicitly configured service.
    ///
    /// `paginate` selects whether list responses carry pagination metadata
    /// or the full filtered set.
    pub fn with_service(service: TaskService, paginate: bool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { service, paginate }),
        }
    }

    /// Get reference to the task service
    pub fn service(&self) -> &TaskService {
        &self.inner.service
    }

    /// Whether list responses are paginated
    pub fn paginate(&self) -> bool {
        self.inner.paginate
    }
}

/// The five reference sample tasks used by the in-memory variant
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new(1, "Task 1")
            .with_status(TaskStatus::Pending)
            .with_priority(TaskPriority::High)
            .with_assignee(1),
        Task::new(2, "Task 2")
            .with_status(TaskStatus::Completed)
            .with_priority(TaskPriority::Medium)
            .with_assignee(2),
        Task::new(3, "Task 3")
            .with_status(TaskStatus::InProgress)
            .with_priority(TaskPriority::Low)
            .with_assignee(1),
        Task::new(4, "Task 4")
            .with_status(TaskStatus::Pending)
            .with_priority(TaskPriority::High)
            .with_assignee(3),
        Task::new(5, "Task 5")
            .with_status(TaskStatus::Completed)
            .with_priority(TaskPriority::Low)
            .with_assignee(2),
    ]
}
