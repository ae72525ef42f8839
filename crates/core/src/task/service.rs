//! Task service
//!
//! Orchestrates validation, filtering, and pagination over records obtained
//! from a [`TaskStore`]. Each operation is a self-contained transaction over
//! a loaded snapshot; mutations call `save` exactly once on success and
//! never on failure.

use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::Mutex;

use super::model::Task;
use super::paginate::{paginate, PageMeta, PageParams};
use super::query::TaskFilter;
use super::repository::TaskStore;
use super::validate::{task_from_candidate, validate, ValidationProfile};
use crate::{Error, Result};

/// Result of a list query
#[derive(Debug, Clone)]
pub struct ListResult {
    pub tasks: Vec<Task>,
    pub total_count: usize,
    /// Present in the paginating configuration only
    pub page: Option<PageMeta>,
}

/// Task CRUD and query service
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    profile: ValidationProfile,
    /// Serializes the load -> mutate -> save window of each mutation.
    /// The store itself is last-writer-wins; this is the single-writer
    /// serialization point.
    write_lock: Mutex<()>,
}

impl TaskService {
    /// Create a service enforcing the strict rule profile
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self::with_profile(store, ValidationProfile::StrictRules)
    }

    /// Create a service with an explicit validation profile
    pub fn with_profile(store: Arc<dyn TaskStore>, profile: ValidationProfile) -> Self {
        Self {
            store,
            profile,
            write_lock: Mutex::new(()),
        }
    }

    /// List tasks matching `filter`, paginated when `page` is supplied.
    ///
    /// `total_count` is the filtered length before any slicing. Never
    /// mutates the store.
    pub async fn list(&self, filter: &TaskFilter, page: Option<PageParams>) -> Result<ListResult> {
        let tasks = self.store.load().await?;
        let filtered = filter.apply(tasks);
        let total_count = filtered.len();

        match page {
            Some(params) => {
                let (tasks, meta) = paginate(filtered, params);
                Ok(ListResult {
                    tasks,
                    total_count: meta.total_count,
                    page: Some(meta),
                })
            }
            None => Ok(ListResult {
                tasks: filtered,
                total_count,
                page: None,
            }),
        }
    }

    /// Create a task from a request body.
    ///
    /// The body must be a JSON object; validation runs on the full candidate
    /// and the new id is `max existing id + 1` (1 for an empty store).
    pub async fn create(&self, body: Value) -> Result<Task> {
        let mut candidate = into_object(body)?;

        if self.profile == ValidationProfile::PresenceOnly && !candidate.contains_key("description") {
            candidate.insert("description".into(), Value::String(String::new()));
        }

        let _guard = self.write_lock.lock().await;
        let mut tasks = self.store.load().await?;

        validate(&candidate, self.profile).map_err(Error::Validation)?;

        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let task = task_from_candidate(next_id, &candidate).map_err(Error::Validation)?;

        tasks.push(task.clone());
        self.store.save(&tasks).await?;
        tracing::debug!(id = task.id, "task created");
        Ok(task)
    }

    /// Merge a patch over an existing task and re-validate the whole.
    ///
    /// The stored record is untouched unless the merged result is accepted.
    /// An `id` key in the patch is ignored.
    pub async fn update(&self, id: u64, body: Value) -> Result<Task> {
        let _guard = self.write_lock.lock().await;
        let mut tasks = self.store.load().await?;

        let index = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::TaskNotFound(id))?;

        let patch = into_object(body)?;
        let mut merged = into_object(serde_json::to_value(&tasks[index])?)?;
        for (key, value) in patch {
            if key != "id" {
                merged.insert(key, value);
            }
        }

        validate(&merged, self.profile).map_err(Error::Validation)?;
        let updated = task_from_candidate(id, &merged).map_err(Error::Validation)?;

        tasks[index] = updated.clone();
        self.store.save(&tasks).await?;
        tracing::debug!(id, "task updated");
        Ok(updated)
    }

    /// Remove a task, preserving the relative order of survivors.
    pub async fn delete(&self, id: u64) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut tasks = self.store.load().await?;

        let index = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::TaskNotFound(id))?;

        tasks.remove(index);
        self.store.save(&tasks).await?;
        tracing::debug!(id, "task deleted");
        Ok(())
    }
}

fn into_object(body: Value) -> Result<Map<String, Value>> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(Error::MalformedBody),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::memory_store::MemoryTaskStore;
    use crate::task::model::{TaskPriority, TaskStatus};
    use serde_json::json;

    fn service_with(tasks: Vec<Task>) -> (TaskService, Arc<MemoryTaskStore>) {
        let store = Arc::new(MemoryTaskStore::with_tasks(tasks));
        (TaskService::new(Arc::clone(&store) as Arc<dyn TaskStore>), store)
    }

    fn valid_body(title: &str) -> Value {
        json!({
            "title": title,
            "description": "Desc",
            "status": "pending",
            "priority": "high",
        })
    }

    #[tokio::test]
    async fn create_assigns_one_on_empty_store() {
        let (service, _) = service_with(Vec::new());
        let task = service.create(valid_body("First task")).await.unwrap();
        assert_eq!(task.id, 1);
    }

    #[tokio::test]
    async fn create_assigns_max_plus_one() {
        let (service, _) = service_with(vec![Task::new(3, "Task 3"), Task::new(7, "Task 7")]);
        let task = service.create(valid_body("New task")).await.unwrap();
        assert_eq!(task.id, 8);
    }

    #[tokio::test]
    async fn create_reuses_id_after_deleting_the_max() {
        let (service, _) = service_with(vec![Task::new(1, "Task 1"), Task::new(2, "Task 2")]);
        service.delete(2).await.unwrap();

        // max is recomputed each time, so the freed id comes back
        let task = service.create(valid_body("Replacement")).await.unwrap();
        assert_eq!(task.id, 2);
    }

    #[tokio::test]
    async fn create_rejects_invalid_candidate_without_saving() {
        let (service, store) = service_with(Vec::new());
        let result = service.create(json!({"title": "ab"})).await;

        match result.unwrap_err() {
            Error::Validation(errors) => {
                assert_eq!(errors.len(), 4);
                assert!(errors.contains_key("title"));
            }
            e => panic!("expected Validation error, got: {:?}", e),
        }
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_non_object_body() {
        let (service, _) = service_with(Vec::new());
        for body in [json!([1, 2]), json!("task"), json!(5), Value::Null] {
            match service.create(body).await.unwrap_err() {
                Error::MalformedBody => {}
                e => panic!("expected MalformedBody, got: {:?}", e),
            }
        }
    }

    #[tokio::test]
    async fn presence_only_defaults_description_and_skips_rules() {
        let store = Arc::new(MemoryTaskStore::new());
        let service = TaskService::with_profile(
            Arc::clone(&store) as Arc<dyn TaskStore>,
            ValidationProfile::PresenceOnly,
        );

        let task = service
            .create(json!({"title": "ab", "status": "pending", "priority": "low"}))
            .await
            .unwrap();
        assert_eq!(task.title, "ab");
        assert_eq!(task.description, "");
    }

    #[tokio::test]
    async fn update_merges_patch_over_existing() {
        let seed = Task::new(1, "Original title")
            .with_description("Original description")
            .with_assignee(2);
        let (service, store) = service_with(vec![seed]);

        let updated = service.update(1, json!({"priority": "high"})).await.unwrap();
        assert_eq!(updated.title, "Original title");
        assert_eq!(updated.priority, TaskPriority::High);
        assert_eq!(updated.assignee_id, Some(2));

        let stored = store.load().await.unwrap();
        assert_eq!(stored[0], updated);
    }

    #[tokio::test]
    async fn update_rejection_leaves_store_unchanged() {
        let seed = Task::new(1, "Original title").with_priority(TaskPriority::Low);
        let (service, store) = service_with(vec![seed.clone()]);

        let result = service.update(1, json!({"priority": "WRONG"})).await;
        match result.unwrap_err() {
            Error::Validation(errors) => {
                assert_eq!(errors["priority"], "Invalid priority. Must be one of: low, medium, high");
            }
            e => panic!("expected Validation error, got: {:?}", e),
        }

        assert_eq!(store.load().await.unwrap(), vec![seed]);
    }

    #[tokio::test]
    async fn update_ignores_id_in_patch() {
        let (service, _) = service_with(vec![Task::new(1, "Original title")]);
        let updated = service.update(1, json!({"id": 99, "title": "New title"})).await.unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.title, "New title");
    }

    #[tokio::test]
    async fn update_missing_task_is_not_found() {
        let (service, _) = service_with(Vec::new());
        match service.update(42, json!({"title": "abc"})).await.unwrap_err() {
            Error::TaskNotFound(42) => {}
            e => panic!("expected TaskNotFound, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn not_found_takes_precedence_over_malformed_body() {
        let (service, _) = service_with(Vec::new());
        match service.update(42, Value::Null).await.unwrap_err() {
            Error::TaskNotFound(42) => {}
            e => panic!("expected TaskNotFound, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn delete_preserves_survivor_order() {
        let (service, store) = service_with(vec![
            Task::new(1, "Task 1"),
            Task::new(2, "Task 2"),
            Task::new(3, "Task 3"),
        ]);

        service.delete(2).await.unwrap();
        let ids: Vec<u64> = store.load().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn delete_missing_task_is_not_found() {
        let (service, _) = service_with(vec![Task::new(1, "Task 1")]);
        service.delete(1).await.unwrap();
        match service.delete(1).await.unwrap_err() {
            Error::TaskNotFound(1) => {}
            e => panic!("expected TaskNotFound, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn list_filters_and_paginates() {
        let (service, _) = service_with(vec![
            Task::new(1, "Task 1").with_status(TaskStatus::Pending),
            Task::new(2, "Task 2").with_status(TaskStatus::Completed),
            Task::new(3, "Task 3").with_status(TaskStatus::Pending),
            Task::new(4, "Task 4").with_status(TaskStatus::Pending),
        ]);

        let filter = TaskFilter::from_raw(Some("pending".into()), None, None);
        let result = service
            .list(&filter, Some(PageParams { limit: 2, offset: 0 }))
            .await
            .unwrap();

        assert_eq!(result.tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(result.total_count, 3);
        let meta = result.page.unwrap();
        assert_eq!(meta.limit, 2);
        assert!(meta.has_more);
    }

    #[tokio::test]
    async fn list_without_pagination_returns_full_filtered_set() {
        let (service, _) = service_with(vec![
            Task::new(1, "Task 1").with_priority(TaskPriority::High),
            Task::new(2, "Task 2").with_priority(TaskPriority::Low),
        ]);

        let filter = TaskFilter::from_raw(None, Some("high".into()), None);
        let result = service.list(&filter, None).await.unwrap();

        assert_eq!(result.tasks.len(), 1);
        assert_eq!(result.total_count, 1);
        assert!(result.page.is_none());
    }
}
