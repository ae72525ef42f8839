//! Task list filtering
//!
//! Equality criteria over status, priority, and assignee. Criteria compose
//! conjunctively; absent criteria impose no constraint.

use super::model::Task;

/// Optional equality constraints narrowing a list query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee_id: Option<i64>,
}

impl TaskFilter {
    /// Build a filter from raw query-string values.
    ///
    /// Empty strings are treated as absent. A non-integer `assignee_id` is
    /// treated as absent rather than rejected.
    pub fn from_raw(status: Option<String>, priority: Option<String>, assignee_id: Option<&str>) -> Self {
        Self {
            status: status.filter(|s| !s.is_empty()),
            priority: priority.filter(|p| !p.is_empty()),
            assignee_id: assignee_id.and_then(|raw| raw.parse().ok()),
        }
    }

    /// Whether a task satisfies every present criterion.
    ///
    /// Status and priority compare against the wire string, so an unknown
    /// value is a criterion that matches nothing.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = &self.status {
            if task.status.as_str() != status {
                return false;
            }
        }
        if let Some(priority) = &self.priority {
            if task.priority.as_str() != priority {
                return false;
            }
        }
        if let Some(assignee_id) = self.assignee_id {
            if task.assignee_id != Some(assignee_id) {
                return false;
            }
        }
        true
    }

    /// Keep the matching subsequence, preserving relative order.
    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        tasks.into_iter().filter(|task| self.matches(task)).collect()
    }
}
