//! Task field validation
//!
//! Validates candidate task records (arbitrary JSON objects) against the
//! field rules. Every field is checked independently so a rejection carries
//! one error per failing field, never just the first.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::model::{Task, TaskPriority, TaskStatus};

/// Field name -> human-readable error message
pub type ValidationErrors = BTreeMap<String, String>;

/// Which rule set a service enforces on write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationProfile {
    /// Full field rules: presence, type, length, and enum membership
    #[default]
    StrictRules,
    /// Presence of the four required fields only
    PresenceOnly,
}

const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 500;

fn missing(field: &str) -> String {
    format!("Missing required field: {}", field)
}

fn enum_values(values: &[&str]) -> String {
    values.join(", ")
}

/// Validate a candidate record under the given profile.
///
/// Per-field precedence: missing > wrong-type > length/enum; exactly one
/// error is recorded per failing field.
pub fn validate(candidate: &Map<String, Value>, profile: ValidationProfile) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    match candidate.get("title") {
        None => {
            errors.insert("title".into(), missing("title"));
        }
        Some(value) if profile == ValidationProfile::StrictRules => match value.as_str() {
            None => {
                errors.insert("title".into(), "Title must be a string".into());
            }
            Some(title) => {
                let len = title.chars().count();
                if !(TITLE_MIN..=TITLE_MAX).contains(&len) {
                    errors.insert(
                        "title".into(),
                        format!("Title must be between {} and {} characters", TITLE_MIN, TITLE_MAX),
                    );
                }
            }
        },
        Some(_) => {}
    }

    match candidate.get("description") {
        None => {
            errors.insert("description".into(), missing("description"));
        }
        Some(value) if profile == ValidationProfile::StrictRules => match value.as_str() {
            None => {
                errors.insert("description".into(), "Description must be a string".into());
            }
            Some(description) => {
                if description.chars().count() > DESCRIPTION_MAX {
                    errors.insert(
                        "description".into(),
                        format!("Description must be at most {} characters", DESCRIPTION_MAX),
                    );
                }
            }
        },
        Some(_) => {}
    }

    match candidate.get("status") {
        None => {
            errors.insert("status".into(), missing("status"));
        }
        Some(value) if profile == ValidationProfile::StrictRules => {
            let known = value.as_str().and_then(TaskStatus::parse);
            if known.is_none() {
                errors.insert("status".into(), invalid_status_message());
            }
        }
        Some(_) => {}
    }

    match candidate.get("priority") {
        None => {
            errors.insert("priority".into(), missing("priority"));
        }
        Some(value) if profile == ValidationProfile::StrictRules => {
            let known = value.as_str().and_then(TaskPriority::parse);
            if known.is_none() {
                errors.insert("priority".into(), invalid_priority_message());
            }
        }
        Some(_) => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn invalid_status_message() -> String {
    let values: Vec<&str> = TaskStatus::ALL.iter().map(|s| s.as_str()).collect();
    format!("Invalid status. Must be one of: {}", enum_values(&values))
}

fn invalid_priority_message() -> String {
    let values: Vec<&str> = TaskPriority::ALL.iter().map(|p| p.as_str()).collect();
    format!("Invalid priority. Must be one of: {}", enum_values(&values))
}

/// Build a typed [`Task`] from an accepted candidate.
///
/// Under the strict profile the rule checks already guarantee this succeeds.
/// Under presence-only, values the typed model cannot represent (a numeric
/// title, an unknown status string) are reported with the same per-field
/// messages as the strict rules.
pub fn task_from_candidate(id: u64, candidate: &Map<String, Value>) -> Result<Task, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = match candidate.get("title").and_then(Value::as_str) {
        Some(title) => title.to_string(),
        None => {
            errors.insert("title".into(), "Title must be a string".into());
            String::new()
        }
    };

    let description = match candidate.get("description").and_then(Value::as_str) {
        Some(description) => description.to_string(),
        None => {
            errors.insert("description".into(), "Description must be a string".into());
            String::new()
        }
    };

    let status = match candidate.get("status").and_then(Value::as_str).and_then(TaskStatus::parse) {
        Some(status) => status,
        None => {
            errors.insert("status".into(), invalid_status_message());
            TaskStatus::default()
        }
    };

    let priority = match candidate
        .get("priority")
        .and_then(Value::as_str)
        .and_then(TaskPriority::parse)
    {
        Some(priority) => priority,
        None => {
            errors.insert("priority".into(), invalid_priority_message());
            TaskPriority::default()
        }
    };

    let assignee_id = candidate.get("assignee_id").and_then(Value::as_i64);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Task {
        id,
        title,
        description,
        status,
        priority,
        assignee_id,
    })
}
