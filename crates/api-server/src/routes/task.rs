//! Task API endpoints
//!
//! RESTful API for task queries and CRUD operations.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tb_core::task::{PageMeta, PageParams, Task, TaskFilter, ValidationErrors};
use tb_core::Error as CoreError;

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub assignee_id: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub offset: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub tasks: Vec<Task>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
    pub filters_applied: FiltersApplied,
}

#[derive(Debug, Serialize)]
pub struct PaginationInfo {
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

impl From<PageMeta> for PaginationInfo {
    fn from(meta: PageMeta) -> Self {
        Self {
            limit: meta.limit,
            offset: meta.offset,
            has_more: meta.has_more,
        }
    }
}

/// Effective criteria echoed back to the client; absent ones are null
#[derive(Debug, Serialize)]
pub struct FiltersApplied {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee_id: Option<i64>,
}

impl From<TaskFilter> for FiltersApplied {
    fn from(filter: TaskFilter) -> Self {
        Self {
            status: filter.status,
            priority: filter.priority,
            assignee_id: filter.assignee_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<ValidationErrors>,
}

type ErrorReply = (StatusCode, Json<ErrorBody>);

fn error_reply(err: CoreError) -> ErrorReply {
    match err {
        CoreError::TaskNotFound(_) => not_found_reply(),
        CoreError::MalformedBody => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: err.to_string(),
                fields: None,
            }),
        ),
        CoreError::Validation(fields) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "Validation failed".to_string(),
                fields: Some(fields),
            }),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: other.to_string(),
                fields: None,
            }),
        ),
    }
}

fn not_found_reply() -> ErrorReply {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Task not found".to_string(),
            fields: None,
        }),
    )
}

// Body extraction failures are deferred into the service as a null body so
// the not-found check still runs first on id-addressed routes.
fn body_or_null(payload: Result<Json<Value>, JsonRejection>) -> Value {
    payload.map(|Json(value)| value).unwrap_or(Value::Null)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /tasks - List tasks with optional filtering and pagination
async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, ErrorReply> {
    let filter = TaskFilter::from_raw(query.status, query.priority, query.assignee_id.as_deref());
    let page = state
        .paginate()
        .then(|| PageParams::from_raw(query.limit.as_deref(), query.offset.as_deref()));

    let result = state.service().list(&filter, page).await.map_err(error_reply)?;

    Ok(Json(ListResponse {
        count: result.tasks.len(),
        total_count: result.page.map(|meta| meta.total_count),
        pagination: result.page.map(PaginationInfo::from),
        tasks: result.tasks,
        filters_applied: filter.into(),
    }))
}

/// POST /tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ErrorReply> {
    let task = state
        .service()
        .create(body_or_null(payload))
        .await
        .map_err(error_reply)?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /tasks/{id} - Update a task
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Task>, ErrorReply> {
    let id: u64 = id.parse().map_err(|_| not_found_reply())?;

    let task = state
        .service()
        .update(id, body_or_null(payload))
        .await
        .map_err(error_reply)?;

    Ok(Json(task))
}

/// DELETE /tasks/{id} - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ErrorReply> {
    let id: u64 = id.parse().map_err(|_| not_found_reply())?;

    state.service().delete(id).await.map_err(error_reply)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
}
