//! Handlers for the task queue: enqueue, list, fetch.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use courier_core::error::CoreError;
use courier_core::types::DbId;
use courier_db::models::status::TaskStatus;
use courier_db::models::task::{CreateTask, TaskListQuery};
use courier_db::repositories::TaskRepo;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request body for POST /tasks.
#[derive(Debug, Deserialize)]
pub struct EnqueueTaskRequest {
    #[serde(rename = "type")]
    pub task_type: String,
    /// Any JSON value; stored as its serialized text.
    #[serde(default)]
    pub payload: Value,
}

/// Query parameters for GET /tasks.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksParams {
    /// Status name, e.g. `pending`.
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/tasks
pub async fn enqueue_task(
    State(state): State<AppState>,
    AppJson(body): AppJson<EnqueueTaskRequest>,
) -> AppResult<impl IntoResponse> {
    let task_type = body.task_type.trim();
    if task_type.is_empty() {
        return Err(AppError::BadRequest("Task type must not be empty".into()));
    }

    let payload = serde_json::to_string(&body.payload)
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    let task = TaskRepo::enqueue(
        &state.pool,
        &CreateTask {
            task_type: task_type.to_string(),
            payload,
        },
    )
    .await?;

    tracing::info!(task_id = task.id, task_type = %task.task_type, "Task enqueued");
    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// GET /api/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListTasksParams>,
) -> AppResult<impl IntoResponse> {
    let status_id = match params.status.as_deref() {
        Some(name) => Some(
            TaskStatus::from_name(name)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown task status: {name}")))?
                .id(),
        ),
        None => None,
    };

    let query = TaskListQuery {
        status_id,
        limit: params.limit,
        offset: params.offset,
    };
    let tasks = TaskRepo::list(&state.pool, &query).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Task", id })?;
    Ok(Json(DataResponse { data: task }))
}
