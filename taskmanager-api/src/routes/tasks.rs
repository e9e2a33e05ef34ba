/// Task endpoints
///
/// # Endpoints
///
/// - `GET /task/` - List tasks
/// - `GET /task/:id` - Get task
/// - `POST /task/create?user_id=` - Create task for a user
/// - `PUT /task/update/:id` - Update task
/// - `DELETE /task/delete/:id` - Delete task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::TransactionAck,
    session::DbSession,
};
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use taskmanager_shared::models::{
    task::{CreateTask, Task, UpdateTask},
    user::User,
};
use validator::Validate;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/task", get(all_tasks))
        .route("/task/", get(all_tasks))
        .route("/task/create", post(create_task))
        .route("/task/update/:task_id", put(update_task))
        .route("/task/delete/:task_id", delete(delete_task))
        .route("/task/:task_id", get(task_by_id))
}

/// Query string of `POST /task/create`
#[derive(Debug, Deserialize)]
pub struct CreateTaskParams {
    /// Owner of the new task
    pub user_id: i64,
}

pub async fn all_tasks(mut db: DbSession) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list(&mut db).await?;
    Ok(Json(tasks))
}

/// Get one task
///
/// # Errors
///
/// - `404 Not Found`: no task with this ID
pub async fn task_by_id(
    Path(task_id): Path<i64>,
    mut db: DbSession,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id(&mut db, task_id)
        .await?
        .ok_or_else(ApiError::task_not_found)?;

    Ok(Json(task))
}

/// Create a task owned by `user_id`
///
/// # Endpoint
///
/// ```text
/// POST /task/create?user_id=1
/// Content-Type: application/json
///
/// {
///   "title": "Write report",
///   "content": "Quarterly numbers",
///   "priority": 2
/// }
/// ```
///
/// The task starts out not completed.
///
/// # Errors
///
/// - `404 Not Found`: no user with this ID; no task is created
/// - `422 Unprocessable Entity`: validation failed
pub async fn create_task(
    Query(params): Query<CreateTaskParams>,
    mut db: DbSession,
    Json(req): Json<CreateTask>,
) -> ApiResult<(StatusCode, Json<TransactionAck>)> {
    req.validate()?;

    if !User::exists(&mut db, params.user_id).await? {
        return Err(ApiError::user_not_found());
    }

    Task::create(&mut db, params.user_id, req).await?;

    let (status, ack) = TransactionAck::created();
    Ok((status, Json(ack)))
}

/// Update a task
///
/// # Errors
///
/// - `404 Not Found`: no task with this ID
/// - `422 Unprocessable Entity`: validation failed
pub async fn update_task(
    Path(task_id): Path<i64>,
    mut db: DbSession,
    Json(req): Json<UpdateTask>,
) -> ApiResult<Json<TransactionAck>> {
    req.validate()?;

    Task::update(&mut db, task_id, req)
        .await?
        .ok_or_else(ApiError::task_not_found)?;

    Ok(Json(TransactionAck::updated("Task update is successful!")))
}

/// Delete a task
///
/// # Errors
///
/// - `404 Not Found`: no task with this ID
pub async fn delete_task(Path(task_id): Path<i64>, mut db: DbSession) -> ApiResult<StatusCode> {
    if !Task::delete(&mut db, task_id).await? {
        return Err(ApiError::task_not_found());
    }

    Ok(StatusCode::NO_CONTENT)
}
