/// User endpoints
///
/// # Endpoints
///
/// - `GET /user/` - List users
/// - `GET /user/:id` - Get user
/// - `GET /user/:id/tasks` - List the user's tasks
/// - `POST /user/create` - Create user
/// - `PUT /user/update/:id` - Update user
/// - `DELETE /user/delete/:id` - Delete user and its tasks

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::TransactionAck,
    session::DbSession,
};
use axum::{
    extract::Path,
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use taskmanager_shared::models::{
    task::Task,
    user::{CreateUser, UpdateUser, User},
};
use validator::Validate;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", get(all_users))
        .route("/user/", get(all_users))
        .route("/user/create", post(create_user))
        .route("/user/update/:user_id", put(update_user))
        .route("/user/delete/:user_id", delete(delete_user))
        .route("/user/:user_id", get(user_by_id))
        .route("/user/:user_id/tasks", get(tasks_by_user_id))
}

/// List all users
///
/// # Endpoint
///
/// ```text
/// GET /user/
/// ```
pub async fn all_users(mut db: DbSession) -> ApiResult<Json<Vec<User>>> {
    let users = User::list(&mut db).await?;
    Ok(Json(users))
}

/// Get one user
///
/// # Errors
///
/// - `404 Not Found`: no user with this ID
pub async fn user_by_id(
    Path(user_id): Path<i64>,
    mut db: DbSession,
) -> ApiResult<Json<User>> {
    let user = User::find_by_id(&mut db, user_id)
        .await?
        .ok_or_else(ApiError::user_not_found)?;

    Ok(Json(user))
}

/// Create a user
///
/// # Endpoint
///
/// ```text
/// POST /user/create
/// Content-Type: application/json
///
/// {
///   "username": "Jöhn Doe",
///   "firstname": "John",
///   "lastname": "Doe",
///   "age": 30
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "status_code": 201, "transaction": "Successful" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: username already exists
/// - `422 Unprocessable Entity`: validation failed
pub async fn create_user(
    mut db: DbSession,
    Json(req): Json<CreateUser>,
) -> ApiResult<(StatusCode, Json<TransactionAck>)> {
    req.validate()?;

    if User::find_by_username(&mut db, &req.username).await?.is_some() {
        tracing::debug!(username = %req.username, "Rejected duplicate username");
        return Err(ApiError::username_taken());
    }

    // A concurrent insert of the same username still fails here, on the
    // unique index, and maps to the same error.
    User::create(&mut db, req).await?;

    let (status, ack) = TransactionAck::created();
    Ok((status, Json(ack)))
}

/// Update a user's names and age
///
/// `username` and `slug` never change.
///
/// # Errors
///
/// - `404 Not Found`: no user with this ID
/// - `422 Unprocessable Entity`: validation failed
pub async fn update_user(
    Path(user_id): Path<i64>,
    mut db: DbSession,
    Json(req): Json<UpdateUser>,
) -> ApiResult<Json<TransactionAck>> {
    req.validate()?;

    User::update(&mut db, user_id, req)
        .await?
        .ok_or_else(ApiError::user_not_found)?;

    Ok(Json(TransactionAck::updated("User update is successful!")))
}

/// Delete a user and every task it owns
///
/// # Response
///
/// `204 No Content`
///
/// # Errors
///
/// - `404 Not Found`: no user with this ID; nothing is deleted
pub async fn delete_user(Path(user_id): Path<i64>, mut db: DbSession) -> ApiResult<StatusCode> {
    User::delete_with_tasks(&mut db, user_id)
        .await?
        .ok_or_else(ApiError::user_not_found)?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the tasks owned by a user
///
/// An unknown user simply has no tasks.
pub async fn tasks_by_user_id(
    Path(user_id): Path<i64>,
    mut db: DbSession,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list_by_user(&mut db, user_id).await?;
    Ok(Json(tasks))
}
