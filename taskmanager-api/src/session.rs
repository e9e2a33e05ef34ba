/// Request-scoped database session
///
/// Handlers take a `DbSession` parameter instead of reaching into the pool.
/// The extractor checks one connection out of the pool before the handler
/// body runs; the connection goes back to the pool when the session is
/// dropped, whether the handler succeeded, failed or was cancelled.
///
/// # Example
///
/// ```no_run
/// use axum::Json;
/// use taskmanager_api::{error::ApiResult, session::DbSession};
/// use taskmanager_shared::models::user::User;
///
/// async fn all_users(mut db: DbSession) -> ApiResult<Json<Vec<User>>> {
///     Ok(Json(User::list(&mut db).await?))
/// }
/// ```

use crate::{app::AppState, error::ApiError};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sqlx::{pool::PoolConnection, Sqlite, SqliteConnection};
use std::ops::{Deref, DerefMut};

/// One pooled connection, held for the lifetime of a request
pub struct DbSession(PoolConnection<Sqlite>);

#[async_trait]
impl FromRequestParts<AppState> for DbSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let conn = state.db.acquire().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to acquire database session");
            ApiError::from(e)
        })?;

        Ok(DbSession(conn))
    }
}

impl Deref for DbSession {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
