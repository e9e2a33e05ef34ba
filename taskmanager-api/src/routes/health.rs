/// Health check endpoint
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "pool": { "active": 0, "idle": 1, "total": 1 }
/// }
/// ```
///
/// Always answers `200 OK`; a failed database probe reports `"degraded"`.

use crate::app::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use taskmanager_shared::db::pool::{get_pool_stats, health_check};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,

    pub pool: PoolStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PoolStatus {
    pub active: usize,
    pub idle: usize,
    pub total: usize,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Health check handler
///
/// Probes the pool directly rather than through a request session.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = match health_check(&state.db).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    let stats = get_pool_stats(&state.db);

    Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        pool: PoolStatus {
            active: stats.active_connections,
            idle: stats.idle_connections,
            total: stats.total_connections,
        },
    })
}
