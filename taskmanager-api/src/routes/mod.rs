/// API route handlers
///
/// - `health`: liveness and database probe
/// - `users`: user CRUD and the per-user task listing
/// - `tasks`: task CRUD

pub mod health;
pub mod tasks;
pub mod users;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Acknowledgment returned by create and update endpoints
///
/// ```json
/// { "status_code": 201, "transaction": "Successful" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionAck {
    /// Mirrors the HTTP status of the response
    pub status_code: u16,

    pub transaction: String,
}

impl TransactionAck {
    pub fn created() -> (StatusCode, Self) {
        (
            StatusCode::CREATED,
            Self {
                status_code: StatusCode::CREATED.as_u16(),
                transaction: "Successful".to_string(),
            },
        )
    }

    pub fn updated(message: &str) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            transaction: message.to_string(),
        }
    }
}
