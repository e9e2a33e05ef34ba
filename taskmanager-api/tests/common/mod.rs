//! Common test utilities for integration tests
//!
//! Every `TestContext` owns a private in-memory database with the schema
//! applied and a router built over it.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use taskmanager_api::app::{build_router, AppState};
use taskmanager_api::config::Config;
use taskmanager_shared::db::migrations::run_migrations;
use taskmanager_shared::db::pool::{create_pool, DatabaseConfig};
use tower::Service as _;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context over a fresh database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("sqlite::memory:".to_string()),
            _ => None,
        })?;

        let db = create_pool(DatabaseConfig::in_memory()).await?;
        run_migrations(&db).await?;

        let app = build_router(AppState::new(db.clone(), config));

        Ok(TestContext { db, app })
    }

    /// Sends a request and returns the status with the decoded JSON body
    ///
    /// An empty body decodes to `Value::Null`.
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .call(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    /// Creates a user through the API and returns its ID
    pub async fn create_user(&self, username: &str) -> i64 {
        let (status, _) = self
            .send(
                "POST",
                "/user/create",
                Some(json!({
                    "username": username,
                    "firstname": "Test",
                    "lastname": "User",
                    "age": 30
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "creating user {username}");

        self.user_id_by_username(username).await
    }

    /// Creates a task through the API and returns its ID
    pub async fn create_task(&self, user_id: i64, title: &str) -> i64 {
        let (status, _) = self
            .send(
                "POST",
                &format!("/task/create?user_id={user_id}"),
                Some(json!({
                    "title": title,
                    "content": "test content",
                    "priority": 1
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "creating task {title}");

        let (max_id,): (i64,) = sqlx::query_as("SELECT MAX(id) FROM tasks")
            .fetch_one(&self.db)
            .await
            .unwrap();
        max_id
    }

    pub async fn user_id_by_username(&self, username: &str) -> i64 {
        let (id,): (i64,) = sqlx::query_as("SELECT id FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.db)
            .await
            .unwrap();
        id
    }

    pub async fn count(&self, table: &str) -> i64 {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.db)
            .await
            .unwrap();
        count
    }
}
