//! # Task Manager Shared Library
//!
//! Models, persistence and helpers used by the task manager API server.
//!
//! ## Module Organization
//!
//! - `db`: connection pool and schema migrations
//! - `models`: `User` and `Task` with their database operations
//! - `slug`: URL-safe slug generation

pub mod db;
pub mod models;
pub mod slug;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
