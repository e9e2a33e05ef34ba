//! # Task Manager API Server Library
//!
//! REST endpoints for users and the tasks they own.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: Route handlers per resource
//! - `session`: Request-scoped database session extractor

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;
