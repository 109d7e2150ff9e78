//! Axum-based HTTP server implementation for the altgen engine.
//!
//! This module is responsible for setting up the HTTP server, configuring
//! routes, and handling incoming requests: gallery cache lifecycle calls,
//! spreadsheet upload/download, and HTML reconciliation.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual endpoints (e.g., refresh, upload, health).
//! - `middleware`: Custom tower/axum middleware for request ID tracking and metrics.
//! - `routes`: The main router configuration that ties everything together.

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
