// HTTP routes configuration

use super::handlers::{
    clear_handler, download_handler, gallery_handler, health_handler, metrics_handler,
    reconcile_handler, refresh_handler, upload_handler,
};
use super::middleware::{request_id_layers, track_metrics};
use crate::config::AppConfig;
use crate::engine::CaptionEngine;
use crate::error::Result;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub engine: Arc<CaptionEngine>,
}

pub fn create_router(config: AppConfig, engine: Arc<CaptionEngine>) -> Result<Router> {
    let state = AppState { config, engine };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/gallery", get(gallery_handler))
        .route("/refresh", post(refresh_handler))
        .route("/clear", post(clear_handler))
        .route("/upload", post(upload_handler))
        .route("/download", get(download_handler))
        .route("/reconcile", post(reconcile_handler))
        .route("/metrics", get(metrics_handler))
        // Applied per-route so the matched path is available as the metrics
        // endpoint label
        .route_layer(middleware::from_fn(track_metrics))
        // Uploaded tables and HTML documents are text; 10MB covers any
        // reasonable batch
        .layer(tower_http::limit::RequestBodyLimitLayer::new(10 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
