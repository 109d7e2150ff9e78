// HTTP request handlers

use super::routes::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::info;

use crate::cache::CaptionRecord;
use crate::error::{CaptionError, Result};
use crate::reconcile;
use crate::sources::{table, DirectorySource, TableSource};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // Check backend selection
    let backend_check = if state.engine.backend_is_valid() {
        HealthCheck {
            status: "ok".to_string(),
            message: format!("Active backend: {}", state.engine.backend_name()),
        }
    } else {
        overall_status = HealthStatus::Unhealthy;
        HealthCheck {
            status: "error".to_string(),
            message: format!(
                "Unrecognized backend selector: {:?}",
                state.config.backend.kind
            ),
        }
    };
    checks.insert("backend_selection".to_string(), backend_check);

    // Check remote credential (only binding while the remote backend is active)
    if state.engine.backend_name() == "remote" {
        let configured = state
            .config
            .remote
            .credential
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .is_some();
        let credential_check = if configured {
            HealthCheck {
                status: "ok".to_string(),
                message: "Remote credential configured".to_string(),
            }
        } else {
            if matches!(overall_status, HealthStatus::Healthy) {
                overall_status = HealthStatus::Degraded;
            }
            HealthCheck {
                status: "warning".to_string(),
                message: "Remote credential not configured; every dispatch will fail".to_string(),
            }
        };
        checks.insert("remote_credential".to_string(), credential_check);
    }

    // Check gallery directory
    let gallery_dir = &state.config.gallery.dir;
    let gallery_check = if std::path::Path::new(gallery_dir).is_dir() {
        HealthCheck {
            status: "ok".to_string(),
            message: format!("Gallery directory: {}", gallery_dir),
        }
    } else {
        if matches!(overall_status, HealthStatus::Healthy) {
            overall_status = HealthStatus::Degraded;
        }
        HealthCheck {
            status: "warning".to_string(),
            message: format!(
                "Gallery directory missing: {} (refresh yields an empty cache)",
                gallery_dir
            ),
        }
    };
    checks.insert("gallery_directory".to_string(), gallery_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GalleryResponse {
    pub backend: String,
    pub count: usize,
    pub records: Vec<CaptionRecord>,
}

/// Handler for the gallery view. Shows whatever is cached right now; it
/// never triggers captioning itself.
pub async fn gallery_handler(State(state): State<AppState>) -> Json<GalleryResponse> {
    let records = state.engine.cache().snapshot();
    Json(GalleryResponse {
        backend: state.engine.backend_name().to_string(),
        count: records.len(),
        records,
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OperationResponse {
    pub message: String,
    /// Records in the cache after the operation completed.
    pub cached: usize,
}

/// Handler for /refresh: full rebuild from the configured gallery directory
pub async fn refresh_handler(State(state): State<AppState>) -> Result<Json<OperationResponse>> {
    let source = DirectorySource::new(&state.config.gallery.dir);
    let count = state.engine.rebuild_from(&source).await?;

    info!("Gallery refresh complete: {} records", count);
    Ok(Json(OperationResponse {
        message: "Caption cache refreshed".to_string(),
        cached: count,
    }))
}

/// Handler for /clear: empty the cache unconditionally
pub async fn clear_handler(State(state): State<AppState>) -> Json<OperationResponse> {
    state.engine.cache().clear();
    Json(OperationResponse {
        message: "Caption cache cleared".to_string(),
        cached: 0,
    })
}

/// Handler for /upload: ingest a CSV table of image references.
///
/// The whole table must parse before any row is dispatched; a missing
/// required column rejects the upload and leaves the cache untouched.
pub async fn upload_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<OperationResponse>> {
    let table = TableSource::from_csv(body.as_bytes())?;
    let processed = state.engine.ingest(table.into_rows()).await;

    info!("Table ingestion complete: {} rows", processed);
    Ok(Json(OperationResponse {
        message: format!("Successfully processed {} rows", processed),
        cached: state.engine.cache().len(),
    }))
}

/// Handler for /download: the cache snapshot as a CSV attachment
pub async fn download_handler(State(state): State<AppState>) -> Result<Response> {
    let records = state.engine.cache().snapshot();
    if records.is_empty() {
        return Err(CaptionError::EmptyCache);
    }

    let mut buffer = Vec::new();
    table::write_snapshot(&mut buffer, &records, state.engine.backend_name())?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"alt_tags.csv\"",
        )
        .body(Body::from(buffer))
        .map_err(|e| CaptionError::Internal(format!("Failed to build download response: {}", e)))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReconcileResponse {
    pub document: String,
    pub unmatched: BTreeSet<String>,
}

/// Handler for /reconcile: annotate an HTML document from the cache
pub async fn reconcile_handler(
    State(state): State<AppState>,
    document: String,
) -> Result<Json<ReconcileResponse>> {
    let snapshot = state.engine.cache().snapshot();
    let (annotated, report) = reconcile::apply(&document, &snapshot)?;

    Ok(Json(ReconcileResponse {
        document: annotated,
        unmatched: report.unmatched,
    }))
}

/// Handler for /metrics: Prometheus text exposition
pub async fn metrics_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::engine::CaptionEngine;
    use std::sync::Arc;

    fn state_with_kind(kind: &str) -> AppState {
        let mut config = AppConfig::default();
        config.backend.kind = kind.to_string();
        let engine = Arc::new(CaptionEngine::new(&config).unwrap());
        AppState { config, engine }
    }

    #[tokio::test]
    async fn test_health_unhealthy_on_bad_selector() {
        let state = state_with_kind("bogus");
        let Json(health) = health_handler(State(state)).await;

        assert!(matches!(health.status, HealthStatus::Unhealthy));
        assert_eq!(health.checks["backend_selection"].status, "error");
    }

    #[tokio::test]
    async fn test_health_degraded_without_remote_credential() {
        let state = state_with_kind("remote");
        let Json(health) = health_handler(State(state)).await;

        assert!(matches!(health.status, HealthStatus::Degraded));
        assert_eq!(health.checks["remote_credential"].status, "warning");
    }

    #[tokio::test]
    async fn test_health_healthy_with_local_backend_and_gallery() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.backend.kind = "local".to_string();
        config.gallery.dir = dir.path().to_string_lossy().into_owned();
        let engine = Arc::new(CaptionEngine::new(&config).unwrap());
        let state = AppState { config, engine };

        let Json(health) = health_handler(State(state)).await;
        assert!(matches!(health.status, HealthStatus::Healthy));
    }

    #[tokio::test]
    async fn test_gallery_returns_current_cache() {
        let state = state_with_kind("local");
        state
            .engine
            .cache()
            .append(CaptionRecord::new("cat.jpg", "A cat."));

        let Json(gallery) = gallery_handler(State(state)).await;
        assert_eq!(gallery.backend, "local");
        assert_eq!(gallery.count, 1);
        assert_eq!(gallery.records[0].filename, "cat.jpg");
    }

    #[tokio::test]
    async fn test_upload_rejects_missing_columns() {
        let state = state_with_kind("local");
        let body = "Image Name,Location\ncat.jpg,/x.jpg\n".to_string();

        let err = upload_handler(State(state.clone()), body).await.unwrap_err();
        assert!(matches!(err, CaptionError::MissingRequiredColumns(_)));
        assert!(state.engine.cache().is_empty());
    }

    #[tokio::test]
    async fn test_upload_appends_rows_individually() {
        let state = state_with_kind("bogus");
        let body = "Image Name,Image Path\na.png,/no/a.png\nb.png,/no/b.png\n".to_string();

        let Json(resp) = upload_handler(State(state.clone()), body).await.unwrap();
        assert_eq!(resp.message, "Successfully processed 2 rows");
        assert_eq!(resp.cached, 2);

        let snapshot = state.engine.cache().snapshot();
        assert!(snapshot.iter().all(|r| r.caption.starts_with("Error: ")));
    }

    #[tokio::test]
    async fn test_clear_empties_cache() {
        let state = state_with_kind("local");
        state.engine.cache().append(CaptionRecord::new("a.png", "x"));

        let Json(resp) = clear_handler(State(state.clone())).await;
        assert_eq!(resp.cached, 0);
        assert!(state.engine.cache().is_empty());
    }

    #[tokio::test]
    async fn test_download_empty_cache_is_rejected() {
        let state = state_with_kind("local");
        let err = download_handler(State(state)).await.unwrap_err();
        assert!(matches!(err, CaptionError::EmptyCache));
    }

    #[tokio::test]
    async fn test_download_sets_attachment_headers() {
        let state = state_with_kind("local");
        state
            .engine
            .cache()
            .append(CaptionRecord::new("cat.jpg", "A cat."));

        let response = download_handler(State(state)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers().get(header::CONTENT_DISPOSITION).unwrap();
        assert_eq!(disposition, "attachment; filename=\"alt_tags.csv\"");
    }

    #[tokio::test]
    async fn test_reconcile_empty_cache_is_rejected() {
        let state = state_with_kind("local");
        let err = reconcile_handler(State(state), "<img src='a.png'>".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, CaptionError::EmptyCache));
    }

    #[tokio::test]
    async fn test_reconcile_annotates_and_reports_unmatched() {
        let state = state_with_kind("local");
        state
            .engine
            .cache()
            .append(CaptionRecord::new("image1.jpg", "This is image one."));
        state
            .engine
            .cache()
            .append(CaptionRecord::new("unmatched.png", "Never referenced."));

        let doc = "<img src='/images/image1.jpg'><img src='image2.png'>".to_string();
        let Json(resp) = reconcile_handler(State(state), doc).await.unwrap();

        assert!(resp.document.contains(r#"alt="This is image one.""#));
        assert!(resp.document.contains("image2.png"));
        assert_eq!(resp.unmatched.len(), 1);
        assert!(resp.unmatched.contains("unmatched.png"));
    }
}
