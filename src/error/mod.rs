// Error types for the altgen captioning engine

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Fetch failed for {reference}: {cause}")]
    Fetch { reference: String, cause: String },

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Backend rejected request: {0}")]
    RemoteRejection(String),

    #[error("Caption cache is empty")]
    EmptyCache,

    #[error("Invalid backend selector: {0:?}")]
    InvalidBackendSelector(String),

    #[error("Missing required columns: {0}")]
    MissingRequiredColumns(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CaptionError {
    /// Flatten a failure into the display string stored in a caption record.
    /// This is the only point where the typed taxonomy collapses to text; the
    /// gallery shows these inline exactly like successful captions.
    pub fn as_caption(&self) -> String {
        format!("Error: {}", self)
    }
}

// Convert CaptionError to HTTP responses for Axum
impl IntoResponse for CaptionError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            CaptionError::MissingCredential(_) => {
                (StatusCode::UNAUTHORIZED, "authentication_error", self.to_string())
            }
            CaptionError::NotFound(_) => {
                (StatusCode::NOT_FOUND, "not_found_error", self.to_string())
            }
            CaptionError::MissingRequiredColumns(_) | CaptionError::Csv(_) => {
                (StatusCode::BAD_REQUEST, "invalid_request_error", self.to_string())
            }
            CaptionError::EmptyCache => {
                (StatusCode::CONFLICT, "empty_cache_error", self.to_string())
            }
            CaptionError::Fetch { .. }
            | CaptionError::Transport(_)
            | CaptionError::MalformedResponse(_)
            | CaptionError::RemoteRejection(_) => {
                (StatusCode::BAD_GATEWAY, "backend_error", self.to_string())
            }
            CaptionError::InvalidBackendSelector(_) | CaptionError::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error", self.to_string())
            }
            _ => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", self.to_string())
            }
        };

        let body = json!({
            "type": "error",
            "error": {
                "type": error_type,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, CaptionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_caption_carries_error_prefix() {
        let err = CaptionError::MissingCredential("ALTGEN_REMOTE_CREDENTIAL not set".to_string());
        let caption = err.as_caption();
        assert!(caption.starts_with("Error: "));
        assert!(caption.contains("ALTGEN_REMOTE_CREDENTIAL"));
    }

    #[test]
    fn test_invalid_selector_mentions_invalid() {
        let err = CaptionError::InvalidBackendSelector("bogus".to_string());
        assert!(err.as_caption().contains("Invalid"));
        assert!(err.as_caption().contains("bogus"));
    }
}
