// Error handling tests

use altgen::error::CaptionError;
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[test]
fn test_error_display_messages() {
    let errors = vec![
        CaptionError::MissingCredential("credential not set".to_string()),
        CaptionError::NotFound("/images/cat.jpg".to_string()),
        CaptionError::Fetch {
            reference: "https://example.com/cat.jpg".to_string(),
            cause: "connection reset".to_string(),
        },
        CaptionError::Transport("timed out".to_string()),
        CaptionError::MalformedResponse("not a caption array".to_string()),
        CaptionError::RemoteRejection("model not found".to_string()),
        CaptionError::EmptyCache,
        CaptionError::InvalidBackendSelector("bogus".to_string()),
        CaptionError::MissingRequiredColumns("Image Path".to_string()),
        CaptionError::Config("bad config file".to_string()),
        CaptionError::Internal("unexpected".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_not_found_error() {
    let error = CaptionError::NotFound("/images/cat.jpg".to_string());
    assert!(format!("{}", error).contains("/images/cat.jpg"));
}

#[test]
fn test_fetch_error_names_the_reference() {
    let error = CaptionError::Fetch {
        reference: "https://example.com/cat.jpg".to_string(),
        cause: "HTTP 404".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("https://example.com/cat.jpg"));
    assert!(display.contains("HTTP 404"));
}

#[test]
fn test_invalid_selector_error() {
    let error = CaptionError::InvalidBackendSelector("bogus".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Invalid"));
    assert!(display.contains("bogus"));
}

#[test]
fn test_missing_columns_error() {
    let error = CaptionError::MissingRequiredColumns("Image Name, Image Path".to_string());
    assert!(format!("{}", error).contains("Image Name, Image Path"));
}

#[test]
fn test_caption_flattening_keeps_detail() {
    let error = CaptionError::Transport("connection refused".to_string());
    let caption = error.as_caption();
    assert!(caption.starts_with("Error: "));
    assert!(caption.contains("connection refused"));
}

#[test]
fn test_empty_cache_maps_to_conflict() {
    let response = CaptionError::EmptyCache.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[test]
fn test_missing_columns_map_to_bad_request() {
    let response = CaptionError::MissingRequiredColumns("Image Path".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_missing_credential_maps_to_unauthorized() {
    let response = CaptionError::MissingCredential("not set".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_backend_failures_map_to_bad_gateway() {
    let response = CaptionError::Transport("timed out".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let response = CaptionError::RemoteRejection("model missing".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
