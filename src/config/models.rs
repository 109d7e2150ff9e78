//! Configuration data structures for the altgen service.
//!
//! This module defines the schema for the application settings, including
//! server parameters, the captioning backend selector, and the endpoints of
//! the remote and local backends.

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// Backend selection and shared call settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Remote inference API settings.
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Local model server settings.
    #[serde(default)]
    pub local: LocalConfig,

    /// Gallery directory settings.
    #[serde(default)]
    pub gallery: GalleryConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Which captioning backend handles dispatch, and bounds shared by both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend selector: `remote` or `local`. Any other value is kept
    /// verbatim and rejected at dispatch time, not at startup.
    /// Default: `remote`
    #[serde(default = "default_backend_kind")]
    pub kind: String,

    /// Per-call timeout in seconds for backend and image fetch requests.
    /// Default: `60`
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Settings for the remote inference API backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Full URL of the captioning model endpoint.
    /// Default: the hosted vit-gpt2 image captioning model.
    #[serde(default = "default_remote_endpoint")]
    pub endpoint: String,

    /// Bearer credential for the inference API. Absence is surfaced as a
    /// per-call `MissingCredential` failure, never a startup error.
    #[serde(default)]
    pub credential: Option<String>,
}

/// Settings for the local model server backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Base URL of the local model server.
    /// Default: `http://localhost:11434`
    #[serde(default = "default_local_endpoint")]
    pub endpoint: String,

    /// Model identifier the local server should run.
    /// Default: `llava`
    #[serde(default = "default_local_model")]
    pub model: String,
}

/// Settings for the image gallery the refresh operation scans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Directory scanned for images on a cache rebuild.
    /// Default: `static/images`
    #[serde(default = "default_gallery_dir")]
    pub dir: String,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: default_backend_kind(),
            timeout: default_timeout(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: default_remote_endpoint(),
            credential: None,
        }
    }
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            endpoint: default_local_endpoint(),
            model: default_local_model(),
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            dir: default_gallery_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults and shared constants

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_backend_kind() -> String {
    "remote".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_remote_endpoint() -> String {
    "https://api-inference.huggingface.co/models/nlpconnect/vit-gpt2-image-captioning".to_string()
}

fn default_local_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_local_model() -> String {
    "llava".to_string()
}

fn default_gallery_dir() -> String {
    "static/images".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.backend.kind, "remote");
        assert_eq!(config.backend.timeout, 60);
        assert!(config.remote.credential.is_none());
        assert_eq!(config.local.endpoint, "http://localhost:11434");
        assert_eq!(config.local.model, "llava");
        assert_eq!(config.gallery.dir, "static/images");
    }
}
