// Image reference resolution: remote URLs vs local paths

use crate::error::{CaptionError, Result};
use bytes::Bytes;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Resolves an image reference into raw bytes.
///
/// A reference beginning with a recognized URL scheme is fetched over the
/// network; anything else is read as a local file. There is no retry at this
/// layer; retry policy, if any, belongs to the caller.
pub struct ImageFetcher {
    client: Client,
}

/// True only for references with a recognized scheme *prefix*. A path that
/// merely contains "http" somewhere (`/tmp/http_cache/img.jpg`) is a path.
pub fn is_url(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

impl ImageFetcher {
    /// Create a fetcher with a bounded per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .use_rustls_tls()
            .build()
            .map_err(|e| CaptionError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Resolve a reference to image bytes.
    ///
    /// Network failures and non-2xx statuses surface as `Fetch`; a missing or
    /// unreadable local file surfaces as `NotFound`.
    pub async fn resolve(&self, reference: &str) -> Result<Bytes> {
        if is_url(reference) {
            self.fetch_url(reference).await
        } else {
            self.read_file(reference).await
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<Bytes> {
        debug!("Fetching image from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CaptionError::Fetch {
                reference: url.to_string(),
                cause: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CaptionError::Fetch {
                reference: url.to_string(),
                cause: format!("HTTP {}", status),
            });
        }

        response.bytes().await.map_err(|e| CaptionError::Fetch {
            reference: url.to_string(),
            cause: format!("Failed to read response body: {}", e),
        })
    }

    async fn read_file(&self, path: &str) -> Result<Bytes> {
        debug!("Reading image from {}", path);

        let data = tokio::fs::read(Path::new(path))
            .await
            .map_err(|_| CaptionError::NotFound(path.to_string()))?;

        Ok(Bytes::from(data))
    }
}
