// Remote inference API backend (hosted image-captioning model)

use crate::config::RemoteConfig;
use crate::error::{CaptionError, Result};
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

/// Client for a hosted inference API that captions raw image bytes.
///
/// The endpoint is expected to answer with a JSON array whose first element
/// carries the generated caption, e.g. `[{"generated_text": "..."}]`.
pub struct RemoteInferenceBackend {
    client: Client,
    endpoint: String,
    credential: Option<String>,
}

/// One element of the inference API response array.
#[derive(Debug, Deserialize)]
struct RemoteCaption {
    generated_text: String,
}

impl RemoteInferenceBackend {
    pub fn new(config: &RemoteConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .use_rustls_tls()
            .build()
            .map_err(|e| CaptionError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            credential: config.credential.clone(),
        })
    }

    /// Caption one image.
    ///
    /// A missing credential is surfaced before any network I/O. Connection
    /// failures, timeouts, and non-2xx statuses are `Transport`; a response
    /// that is not a non-empty caption array is `MalformedResponse`.
    pub async fn caption(&self, image: &Bytes) -> Result<String> {
        let credential = self
            .credential
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                CaptionError::MissingCredential(
                    "remote credential not configured (set ALTGEN_REMOTE_CREDENTIAL)".to_string(),
                )
            })?;

        debug!("Submitting {} bytes to {}", image.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", credential))
            .body(image.clone())
            .send()
            .await
            .map_err(|e| CaptionError::Transport(format!("HTTP error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            // Some gateways echo the offending header back in the body.
            let error_text =
                crate::utils::logging::sanitize(&response.text().await.unwrap_or_default());
            error!("Inference API error: HTTP {} - {}", status, error_text);
            return Err(CaptionError::Transport(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| CaptionError::Transport(format!("Failed to read response body: {}", e)))?;

        let captions: Vec<RemoteCaption> = serde_json::from_str(&response_text).map_err(|e| {
            error!("Unexpected inference API response: {}", response_text);
            CaptionError::MalformedResponse(format!("Could not parse API response: {}", e))
        })?;

        captions
            .first()
            .map(|c| c.generated_text.trim().to_string())
            .ok_or_else(|| {
                CaptionError::MalformedResponse("API response carried no captions".to_string())
            })
    }
}
