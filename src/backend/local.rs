// Local model server backend (Ollama-style chat API)

use crate::config::LocalConfig;
use crate::error::{CaptionError, Result};
use base64::Engine;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// Instruction sent with every image. Single-turn, one sentence, no history.
const CAPTION_INSTRUCTION: &str = "describe this image in one sentence for use as alt text";

/// Client for a locally hosted model server speaking the Ollama chat API.
///
/// Images travel base64-encoded inside the user message; the caption is the
/// assistant message content.
pub struct LocalModelBackend {
    client: Client,
    endpoint: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    images: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

impl LocalModelBackend {
    pub fn new(config: &LocalConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| CaptionError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Caption one image.
    ///
    /// A structured rejection from the server (non-2xx with an error body) is
    /// `RemoteRejection`; anything else unexpected during the call, including
    /// timeouts and an unparseable success body, is `Transport`.
    pub async fn caption(&self, image: &Bytes) -> Result<String> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image);

        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: CAPTION_INSTRUCTION.to_string(),
                images: Some(vec![encoded]),
            }],
            stream: false,
        };

        debug!(model = %self.model, "Sending chat request to local model server");

        let response = self
            .client
            .post(format!("{}/api/chat", self.endpoint))
            .json(&body)
            .send()
            .await
            .map_err(|e| CaptionError::Transport(format!("HTTP error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let detail = extract_rejection_detail(&error_text).unwrap_or(error_text);
            error!("Local model server rejected request: HTTP {} - {}", status, detail);
            return Err(CaptionError::RemoteRejection(format!(
                "HTTP {}: {}",
                status, detail
            )));
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            CaptionError::Transport(format!("Unexpected response from local model server: {}", e))
        })?;

        Ok(chat.message.content.trim().to_string())
    }
}

/// Extract the error message from an Ollama-style `{"error": "..."}` body.
fn extract_rejection_detail(response_text: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorResponse {
        error: Option<String>,
    }

    serde_json::from_str::<ErrorResponse>(response_text)
        .ok()
        .and_then(|resp| resp.error)
}
