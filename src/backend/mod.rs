// Captioning backend variants and selection

mod local;
mod remote;

pub use local::LocalModelBackend;
pub use remote::RemoteInferenceBackend;

use crate::config::AppConfig;
use crate::error::{CaptionError, Result};
use bytes::Bytes;
use std::time::Duration;

/// The active captioning backend, selected once at configuration load.
///
/// The selector string is never re-parsed per call. An unrecognized selector
/// is kept verbatim in `Invalid` so it stays representable: construction
/// succeeds, and every dispatch through it fails closed with
/// `InvalidBackendSelector` instead of silently defaulting to a backend.
pub enum CaptionBackend {
    Remote(RemoteInferenceBackend),
    Local(LocalModelBackend),
    Invalid(String),
}

impl CaptionBackend {
    /// Build the backend named by `backend.kind`. Selector matching is exact:
    /// `remote` or `local`, lowercase.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.backend.timeout);
        match config.backend.kind.as_str() {
            "remote" => Ok(Self::Remote(RemoteInferenceBackend::new(
                &config.remote,
                timeout,
            )?)),
            "local" => Ok(Self::Local(LocalModelBackend::new(&config.local, timeout)?)),
            other => Ok(Self::Invalid(other.to_string())),
        }
    }

    /// Display name used in logs, health output, and the spreadsheet export.
    pub fn name(&self) -> &str {
        match self {
            Self::Remote(_) => "remote",
            Self::Local(_) => "local",
            Self::Invalid(_) => "invalid",
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid(_))
    }

    /// Turn image bytes into a caption via the selected backend.
    pub async fn caption(&self, image: &Bytes) -> Result<String> {
        match self {
            Self::Remote(backend) => backend.caption(image).await,
            Self::Local(backend) => backend.caption(image).await,
            Self::Invalid(selector) => {
                Err(CaptionError::InvalidBackendSelector(selector.clone()))
            }
        }
    }
}
