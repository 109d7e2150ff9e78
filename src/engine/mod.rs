// Captioning engine: backend, fetcher, and cache behind one dispatch chokepoint

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::backend::CaptionBackend;
use crate::cache::{CaptionCache, CaptionRecord};
use crate::config::AppConfig;
use crate::error::{CaptionError, Result};
use crate::fetch::ImageFetcher;
use crate::sources::{ImageEntry, ImageSet};

/// Owns the selected backend, the image fetcher, and the caption cache.
///
/// Every captioning path (gallery rebuild, table ingestion, ad-hoc requests)
/// goes through `caption_for`; sources never talk to a backend directly.
pub struct CaptionEngine {
    backend: CaptionBackend,
    fetcher: ImageFetcher,
    cache: CaptionCache,
}

impl CaptionEngine {
    /// Build the engine from loaded configuration. An unrecognized backend
    /// selector does not fail construction; it fails every later dispatch.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.backend.timeout);
        Ok(Self {
            backend: CaptionBackend::from_config(config)?,
            fetcher: ImageFetcher::new(timeout)?,
            cache: CaptionCache::new(),
        })
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn backend_is_valid(&self) -> bool {
        self.backend.is_valid()
    }

    pub fn cache(&self) -> &CaptionCache {
        &self.cache
    }

    /// Resolve one reference to bytes and caption it through the active
    /// backend. The selector is validated before any fetch I/O, so a bad
    /// configuration never spends a network round-trip.
    pub async fn caption_for(&self, reference: &str) -> Result<String> {
        if let CaptionBackend::Invalid(selector) = &self.backend {
            return Err(CaptionError::InvalidBackendSelector(selector.clone()));
        }

        let image = self.fetcher.resolve(reference).await?;

        let start = Instant::now();
        let result = self.backend.caption(&image).await;
        let outcome = if result.is_ok() { "success" } else { "failure" };
        crate::metrics::record_backend_call(self.backend.name(), outcome, start.elapsed());

        result
    }

    /// Caption one reference, flattening any failure into caption text.
    ///
    /// This is the failure-isolation boundary for per-item operations: the
    /// caller always gets displayable text, and failure detail survives only
    /// as that text plus a log line.
    pub async fn caption_or_error(&self, reference: &str) -> String {
        match self.caption_for(reference).await {
            Ok(caption) => caption,
            Err(e) => {
                warn!("Captioning failed for {}: {}", reference, e);
                e.as_caption()
            }
        }
    }

    /// Rebuild the whole cache from a source.
    ///
    /// Captions every enumerated image into a local batch without holding the
    /// cache lock, then commits in one atomic replace, so concurrent readers
    /// see either the previous cache or the complete new one. A per-image
    /// failure becomes that record's caption text and the rebuild continues;
    /// only an enumeration failure aborts.
    pub async fn rebuild_from(&self, source: &dyn ImageSet) -> Result<usize> {
        let entries = source.enumerate()?;
        info!(
            "Rebuilding caption cache: {} images via {} backend",
            entries.len(),
            self.backend.name()
        );

        let mut batch = Vec::with_capacity(entries.len());
        for entry in entries {
            let caption = self.caption_or_error(&entry.reference).await;
            batch.push(CaptionRecord::new(entry.filename, caption));
        }

        let count = batch.len();
        self.cache.replace(batch);
        info!("Caption cache rebuilt with {} records", count);
        Ok(count)
    }

    /// Caption a batch of pre-parsed table rows, appending each record as it
    /// completes. Rows only reach this point after the whole table parsed
    /// cleanly; from here on, a dispatch failure for one row is tolerated and
    /// recorded as error text like any other per-item failure.
    pub async fn ingest(&self, rows: Vec<ImageEntry>) -> usize {
        let count = rows.len();
        for row in rows {
            let caption = self.caption_or_error(&row.reference).await;
            self.cache.append(CaptionRecord::new(row.filename, caption));
        }
        count
    }
}
