// Process-wide caption cache

use crate::cache::models::CaptionRecord;
use parking_lot::RwLock;
use tracing::debug;

/// Ordered, process-wide collection of caption records.
///
/// Every operation is atomic under one lock, and the lock is never held
/// across backend I/O: rebuilds caption into a local batch first and commit
/// through `replace`, so concurrent readers see either the old snapshot or
/// the complete new one, never a partially-cleared view.
#[derive(Default)]
pub struct CaptionCache {
    records: RwLock<Vec<CaptionRecord>>,
}

impl CaptionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty the cache unconditionally.
    pub fn clear(&self) {
        self.records.write().clear();
        crate::metrics::record_cache_operation("clear");
        crate::metrics::update_cache_entries(0);
        debug!("Caption cache cleared");
    }

    /// Add one record at the end, preserving insertion order.
    pub fn append(&self, record: CaptionRecord) {
        let mut records = self.records.write();
        records.push(record);
        let len = records.len();
        drop(records);
        crate::metrics::record_cache_operation("append");
        crate::metrics::update_cache_entries(len);
    }

    /// Atomically swap in a full set of records (the rebuild commit).
    pub fn replace(&self, new_records: Vec<CaptionRecord>) {
        let len = new_records.len();
        *self.records.write() = new_records;
        crate::metrics::record_cache_operation("replace");
        crate::metrics::update_cache_entries(len);
        debug!("Caption cache replaced with {} records", len);
    }

    /// Point-in-time copy of the current records, in order. The copy stays
    /// stable while the live cache keeps moving underneath.
    pub fn snapshot(&self) -> Vec<CaptionRecord> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
