//! Caption record model.

use serde::{Deserialize, Serialize};

/// One cached captioning result.
///
/// `filename` is a display key, not a unique one; duplicates are legal and
/// independently matchable during reconciliation. `caption` always holds
/// text: either a generated description or a flattened failure message
/// (`"Error: ..."`). Records are never mutated after creation; a full rebuild
/// replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionRecord {
    pub filename: String,
    pub caption: String,
}

impl CaptionRecord {
    pub fn new(filename: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            caption: caption.into(),
        }
    }
}
