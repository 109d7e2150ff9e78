// Image reference sources

pub mod directory;
pub mod table;

pub use directory::DirectorySource;
pub use table::TableSource;

use crate::error::Result;

/// A named image reference: the display filename plus the path or URL that
/// resolves to its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub filename: String,
    pub reference: String,
}

impl ImageEntry {
    pub fn new(filename: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            reference: reference.into(),
        }
    }
}

/// A way to enumerate the set of images to caption.
///
/// Sources only name images; they never talk to a backend. Captioning always
/// goes through the engine chokepoint.
pub trait ImageSet: Sync {
    fn enumerate(&self) -> Result<Vec<ImageEntry>>;
}
