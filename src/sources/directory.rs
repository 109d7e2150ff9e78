// Gallery directory enumeration

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::Result;
use crate::sources::{ImageEntry, ImageSet};

/// Image formats picked up by a directory scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl ImageFormat {
    /// Try to detect format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "gif" => Some(ImageFormat::Gif),
            "bmp" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }
}

/// The local gallery: every recognized image file directly inside one
/// directory, in sorted filename order.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_image(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageFormat::from_extension)
            .is_some()
    }
}

impl ImageSet for DirectorySource {
    fn enumerate(&self) -> Result<Vec<ImageEntry>> {
        if !self.root.is_dir() {
            warn!(dir = %self.root.display(), "gallery directory missing, treating as empty");
            return Ok(Vec::new());
        }

        // Absolute references so cached entries stay resolvable regardless of
        // the process working directory.
        let root = self.root.canonicalize().unwrap_or_else(|_| self.root.clone());

        let mut entries = Vec::new();
        for dirent in std::fs::read_dir(&root)? {
            let dirent = dirent?;
            let path = dirent.path();
            if !path.is_file() || !Self::is_image(&path) {
                continue;
            }
            let filename = dirent.file_name().to_string_lossy().into_owned();
            let reference = path.to_string_lossy().into_owned();
            entries.push(ImageEntry::new(filename, reference));
        }

        entries.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(entries)
    }
}
