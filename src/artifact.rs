//! Build artifact representation and atomic persistence.
//!
//! An artifact is the fully assembled script text plus its size and
//! checksum. Writing goes through a temporary file in the destination
//! directory followed by a rename, so a failed build never leaves a
//! truncated file behind and an existing artifact survives intact.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, WeldError};
use crate::hash;

/// Assembled output carrying its own integrity data.
#[derive(Debug, Clone)]
pub struct BuildArtifact {
    /// Complete output text, banner included.
    pub text: String,
    /// Size of `text` in bytes.
    pub size: usize,
    /// Checksum of `text`, `blake3:`-prefixed.
    pub checksum: String,
}

impl BuildArtifact {
    pub fn new(text: String) -> Self {
        let checksum = hash::hash_text(&text);
        let size = text.len();
        Self {
            text,
            size,
            checksum,
        }
    }

    /// Writes the artifact to `path` atomically.
    ///
    /// Parent directories are created as needed. The text lands in a
    /// temporary file next to the destination and is renamed over it,
    /// so readers observe either the previous artifact or the new one.
    pub fn write_atomic(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        std::fs::create_dir_all(parent).map_err(|e| WeldError::FileWriteFailed {
            path: parent.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut temp =
            NamedTempFile::new_in(parent).map_err(|e| WeldError::FileWriteFailed {
                path: path.display().to_string(),
                reason: format!("failed to create temporary file: {e}"),
            })?;

        temp.write_all(self.text.as_bytes())
            .map_err(|e| WeldError::FileWriteFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        temp.persist(path).map_err(|e| WeldError::FileWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(())
    }
}
