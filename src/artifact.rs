//! Processed document artifact and download handling
//!
//! The decoded binary coming back from the service is handed to the
//! embedder as a [`ProcessedDocument`]: bytes, a derived filename, and the
//! fixed docx MIME type. [`ProcessedDocument::save_to`] covers the common
//! save-to-disk path with collision handling.

use crate::config::{DownloadConfig, FileCollisionAction};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// MIME type of the processed document
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// File extension of the processed document
const DOCX_EXT: &str = "docx";

/// Maximum number of rename attempts when resolving file collisions
const MAX_RENAME_ATTEMPTS: u32 = 9999;

/// A processed document returned by the remote service
///
/// Owned transiently by the caller; nothing is persisted unless
/// [`save_to`](Self::save_to) is called.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessedDocument {
    /// Decoded document bytes
    pub bytes: Vec<u8>,
    /// Derived download filename (client name + suffix + `.docx`)
    pub filename: String,
}

impl ProcessedDocument {
    /// MIME type to serve this document with
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        DOCX_MIME
    }

    /// Write the document into `dir` under its derived filename
    ///
    /// Collisions are resolved according to `action`: `Rename` appends
    /// (1), (2), etc., `Overwrite` replaces, `Skip` returns an error if the
    /// file already exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] on filesystem failures and [`Error::Other`]
    /// when `Skip` hits an existing file or `Rename` exhausts its attempts.
    pub fn save_to(&self, dir: &Path, action: FileCollisionAction) -> Result<PathBuf> {
        let target = unique_path(&dir.join(&self.filename), action)?;
        std::fs::write(&target, &self.bytes)?;
        tracing::info!(path = %target.display(), size = self.bytes.len(), "saved processed document");
        Ok(target)
    }
}

/// Derive the download filename from the client name input
///
/// The client name is sanitized to a filesystem-safe form and the
/// configured suffix appended; a missing or unusable name falls back to the
/// configured default basename.
#[must_use]
pub fn download_filename(client_name: Option<&str>, config: &DownloadConfig) -> String {
    let stem = client_name
        .map(sanitize_stem)
        .filter(|s| !s.is_empty())
        .map(|s| format!("{s}{}", config.filename_suffix))
        .unwrap_or_else(|| config.default_basename.clone());
    format!("{stem}.{DOCX_EXT}")
}

/// Reduce a user-supplied name to a filesystem-safe filename stem
///
/// Keeps alphanumerics, hyphens and underscores; runs of anything else
/// collapse to a single underscore. Leading/trailing separators are
/// trimmed.
fn sanitize_stem(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sep = true;
    for c in name.chars() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
            last_was_sep = false;
        } else if !last_was_sep {
            out.push('_');
            last_was_sep = true;
        }
    }
    out.trim_matches('_').to_string()
}

/// Get a unique path for a file, handling collisions according to `action`
fn unique_path(path: &Path, action: FileCollisionAction) -> Result<PathBuf> {
    match action {
        FileCollisionAction::Overwrite => Ok(path.to_path_buf()),
        FileCollisionAction::Skip => {
            if path.exists() {
                return Err(Error::Other(format!(
                    "file {} already exists and collision action is Skip",
                    path.display()
                )));
            }
            Ok(path.to_path_buf())
        }
        FileCollisionAction::Rename => {
            if !path.exists() {
                return Ok(path.to_path_buf());
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| Error::Other(format!("cannot extract stem of {}", path.display())))?;
            let extension = path.extension().and_then(|e| e.to_str());
            let parent = path.parent().ok_or_else(|| {
                Error::Other(format!("cannot extract parent of {}", path.display()))
            })?;

            for i in 1..=MAX_RENAME_ATTEMPTS {
                let new_name = match extension {
                    Some(ext) => format!("{stem} ({i}).{ext}"),
                    None => format!("{stem} ({i})"),
                };
                let new_path = parent.join(new_name);
                if !new_path.exists() {
                    return Ok(new_path);
                }
            }

            Err(Error::Other(format!(
                "could not find unique filename for {} after {MAX_RENAME_ATTEMPTS} attempts",
                path.display()
            )))
        }
    }
}
