//! Storage for files attached to books

use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::UploadedFile,
};

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]").unwrap());

/// Reduce a client-supplied file name to a safe ASCII name.
///
/// Mirrors the usual "secure filename" rules: NFKD-normalize, drop non-ASCII,
/// turn path separators into spaces, join words with `_`, keep only
/// `[A-Za-z0-9_.-]` and strip leading/trailing dots and underscores.
/// Returns `None` when nothing usable is left.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let ascii: String = raw.nfkd().filter(char::is_ascii).collect();
    let spaced = ascii.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_CHARS.replace_all(&joined, "");
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Upload directory on local disk
#[derive(Clone, Debug)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if absent
    pub async fn ensure_dir(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Write an uploaded file and return the name it is stored under.
    ///
    /// Stored names are `<uuid>_<sanitized name>`, so two uploads never share a file.
    pub async fn store(&self, file: &UploadedFile) -> AppResult<String> {
        let prefix = Uuid::new_v4().simple().to_string();
        let stored_name = match sanitize_filename(&file.file_name) {
            Some(name) => format!("{}_{}", prefix, name),
            None => prefix,
        };

        tokio::fs::write(self.dir.join(&stored_name), &file.bytes).await?;
        tracing::info!(
            "Stored upload {:?} as {} ({} bytes)",
            file.file_name,
            stored_name,
            file.bytes.len()
        );
        Ok(stored_name)
    }

    /// Delete a stored file
    pub async fn remove(&self, stored_name: &str) -> AppResult<()> {
        tokio::fs::remove_file(self.dir.join(stored_name)).await?;
        tracing::info!("Removed upload {}", stored_name);
        Ok(())
    }

    /// Read a stored file by name.
    ///
    /// Only a single plain file name is accepted; anything that could leave
    /// the upload directory is reported as not found.
    pub async fn read(&self, name: &str) -> AppResult<Vec<u8>> {
        let mut components = Path::new(name).components();
        let valid = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !valid {
            return Err(AppError::NotFound(format!("File {} not found", name)));
        }

        match tokio::fs::read(self.dir.join(name)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("File {} not found", name)))
            }
            Err(e) => Err(e.into()),
        }
    }
}
