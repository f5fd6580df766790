//! Whole-file JSON documents with serialized read-modify-write access.
//!
//! Each document is guarded by its own async mutex. Callers lock the document, read it,
//! mutate the decoded value and write it back while holding the guard, so concurrent
//! command handlers and scheduled jobs can never lose each other's updates. Writes go to a
//! temporary file that is renamed over the original, so a failed write leaves the previous
//! document intact.

use dioxus_logger::tracing;
use serde::Serialize;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, MutexGuard};

use crate::error::AppError;

/// A JSON document persisted as a single file.
pub struct JsonDocument {
    path: PathBuf,
    lock: Mutex<()>,
}

/// Exclusive access to a document for one read-modify-write cycle.
pub struct DocumentGuard<'a> {
    document: &'a JsonDocument,
    _guard: MutexGuard<'a, ()>,
}

impl JsonDocument {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Waits for exclusive access to the document.
    pub async fn lock(&self) -> DocumentGuard<'_> {
        DocumentGuard {
            document: self,
            _guard: self.lock.lock().await,
        }
    }

    /// Path the corrupt document is moved to so a later write cannot destroy it.
    fn corrupt_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl DocumentGuard<'_> {
    /// Reads and parses the document.
    ///
    /// A missing file reads as `None`. A file that is not valid JSON is moved aside with
    /// [`DocumentGuard::set_aside`] and also reads as `None`.
    ///
    /// # Returns
    /// - `Ok(Some(Value))` - Parsed document
    /// - `Ok(None)` - Missing or corrupt document
    /// - `Err(AppError::Io)` - File exists but could not be read
    pub async fn read(&self) -> Result<Option<Value>, AppError> {
        let path = self.document.path();

        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                self.set_aside(&format!("not valid JSON: {}", e)).await;
                Ok(None)
            }
        }
    }

    /// Moves an unusable document to `<name>.corrupt` so a later write cannot destroy it.
    ///
    /// Callers treat the document as missing afterwards. A failed move is only logged;
    /// the next write would then replace the document.
    pub async fn set_aside(&self, reason: &str) {
        let path = self.document.path();
        let corrupt = self.document.corrupt_path();

        tracing::error!(
            "Document {} is unusable ({}), moving it to {}",
            path.display(),
            reason,
            corrupt.display()
        );
        if let Err(e) = tokio::fs::rename(path, &corrupt).await {
            tracing::error!("Failed to move corrupt document aside: {}", e);
        }
    }

    /// Serializes `value` and atomically replaces the document with it.
    ///
    /// # Returns
    /// - `Ok(())` - Document replaced
    /// - `Err(AppError)` - Encoding or file system failure; the previous document is intact
    pub async fn write<T: Serialize>(&self, value: &T) -> Result<(), AppError> {
        let encoded = serde_json::to_vec_pretty(value)?;
        let temp = self.document.temp_path();

        tokio::fs::write(&temp, encoded).await?;
        if let Err(e) = tokio::fs::rename(&temp, self.document.path()).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }

        Ok(())
    }
}
