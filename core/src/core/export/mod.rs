//! JSON file export, the desktop counterpart of a browser download.

use crate::types::{ContactMessage, file_safe_timestamp};
use chrono::{DateTime, Utc};
use error::ExportError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum ExportError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Serialize error: {0}")]
        Serialize(#[from] serde_json::Error),
    }
}

/// Writes pretty-printed JSON artifacts into one directory.
#[derive(Clone, Debug)]
pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Exports a single submitted message as `message_<timestamp>.json`.
    pub fn export_message(&self, message: &ContactMessage) -> Result<PathBuf, ExportError> {
        let filename = format!("message_{}.json", file_safe_timestamp(message.timestamp()));
        self.write_json(&filename, message)
    }

    /// Exports the full collection from the contact form as `all_messages_<now>.json`.
    pub fn export_all(
        &self,
        messages: &[ContactMessage],
        now: DateTime<Utc>,
    ) -> Result<PathBuf, ExportError> {
        let filename = format!("all_messages_{}.json", file_safe_timestamp(now));
        self.write_json(&filename, messages)
    }

    /// Exports the full collection from the admin panel as `admin_export_<now>.json`.
    pub fn export_admin(
        &self,
        messages: &[ContactMessage],
        now: DateTime<Utc>,
    ) -> Result<PathBuf, ExportError> {
        let filename = format!("admin_export_{}.json", file_safe_timestamp(now));
        self.write_json(&filename, messages)
    }

    fn write_json<T: Serialize + ?Sized>(
        &self,
        filename: &str,
        data: &T,
    ) -> Result<PathBuf, ExportError> {
        let content = serde_json::to_string_pretty(data)?;
        std::fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(filename);
        std::fs::write(&path, content)?;

        info!(path = %path.display(), "exported");
        Ok(path)
    }
}
