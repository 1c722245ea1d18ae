//! Append-only JSON archive of scan reports.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::Result;

/// A JSON file holding an array of archived reports.
#[derive(Debug, Clone)]
pub struct JsonArchive {
    path: PathBuf,
}

impl JsonArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `entry`, stamped with `archived_at`, and return the number of
    /// entries now in the archive.
    ///
    /// A non-array root is kept as the first entry. An undecodable file is
    /// replaced by a fresh archive.
    pub fn append<T: Serialize>(&self, entry: &T) -> Result<usize> {
        let mut entries = self.load();

        let mut value = serde_json::to_value(entry)?;
        if let Value::Object(fields) = &mut value {
            fields.insert(
                "archived_at".to_string(),
                Value::String(Utc::now().to_rfc3339()),
            );
        }
        entries.push(value);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;

        info!(path = %self.path.display(), entries = entries.len(), "Report archived");
        Ok(entries.len())
    }

    fn load(&self) -> Vec<Value> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Archive unreadable, starting a new one");
                return Vec::new();
            }
        };
        if raw.trim().is_empty() {
            return Vec::new();
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(other) => vec![other],
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Archive unreadable, starting a new one");
                Vec::new()
            }
        }
    }
}
