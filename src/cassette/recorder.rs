//! Incremental cassette writer for catalog fetches.
//!
//! The cassette under construction is flushed after each fetch, so a
//! process that exits after one audit still leaves a loadable file.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::json;

use super::format::{Cassette, Interaction};
use crate::ports::catalog::CatalogError;

/// Builds a [`Cassette`] from live catalog fetches.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// Starts an empty cassette named `name`, stamped now, to be written at `path`.
    /// `source` names where responses come from, usually the catalog URL.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        let cassette = Cassette {
            name: name.into(),
            recorded_at: Utc::now(),
            source: source.into(),
            interactions: Vec::new(),
        };
        Self { path: path.into(), cassette }
    }

    /// Appends the outcome of one catalog fetch as `{"ok": body}` or
    /// `{"err": message}`.
    pub fn record_fetch(&mut self, result: &Result<String, CatalogError>) {
        let output = match result {
            Ok(body) => json!({ "ok": body }),
            Err(e) => json!({ "err": e.to_string() }),
        };
        let seq = self.cassette.interactions.len() as u64;
        self.cassette.interactions.push(Interaction {
            seq,
            port: "catalog".to_string(),
            method: "fetch".to_string(),
            input: json!({}),
            output,
        });
    }

    /// Writes everything recorded so far, creating parent folders.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be encoded or written.
    pub fn flush(&self) -> Result<&Path, String> {
        let yaml = serde_yaml::to_string(&self.cassette)
            .map_err(|e| format!("failed to encode cassette: {e}"))?;
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("failed to create {}: {e}", dir.display()))?;
        }
        std::fs::write(&self.path, yaml)
            .map_err(|e| format!("failed to write cassette {}: {e}", self.path.display()))?;
        Ok(&self.path)
    }
}
