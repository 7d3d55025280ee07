//! Run-scoped storage for raw responses.
//!
//! Between answering and scoring, the responses of the current run live as a
//! single JSON blob under a fixed key. There is never more than one run.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::model::Response;

/// Key under which the current run's responses are stored.
pub const RESPONSES_KEY: &str = "assessment-responses";

/// A directory-backed key-value store for the current run.
#[derive(Debug, Clone)]
pub struct ResponseStore {
    dir: PathBuf,
}

impl ResponseStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File holding the responses blob.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{RESPONSES_KEY}.json"))
    }

    /// Replace the stored run with `responses`.
    pub fn save(&self, responses: &[Response]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create store at {}", self.dir.display()))?;
        let json =
            serde_json::to_string_pretty(responses).context("failed to serialize responses")?;
        let path = self.path();
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write responses to {}", path.display()))?;
        tracing::debug!(count = responses.len(), path = %path.display(), "saved responses");
        Ok(path)
    }

    /// The stored run, or `None` if nothing has been saved.
    pub fn load(&self) -> Result<Option<Vec<Response>>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        crate::parser::load_responses(&path).map(Some)
    }

    /// Discard the stored run. Returns whether anything was removed.
    pub fn clear(&self) -> Result<bool> {
        let path = self.path();
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)
            .with_context(|| format!("failed to remove {}", path.display()))?;
        Ok(true)
    }
}
