//! File-based status fetcher.
//!
//! Reads a snapshot from a JSON file on every fetch. Useful for replaying a
//! captured `/api/status` response or driving the console offline.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{PollError, Snapshot, StatusFetcher};

/// A fetcher that reads snapshots from a JSON file.
///
/// Each fetch re-reads the file, so edits show up on the next poll tick.
/// A missing or unparsable file counts as a failed poll.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    path: PathBuf,
    description: String,
}

impl FileFetcher {
    /// Create a new file fetcher for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StatusFetcher for FileFetcher {
    async fn fetch(&self) -> Result<Snapshot, PollError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
