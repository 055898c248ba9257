//! On-disk snapshot of the last successfully fetched playlist
//!
//! Freshness is the file's modification time compared against the TTL, so the
//! snapshot survives restarts. Only a missing file counts as a miss; any other
//! I/O failure is reported.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};
use tracing::{debug, trace};

use crate::errors::{SourceError, SourceResult};

#[derive(Debug, Clone)]
pub struct PlaylistCache {
    path: PathBuf,
    ttl: Duration,
}

impl PlaylistCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Age of the snapshot, `None` when there is no snapshot
    pub async fn age(&self) -> SourceResult<Option<Duration>> {
        let metadata = match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        let modified = metadata.modified().map_err(|e| self.io_error(e))?;

        // A modification time in the future (clock skew) counts as brand new
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        Ok(Some(age))
    }

    /// Snapshot content if it exists and is strictly younger than the TTL
    pub async fn read_fresh(&self) -> SourceResult<Option<String>> {
        let Some(age) = self.age().await? else {
            trace!("No playlist cache at {}", self.path.display());
            return Ok(None);
        };

        if age >= self.ttl {
            debug!(
                "Playlist cache at {} is stale ({}s old, ttl {}s)",
                self.path.display(),
                age.as_secs(),
                self.ttl.as_secs()
            );
            return Ok(None);
        }

        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            // Removed between the metadata check and the read
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Replace the snapshot, resetting its age to zero
    ///
    /// Content goes to a temporary sibling first and is renamed over the
    /// snapshot, so readers see either the previous or the new text in full.
    pub async fn store(&self, content: &str) -> SourceResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let temp_path = self.temp_path();
        if let Err(e) = tokio::fs::write(&temp_path, content).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(self.io_error(e));
        }
        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(self.io_error(e));
        }

        debug!(
            "Stored {} bytes of playlist content at {}",
            content.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Unique per call so concurrent stores never share a temporary file
    fn temp_path(&self) -> PathBuf {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);

        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "playlist".to_string());
        self.path
            .with_file_name(format!(".{file_name}.{}.{id}.tmp", std::process::id()))
    }

    fn io_error(&self, source: std::io::Error) -> SourceError {
        SourceError::CacheIo {
            path: self.path.clone(),
            source,
        }
    }
}
