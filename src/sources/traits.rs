//! Source trait definitions

use async_trait::async_trait;

use crate::errors::SourceResult;

/// Fetches playlist text from a remote origin
///
/// Implementations must map non-success HTTP statuses and timeouts to errors
/// so the caller can fall through to the next tier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaylistFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> SourceResult<String>;
}
