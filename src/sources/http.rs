//! reqwest-backed origin fetcher

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::traits::PlaylistFetcher;
use crate::errors::{AppError, AppResult, SourceError, SourceResult};
use crate::utils::UrlUtils;

/// Fetches playlists over HTTP with a total request timeout
pub struct HttpPlaylistFetcher {
    client: Client,
}

impl HttpPlaylistFetcher {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    fn map_transport_error(url: &str, error: reqwest::Error) -> SourceError {
        let safe_url = UrlUtils::obfuscate_credentials(url);
        if error.is_timeout() {
            SourceError::timeout(safe_url)
        } else {
            // Drop the URL from the message; it may carry credentials
            SourceError::request(
                safe_url,
                UrlUtils::obfuscate_credentials(&error.without_url().to_string()),
            )
        }
    }
}

#[async_trait]
impl PlaylistFetcher for HttpPlaylistFetcher {
    async fn fetch_text(&self, url: &str) -> SourceResult<String> {
        debug!("Fetching playlist from: {}", UrlUtils::obfuscate_credentials(url));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::map_transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let content = response
            .text()
            .await
            .map_err(|e| Self::map_transport_error(url, e))?;

        debug!("Fetched {} bytes of playlist content", content.len());
        Ok(content)
    }
}
