//! Three-tier playlist acquisition: cache, then remote origin, then local file

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::cache::PlaylistCache;
use super::http::HttpPlaylistFetcher;
use super::traits::PlaylistFetcher;
use crate::config::SourceConfig;
use crate::errors::{AppError, AppResult, SourceError, SourceResult};
use crate::utils::UrlUtils;

/// Where the text returned by [`PlaylistSource::acquire`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistOrigin {
    Cache,
    Remote,
    Fallback,
}

impl PlaylistOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaylistOrigin::Cache => "cache",
            PlaylistOrigin::Remote => "remote",
            PlaylistOrigin::Fallback => "fallback",
        }
    }
}

/// Playlist text together with the tier that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredPlaylist {
    pub content: String,
    pub origin: PlaylistOrigin,
}

pub struct PlaylistSource {
    origin_url: Option<String>,
    fallback_path: PathBuf,
    cache: PlaylistCache,
    fetcher: Arc<dyn PlaylistFetcher>,
}

impl PlaylistSource {
    pub fn new(config: &SourceConfig, fetcher: Arc<dyn PlaylistFetcher>) -> Self {
        Self {
            origin_url: config.url.clone(),
            fallback_path: config.fallback_path.clone(),
            cache: PlaylistCache::new(config.cache_path.clone(), config.cache_ttl),
            fetcher,
        }
    }

    /// Build a source that fetches over HTTP, validating the origin URL
    pub fn from_config(config: &SourceConfig) -> AppResult<Self> {
        if let Some(url) = &config.url {
            UrlUtils::validate_origin(url)
                .map_err(|e| AppError::configuration(format!("source.url: {e}")))?;
        }
        let fetcher = HttpPlaylistFetcher::new(config.fetch_timeout)?;
        Ok(Self::new(config, Arc::new(fetcher)))
    }

    pub fn cache(&self) -> &PlaylistCache {
        &self.cache
    }

    /// Current playlist text
    pub async fn acquire(&self) -> SourceResult<String> {
        self.acquire_with_origin().await.map(|acquired| acquired.content)
    }

    /// Current playlist text and the tier it came from
    pub async fn acquire_with_origin(&self) -> SourceResult<AcquiredPlaylist> {
        if let Some(content) = self.cache.read_fresh().await? {
            debug!("Serving playlist from cache {}", self.cache.path().display());
            return Ok(AcquiredPlaylist {
                content,
                origin: PlaylistOrigin::Cache,
            });
        }

        match self.fetch_remote().await {
            Ok(content) => {
                if let Err(e) = self.cache.store(&content).await {
                    warn!("Failed to update playlist cache: {}", e);
                }
                Ok(AcquiredPlaylist {
                    content,
                    origin: PlaylistOrigin::Remote,
                })
            }
            Err(remote_error) => {
                warn!("Remote playlist fetch failed: {}", remote_error);
                self.read_fallback(remote_error).await
            }
        }
    }

    async fn fetch_remote(&self) -> SourceResult<String> {
        let url = self.origin_url.as_deref().ok_or(SourceError::NotConfigured)?;

        info!(
            "Fetching playlist from origin {}",
            UrlUtils::obfuscate_credentials(url)
        );
        let content = self.fetcher.fetch_text(url).await?;
        info!("Fetched {} bytes from playlist origin", content.len());
        Ok(content)
    }

    /// Last resort; never writes to the cache
    async fn read_fallback(&self, remote_error: SourceError) -> SourceResult<AcquiredPlaylist> {
        match tokio::fs::read_to_string(&self.fallback_path).await {
            Ok(content) => {
                warn!(
                    "Serving playlist from local fallback {}",
                    self.fallback_path.display()
                );
                Ok(AcquiredPlaylist {
                    content,
                    origin: PlaylistOrigin::Fallback,
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(SourceError::unavailable(remote_error))
            }
            Err(source) => Err(SourceError::FallbackIo {
                path: self.fallback_path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::traits::MockPlaylistFetcher;
    use std::time::Duration;
    use tempfile::TempDir;

    const ORIGIN: &str = "http://origin.test/playlist.m3u";
    const REMOTE_BODY: &str = "#EXTM3U\n#EXTINF:-1,Remote (720p)\nhttp://remote/stream\n";
    const LOCAL_BODY: &str = "#EXTM3U\n#EXTINF:-1,Local (480p)\nhttp://local/stream\n";

    fn source_config(dir: &TempDir, ttl: Duration) -> SourceConfig {
        SourceConfig {
            url: Some(ORIGIN.to_string()),
            fallback_path: dir.path().join("fallback.m3u"),
            cache_path: dir.path().join("cache/playlist.m3u"),
            cache_ttl: ttl,
            fetch_timeout: Duration::from_secs(5),
        }
    }

    fn fetcher_returning(times: usize, body: &'static str) -> MockPlaylistFetcher {
        let mut fetcher = MockPlaylistFetcher::new();
        fetcher
            .expect_fetch_text()
            .withf(|url| url.to_string() == ORIGIN)
            .times(times)
            .returning(move |_| Ok(body.to_string()));
        fetcher
    }

    fn failing_fetcher() -> MockPlaylistFetcher {
        let mut fetcher = MockPlaylistFetcher::new();
        fetcher.expect_fetch_text().times(1).returning(|_| {
            Err(SourceError::Http {
                status: 503,
                message: "Service Unavailable".to_string(),
            })
        });
        fetcher
    }

    #[tokio::test]
    async fn test_remote_fetch_populates_cache() {
        let dir = TempDir::new().unwrap();
        let config = source_config(&dir, Duration::from_secs(3600));
        let source = PlaylistSource::new(&config, Arc::new(fetcher_returning(1, REMOTE_BODY)));

        let acquired = source.acquire_with_origin().await.unwrap();

        assert_eq!(acquired.origin, PlaylistOrigin::Remote);
        assert_eq!(acquired.content, REMOTE_BODY);
        assert_eq!(
            std::fs::read_to_string(&config.cache_path).unwrap(),
            REMOTE_BODY
        );
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_remote() {
        let dir = TempDir::new().unwrap();
        let config = source_config(&dir, Duration::from_secs(3600));
        let source = PlaylistSource::new(&config, Arc::new(fetcher_returning(0, REMOTE_BODY)));
        source.cache().store("#EXTM3U\ncached\n").await.unwrap();

        let acquired = source.acquire_with_origin().await.unwrap();

        assert_eq!(acquired.origin, PlaylistOrigin::Cache);
        assert_eq!(acquired.content, "#EXTM3U\ncached\n");
    }

    #[tokio::test]
    async fn test_second_acquire_within_ttl_uses_cache() {
        let dir = TempDir::new().unwrap();
        let config = source_config(&dir, Duration::from_secs(3600));
        let source = PlaylistSource::new(&config, Arc::new(fetcher_returning(1, REMOTE_BODY)));

        assert_eq!(source.acquire().await.unwrap(), REMOTE_BODY);
        let second = source.acquire_with_origin().await.unwrap();

        assert_eq!(second.origin, PlaylistOrigin::Cache);
        assert_eq!(second.content, REMOTE_BODY);
    }

    #[tokio::test]
    async fn test_expired_cache_triggers_remote() {
        let dir = TempDir::new().unwrap();
        let config = source_config(&dir, Duration::from_millis(200));
        let source = PlaylistSource::new(&config, Arc::new(fetcher_returning(1, REMOTE_BODY)));
        source.cache().store("#EXTM3U\nold\n").await.unwrap();

        assert_eq!(source.acquire().await.unwrap(), "#EXTM3U\nold\n");
        tokio::time::sleep(Duration::from_millis(300)).await;

        let acquired = source.acquire_with_origin().await.unwrap();
        assert_eq!(acquired.origin, PlaylistOrigin::Remote);
        assert_eq!(acquired.content, REMOTE_BODY);
    }

    #[tokio::test]
    async fn test_remote_failure_uses_fallback_without_caching() {
        let dir = TempDir::new().unwrap();
        let config = source_config(&dir, Duration::from_secs(3600));
        std::fs::write(&config.fallback_path, LOCAL_BODY).unwrap();
        let source = PlaylistSource::new(&config, Arc::new(failing_fetcher()));

        let acquired = source.acquire_with_origin().await.unwrap();

        assert_eq!(acquired.origin, PlaylistOrigin::Fallback);
        assert_eq!(acquired.content, LOCAL_BODY);
        assert!(!config.cache_path.exists());
    }

    #[tokio::test]
    async fn test_fallback_leaves_stale_cache_untouched() {
        let dir = TempDir::new().unwrap();
        let config = source_config(&dir, Duration::ZERO);
        std::fs::write(&config.fallback_path, LOCAL_BODY).unwrap();
        let source = PlaylistSource::new(&config, Arc::new(failing_fetcher()));
        source.cache().store("#EXTM3U\nstale\n").await.unwrap();

        assert_eq!(source.acquire().await.unwrap(), LOCAL_BODY);
        assert_eq!(
            std::fs::read_to_string(&config.cache_path).unwrap(),
            "#EXTM3U\nstale\n"
        );
    }

    #[tokio::test]
    async fn test_remote_failure_without_fallback_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let config = source_config(&dir, Duration::from_secs(3600));
        let source = PlaylistSource::new(&config, Arc::new(failing_fetcher()));

        let err = source.acquire().await.unwrap_err();

        assert!(err.is_unavailable());
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_missing_origin_goes_straight_to_fallback() {
        let dir = TempDir::new().unwrap();
        let mut config = source_config(&dir, Duration::from_secs(3600));
        config.url = None;
        std::fs::write(&config.fallback_path, LOCAL_BODY).unwrap();
        let mut fetcher = MockPlaylistFetcher::new();
        fetcher.expect_fetch_text().times(0);
        let source = PlaylistSource::new(&config, Arc::new(fetcher));

        assert_eq!(source.acquire().await.unwrap(), LOCAL_BODY);

        std::fs::remove_file(&config.fallback_path).unwrap();
        let err = source.acquire().await.unwrap_err();
        assert!(matches!(
            err,
            SourceError::Unavailable { ref cause } if matches!(**cause, SourceError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_unreadable_cache_propagates() {
        let dir = TempDir::new().unwrap();
        let config = source_config(&dir, Duration::from_secs(3600));
        std::fs::create_dir_all(&config.cache_path).unwrap();
        let source = PlaylistSource::new(&config, Arc::new(fetcher_returning(0, REMOTE_BODY)));

        let err = source.acquire().await.unwrap_err();
        assert!(matches!(err, SourceError::CacheIo { .. }));
    }

    #[tokio::test]
    async fn test_unreadable_fallback_propagates() {
        let dir = TempDir::new().unwrap();
        let config = source_config(&dir, Duration::from_secs(3600));
        std::fs::create_dir_all(&config.fallback_path).unwrap();
        let source = PlaylistSource::new(&config, Arc::new(failing_fetcher()));

        let err = source.acquire().await.unwrap_err();
        assert!(matches!(err, SourceError::FallbackIo { .. }));
    }

    #[test]
    fn test_from_config_rejects_bad_origin() {
        let config = SourceConfig {
            url: Some("ftp://origin.test/list.m3u".to_string()),
            ..SourceConfig::default()
        };
        let err = PlaylistSource::from_config(&config).err().unwrap();
        assert!(matches!(err, AppError::Configuration { .. }));
    }
}
