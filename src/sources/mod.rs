//! Playlist sources
//!
//! A [`PlaylistSource`] produces the current playlist text by trying, in order:
//! - a local snapshot younger than the configured TTL ([`PlaylistCache`])
//! - the remote origin, refreshing the snapshot on success ([`PlaylistFetcher`])
//! - a local fallback file, which never refreshes the snapshot
//!
//! # Usage
//!
//! ```rust,no_run
//! use m3u_catalog::{config::SourceConfig, sources::PlaylistSource};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = PlaylistSource::from_config(&SourceConfig::default())?;
//!     let text = source.acquire().await?;
//!     println!("{} bytes of playlist", text.len());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod http;
pub mod playlist;
pub mod traits;

pub use cache::PlaylistCache;
pub use http::HttpPlaylistFetcher;
pub use playlist::{AcquiredPlaylist, PlaylistOrigin, PlaylistSource};
pub use traits::PlaylistFetcher;
