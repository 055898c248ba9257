/// Configuration default values
///
/// All defaults live here so they can be changed in one place.
// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

// Playlist source defaults
pub const DEFAULT_FALLBACK_PATH: &str = "./vn.m3u";
pub const DEFAULT_CACHE_PATH: &str = "./data/playlist_cache.m3u";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60 * 60;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

// Environment variable names
pub const ENV_PREFIX: &str = "M3U_CATALOG_";
/// Bare `PORT` is honoured for platforms that inject it
pub const ENV_PORT: &str = "PORT";
