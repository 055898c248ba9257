use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub mod defaults;
pub mod duration_serde;

use crate::errors::{AppError, AppResult};
use defaults::*;
use duration_serde::parse_duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Where playlist text comes from and how long a fetched copy stays fresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Remote origin; when unset every cache miss goes straight to the fallback file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default = "default_fallback_path")]
    pub fallback_path: PathBuf,
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,
    #[serde(default = "default_cache_ttl", with = "duration_serde::duration")]
    pub cache_ttl: Duration,
    #[serde(default = "default_fetch_timeout", with = "duration_serde::duration")]
    pub fetch_timeout: Duration,
}

// Web defaults
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

// Source defaults
fn default_fallback_path() -> PathBuf {
    PathBuf::from(DEFAULT_FALLBACK_PATH)
}

fn default_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_PATH)
}

fn default_cache_ttl() -> Duration {
    Duration::from_secs(DEFAULT_CACHE_TTL_SECS)
}

fn default_fetch_timeout() -> Duration {
    Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS)
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            fallback_path: default_fallback_path(),
            cache_path: default_cache_path(),
            cache_ttl: default_cache_ttl(),
            fetch_timeout: default_fetch_timeout(),
        }
    }
}

impl Config {
    /// Load the config file, writing out the defaults when it does not exist yet
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            Ok(default_config)
        }
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> AppResult<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using an arbitrary variable lookup
    ///
    /// Prefixed variables win over the bare `PORT` variable.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}")).filter(|v| !v.is_empty());

        if let Some(port) = lookup(ENV_PORT).filter(|v| !v.is_empty()) {
            self.web.port = parse_port(ENV_PORT, &port)?;
        }
        if let Some(port) = var("PORT") {
            self.web.port = parse_port(&format!("{ENV_PREFIX}PORT"), &port)?;
        }
        if let Some(host) = var("HOST") {
            self.web.host = host;
        }
        if let Some(url) = var("PLAYLIST_URL") {
            self.source.url = Some(url);
        }
        if let Some(path) = var("FALLBACK_PATH") {
            self.source.fallback_path = PathBuf::from(path);
        }
        if let Some(path) = var("CACHE_PATH") {
            self.source.cache_path = PathBuf::from(path);
        }
        if let Some(ttl) = var("CACHE_TTL") {
            self.source.cache_ttl = parse_duration(&ttl)
                .map_err(|e| AppError::configuration(format!("{ENV_PREFIX}CACHE_TTL: {e}")))?;
        }
        if let Some(timeout) = var("FETCH_TIMEOUT") {
            self.source.fetch_timeout = parse_duration(&timeout)
                .map_err(|e| AppError::configuration(format!("{ENV_PREFIX}FETCH_TIMEOUT: {e}")))?;
        }

        Ok(())
    }
}

fn parse_port(name: &str, value: &str) -> AppResult<u16> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::configuration(format!("{name}: invalid port '{value}'")))
}
