//! Web layer module
//!
//! HTTP interface for the playlist catalog. Handlers stay thin: they acquire
//! playlist text from the shared [`PlaylistSource`] and shape the response.
//!
//! # Routes
//!
//! - `GET /`: embedded landing page
//! - `GET /api/channels`: grouped channel catalog as JSON
//! - `GET /api/playlist.m3u`: the acquired playlist text, unmodified
//! - `GET /health`: liveness probe
//! - `GET /static/{*path}`: embedded assets used by the landing page

use anyhow::Result;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::{config::Config, errors::AppResult, sources::PlaylistSource};

pub mod handlers;
pub mod responses;

pub use responses::{ChannelsResponse, ErrorResponse, HealthResponse, handle_error};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<PlaylistSource>,
}

impl AppState {
    /// Build state with an HTTP-backed playlist source
    pub fn new(config: &Config) -> AppResult<Self> {
        let source = PlaylistSource::from_config(&config.source)?;
        Ok(Self::with_source(source))
    }

    pub fn with_source(source: PlaylistSource) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

/// Create the router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index::index))
        .route("/health", get(handlers::health::health_check))
        .route("/api/channels", get(handlers::channels::list_channels))
        .route("/api/playlist.m3u", get(handlers::playlist::serve_playlist))
        .route(
            "/static/{*path}",
            get(handlers::static_assets::serve_static_asset),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: Config) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let app = create_app(AppState::new(&config)?);
        Ok(Self { app, addr })
    }

    /// Serve until SIGTERM or SIGINT
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", self.addr, e))?;
        info!("Listening on http://{}", self.addr);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let (mut sigterm, mut sigint) = match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
            (Err(e), _) | (_, Err(e)) => {
                error!("Failed to install signal handlers: {}", e);
                return std::future::pending().await;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully");
            }
            _ = sigint.recv() => {
                info!("Received SIGINT (Ctrl+C), shutting down gracefully");
            }
        }
    }

    #[cfg(not(unix))]
    {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down gracefully"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_address_from_config() {
        let mut config = Config::default();
        config.web.host = "127.0.0.1".to_string();
        config.web.port = 8123;

        let server = WebServer::new(config).unwrap();
        assert_eq!(server.host(), "127.0.0.1");
        assert_eq!(server.port(), 8123);
    }

    #[test]
    fn test_invalid_origin_rejected_at_startup() {
        let mut config = Config::default();
        config.web.host = "127.0.0.1".to_string();
        config.source.url = Some("ftp://example.com/list.m3u".to_string());

        assert!(WebServer::new(config).is_err());
    }
}
