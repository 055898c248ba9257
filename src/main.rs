use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use m3u_catalog::{config::Config, utils::UrlUtils, web::WebServer};

#[derive(Parser)]
#[command(name = "m3u-catalog")]
#[command(version)]
#[command(about = "Serves an M3U playlist as a grouped channel catalog")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = if cli.log_level == "trace" {
        format!("m3u_catalog={},tower_http=trace", cli.log_level)
    } else {
        format!("m3u_catalog={}", cli.log_level)
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting M3U Catalog v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration from specified file
    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    config.apply_env_overrides()?;

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    match &config.source.url {
        Some(url) => info!("Playlist origin: {}", UrlUtils::obfuscate_credentials(url)),
        None => info!("No playlist origin configured, serving from fallback file only"),
    }
    info!(
        "Playlist cache: {} (ttl {}), fallback: {}",
        config.source.cache_path.display(),
        humantime::format_duration(config.source.cache_ttl),
        config.source.fallback_path.display()
    );

    let server = WebServer::new(config)?;
    info!(
        "Web server configured for http://{}:{}",
        server.host(),
        server.port()
    );

    server.serve().await?;

    info!("Shutdown complete");
    Ok(())
}
