//! setlistify-web - setlist management service
//!
//! Serves the song library, setlist index and setlist detail pages as JSON
//! page loads and form actions over a single SQLite database.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use setlistify_common::config::{load_toml_config, CliOverrides, ServerConfig};
use setlistify_web::{build_router, AppState, Store};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for setlistify-web
#[derive(Parser, Debug)]
#[command(name = "setlistify-web")]
#[command(about = "Song library and setlist manager")]
#[command(version)]
struct Args {
    /// SQLite database file (created if missing)
    #[arg(short, long, env = "SETLISTIFY_DATABASE")]
    database: Option<PathBuf>,

    /// Address to bind the HTTP listener to
    #[arg(short, long, env = "SETLISTIFY_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SETLISTIFY_PORT")]
    port: Option<u16>,

    /// TOML configuration file
    #[arg(short, long, env = "SETLISTIFY_CONFIG")]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            database_path: self.database.clone(),
            bind_address: self.bind.clone(),
            port: self.port,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = load_toml_config(args.config.as_deref())
        .context("Failed to load configuration")?;
    let config = ServerConfig::resolve(args.overrides(), &toml_config);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    format!(
                        "setlistify_common={0},setlistify_web={0},tower_http={0}",
                        config.log_level
                    )
                    .into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting setlistify-web v{}", env!("CARGO_PKG_VERSION"));
    info!("Database path: {}", config.database_path.display());

    let store = match Store::open(&config.database_path).await {
        Ok(store) => {
            info!("Database ready");
            store
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    let app = build_router(AppState::new(store));

    let addr = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("setlistify-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
