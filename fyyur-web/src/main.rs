//! fyyur-web - venue and artist booking directory service
//!
//! Resolves its root folder, opens (or creates) `fyyur.db` there, optionally
//! loads the sample dataset and serves the JSON API until Ctrl+C or SIGTERM.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fyyur_common::config::{Overrides, ServerConfig, TomlConfig};
use fyyur_common::db::{init_database, seed_sample_data};
use fyyur_web::{build_router, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for fyyur-web
#[derive(Parser, Debug)]
#[command(name = "fyyur-web")]
#[command(about = "Venue and artist booking directory")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "FYYUR_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "FYYUR_HOST")]
    host: Option<String>,

    /// Folder holding fyyur.db
    #[arg(short, long, env = "FYYUR_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Load the sample venues, artists and shows into an empty database
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fyyur_web=debug,fyyur_common=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Fyyur (fyyur-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let overrides = Overrides {
        root_folder: args.root_folder,
        host: args.host,
        port: args.port,
    };
    let config = ServerConfig::resolve(overrides, TomlConfig::load_default());
    config
        .ensure_root_folder()
        .context("Failed to create root folder")?;
    info!("Root folder: {}", config.root_folder.display());

    let pool = match init_database(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to open database {}: {}", config.database_path.display(), e);
            return Err(e.into());
        }
    };

    if args.seed {
        seed_sample_data(&pool)
            .await
            .context("Failed to load sample data")?;
    }

    let app = build_router(AppState::new(pool));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    info!("fyyur-web listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
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
