//! TalkUp Practice Service (talkup-ps) - Main entry point
//!
//! Serves on-demand practice content (topics, graded grammar sentences,
//! interview questions) and scores spoken transcripts. Content comes from
//! an external generation provider with static fallback; grammar queues
//! are topped up in the background below a low watermark.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use talkup_common::config::Config;
use talkup_ps::api;
use talkup_ps::cache::ContentCache;
use talkup_ps::corpus::FallbackCorpus;
use talkup_ps::generation::GenerationClient;
use talkup_ps::replenish::ReplenishmentScheduler;
use talkup_ps::snapshot::SnapshotStore;

const DATA_FOLDER_ENV_VAR: &str = "TALKUP_DATA_FOLDER";

/// Command-line arguments for talkup-ps
#[derive(Parser, Debug)]
#[command(name = "talkup-ps")]
#[command(about = "Practice content and scoring service for TalkUp")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "TALKUP_PS_PORT")]
    port: Option<u16>,

    /// Folder holding the cache snapshot
    #[arg(short, long)]
    data_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talkup_ps=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command-line arguments
    let args = Args::parse();
    let config = Config::resolve(args.port, args.data_folder, DATA_FOLDER_ENV_VAR);

    info!("Starting TalkUp Practice Service on port {}", config.port);
    info!("Data folder: {}", config.data_folder.display());
    if config.api_key.is_none() {
        info!("No provider API key configured; serving fallback content only");
    }

    // Build the content pipeline: corpus + generator -> cache -> scheduler
    let corpus = Arc::new(FallbackCorpus::bundled().context("Failed to parse bundled datasets")?);
    let generator =
        Arc::new(GenerationClient::from_config(&config).context("Failed to build provider client")?);
    let store = SnapshotStore::new(config.snapshot_path());
    let cache = Arc::new(ContentCache::restore(store, Arc::clone(&generator), Arc::clone(&corpus)).await);
    info!("Content cache initialized");

    let scheduler = ReplenishmentScheduler::new(Arc::clone(&cache), Arc::clone(&generator));
    scheduler.spawn_startup_sweep();

    // Build the application router
    let ctx = api::AppContext {
        cache,
        scheduler,
        corpus,
        interview_cursor: Arc::new(AtomicUsize::new(0)),
    };
    let app = api::create_router(ctx);

    // Create socket address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
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
