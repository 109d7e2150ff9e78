// altgen - image alt-text generation service

use altgen::cli::Args;
use altgen::config::AppConfig;
use altgen::engine::CaptionEngine;
use altgen::server::create_router;
use altgen::sources::DirectorySource;
use altgen::utils::logging;
use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load()?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting altgen v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the captioning engine
    let engine = Arc::new(CaptionEngine::new(&config)?);
    if engine.backend_is_valid() {
        info!("Active captioning backend: {}", engine.backend_name());
    } else {
        warn!(
            "Unrecognized backend selector {:?}; captioning will fail until reconfigured",
            config.backend.kind
        );
    }

    // Phase 4: Optionally warm the cache from the gallery directory
    if args.warm {
        let source = DirectorySource::new(&config.gallery.dir);
        let count = engine.rebuild_from(&source).await?;
        info!("Warmed caption cache with {} records", count);
    }

    // Phase 5: Build and start HTTP server
    let app = create_router(config.clone(), engine)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
