//! Stock directory server binary.
//!
//! Binds immediately; the MongoDB ping and index setup run in the
//! background, so an unreachable datastore is logged and requests fail
//! individually until it comes back.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use stock_directory::{MemoryStore, MongoStore, ServiceConfig, ServiceState, StockStore};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Stock directory - HTTP API for stock reference data
#[derive(Parser, Debug)]
#[command(name = "stock-directory")]
#[command(version)]
struct Args {
    #[command(flatten)]
    config: ServiceConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().config;

    let store: Arc<dyn StockStore> = if config.in_memory {
        info!("Using in-memory store");
        Arc::new(MemoryStore::new())
    } else {
        let mongo = Arc::new(
            MongoStore::connect(&config)
                .await
                .context("invalid MongoDB connection string")?,
        );
        info!(database = %config.database, collection = %config.collection, "MongoDB client ready");
        tokio::spawn(prepare_mongo(mongo.clone()));
        mongo
    };

    let bind_addr = config.bind_addr();
    let app = stock_directory::create_app(ServiceState::new(config, store));

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!("Listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn prepare_mongo(store: Arc<MongoStore>) {
    match store.ping().await {
        Ok(()) => info!("Connected to MongoDB"),
        Err(e) => {
            error!(error = %e, "MongoDB connection failed");
            return;
        }
    }
    if let Err(e) = store.ensure_indexes().await {
        error!(error = %e, "Failed to create symbol index");
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received");
}
