//! Curator Service - Main Entry Point
//!
//! Serves the curation API, or with `run` curates the configured data
//! folder once and exits.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use curator::api::{build_router, AppState};
use curator::jobs::JobProcessor;
use curator::types::CuratorConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "curator=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = CuratorConfig::load()?;

    info!("Starting Curator v{}", env!("CARGO_PKG_VERSION"));
    info!(
        data_folder = %config.data_folder.display(),
        output_folder = %config.output_folder.display(),
        "Loaded configuration"
    );

    if std::env::args().nth(1).as_deref() == Some("run") {
        let result = JobProcessor::new(config).run().await?;
        info!(
            total_files = result.total_files,
            kept = result.kept,
            removed = result.removed,
            tokens = result.tokens,
            "Curation finished"
        );
        return Ok(());
    }

    let port = config.port;
    let app = build_router(Arc::new(AppState::new(config)));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
