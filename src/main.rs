mod config;
mod error;
mod mock;
mod routes;
mod storage;

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "traffic_mock_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!(
        "Starting traffic mock server on port {} (analysis delay {:?})",
        config.port,
        config.analysis_delay
    );

    // Upload directory must exist before the first request
    let store = storage::UploadStore::new(&config.upload_dir);
    store.ensure_dir()?;
    tracing::info!("Upload directory ready at {}", store.dir().display());

    let state = Arc::new(routes::AppState {
        config: config.clone(),
        store,
    });

    let app = routes::build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!("Listening on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
