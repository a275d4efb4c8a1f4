pub mod handlers;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::storage::UploadStore;

pub use handlers::{analyze_video, health_check, index, upload_video};

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub store: UploadStore,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/upload", post(upload_video).layer(upload_limit))
        .route("/analyze", post(analyze_video))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
