//! HTTP API for the curator service.

pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use handlers::AppState;

/// Build the HTTP routes over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Core operations
        .route("/notebooks/segment", post(handlers::segment_notebook))
        .route("/classify", post(handlers::classify_path))
        // Curation jobs
        .route("/curate/jobs", post(handlers::start_curation_job))
        .route("/curate/jobs/:job_id", get(handlers::get_job_status))
        // State
        .with_state(state)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
