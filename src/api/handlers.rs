//! HTTP request handlers for the curator service.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::jobs::{JobProcessor, JobStore};
use crate::processing::{Classification, FileProcessor};
use crate::types::{CuratorConfig, StartCurationJobRequest, StartCurationJobResponse};
use uuid::Uuid;

/// Application state shared across handlers.
pub struct AppState {
    pub config: CuratorConfig,
    pub processor: FileProcessor,
    pub job_store: Arc<RwLock<JobStore>>,
}

impl AppState {
    /// Create state from the curator configuration.
    pub fn new(config: CuratorConfig) -> Self {
        Self {
            processor: FileProcessor::from_config(&config),
            job_store: Arc::new(RwLock::new(JobStore::new())),
            config,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Segment notebook request.
#[derive(Debug, Deserialize)]
pub struct SegmentRequest {
    /// Raw notebook JSON text
    notebook: String,
}

/// Segment notebook response.
#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    text: String,
    removed: bool,
}

/// Linearize one notebook.
pub async fn segment_notebook(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SegmentRequest>,
) -> Json<SegmentResponse> {
    let outcome = state.processor.segmenter().segment_notebook(&request.notebook);

    Json(SegmentResponse {
        removed: outcome.is_removed(),
        text: outcome.into_text(),
    })
}

/// Classify path request.
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    path: String,
}

/// Classify path response.
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    path: String,
    classification: Classification,
}

/// Classify one path.
pub async fn classify_path(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ClassifyRequest>,
) -> Json<ClassifyResponse> {
    let classification = state.processor.classify(&request.path);

    Json(ClassifyResponse {
        path: request.path,
        classification,
    })
}

/// Start a curation job.
///
/// Folders outside the configured ones are rejected with 400.
pub async fn start_curation_job(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartCurationJobRequest>,
) -> Result<Json<StartCurationJobResponse>, StatusCode> {
    let processor = JobProcessor::for_request(&state.config, &request).map_err(|e| {
        warn!(error = %e, "Rejected curation job request");
        StatusCode::BAD_REQUEST
    })?;

    info!(
        data_folder = %processor.config().data_folder.display(),
        output_folder = %processor.config().output_folder.display(),
        "Received curation job request"
    );

    let job_id = {
        let mut store = state.job_store.write().await;
        store.cleanup_old_jobs();
        store.create_job()
    };
    let job_store = Arc::clone(&state.job_store);

    tokio::spawn(async move {
        processor.process_job(job_id, job_store).await;
    });

    Ok(Json(StartCurationJobResponse {
        job_id,
        accepted: true,
        message: None,
    }))
}

/// Get job status.
pub async fn get_job_status(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, StatusCode> {
    let store = state.job_store.read().await;

    match store.get_job_status(job_id) {
        Some(status) => Ok(Json(status)),
        None => Err(StatusCode::NOT_FOUND),
    }
}
