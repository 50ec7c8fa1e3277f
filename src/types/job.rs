//! Curation job request/response definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to start a curation job.
///
/// Omitted folders fall back to the service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartCurationJobRequest {
    /// Folder holding one cloned repository per top-level directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_folder: Option<String>,

    /// Folder the JSONL output is written to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_folder: Option<String>,
}

/// Response when starting a curation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartCurationJobResponse {
    /// ID of the created job
    pub job_id: Uuid,

    /// Whether the job was accepted
    pub accepted: bool,

    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Status of a curation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurationJobStatus {
    /// Job is queued but not started
    Pending,
    /// Job is currently running
    Running,
    /// Job completed successfully
    Completed,
    /// Job failed
    Failed,
}

/// Response with job status information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationJobStatusResponse {
    /// ID of the job
    pub job_id: Uuid,

    /// Current status
    pub status: CurationJobStatus,

    /// Files found in the data folder (after skip/limit)
    pub total_files: usize,

    /// Records written to the output
    pub kept_records: usize,

    /// Records dropped as removed
    pub removed_records: usize,

    /// Tokens in kept records
    pub tokens: usize,

    /// Error message if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// When the job started
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    /// When the job completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}
