//! Job store for tracking curation job status.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::batch::BatchResult;
use crate::types::{CurationJobStatus, CurationJobStatusResponse};

/// In-memory job store for tracking curation jobs.
pub struct JobStore {
    jobs: HashMap<Uuid, JobRecord>,
}

/// Internal record for tracking a job.
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub job_id: Uuid,
    pub status: CurationJobStatus,
    pub total_files: usize,
    pub kept_records: usize,
    pub removed_records: usize,
    pub tokens: usize,
    pub error: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl JobRecord {
    /// Create a new job record.
    pub fn new(job_id: Uuid) -> Self {
        Self {
            job_id,
            status: CurationJobStatus::Pending,
            total_files: 0,
            kept_records: 0,
            removed_records: 0,
            tokens: 0,
            error: None,
            started_at: None,
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    /// Mark the job as started.
    pub fn start(&mut self) {
        self.status = CurationJobStatus::Running;
        self.started_at = Some(Utc::now());
    }

    /// Mark the job as completed with the batch counters.
    pub fn complete(&mut self, result: &BatchResult) {
        self.status = CurationJobStatus::Completed;
        self.total_files = result.total_files;
        self.kept_records = result.kept;
        self.removed_records = result.removed;
        self.tokens = result.tokens;
        self.completed_at = Some(Utc::now());
    }

    /// Mark the job as failed.
    pub fn fail(&mut self, error: String) {
        self.status = CurationJobStatus::Failed;
        self.error = Some(error);
        self.completed_at = Some(Utc::now());
    }

    /// Convert to response type.
    pub fn to_response(&self) -> CurationJobStatusResponse {
        CurationJobStatusResponse {
            job_id: self.job_id,
            status: self.status,
            total_files: self.total_files,
            kept_records: self.kept_records,
            removed_records: self.removed_records,
            tokens: self.tokens,
            error: self.error.clone(),
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }
}

impl JobStore {
    /// Create a new job store.
    pub fn new() -> Self {
        Self {
            jobs: HashMap::new(),
        }
    }

    /// Create a new job and return its ID.
    pub fn create_job(&mut self) -> Uuid {
        let job_id = Uuid::new_v4();
        self.jobs.insert(job_id, JobRecord::new(job_id));
        job_id
    }

    /// Get a job by ID.
    pub fn get_job(&self, job_id: Uuid) -> Option<&JobRecord> {
        self.jobs.get(&job_id)
    }

    /// Start a job.
    pub fn start_job(&mut self, job_id: Uuid) -> bool {
        self.update(job_id, JobRecord::start)
    }

    /// Complete a job.
    pub fn complete_job(&mut self, job_id: Uuid, result: &BatchResult) -> bool {
        self.update(job_id, |job| job.complete(result))
    }

    /// Fail a job.
    pub fn fail_job(&mut self, job_id: Uuid, error: String) -> bool {
        self.update(job_id, |job| job.fail(error))
    }

    fn update(&mut self, job_id: Uuid, apply: impl FnOnce(&mut JobRecord)) -> bool {
        match self.jobs.get_mut(&job_id) {
            Some(job) => {
                apply(job);
                true
            }
            None => false,
        }
    }

    /// Get job status as response.
    pub fn get_job_status(&self, job_id: Uuid) -> Option<CurationJobStatusResponse> {
        self.jobs.get(&job_id).map(|j| j.to_response())
    }

    /// Clean up finished jobs older than one hour.
    pub fn cleanup_old_jobs(&mut self) {
        let cutoff = Utc::now() - chrono::Duration::hours(1);
        self.jobs.retain(|_, job| match job.status {
            CurationJobStatus::Completed | CurationJobStatus::Failed => {
                job.completed_at.map_or(true, |t| t > cutoff)
            }
            _ => true,
        });
    }

    /// Number of jobs tracked.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Check if no jobs are tracked.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}
