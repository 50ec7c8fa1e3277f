//! Job processor running a curation pass over a data folder.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tracing::{error, info};
use uuid::Uuid;

use super::store::JobStore;
use crate::batch::{BatchConfig, BatchProcessor, BatchResult};
use crate::error::{CuratorError, Result};
use crate::output::RecordSink;
use crate::reader::DatasetReader;
use crate::types::{CuratorConfig, Record, StartCurationJobRequest};

/// Records buffered between the batch and the sink thread
const SINK_BUFFER: usize = 256;

/// Processor that reads a data folder and writes the kept records.
pub struct JobProcessor {
    config: CuratorConfig,
}

impl JobProcessor {
    /// Create a new job processor.
    pub fn new(config: CuratorConfig) -> Self {
        Self { config }
    }

    /// Create a processor for a request.
    ///
    /// Requested folders must lie inside the configured data and output
    /// folders; relative ones are resolved against them.
    pub fn for_request(base: &CuratorConfig, request: &StartCurationJobRequest) -> Result<Self> {
        let mut config = base.clone();
        if let Some(folder) = &request.data_folder {
            config.data_folder = resolve_inside(&base.data_folder, folder)?;
        }
        if let Some(folder) = &request.output_folder {
            config.output_folder = resolve_inside(&base.output_folder, folder)?;
        }
        Ok(Self::new(config))
    }

    /// Run the job, recording its progress in `job_store`.
    pub async fn process_job(&self, job_id: Uuid, job_store: Arc<RwLock<JobStore>>) {
        info!(
            job_id = %job_id,
            data_folder = %self.config.data_folder.display(),
            "Starting curation job"
        );

        job_store.write().await.start_job(job_id);

        match self.run().await {
            Ok(result) => {
                info!(
                    job_id = %job_id,
                    kept = result.kept,
                    removed = result.removed,
                    tokens = result.tokens,
                    "Curation job complete"
                );
                job_store.write().await.complete_job(job_id, &result);
            }
            Err(e) => {
                error!(job_id = %job_id, error = %e, "Curation job failed");
                job_store.write().await.fail_job(job_id, e.to_string());
            }
        }
    }

    /// Read the data folder and write kept records to the output folder.
    ///
    /// Folder listing, file reads and sink writes all run on blocking threads.
    pub async fn run(&self) -> Result<BatchResult> {
        let config = self.config.clone();
        let reader =
            tokio::task::spawn_blocking(move || DatasetReader::from_config(&config)).await??;
        let batch = BatchProcessor::new(Arc::new(reader), BatchConfig::from_config(&self.config));

        let (tx, mut rx) = mpsc::channel::<Record>(SINK_BUFFER);
        let config = self.config.clone();
        let writer = tokio::task::spawn_blocking(move || {
            let mut sink = RecordSink::from_config(&config)?;
            while let Some(record) = rx.blocking_recv() {
                sink.write(&record)?;
            }
            sink.finish()
        });

        let result = batch.process_to(tx).await;
        writer.await??;

        result
    }

    /// Get the effective configuration.
    pub fn config(&self) -> &CuratorConfig {
        &self.config
    }
}

/// Resolve `requested` against `root`, rejecting anything that leaves it.
fn resolve_inside(root: &Path, requested: &str) -> Result<PathBuf> {
    let outside = || CuratorError::OutsideRoot {
        path: PathBuf::from(requested),
        root: root.to_path_buf(),
    };
    let requested_path = Path::new(requested);
    let relative = if requested_path.is_absolute() {
        requested_path.strip_prefix(root).map_err(|_| outside())?
    } else {
        requested_path
    };

    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(outside());
    }

    Ok(root.join(relative))
}
