//! Record sink splitting kept and removed records.

use std::path::Path;

use tracing::info;

use super::JsonlWriter;
use crate::error::Result;
use crate::types::{CuratorConfig, Record};

/// Counts of records routed by a sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkSummary {
    pub kept: usize,
    pub removed: usize,
}

/// Routes records to the main output, dropping removed ones.
///
/// Removed records go to the exclusion writer when one is configured.
pub struct RecordSink {
    output: JsonlWriter,
    exclusion: Option<JsonlWriter>,
    removed: usize,
}

impl RecordSink {
    /// Create a sink writing to `output_folder` and optionally `removed_folder`.
    pub fn create(
        output_folder: impl AsRef<Path>,
        removed_folder: Option<&Path>,
        name: &str,
    ) -> Result<Self> {
        let output = JsonlWriter::create(output_folder, name)?;
        let exclusion = removed_folder
            .map(|folder| JsonlWriter::create(folder, name))
            .transpose()?;

        Ok(Self {
            output,
            exclusion,
            removed: 0,
        })
    }

    /// Create a sink from the curator configuration.
    pub fn from_config(config: &CuratorConfig) -> Result<Self> {
        Self::create(
            &config.output_folder,
            config.removed_folder.as_deref(),
            &config.output_name,
        )
    }

    /// Route one record. Returns whether it was kept.
    pub fn write(&mut self, record: &Record) -> Result<bool> {
        if record.is_removed() {
            self.removed += 1;
            if let Some(exclusion) = self.exclusion.as_mut() {
                exclusion.write(record)?;
            }
            return Ok(false);
        }

        self.output.write(record)?;
        Ok(true)
    }

    /// Flush all writers.
    pub fn finish(self) -> Result<SinkSummary> {
        let output_path = self.output.path().to_path_buf();
        let kept = self.output.finish()?;
        if let Some(exclusion) = self.exclusion {
            exclusion.finish()?;
        }

        info!(
            path = %output_path.display(),
            kept,
            removed = self.removed,
            "Finished writing records"
        );

        Ok(SinkSummary {
            kept,
            removed: self.removed,
        })
    }
}
