//! Batch processing of a whole data folder.

use std::sync::Arc;

use futures::stream::{self, Stream, StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tracing::{info, warn};

use crate::error::Result;
use crate::processing::Classification;
use crate::reader::{DatasetReader, Emission};
use crate::tokens::count_tokens;
use crate::types::{CuratorConfig, Record};
use crate::DEFAULT_CONCURRENCY;

/// Configuration for batch processing.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum files processed concurrently
    pub concurrency: usize,
    /// Whether to count tokens of kept records
    pub count_tokens: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            count_tokens: true,
        }
    }
}

impl BatchConfig {
    /// Batch settings from the curator configuration.
    pub fn from_config(config: &CuratorConfig) -> Self {
        Self {
            concurrency: config.concurrency,
            count_tokens: config.count_tokens,
        }
    }
}

/// Result of batch processing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub total_files: usize,
    /// Records with usable text
    pub kept: usize,
    /// Records carrying the removal sentinel
    pub removed: usize,
    /// Files classified as notebooks
    pub segmented: usize,
    /// Files never read because of their path
    pub skipped: usize,
    /// Files whose processing task panicked
    pub failed: usize,
    /// Tokens in kept records
    pub tokens: usize,
}

impl BatchResult {
    fn new(total_files: usize) -> Self {
        Self {
            total_files,
            ..Default::default()
        }
    }

    fn add(&mut self, emission: &Emission, tokens: usize) {
        match emission.classification {
            Classification::Skip => self.skipped += 1,
            Classification::Segment => self.segmented += 1,
            Classification::PassThrough => {}
        }
        if emission.record.is_removed() {
            self.removed += 1;
        } else {
            self.kept += 1;
        }
        self.tokens += tokens;
    }
}

/// Batch processor running the reader over many files at once.
///
/// Files are processed on blocking tasks, at most `concurrency` at a time.
/// Records come out in path order.
pub struct BatchProcessor {
    reader: Arc<DatasetReader>,
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a new batch processor.
    pub fn new(reader: Arc<DatasetReader>, config: BatchConfig) -> Self {
        Self { reader, config }
    }

    /// Process every file and return all records.
    pub async fn process(&self) -> Result<(Vec<Record>, BatchResult)> {
        let mut records = Vec::new();
        let result = self
            .process_with(|record| {
                records.push(record);
                Ok(())
            })
            .await?;
        Ok((records, result))
    }

    /// Process every file, handing each record to `handle` in path order.
    ///
    /// Stops at the first error returned by `handle`.
    pub async fn process_with<F>(&self, mut handle: F) -> Result<BatchResult>
    where
        F: FnMut(Record) -> Result<()>,
    {
        let paths = self.list_paths().await?;
        let mut result = BatchResult::new(paths.len());
        let mut emissions = self.emissions(paths);

        while let Some(joined) = emissions.next().await {
            match joined {
                Ok((emission, tokens)) => {
                    result.add(&emission, tokens);
                    handle(emission.record)?;
                }
                Err(e) => {
                    result.failed += 1;
                    warn!(error = %e, "File task failed");
                }
            }
        }

        log_result(&result);
        Ok(result)
    }

    /// Process every file, sending each record to `tx` in path order.
    ///
    /// Stops early when the receiver is dropped.
    pub async fn process_to(&self, tx: mpsc::Sender<Record>) -> Result<BatchResult> {
        let paths = self.list_paths().await?;
        let mut result = BatchResult::new(paths.len());
        let mut emissions = self.emissions(paths);

        while let Some(joined) = emissions.next().await {
            match joined {
                Ok((emission, tokens)) => {
                    result.add(&emission, tokens);
                    if tx.send(emission.record).await.is_err() {
                        warn!("Record receiver closed, stopping batch");
                        break;
                    }
                }
                Err(e) => {
                    result.failed += 1;
                    warn!(error = %e, "File task failed");
                }
            }
        }

        log_result(&result);
        Ok(result)
    }

    /// List the reader's paths on a blocking thread.
    async fn list_paths(&self) -> Result<Vec<String>> {
        let reader = Arc::clone(&self.reader);
        tokio::task::spawn_blocking(move || reader.paths()).await?
    }

    /// Read files on blocking tasks, at most `concurrency` at a time, in order.
    fn emissions(
        &self,
        paths: Vec<String>,
    ) -> impl Stream<Item = std::result::Result<(Emission, usize), JoinError>> + Unpin + '_ {
        let concurrency = self.config.concurrency.max(1);
        let with_tokens = self.config.count_tokens;

        info!(total_files = paths.len(), concurrency, "Starting batch processing");

        stream::iter(paths.into_iter().map(move |path| {
            let reader = Arc::clone(&self.reader);
            tokio::task::spawn_blocking(move || {
                let emission = reader.read_file(&path);
                let tokens = if with_tokens && !emission.record.is_removed() {
                    count_tokens(&emission.record.text)
                } else {
                    0
                };
                (emission, tokens)
            })
        }))
        .buffered(concurrency)
    }
}

fn log_result(result: &BatchResult) {
    info!(
        kept = result.kept,
        removed = result.removed,
        segmented = result.segmented,
        skipped = result.skipped,
        failed = result.failed,
        tokens = result.tokens,
        "Batch processing complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{DocumentEmitter, LocalDataFolder};
    use std::fs;

    const NOTEBOOK: &str = r#"{
        "cells": [{"cell_type": "code", "metadata": {}, "source": ["print(1)"], "outputs": []}],
        "metadata": {"kernelspec": {"name": "python3"}}
    }"#;

    fn repos() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (path, content) in [
            ("peft/.git/HEAD", "ref: refs/heads/main"),
            ("peft/examples/lora.ipynb", NOTEBOOK),
            ("peft/src/model.py", "class Model: pass"),
            ("trl/empty.py", ""),
            ("trl/logo.png", "PNG"),
        ] {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        dir
    }

    fn processor(dir: &tempfile::TempDir, config: BatchConfig) -> BatchProcessor {
        let folder = LocalDataFolder::new(dir.path()).unwrap();
        let reader = DatasetReader::new(Arc::new(folder), DocumentEmitter::default());
        BatchProcessor::new(Arc::new(reader), config)
    }

    #[tokio::test]
    async fn test_process_counts() {
        let dir = repos();
        let config = BatchConfig {
            concurrency: 2,
            count_tokens: false,
        };
        let (records, result) = processor(&dir, config).process().await.unwrap();

        assert_eq!(records.len(), 5);
        assert_eq!(
            result,
            BatchResult {
                total_files: 5,
                kept: 2,
                removed: 3,
                segmented: 1,
                skipped: 2,
                failed: 0,
                tokens: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_records_keep_path_order() {
        let dir = repos();
        let (records, _) = processor(&dir, BatchConfig::default()).process().await.unwrap();

        let paths: Vec<&str> = records
            .iter()
            .map(|r| r.metadata.file_path.as_str())
            .collect();
        assert_eq!(
            paths,
            vec![
                "peft/.git/HEAD",
                "peft/examples/lora.ipynb",
                "peft/src/model.py",
                "trl/empty.py",
                "trl/logo.png",
            ]
        );
        assert_eq!(
            records[1].text,
            "<jupyter_start><jupyter_code>print(1)<jupyter_output><empty_output>"
        );
    }

    #[tokio::test]
    async fn test_tokens_only_for_kept_records() {
        let dir = repos();
        let (records, result) = processor(&dir, BatchConfig::default()).process().await.unwrap();

        let expected: usize = records
            .iter()
            .filter(|r| !r.is_removed())
            .map(|r| count_tokens(&r.text))
            .sum();
        assert_eq!(result.tokens, expected);
        assert!(result.tokens > 0);
    }

    #[tokio::test]
    async fn test_handler_error_stops_batch() {
        let dir = repos();
        let mut seen = 0;
        let result = processor(&dir, BatchConfig::default())
            .process_with(|_| {
                seen += 1;
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(seen, 1);
    }

    #[tokio::test]
    async fn test_process_to_channel() {
        let dir = repos();
        let (tx, mut rx) = mpsc::channel::<Record>(2);
        let batch = processor(&dir, BatchConfig::default());

        let receive = tokio::spawn(async move {
            let mut paths = Vec::new();
            while let Some(record) = rx.recv().await {
                paths.push(record.metadata.file_path);
            }
            paths
        });
        let result = batch.process_to(tx).await.unwrap();
        let paths = receive.await.unwrap();

        assert_eq!(result.total_files, 5);
        assert_eq!(paths.len(), 5);
        assert_eq!(paths[0], "peft/.git/HEAD");
    }

    #[tokio::test]
    async fn test_process_to_stops_when_receiver_drops() {
        let dir = repos();
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let result = processor(&dir, BatchConfig::default())
            .process_to(tx)
            .await
            .unwrap();
        assert_eq!(result.kept + result.removed, 1);
    }
}
