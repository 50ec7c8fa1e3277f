//! Dataset reader: walks a data folder and emits one record per file.

mod emitter;
mod folder;

use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::types::{CuratorConfig, Record};

pub use emitter::{DocumentEmitter, Emission};
pub use folder::{relative_path, DataFolder, LocalDataFolder};

/// Reads every file of a data folder into records.
///
/// `skip` is applied before `limit`, both over the sorted file list.
#[derive(Clone)]
pub struct DatasetReader {
    folder: Arc<dyn DataFolder>,
    emitter: DocumentEmitter,
    skip: usize,
    limit: Option<usize>,
}

impl DatasetReader {
    /// Create a reader over `folder`.
    pub fn new(folder: Arc<dyn DataFolder>, emitter: DocumentEmitter) -> Self {
        Self {
            folder,
            emitter,
            skip: 0,
            limit: None,
        }
    }

    /// Create a reader over the configured local data folder.
    pub fn from_config(config: &CuratorConfig) -> Result<Self> {
        let folder = LocalDataFolder::new(&config.data_folder)?;
        let reader = Self::new(Arc::new(folder), DocumentEmitter::from_config(config))
            .with_skip(config.skip);

        Ok(match config.file_limit() {
            Some(limit) => reader.with_limit(limit),
            None => reader,
        })
    }

    /// Skip the first `skip` files.
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Read at most `limit` files.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Paths this reader will emit, in order.
    pub fn paths(&self) -> Result<Vec<String>> {
        let files = self.folder.list_files()?;
        let total = files.len();
        let paths: Vec<String> = files
            .into_iter()
            .skip(self.skip)
            .take(self.limit.unwrap_or(usize::MAX))
            .collect();

        info!(
            root = %self.folder.root().display(),
            total,
            selected = paths.len(),
            "Listed data folder"
        );
        Ok(paths)
    }

    /// Emit the record for one path.
    pub fn read_file(&self, path: &str) -> Emission {
        self.emitter.emit(self.folder.as_ref(), path)
    }

    /// Read every selected file, sequentially.
    pub fn read_all(&self) -> Result<Vec<Record>> {
        Ok(self
            .paths()?
            .iter()
            .map(|path| self.read_file(path).record)
            .collect())
    }

    /// Get the data folder.
    pub fn folder(&self) -> &Arc<dyn DataFolder> {
        &self.folder
    }
}
