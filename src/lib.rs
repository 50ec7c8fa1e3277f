//! Curator Library
//!
//! Notebook-aware corpus reader for code-model training data.
//! Classifies repository files, linearizes Jupyter notebooks into a tagged
//! markdown/code/output transcript and emits one text record per file.

pub mod api;
pub mod batch;
pub mod error;
pub mod jobs;
pub mod notebook;
pub mod output;
pub mod processing;
pub mod reader;
pub mod tokens;
pub mod types;

pub use batch::{BatchConfig, BatchProcessor, BatchResult};
pub use error::{CuratorError, Result};
pub use notebook::{segment, NotebookSegmenter};
pub use processing::{Classification, FileClassifier, FileProcessor, FilterConfig};
pub use reader::{DataFolder, DatasetReader, DocumentEmitter, LocalDataFolder};
pub use types::{ContentOutcome, CuratorConfig, Record, RecordMetadata};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::batch::*;
    pub use crate::notebook::{segment, NotebookSegmenter};
    pub use crate::processing::*;
    pub use crate::reader::*;
    pub use crate::types::*;
}

/// Maximum characters of a cell output kept in a transcript
pub const DEFAULT_MAX_OUTPUT_CHARS: usize = 1000;

/// Record text telling downstream stages to drop the record
pub const REMOVAL_SENTINEL: &str = "remove";

/// Default number of files processed concurrently
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Default folder holding one cloned repository per top-level directory
pub const DEFAULT_DATA_FOLDER: &str = "hf_public_repos";
