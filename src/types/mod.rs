//! Core types for the curator.

mod config;
mod content;
mod job;
mod record;

pub use config::CuratorConfig;
pub use content::ContentOutcome;
pub use job::{
    CurationJobStatus, CurationJobStatusResponse, StartCurationJobRequest,
    StartCurationJobResponse,
};
pub use record::{Record, RecordMetadata};
