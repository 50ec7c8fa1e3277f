//! Record type definitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ContentOutcome;
use crate::REMOVAL_SENTINEL;

/// One emitted document, the unit handed to downstream pipeline stages.
///
/// Serialized as one JSON Lines row:
/// `{"text": ..., "id": ..., "metadata": {"file_path": ..., "repo_id": ..., ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Document text, or the removal sentinel
    pub text: String,

    /// Identifier, `<file_path>/<index in file>`
    pub id: String,

    /// Provenance metadata
    pub metadata: RecordMetadata,
}

/// Metadata attached to every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Path relative to the data folder
    pub file_path: String,

    /// First segment of `file_path`
    pub repo_id: String,

    /// Pipeline-wide default metadata
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecordMetadata {
    /// Build metadata for a relative path, merging in default metadata.
    ///
    /// Defaults never override `file_path` or `repo_id`.
    pub fn for_path(file_path: &str, defaults: &Map<String, Value>) -> Self {
        let extra = defaults
            .iter()
            .filter(|(key, _)| key.as_str() != "file_path" && key.as_str() != "repo_id")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            file_path: file_path.to_string(),
            repo_id: repo_id(file_path).to_string(),
            extra,
        }
    }
}

impl Record {
    /// Create a record for a relative path.
    pub fn new(file_path: &str, content: ContentOutcome, defaults: &Map<String, Value>) -> Self {
        Self {
            text: content.into_record_text(),
            id: format!("{}/0", file_path),
            metadata: RecordMetadata::for_path(file_path, defaults),
        }
    }

    /// Check if downstream stages should drop this record.
    pub fn is_removed(&self) -> bool {
        self.text == REMOVAL_SENTINEL
    }

    /// Get the length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Repository identifier: the first segment of a relative path.
pub fn repo_id(file_path: &str) -> &str {
    file_path.split('/').next().unwrap_or_default()
}
