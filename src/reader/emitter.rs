//! Document emitter: one record per path.

use serde_json::{Map, Value};
use tracing::debug;

use super::folder::{relative_path, DataFolder};
use crate::processing::{Classification, FileProcessor};
use crate::types::{ContentOutcome, CuratorConfig, Record};

/// A record together with how its file was classified.
#[derive(Debug, Clone)]
pub struct Emission {
    pub classification: Classification,
    pub record: Record,
}

/// Wraps file content and provenance metadata into records.
///
/// Skipped files are never read. Read and decode failures become removed
/// content rather than errors.
#[derive(Debug, Clone, Default)]
pub struct DocumentEmitter {
    processor: FileProcessor,
    default_metadata: Map<String, Value>,
}

impl DocumentEmitter {
    /// Create a new emitter.
    pub fn new(processor: FileProcessor, default_metadata: Map<String, Value>) -> Self {
        Self {
            processor,
            default_metadata,
        }
    }

    /// Create an emitter from the curator configuration.
    pub fn from_config(config: &CuratorConfig) -> Self {
        Self::new(
            FileProcessor::from_config(config),
            config.default_metadata.clone(),
        )
    }

    /// Emit the record for one path of `folder`.
    pub fn emit(&self, folder: &dyn DataFolder, path: &str) -> Emission {
        let file_path = relative_path(folder.root(), path);
        let classification = self.processor.classify(&file_path);

        let content = match classification {
            Classification::Skip => ContentOutcome::Removed,
            _ => match folder.read_bytes(path) {
                Ok(bytes) => self.processor.process_classified(classification, &bytes),
                Err(e) => {
                    debug!(path = %file_path, error = %e, "Failed to read file, removing");
                    ContentOutcome::Removed
                }
            },
        };

        debug!(
            path = %file_path,
            %classification,
            removed = content.is_removed(),
            "Emitting document"
        );

        Emission {
            classification,
            record: self.record(&file_path, content),
        }
    }

    /// Build a record for already computed content.
    pub fn record(&self, file_path: &str, content: ContentOutcome) -> Record {
        Record::new(file_path, content, &self.default_metadata)
    }

    /// Get the file processor.
    pub fn processor(&self) -> &FileProcessor {
        &self.processor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::LocalDataFolder;
    use serde_json::json;
    use std::fs;

    fn folder_with(files: &[(&str, &str)]) -> (tempfile::TempDir, LocalDataFolder) {
        let dir = tempfile::tempdir().unwrap();
        for (path, content) in files {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        let folder = LocalDataFolder::new(dir.path()).unwrap();
        (dir, folder)
    }

    #[test]
    fn test_emit_source_file() {
        let (_dir, folder) = folder_with(&[("peft/src/lora.py", "rank = 8\n")]);
        let emission = DocumentEmitter::default().emit(&folder, "peft/src/lora.py");

        assert_eq!(emission.classification, Classification::PassThrough);
        assert_eq!(emission.record.text, "rank = 8\n");
        assert_eq!(emission.record.metadata.file_path, "peft/src/lora.py");
        assert_eq!(emission.record.metadata.repo_id, "peft");
    }

    #[test]
    fn test_emit_absolute_path() {
        let (dir, folder) = folder_with(&[("trl/setup.py", "setup()")]);
        let absolute = dir.path().join("trl/setup.py");
        let emission = DocumentEmitter::default().emit(&folder, absolute.to_str().unwrap());

        assert_eq!(emission.record.metadata.file_path, "trl/setup.py");
        assert_eq!(emission.record.id, "trl/setup.py/0");
    }

    #[test]
    fn test_emit_skipped_file() {
        let (_dir, folder) = folder_with(&[("peft/docs/logo.png", "PNG")]);
        let emission = DocumentEmitter::default().emit(&folder, "peft/docs/logo.png");

        assert_eq!(emission.classification, Classification::Skip);
        assert!(emission.record.is_removed());
    }

    #[test]
    fn test_unreadable_file_is_removed() {
        let (_dir, folder) = folder_with(&[]);
        let emission = DocumentEmitter::default().emit(&folder, "peft/gone.py");

        assert_eq!(emission.classification, Classification::PassThrough);
        assert_eq!(emission.record.text, "remove");
    }

    #[test]
    fn test_default_metadata_is_attached() {
        let (_dir, folder) = folder_with(&[("peft/a.py", "a = 1")]);
        let defaults = json!({"dataset": "hf_stack"}).as_object().cloned().unwrap();
        let emitter = DocumentEmitter::new(FileProcessor::default(), defaults);

        let record = emitter.emit(&folder, "peft/a.py").record;
        assert_eq!(record.metadata.extra.get("dataset"), Some(&json!("hf_stack")));
    }
}
