//! File processor for the corpus pipeline.
//!
//! Combines classification, decoding and notebook segmentation to turn the
//! raw bytes of one file into its corpus content.

use std::str;

use crate::notebook::NotebookSegmenter;
use crate::processing::filter::{Classification, FileClassifier, FilterConfig};
use crate::types::{ContentOutcome, CuratorConfig};

/// File processor turning file bytes into corpus content.
#[derive(Debug, Clone, Default)]
pub struct FileProcessor {
    classifier: FileClassifier,
    segmenter: NotebookSegmenter,
}

impl FileProcessor {
    /// Create a new file processor.
    pub fn new(classifier: FileClassifier, segmenter: NotebookSegmenter) -> Self {
        Self {
            classifier,
            segmenter,
        }
    }

    /// Create a file processor from the curator configuration.
    pub fn from_config(config: &CuratorConfig) -> Self {
        let mut filter = FilterConfig::default();
        if let Some(extensions) = &config.excluded_extensions {
            filter = filter.with_excluded_extensions(extensions);
        }

        Self::new(
            FileClassifier::new(filter),
            NotebookSegmenter::new(config.max_output_chars),
        )
    }

    /// Classify a path.
    pub fn classify(&self, path: &str) -> Classification {
        self.classifier.classify(path)
    }

    /// Process a file's bytes according to an already computed classification.
    ///
    /// Undecodable bytes produce removed content.
    pub fn process_classified(&self, classification: Classification, content: &[u8]) -> ContentOutcome {
        if classification == Classification::Skip {
            return ContentOutcome::Removed;
        }

        let Some(text) = self.decode(content) else {
            return ContentOutcome::Removed;
        };

        match classification {
            Classification::Segment => self.segmenter.segment_notebook(&text),
            _ => ContentOutcome::from_text(text),
        }
    }

    /// Classify and process a file's bytes.
    pub fn process(&self, path: &str, content: &[u8]) -> ContentOutcome {
        self.process_classified(self.classify(path), content)
    }

    /// Decode UTF-8 content with universal newlines.
    pub fn decode(&self, content: &[u8]) -> Option<String> {
        str::from_utf8(content)
            .ok()
            .map(|text| self.normalize_line_endings(text))
    }

    /// Normalize line endings to Unix-style (LF).
    pub fn normalize_line_endings(&self, content: &str) -> String {
        content.replace("\r\n", "\n").replace('\r', "\n")
    }

    /// Get the underlying classifier.
    pub fn classifier(&self) -> &FileClassifier {
        &self.classifier
    }

    /// Get the notebook segmenter.
    pub fn segmenter(&self) -> &NotebookSegmenter {
        &self.segmenter
    }
}
