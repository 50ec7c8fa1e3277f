//! Content outcome of reading a single file.

use crate::REMOVAL_SENTINEL;

/// What a file contributes to the corpus.
///
/// `Removed` replaces the empty-string sentinels: unreadable files, denied
/// extensions, unusable notebooks and odd group counts all end up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentOutcome {
    /// Text to emit as-is
    Text(String),
    /// Nothing usable; the record is dropped downstream
    Removed,
}

impl ContentOutcome {
    /// Wrap text, treating the empty string as removed.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            ContentOutcome::Removed
        } else {
            ContentOutcome::Text(text)
        }
    }

    /// Check if the content was removed.
    pub fn is_removed(&self) -> bool {
        matches!(self, ContentOutcome::Removed)
    }

    /// Plain string form: removed content is the empty string.
    pub fn into_text(self) -> String {
        match self {
            ContentOutcome::Text(text) => text,
            ContentOutcome::Removed => String::new(),
        }
    }

    /// Record text form: removed content is the removal sentinel.
    pub fn into_record_text(self) -> String {
        match self {
            ContentOutcome::Text(text) => text,
            ContentOutcome::Removed => REMOVAL_SENTINEL.to_string(),
        }
    }
}
