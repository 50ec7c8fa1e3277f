//! File classification rules.
//!
//! Decides per path whether a file is skipped (binary, media, archive,
//! model weights, VCS internals), read verbatim, or segmented as a notebook.

use std::collections::HashSet;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

/// What to do with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Emit no content
    Skip,
    /// Emit the file text verbatim
    PassThrough,
    /// Linearize the notebook
    Segment,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Skip => write!(f, "skip"),
            Classification::PassThrough => write!(f, "pass_through"),
            Classification::Segment => write!(f, "segment"),
        }
    }
}

/// Configuration for file classification.
///
/// Extensions are stored lowercased and without the leading dot.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Extensions (or dotfile names) that are never read.
    pub excluded_extensions: HashSet<String>,
    /// Path components that exclude everything beneath them.
    pub excluded_directories: HashSet<String>,
    /// Suffixes of path components that exclude everything beneath them.
    pub excluded_directory_suffixes: Vec<String>,
    /// Extension of files that are segmented.
    pub notebook_extension: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            excluded_extensions: normalize_extensions(DEFAULT_EXCLUDED_EXTENSIONS.iter().copied()),
            excluded_directories: [".git", ".svn", ".hg", "__pycache__"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            excluded_directory_suffixes: vec![".xcodeproj".to_string()],
            notebook_extension: "ipynb".to_string(),
        }
    }
}

impl FilterConfig {
    /// Replace the extension denylist.
    pub fn with_excluded_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded_extensions = normalize_extensions(extensions);
        self
    }
}

fn normalize_extensions<I, S>(extensions: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    extensions
        .into_iter()
        .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[
    // Images
    "png", "jpg", "jpeg", "gif",
    // Video
    "mp4", "jfif",
    // Documents and tabular data
    "key", "pdf", "docx", "xlsx", "pptx", "csv", "tsv", "txt",
    // Audio
    "flac", "ogg", "mid", "webm", "wav", "mp3",
    // Archives
    "jar", "aar", "gz", "zip", "bz2",
    // Model weights
    "onnx", "pickle", "model", "neuron",
    // Misc binary and junk
    "npy", "index", "inv", "DS_Store", "rdb", "pack", "idx", "glb", "gltf",
    "len", "otf", "unitypackage", "ttf", "xz", "pcm", "opus",
];

/// Extension of the final path component, text after its last `.`.
///
/// `.DS_Store` yields `DS_Store`; `Makefile` yields nothing.
pub fn extension(path: &str) -> Option<&str> {
    let name = Path::new(path).file_name()?.to_str()?;
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// Classifier for repository files.
#[derive(Debug, Clone)]
pub struct FileClassifier {
    config: FilterConfig,
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FileClassifier {
    /// Create a new classifier with the given configuration.
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Create a classifier with the default denylist.
    pub fn with_defaults() -> Self {
        Self::new(FilterConfig::default())
    }

    /// Classify a path.
    pub fn classify(&self, path: &str) -> Classification {
        if self.skip_reason(path).is_some() {
            return Classification::Skip;
        }

        match extension(path) {
            Some(ext) if ext == self.config.notebook_extension => Classification::Segment,
            _ => Classification::PassThrough,
        }
    }

    /// Why a path is skipped, `None` if it is not.
    pub fn skip_reason(&self, path: &str) -> Option<String> {
        for component in Path::new(path).components() {
            if let Component::Normal(name) = component {
                let Some(name) = name.to_str() else {
                    continue;
                };

                if self.config.excluded_directories.contains(name) {
                    return Some(format!("In excluded directory: {}", name));
                }

                if self
                    .config
                    .excluded_directory_suffixes
                    .iter()
                    .any(|suffix| name.ends_with(suffix.as_str()))
                {
                    return Some(format!("In project bundle: {}", name));
                }
            }
        }

        if let Some(ext) = extension(path) {
            let ext = ext.to_lowercase();
            if self.config.excluded_extensions.contains(&ext) {
                return Some(format!("Excluded extension: {}", ext));
            }
        }

        None
    }

    /// Get the configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }
}
