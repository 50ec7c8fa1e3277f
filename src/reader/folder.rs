//! File access for the reader.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{CuratorError, Result};

/// A folder of files the reader pulls from.
///
/// Paths handed out by [`DataFolder::list_files`] are relative to
/// [`DataFolder::root`] and use `/` as separator.
pub trait DataFolder: Send + Sync {
    /// Root every listed path is relative to.
    fn root(&self) -> &Path;

    /// All files below the root, recursively, sorted.
    fn list_files(&self) -> Result<Vec<String>>;

    /// Raw bytes of one file.
    fn read_bytes(&self, path: &str) -> Result<Vec<u8>>;

    /// One file as UTF-8 text. Invalid bytes are an error.
    fn read_to_string(&self, path: &str) -> Result<String> {
        String::from_utf8(self.read_bytes(path)?)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}

/// A data folder on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalDataFolder {
    root: PathBuf,
}

impl LocalDataFolder {
    /// Open a local folder. Fails if it does not exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(CuratorError::FolderNotFound { path: root });
        }
        Ok(Self { root })
    }
}

impl DataFolder for LocalDataFolder {
    fn root(&self) -> &Path {
        &self.root
    }

    fn list_files(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(false) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                files.push(to_slash_path(relative));
            }
        }
        files.sort();
        Ok(files)
    }

    fn read_bytes(&self, path: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.root.join(path))?)
    }
}

/// Join path components with `/`.
fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Path relative to `root`, without leading separators.
///
/// Paths outside `root` are returned with leading separators stripped.
pub fn relative_path(root: &Path, path: &str) -> String {
    let relative = match Path::new(path).strip_prefix(root) {
        Ok(stripped) => to_slash_path(stripped),
        Err(_) => path.to_string(),
    };
    relative
        .trim_start_matches(|c| c == '/' || c == '\\')
        .to_string()
}
