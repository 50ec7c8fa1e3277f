//! Configuration types for the curator.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::{DEFAULT_CONCURRENCY, DEFAULT_DATA_FOLDER, DEFAULT_MAX_OUTPUT_CHARS};

/// Global curator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CuratorConfig {
    /// Folder holding one cloned repository per top-level directory
    pub data_folder: PathBuf,

    /// Folder the kept records are written to
    pub output_folder: PathBuf,

    /// Folder removed records are written to, if they should be kept at all
    pub removed_folder: Option<PathBuf>,

    /// File stem of the JSONL output
    pub output_name: String,

    /// Metadata attached to every record
    pub default_metadata: Map<String, Value>,

    /// Files processed concurrently
    pub concurrency: usize,

    /// Maximum files to read (-1 = unlimited)
    pub limit: i64,

    /// Files to skip before reading
    pub skip: usize,

    /// Whether to count tokens of kept records
    pub count_tokens: bool,

    /// Maximum characters kept from a notebook cell output
    pub max_output_chars: usize,

    /// Replaces the default extension denylist when set
    pub excluded_extensions: Option<Vec<String>>,

    /// HTTP port
    pub port: u16,
}

impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            data_folder: PathBuf::from(DEFAULT_DATA_FOLDER),
            output_folder: PathBuf::from("filtered_data"),
            removed_folder: None,
            output_name: "00000".to_string(),
            default_metadata: Map::new(),
            concurrency: DEFAULT_CONCURRENCY,
            limit: -1,
            skip: 0,
            count_tokens: true,
            max_output_chars: DEFAULT_MAX_OUTPUT_CHARS,
            excluded_extensions: None,
            port: 3017,
        }
    }
}

impl CuratorConfig {
    /// Load configuration from defaults, an optional `curator.toml`
    /// and `CURATOR_*` environment variables, in that order.
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("curator").required(false))
            .add_source(
                config::Environment::with_prefix("CURATOR")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("excluded_extensions"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Maximum files to read, `None` when unlimited.
    pub fn file_limit(&self) -> Option<usize> {
        usize::try_from(self.limit).ok()
    }
}
