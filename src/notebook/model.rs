//! The parts of the Jupyter notebook format the segmenter reads.

use serde::Deserialize;
use serde_json::Value;

/// A parsed notebook document.
#[derive(Debug, Clone, Deserialize)]
pub struct Notebook {
    /// Cells in document order
    pub cells: Vec<Cell>,

    /// Notebook-level metadata (kernelspec, language_info, ...)
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl Notebook {
    /// Parse a notebook from its JSON text.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Check if the metadata, serialized back to JSON, mentions Python.
    ///
    /// This is a substring test on `py`, so `"python3"`, `"ipython"` and
    /// `".py"` all qualify.
    pub fn is_python(&self) -> bool {
        self.metadata
            .as_ref()
            .and_then(|metadata| serde_json::to_string(metadata).ok())
            .is_some_and(|text| text.contains("py"))
    }
}

/// One notebook cell.
#[derive(Debug, Clone, Deserialize)]
pub struct Cell {
    pub cell_type: CellKind,

    pub source: Fragments,

    /// Only the first output is ever read; the rest stay unvalidated
    #[serde(default)]
    pub outputs: Vec<Value>,
}

impl Cell {
    /// Text of the first output, if it has a non-empty `text` field.
    pub fn first_output_text(&self) -> Option<String> {
        let first = self.outputs.first()?;
        let output = Output::deserialize(first).ok()?;
        output
            .text
            .as_ref()
            .map(Fragments::joined)
            .filter(|text| !text.is_empty())
    }
}

/// Cell type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum CellKind {
    Markdown,
    Code,
    Raw,
    /// Any other tag, kept verbatim so distinct tags never merge
    Other(String),
}

impl From<String> for CellKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "markdown" => CellKind::Markdown,
            "code" => CellKind::Code,
            "raw" => CellKind::Raw,
            _ => CellKind::Other(tag),
        }
    }
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellKind::Markdown => write!(f, "markdown"),
            CellKind::Code => write!(f, "code"),
            CellKind::Raw => write!(f, "raw"),
            CellKind::Other(tag) => write!(f, "{}", tag),
        }
    }
}

/// Multi-line text as stored in notebooks: a string or a list of fragments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Fragments {
    Text(String),
    Lines(Vec<String>),
}

impl Fragments {
    /// Concatenate the fragments.
    pub fn joined(&self) -> String {
        match self {
            Fragments::Text(text) => text.clone(),
            Fragments::Lines(lines) => lines.concat(),
        }
    }

    /// A list with no fragments, or an empty string.
    ///
    /// `[""]` is not empty: it holds one fragment.
    pub fn is_empty(&self) -> bool {
        match self {
            Fragments::Text(text) => text.is_empty(),
            Fragments::Lines(lines) => lines.is_empty(),
        }
    }
}

/// The first output of a cell. Only stream-style `text` is read.
#[derive(Debug, Clone, Deserialize)]
pub struct Output {
    #[serde(default)]
    pub text: Option<Fragments>,
}
