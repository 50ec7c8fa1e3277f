//! Jupyter notebook linearization.
//!
//! A notebook is reduced to its non-empty cells, consecutive cells of one
//! type are grouped, and markdown groups are paired with the code group that
//! follows them. Each pair renders as one tagged block of the transcript.

mod markdown;
pub mod model;
mod render;
mod segmenter;

pub use markdown::clean_markdown;
pub use model::{Cell, CellKind, Fragments, Notebook, Output};
pub use render::{render_output, TranscriptPair};
pub use segmenter::{
    group_cells, normalize_groups, run_lengths, segment_cells, CellGroup, NotebookSegmenter,
    SegmentedCell,
};

/// Opens every transcript
pub const JUPYTER_START: &str = "<jupyter_start>";
/// Precedes markdown text
pub const JUPYTER_TEXT: &str = "<jupyter_text>";
/// Precedes code
pub const JUPYTER_CODE: &str = "<jupyter_code>";
/// Precedes the cell output
pub const JUPYTER_OUTPUT: &str = "<jupyter_output>";
/// Stands in for a code cell without text output
pub const EMPTY_OUTPUT: &str = "<empty_output>";
/// Appended to truncated outputs
pub const TRUNCATION_MARKER: &str = "[...]";
/// Markdown text of the placeholder group put before leading code
pub(crate) const EMPTY_MARKDOWN: &str = "empty";

/// Segment a raw notebook with the default output limit.
///
/// Returns `""` when the notebook is unusable.
pub fn segment(raw: &str) -> String {
    NotebookSegmenter::default().segment(raw)
}
