//! Cell segmentation and markdown/code pairing.

use super::model::{CellKind, Notebook};
use super::render::TranscriptPair;
use super::{EMPTY_MARKDOWN, JUPYTER_START};
use crate::types::ContentOutcome;
use crate::DEFAULT_MAX_OUTPUT_CHARS;

/// A non-empty cell reduced to what the transcript needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedCell {
    /// Joined source text
    pub source: String,
    /// Joined text of the first output, `None` when there is none
    pub output: Option<String>,
}

/// A maximal run of consecutive cells of one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGroup {
    pub kind: CellKind,
    pub cells: Vec<SegmentedCell>,
}

impl CellGroup {
    /// The synthetic markdown group placed before a leading code group.
    pub fn placeholder_markdown() -> Self {
        Self {
            kind: CellKind::Markdown,
            cells: vec![SegmentedCell {
                source: EMPTY_MARKDOWN.to_string(),
                output: None,
            }],
        }
    }
}

/// Notebook segmenter.
///
/// Turns a raw notebook into
/// `<jupyter_start>[<jupyter_text>md]<jupyter_code>code<jupyter_output>out...`.
/// Never fails: anything it cannot use becomes [`ContentOutcome::Removed`].
#[derive(Debug, Clone)]
pub struct NotebookSegmenter {
    max_output_chars: usize,
}

impl Default for NotebookSegmenter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_OUTPUT_CHARS)
    }
}

impl NotebookSegmenter {
    /// Create a segmenter truncating outputs after `max_output_chars` characters.
    pub fn new(max_output_chars: usize) -> Self {
        Self { max_output_chars }
    }

    /// Segment raw notebook JSON.
    pub fn segment_notebook(&self, raw: &str) -> ContentOutcome {
        let notebook = match Notebook::from_json(raw) {
            Ok(notebook) => notebook,
            Err(_) => return ContentOutcome::Removed,
        };
        if !notebook.is_python() {
            return ContentOutcome::Removed;
        }

        let (cells, kinds) = segment_cells(&notebook);
        let groups = group_cells(cells, &kinds);

        match normalize_groups(groups) {
            Some(groups) => ContentOutcome::Text(self.render(&groups)),
            None => ContentOutcome::Removed,
        }
    }

    /// Segment raw notebook JSON into a string; removed content is `""`.
    pub fn segment(&self, raw: &str) -> String {
        self.segment_notebook(raw).into_text()
    }

    /// Render normalized groups. Even positions are markdown, odd are code.
    fn render(&self, groups: &[CellGroup]) -> String {
        let mut out = String::from(JUPYTER_START);
        for pair in groups.chunks_exact(2) {
            TranscriptPair::from_groups(&pair[0], &pair[1])
                .render_into(&mut out, self.max_output_chars);
        }
        out
    }
}

/// Collect non-empty cells and their kinds, in document order.
///
/// Both vectors always have the same length.
pub fn segment_cells(notebook: &Notebook) -> (Vec<SegmentedCell>, Vec<CellKind>) {
    notebook
        .cells
        .iter()
        .filter(|cell| !cell.source.is_empty())
        .map(|cell| {
            (
                SegmentedCell {
                    source: cell.source.joined(),
                    output: cell.first_output_text(),
                },
                cell.cell_type.clone(),
            )
        })
        .unzip()
}

/// Lengths of the maximal runs of equal adjacent kinds.
pub fn run_lengths(kinds: &[CellKind]) -> Vec<(CellKind, usize)> {
    let mut runs: Vec<(CellKind, usize)> = Vec::new();
    for kind in kinds {
        match runs.last_mut() {
            Some((last, len)) if last == kind => *len += 1,
            _ => runs.push((kind.clone(), 1)),
        }
    }
    runs
}

/// Partition cells into groups along the runs of `kinds`.
pub fn group_cells(cells: Vec<SegmentedCell>, kinds: &[CellKind]) -> Vec<CellGroup> {
    let mut cells = cells.into_iter();
    run_lengths(kinds)
        .into_iter()
        .map(|(kind, len)| CellGroup {
            kind,
            cells: cells.by_ref().take(len).collect(),
        })
        .collect()
}

/// Make the group sequence start on markdown and end on code.
///
/// Returns `None` when the notebook has no groups, or when the adjusted
/// sequence cannot be paired 1:1 (odd length).
pub fn normalize_groups(mut groups: Vec<CellGroup>) -> Option<Vec<CellGroup>> {
    if groups.is_empty() {
        return None;
    }
    if groups[0].kind == CellKind::Code {
        groups.insert(0, CellGroup::placeholder_markdown());
    }
    if groups.last().is_some_and(|group| group.kind == CellKind::Markdown) {
        groups.pop();
    }
    if groups.len() % 2 != 0 {
        return None;
    }
    Some(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn notebook(cells: Value) -> String {
        json!({
            "cells": cells,
            "metadata": {"kernelspec": {"display_name": "Python 3", "language": "python", "name": "python3"}},
            "nbformat": 4,
            "nbformat_minor": 5
        })
        .to_string()
    }

    fn markdown(source: &str) -> Value {
        json!({"cell_type": "markdown", "metadata": {}, "source": [source]})
    }

    fn code(source: &str, output: Option<&str>) -> Value {
        let outputs = match output {
            Some(text) => json!([{"output_type": "stream", "name": "stdout", "text": [text]}]),
            None => json!([]),
        };
        json!({"cell_type": "code", "metadata": {}, "source": [source], "outputs": outputs})
    }

    fn kinds(tags: &[&str]) -> Vec<CellKind> {
        tags.iter().map(|t| CellKind::from(t.to_string())).collect()
    }

    fn group_of(kind: CellKind, n: usize) -> CellGroup {
        CellGroup {
            kind,
            cells: (0..n)
                .map(|i| SegmentedCell {
                    source: format!("cell {}", i),
                    output: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_single_code_cell() {
        let raw = notebook(json!([code("print(1)", None)]));
        assert_eq!(
            NotebookSegmenter::default().segment(&raw),
            "<jupyter_start><jupyter_code>print(1)<jupyter_output><empty_output>"
        );
    }

    #[test]
    fn test_empty_output_text_renders_empty_output() {
        let raw = notebook(json!([markdown("Run"), code("pass", Some(""))]));
        assert_eq!(
            NotebookSegmenter::default().segment(&raw),
            "<jupyter_start><jupyter_text>Run<jupyter_code>pass<jupyter_output><empty_output>"
        );
    }

    #[test]
    fn test_leading_code_and_trailing_markdown() {
        let raw = notebook(json!([code("x = 1", None), markdown("The end")]));
        assert_eq!(
            NotebookSegmenter::default().segment(&raw),
            "<jupyter_start><jupyter_code>x = 1<jupyter_output><empty_output>"
        );
    }

    #[test]
    fn test_pairs_follow_position_not_cell_type() {
        let raw = notebook(json!([
            {"cell_type": "raw", "metadata": {}, "source": ["r"]},
            code("c", None)
        ]));
        assert_eq!(
            NotebookSegmenter::default().segment(&raw),
            "<jupyter_start><jupyter_text>r<jupyter_code>c<jupyter_output><empty_output>"
        );
    }

    #[test]
    fn test_malformed_later_output_is_ignored() {
        let raw = notebook(json!([{
            "cell_type": "code",
            "metadata": {},
            "source": ["c"],
            "outputs": [{"output_type": "stream", "text": "1"}, 5]
        }]));
        assert_eq!(
            NotebookSegmenter::default().segment(&raw),
            "<jupyter_start><jupyter_code>c<jupyter_output>1"
        );
    }

    #[test]
    fn test_markdown_then_code() {
        let raw = notebook(json!([markdown("# Title"), code("x=1", Some("1"))]));
        assert_eq!(
            NotebookSegmenter::default().segment(&raw),
            "<jupyter_start><jupyter_text>Title<jupyter_code>x=1<jupyter_output>1"
        );
    }

    #[test]
    fn test_trailing_markdown_is_dropped() {
        let segmenter = NotebookSegmenter::default();
        let with_trailing = notebook(json!([
            markdown("Intro"),
            code("x = 1", None),
            markdown("That's all")
        ]));
        let without = notebook(json!([markdown("Intro"), code("x = 1", None)]));

        assert_eq!(segmenter.segment(&with_trailing), segmenter.segment(&without));
    }

    #[test]
    fn test_markdown_only_notebook_is_start_marker() {
        let raw = notebook(json!([markdown("# Notes"), markdown("more notes")]));
        assert_eq!(NotebookSegmenter::default().segment(&raw), "<jupyter_start>");
    }

    #[test]
    fn test_odd_group_count_is_removed() {
        // markdown, code, raw: nothing to trim, three groups remain
        let raw = notebook(json!([
            markdown("Intro"),
            code("x = 1", None),
            {"cell_type": "raw", "metadata": {}, "source": ["raw text"]}
        ]));
        let segmenter = NotebookSegmenter::default();

        assert_eq!(segmenter.segment_notebook(&raw), ContentOutcome::Removed);
        assert_eq!(segmenter.segment(&raw), "");
    }

    #[test]
    fn test_non_python_notebook_is_removed() {
        let raw = json!({
            "cells": [markdown("# R"), code("x <- 1", None)],
            "metadata": {"kernelspec": {"language": "R", "name": "ir"}}
        })
        .to_string();

        assert_eq!(NotebookSegmenter::default().segment_notebook(&raw), ContentOutcome::Removed);
    }

    #[test]
    fn test_malformed_json_matches_non_python() {
        let segmenter = NotebookSegmenter::default();
        let non_python = json!({"cells": [code("x", None)], "metadata": {}}).to_string();

        assert_eq!(segmenter.segment("{not json"), segmenter.segment(&non_python));
        assert_eq!(segmenter.segment("{not json"), "");
        assert_eq!(segmenter.segment(r#"{"metadata": {"language": "python"}}"#), "");
    }

    #[test]
    fn test_empty_notebook_is_removed() {
        let raw = notebook(json!([]));
        assert_eq!(NotebookSegmenter::default().segment_notebook(&raw), ContentOutcome::Removed);
    }

    #[test]
    fn test_empty_source_cells_are_ignored() {
        let raw = notebook(json!([
            markdown("Load"),
            {"cell_type": "code", "metadata": {}, "source": [], "outputs": []},
            {"cell_type": "markdown", "metadata": {}, "source": ""},
            code("import pandas as pd", None)
        ]));

        assert_eq!(
            NotebookSegmenter::default().segment(&raw),
            "<jupyter_start><jupyter_text>Load<jupyter_code>import pandas as pd<jupyter_output><empty_output>"
        );
    }

    #[test]
    fn test_groups_join_cells() {
        let raw = notebook(json!([
            markdown("## Setup"),
            markdown("<b>Install</b> deps"),
            code("import os\n", None),
            code("import sys", Some("ok\n")),
            markdown("Next"),
            code("main()", Some("done"))
        ]));

        assert_eq!(
            NotebookSegmenter::default().segment(&raw),
            "<jupyter_start>\
             <jupyter_text>Setup Install deps<jupyter_code>import os\n\nimport sys<jupyter_output>ok\
             <jupyter_text>Next<jupyter_code>main()<jupyter_output>done"
        );
    }

    #[test]
    fn test_long_output_is_truncated() {
        let long = "x".repeat(1200);
        let raw = notebook(json!([markdown("Print"), code("print('x' * 1200)", Some(&long))]));
        let text = NotebookSegmenter::default().segment(&raw);

        let output = text.split("<jupyter_output>").nth(1).unwrap();
        assert_eq!(output, format!("{}[...]", "x".repeat(1000)));
    }

    #[test]
    fn test_custom_output_limit() {
        let raw = notebook(json!([markdown("Print"), code("print(12345)", Some("12345"))]));
        assert_eq!(
            NotebookSegmenter::new(3).segment(&raw),
            "<jupyter_start><jupyter_text>Print<jupyter_code>print(12345)<jupyter_output>123[...]"
        );
    }

    #[test]
    fn test_segmentation_is_deterministic() {
        let raw = notebook(json!([
            markdown("# A"),
            code("a = 1", Some("a")),
            markdown("B"),
            code("b = 2", None)
        ]));
        let segmenter = NotebookSegmenter::default();

        assert_eq!(segmenter.segment(&raw), segmenter.segment(&raw));
    }

    #[test]
    fn test_run_lengths_reconstruct_sequence() {
        let cases = [
            kinds(&[]),
            kinds(&["code"]),
            kinds(&["markdown", "markdown", "code", "raw", "raw", "code", "markdown"]),
            kinds(&["code", "code", "code"]),
            kinds(&["raw", "heading", "heading", "markdown"]),
        ];

        for sequence in cases {
            let runs = run_lengths(&sequence);
            let rebuilt: Vec<CellKind> = runs
                .iter()
                .flat_map(|(kind, len)| std::iter::repeat(kind.clone()).take(*len))
                .collect();

            assert_eq!(rebuilt, sequence);
            assert!(runs.windows(2).all(|w| w[0].0 != w[1].0));
        }
    }

    #[test]
    fn test_group_cells_follows_runs() {
        let cells: Vec<SegmentedCell> = (0..4)
            .map(|i| SegmentedCell {
                source: i.to_string(),
                output: None,
            })
            .collect();
        let groups = group_cells(cells.clone(), &kinds(&["markdown", "code", "code", "markdown"]));

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[1].kind, CellKind::Code);
        assert_eq!(groups[1].cells.len(), 2);

        let flattened: Vec<SegmentedCell> = groups.into_iter().flat_map(|g| g.cells).collect();
        assert_eq!(flattened, cells);
    }

    #[test]
    fn test_leading_code_gets_placeholder() {
        let groups = normalize_groups(vec![group_of(CellKind::Code, 2)]).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], CellGroup::placeholder_markdown());
        assert_eq!(groups[1].kind, CellKind::Code);
    }

    #[test]
    fn test_trailing_markdown_drops_one_group() {
        let groups = vec![
            group_of(CellKind::Markdown, 1),
            group_of(CellKind::Code, 1),
            group_of(CellKind::Markdown, 2),
            group_of(CellKind::Code, 1),
            group_of(CellKind::Markdown, 1),
        ];
        let normalized = normalize_groups(groups).unwrap();

        assert_eq!(normalized.len(), 4);
        assert_eq!(normalized.last().unwrap().kind, CellKind::Code);
    }

    #[test]
    fn test_odd_after_normalization() {
        let groups = vec![
            group_of(CellKind::Markdown, 1),
            group_of(CellKind::Code, 1),
            group_of(CellKind::Raw, 1),
        ];
        assert!(normalize_groups(groups).is_none());
        assert!(normalize_groups(Vec::new()).is_none());
    }
}
