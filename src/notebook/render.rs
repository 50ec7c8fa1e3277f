//! Rendering of markdown/code pairs into transcript blocks.

use std::borrow::Cow;

use super::markdown::clean_markdown;
use super::segmenter::CellGroup;
use super::{
    EMPTY_MARKDOWN, EMPTY_OUTPUT, JUPYTER_CODE, JUPYTER_OUTPUT, JUPYTER_TEXT, TRUNCATION_MARKER,
};

/// One markdown group paired with the code group that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptPair {
    /// Cleaned markdown cells joined with a space
    pub markdown: String,
    /// Code cell sources joined with newlines
    pub code: String,
    /// Output of the last code cell
    pub output: Option<String>,
}

impl TranscriptPair {
    /// Build a pair from a markdown group and a code group.
    pub fn from_groups(markdown: &CellGroup, code: &CellGroup) -> Self {
        let markdown = markdown
            .cells
            .iter()
            .map(|cell| clean_markdown(&cell.source))
            .collect::<Vec<_>>()
            .join(" ");
        let code_text = code
            .cells
            .iter()
            .map(|cell| cell.source.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let output = code.cells.last().and_then(|cell| cell.output.clone());

        Self {
            markdown,
            code: code_text,
            output,
        }
    }

    /// Append the rendered block to `out`.
    pub fn render_into(&self, out: &mut String, max_output_chars: usize) {
        let output = render_output(self.output.as_deref(), max_output_chars);
        let markdown = self.markdown.trim();

        if markdown != EMPTY_MARKDOWN {
            out.push_str(JUPYTER_TEXT);
            out.push_str(markdown);
        }
        out.push_str(JUPYTER_CODE);
        out.push_str(self.code.trim());
        out.push_str(JUPYTER_OUTPUT);
        out.push_str(output.trim());
    }

    /// Render the block on its own.
    pub fn render(&self, max_output_chars: usize) -> String {
        let mut out = String::new();
        self.render_into(&mut out, max_output_chars);
        out
    }
}

/// Output text as it appears in the transcript.
///
/// Longer than `max_chars` characters: the first `max_chars` plus `[...]`.
pub fn render_output(output: Option<&str>, max_chars: usize) -> Cow<'_, str> {
    match output {
        None => Cow::Borrowed(EMPTY_OUTPUT),
        Some(text) => match text.char_indices().nth(max_chars) {
            Some((cut, _)) => Cow::Owned(format!("{}{}", &text[..cut], TRUNCATION_MARKER)),
            None => Cow::Borrowed(text),
        },
    }
}
