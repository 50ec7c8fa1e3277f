//! Markdown cleaning for transcript text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"<.*?>").unwrap();
    static ref NEWLINES: Regex = Regex::new(r"\n+").unwrap();
}

/// Clean one markdown cell: strip HTML tags, remove newline runs and
/// remove every `#`.
///
/// Tags are matched within a line; a tag spanning lines is left alone.
pub fn clean_markdown(text: &str) -> String {
    let text = HTML_TAG.replace_all(text, "");
    let text = NEWLINES.replace_all(&text, "");
    text.replace('#', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_heading_markers() {
        assert_eq!(clean_markdown("# Title"), " Title");
        assert_eq!(clean_markdown("## Step 1\nLoad data"), " Step 1Load data");
    }

    #[test]
    fn test_strips_html_tags() {
        assert_eq!(
            clean_markdown("<div align=\"center\"><b>Note</b></div>"),
            "Note"
        );
        assert_eq!(clean_markdown("<img src=\"a.png\"/>\n\nCaption"), "Caption");
    }

    #[test]
    fn test_multiline_tag_is_kept() {
        assert_eq!(clean_markdown("<a\nhref=x>y"), "<ahref=x>y");
    }
}
