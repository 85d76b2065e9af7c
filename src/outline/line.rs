//! Line preprocessing for the outline parser.
//!
//! Every raw line yields two views: the original text (terminator and BOM
//! removed, indentation intact) used for depth-sensitive rules, and the
//! normalized text (trimmed, inline edit markers such as `[a]` erased) used
//! for prefix matching.

use regex::Regex;

/// Columns of leading whitespace per outline level.
pub const INDENT_WIDTH: usize = 3;

pub const BOM: char = '\u{feff}';

#[derive(Debug, Clone)]
pub struct Line<'a> {
    /// 1-based line number in the document
    pub number: usize,
    pub original: &'a str,
    pub text: String,
    indent: usize,
}

impl<'a> Line<'a> {
    /// Outline depth, defined only when the indentation is a whole number of levels
    pub fn depth(&self) -> Option<usize> {
        if self.indent % INDENT_WIDTH == 0 {
            Some(self.indent / INDENT_WIDTH)
        } else {
            None
        }
    }

    /// Text after a fixed marker, trimmed. `None` when the marker does not match.
    pub fn value_after(&self, marker: &str) -> Option<&str> {
        self.text.strip_prefix(marker).map(str::trim)
    }

    /// Text with the leading two-character list marker ("* ") removed
    pub fn list_item(&self) -> &str {
        match self.text.char_indices().nth(2) {
            Some((idx, _)) => &self.text[idx..],
            None => "",
        }
    }
}

/// Matcher for the one- or two-character bracketed edit annotations
pub fn edit_marker() -> Regex {
    Regex::new(r"\[..?\]").expect("edit marker pattern is valid")
}

/// Preprocess a raw line. Returns `None` for lines that are blank once normalized.
pub fn preprocess<'a>(number: usize, raw: &'a str, edit_marker: &Regex) -> Option<Line<'a>> {
    let original = raw.trim_end_matches(['\n', '\r']);
    let original = original.strip_prefix(BOM).unwrap_or(original);

    let text = edit_marker.replace_all(original.trim(), "").into_owned();
    if text.trim().is_empty() {
        return None;
    }

    let indent = original
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { INDENT_WIDTH } else { 1 })
        .sum();

    Some(Line {
        number,
        original,
        text,
        indent,
    })
}
