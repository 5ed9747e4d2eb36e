//! Inline side markers in heading text.
//!
//! A heading such as `## What is ownership? front@own` declares the front of
//! the note-scoped card `own`. The side word is case-insensitive and may be
//! abbreviated to `f` / `b`. The token must start the text or follow
//! whitespace, and the id runs to the next whitespace.

use crate::id::{normalize_card_id, Side};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|\s)((front|back|f|b)@(\S+))").expect("valid marker regex"));

/// A marker found in a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMarker {
    pub side: Side,
    /// Normalized card id.
    pub id: String,
    /// Byte range of the whole token within the scanned text.
    pub range: Range<usize>,
}

/// Every marker in `text`, in order of appearance.
pub fn find_markers(text: &str) -> Vec<InlineMarker> {
    MARKER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let token = caps.get(1)?;
            let side = Side::parse(caps.get(2)?.as_str())?;
            let id = normalize_card_id(caps.get(3)?.as_str());
            Some(InlineMarker {
                side,
                id,
                range: token.range(),
            })
        })
        .collect()
}

/// The first marker in `text`, if any.
pub fn find_marker(text: &str) -> Option<InlineMarker> {
    find_markers(text).into_iter().next()
}

/// `text` with every marker token removed and the result trimmed.
pub fn strip_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for marker in find_markers(text) {
        out.push_str(&text[cursor..marker.range.start]);
        cursor = marker.range.end;
    }
    out.push_str(&text[cursor..]);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn finds_front_marker() {
        let marker = find_marker("front@x").unwrap();
        assert_eq!(marker.side, Side::Front);
        assert_eq!(marker.id, "x");
        assert_eq!(marker.range, 0..7);
    }

    #[test]
    fn case_insensitive_and_abbreviated() {
        let marker = find_marker("What is Rust? B@Rust-Def").unwrap();
        assert_eq!(marker.side, Side::Back);
        assert_eq!(marker.id, "rust-def");
        assert_eq!(&"What is Rust? B@Rust-Def"[marker.range], "B@Rust-Def");
    }

    #[test]
    fn requires_word_start() {
        assert!(find_marker("email me at bob@example.com").is_none());
        assert!(find_marker("forefront@x").is_none());
    }

    #[test]
    fn offsets_within_heading_line() {
        let line = "## Title front@abc\n";
        let marker = find_marker(line).unwrap();
        assert_eq!(&line[marker.range.clone()], "front@abc");
    }

    #[test]
    fn strip_removes_every_marker() {
        assert_eq!(strip_markers("Title front@a  back@b tail"), "Title tail");
        assert_eq!(strip_markers("plain"), "plain");
    }
}
