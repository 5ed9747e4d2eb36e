//! Side content extraction.
//!
//! Content is the note text minus a set of excluded byte ranges: everything
//! before the side, declaration blocks and other sides nested inside it, and
//! everything after it. The result depends only on the inputs.

use crate::marker::{find_markers, strip_markers};
use crate::outline::Delimiter;
use crate::range::SectionRange;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// How a side's start delimiter contributes to its content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    /// The start heading line belongs to the side, unless it only carries a card marker.
    #[default]
    Section,
    /// Content begins after the start delimiter.
    Body,
    /// Zero-width side: only the start heading's text.
    Title,
}

/// Display options for extracted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Drop a heading line that declares a side through an inline marker.
    pub hide_card_marker: bool,
    /// Drop the side's own declaration block and marker tokens in shown headings.
    pub hide_declaration_block: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            hide_card_marker: true,
            hide_declaration_block: true,
        }
    }
}

/// Where a side lives in its note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideRange {
    pub range: SectionRange,
    pub span: SpanKind,
    /// The declaration block (or frontmatter) that declared this side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<Range<usize>>,
}

impl SideRange {
    /// Bytes this side occupies, start delimiter included.
    pub fn footprint(&self, text_len: usize) -> Range<usize> {
        match (self.span, &self.range.start) {
            (SpanKind::Title, Some(start)) => start.start()..start.end(),
            _ => self.range.outer(text_len),
        }
    }
}

/// Extract the visible content of `side`.
///
/// `others` are the remaining sides of the same note (the side itself may be
/// included and is skipped). `declaration_blocks` are the byte ranges of every
/// declaration block in the note.
pub fn extract_content(
    text: &str,
    side: &SideRange,
    others: &[SideRange],
    declaration_blocks: &[Range<usize>],
    options: ExtractOptions,
) -> String {
    if side.span == SpanKind::Title {
        return title_content(side, options);
    }

    let len = text.len();
    let content_end = side.range.content_end(len).min(len);
    let mut excluded: Vec<Range<usize>> = Vec::new();

    let content_start = match &side.range.start {
        None => 0,
        Some(start) => {
            let hide_start = match (start, side.span) {
                (Delimiter::Break(_), _) | (_, SpanKind::Body) => true,
                (Delimiter::Heading(h), _) => {
                    options.hide_card_marker
                        && !find_markers(slice(text, h.start..h.end)).is_empty()
                }
            };
            let cut = if hide_start { start.end() } else { start.start() };
            excluded.push(0..cut);

            if let (Delimiter::Heading(h), false, true) =
                (start, hide_start, options.hide_declaration_block)
            {
                for marker in find_markers(slice(text, h.start..h.end)) {
                    excluded.push(h.start + marker.range.start..h.start + marker.range.end);
                }
            }
            cut
        }
    };

    for block in declaration_blocks {
        if block.start >= content_end || block.end <= content_start {
            continue;
        }
        let own = side.block.as_ref() == Some(block);
        if !own || options.hide_declaration_block {
            excluded.push(block.clone());
        }
    }

    let side_start = side.range.outer_start();
    for other in others {
        if other == side || other.range.start.is_none() {
            continue;
        }
        let other_start = other.range.outer_start();
        if other_start > side_start && other_start < content_end {
            excluded.push(other.footprint(len));
        }
    }

    excluded.push(content_end..len);
    remove_ranges(text, excluded).trim().to_string()
}

/// `text` without the given byte ranges. Ranges may overlap or be unsorted.
pub fn remove_ranges(text: &str, mut excluded: Vec<Range<usize>>) -> String {
    excluded.sort_by_key(|r| (r.start, r.end));
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for range in excluded {
        if range.start > cursor {
            out.push_str(slice(text, cursor..range.start));
        }
        cursor = cursor.max(range.end);
    }
    if cursor < text.len() {
        out.push_str(slice(text, cursor..text.len()));
    }
    out
}

fn title_content(side: &SideRange, options: ExtractOptions) -> String {
    let Some(Delimiter::Heading(heading)) = &side.range.start else {
        return String::new();
    };
    if options.hide_card_marker || options.hide_declaration_block {
        strip_markers(&heading.text)
    } else {
        heading.text.trim().to_string()
    }
}

fn slice(text: &str, range: Range<usize>) -> &str {
    text.get(range).unwrap_or_default()
}
