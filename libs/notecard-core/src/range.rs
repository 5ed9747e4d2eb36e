//! Content ranges bounded by delimiters.
//!
//! A range is half-open: content runs from the end of the start delimiter to
//! the start of the end delimiter. A missing start means the note start, a
//! missing end means the note end.

use crate::outline::{Delimiter, Outline};
use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRange {
    pub start: Option<Delimiter>,
    pub end: Option<Delimiter>,
}

impl SectionRange {
    pub fn new(start: Option<Delimiter>, end: Option<Delimiter>) -> Self {
        Self { start, end }
    }

    /// Offset where the start delimiter begins (0 without one).
    pub fn outer_start(&self) -> usize {
        self.start.as_ref().map(|d| d.start()).unwrap_or(0)
    }

    /// Offset right after the start delimiter (0 without one).
    pub fn content_start(&self) -> usize {
        self.start.as_ref().map(|d| d.end()).unwrap_or(0)
    }

    /// Offset where the end delimiter begins, or `text_len` without one.
    pub fn content_end(&self, text_len: usize) -> usize {
        self.end.as_ref().map(|d| d.start()).unwrap_or(text_len)
    }

    /// Byte range from the start delimiter to the end delimiter.
    pub fn outer(&self, text_len: usize) -> Range<usize> {
        self.outer_start()..self.content_end(text_len).max(self.outer_start())
    }
}

/// A computed range and the delimiters strictly inside it, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeWalk {
    pub range: SectionRange,
    pub interior: Vec<Delimiter>,
}

/// Compute the range enclosing `section`.
///
/// The start is the last candidate beginning before the section ends. From
/// there the candidates are walked forward; the first one accepted by
/// `end_predicate(start, candidate)` becomes the end and every candidate
/// passed before it is collected as interior.
pub fn range_for_section<P>(
    section: Range<usize>,
    candidates: &[Delimiter],
    mut end_predicate: P,
) -> RangeWalk
where
    P: FnMut(Option<&Delimiter>, &Delimiter) -> bool,
{
    let mut sorted: Vec<&Delimiter> = candidates.iter().collect();
    sorted.sort_by_key(|d| d.start());

    let start_idx = sorted.iter().rposition(|d| d.start() < section.end);
    let start = start_idx.map(|idx| sorted[idx]);
    let first_after = start_idx.map(|idx| idx + 1).unwrap_or(0);

    let mut interior = Vec::new();
    let mut end = None;
    for candidate in &sorted[first_after..] {
        if end_predicate(start, candidate) {
            end = Some((*candidate).clone());
            break;
        }
        interior.push((*candidate).clone());
    }

    RangeWalk {
        range: SectionRange::new(start.cloned(), end),
        interior,
    }
}

/// Range of the heading section that contains `section`.
///
/// Candidates are the outline's headings and thematic breaks; the range ends
/// at the next heading of the same or a higher level. Declarations are only
/// legal inside heading sections, so a thematic break as start is logged.
pub fn heading_range_for_section(section: Range<usize>, outline: &Outline) -> RangeWalk {
    let candidates = outline.delimiters();
    let walk = range_for_section(section.clone(), &candidates, ends_heading_section);
    if let Some(Delimiter::Break(rule)) = &walk.range.start {
        tracing::error!(
            section_start = section.start,
            rule_start = rule.start,
            "declaration follows a thematic break instead of a heading"
        );
    }
    walk
}

/// End predicate for heading sections: a heading at or above the start's level.
///
/// Nothing ends a range that begins at the note start. A range that begins at
/// a thematic break ends at the next heading.
pub fn ends_heading_section(start: Option<&Delimiter>, candidate: &Delimiter) -> bool {
    let Some(start) = start else {
        return false;
    };
    match (start.level(), candidate.level()) {
        (Some(start_level), Some(level)) => start_level >= level,
        (None, Some(_)) => true,
        (_, None) => false,
    }
}
