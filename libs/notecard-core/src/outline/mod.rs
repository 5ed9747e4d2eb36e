//! Structural outline of a note.
//!
//! The outline is normally supplied by the host's metadata cache. Offsets are
//! byte offsets into the note text. [`markdown`] builds one from raw text for
//! hosts that have none.

pub mod markdown;

pub use markdown::build_outline;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::Range;

/// A heading with its nesting level (1-6) and byte range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub text: String,
    pub level: u8,
    pub start: usize,
    pub end: usize,
}

/// Kind of a top-level block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Heading,
    Code,
    ThematicBreak,
    Paragraph,
    List,
    BlockQuote,
    Table,
    Html,
    Other,
}

/// A top-level block of the note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub start: usize,
    pub end: usize,
}

impl Section {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Parsed frontmatter and the byte range of the whole block, fences included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    pub data: Map<String, Value>,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub headings: Vec<Heading>,
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<Frontmatter>,
}

impl Outline {
    /// Headings and thematic breaks, ordered by offset.
    pub fn delimiters(&self) -> Vec<Delimiter> {
        let mut delimiters: Vec<Delimiter> = self
            .headings
            .iter()
            .cloned()
            .map(Delimiter::Heading)
            .chain(
                self.sections
                    .iter()
                    .filter(|s| s.kind == SectionKind::ThematicBreak)
                    .cloned()
                    .map(Delimiter::Break),
            )
            .collect();
        delimiters.sort_by_key(|d| d.start());
        delimiters
    }
}

/// A structural boundary used when computing content ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Delimiter {
    Heading(Heading),
    /// A thematic break (horizontal rule).
    Break(Section),
}

impl Delimiter {
    pub fn start(&self) -> usize {
        match self {
            Self::Heading(h) => h.start,
            Self::Break(s) => s.start,
        }
    }

    pub fn end(&self) -> usize {
        match self {
            Self::Heading(h) => h.end,
            Self::Break(s) => s.end,
        }
    }

    /// Heading level, or `None` for a thematic break.
    pub fn level(&self) -> Option<u8> {
        match self {
            Self::Heading(h) => Some(h.level),
            Self::Break(_) => None,
        }
    }

    pub fn as_heading(&self) -> Option<&Heading> {
        match self {
            Self::Heading(h) => Some(h),
            Self::Break(_) => None,
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, Self::Break(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(level: u8, start: usize, end: usize) -> Heading {
        Heading {
            text: format!("h{}", start),
            level,
            start,
            end,
        }
    }

    #[test]
    fn delimiters_are_sorted_and_skip_other_sections() {
        let outline = Outline {
            headings: vec![heading(1, 0, 5), heading(2, 30, 36)],
            sections: vec![
                Section {
                    kind: SectionKind::Paragraph,
                    start: 6,
                    end: 10,
                },
                Section {
                    kind: SectionKind::ThematicBreak,
                    start: 12,
                    end: 16,
                },
            ],
            frontmatter: None,
        };
        let starts: Vec<usize> = outline.delimiters().iter().map(|d| d.start()).collect();
        assert_eq!(starts, vec![0, 12, 30]);
        assert!(outline.delimiters()[1].is_break());
        assert_eq!(outline.delimiters()[1].level(), None);
    }
}
