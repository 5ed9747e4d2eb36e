//! Command strategies that turn one command declaration into many sides.

pub mod alternate_headings;
pub mod heading_and_delimiter;
pub mod heading_is_front;

use crate::declaration::{CardDeclaration, CommandDeclaration, CommandName};
use crate::error::DeclarationError;
use crate::extract::SpanKind;
use crate::outline::{Delimiter, Heading};
use crate::marker::strip_markers;
use crate::range::SectionRange;
use serde::{Deserialize, Serialize};

/// What a strategy sees of the heading section holding the command block.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    /// Level of the heading containing the command block, 0 at note level.
    pub parent_level: u8,
    /// Delimiters inside the parent section, in order.
    pub delimiters: &'a [Delimiter],
    /// Delimiter closing the parent section, `None` at note end.
    pub section_end: Option<&'a Delimiter>,
}

impl CommandContext<'_> {
    /// Heading level the command targets.
    pub fn target_level(&self, command: &CommandDeclaration) -> u8 {
        self.parent_level.saturating_add(command.level)
    }

    /// End delimiter for a side opened at `from`: the next heading at or above
    /// `level` (or thematic break when `breaks_end` is set), else the section end.
    pub fn end_after(&self, from: usize, level: u8, breaks_end: bool) -> Option<Delimiter> {
        let heading = find_next_heading(level, from, self.delimiters);
        let rule = if breaks_end {
            find_next_break(from, self.delimiters)
        } else {
            None
        };
        let next = match (heading, rule) {
            (Some(h), Some(r)) => Some(h.min(r)),
            (h, r) => h.or(r),
        };
        next.map(|idx| &self.delimiters[idx]).or(self.section_end).cloned()
    }

    /// Headings at the target level that yield no card id.
    pub fn untitled_targets(&self, command: &CommandDeclaration) -> Vec<&Heading> {
        let target = self.target_level(command);
        self.delimiters
            .iter()
            .filter_map(Delimiter::as_heading)
            .filter(|h| h.level == target && heading_card_id(h).is_none())
            .collect()
    }
}

/// A declaration synthesized by a command together with its range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSide {
    pub declaration: CardDeclaration,
    pub range: SectionRange,
    pub span: SpanKind,
}

/// Trait for card-generating commands.
pub trait CommandStrategy: Send + Sync {
    /// Command handled by this strategy.
    fn name(&self) -> CommandName;

    /// Generate sides, in note order.
    fn generate(
        &self,
        command: &CommandDeclaration,
        context: &CommandContext<'_>,
    ) -> Result<Vec<GeneratedSide>, DeclarationError>;
}

/// Get the strategy for a command.
pub fn get_strategy(name: CommandName) -> &'static dyn CommandStrategy {
    match name {
        CommandName::AlternateHeadings => &alternate_headings::AlternateHeadings,
        CommandName::HeadingAndDelimiter => &heading_and_delimiter::HeadingAndDelimiter,
        CommandName::HeadingIsFront => &heading_is_front::HeadingIsFront,
    }
}

/// Run the strategy matching `command.name`.
pub fn run_command(
    command: &CommandDeclaration,
    context: &CommandContext<'_>,
) -> Result<Vec<GeneratedSide>, DeclarationError> {
    if command.level == 0 {
        return Err(DeclarationError::Invalid("level must be at least 1".to_string()));
    }
    get_strategy(command.name).generate(command, context)
}

/// Index of the first heading at or after `from` whose level is `<= level`.
pub fn find_next_heading(level: u8, from: usize, delimiters: &[Delimiter]) -> Option<usize> {
    delimiters
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, d)| d.level().is_some_and(|l| l <= level))
        .map(|(idx, _)| idx)
}

/// Index of the first thematic break at or after `from`.
pub fn find_next_break(from: usize, delimiters: &[Delimiter]) -> Option<usize> {
    delimiters
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, d)| d.is_break())
        .map(|(idx, _)| idx)
}

/// Card id derived from a heading: its text without markers, normalized.
///
/// `None` when nothing is left, e.g. an empty heading or one holding only a marker.
pub(crate) fn heading_card_id(heading: &Heading) -> Option<String> {
    let id = crate::id::normalize_card_id(&strip_markers(&heading.text));
    (!id.is_empty()).then_some(id)
}
