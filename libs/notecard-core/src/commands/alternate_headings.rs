//! Alternate headings: headings at the target level take turns being a
//! front and the back that answers it.

use super::{heading_card_id, CommandContext, CommandStrategy, GeneratedSide};
use crate::declaration::{CardDeclaration, CommandDeclaration, CommandName, DelimiterKind};
use crate::error::DeclarationError;
use crate::extract::SpanKind;
use crate::id::Side;
use crate::range::SectionRange;

/// Strategy for `name: alternate headings`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlternateHeadings;

impl CommandStrategy for AlternateHeadings {
    fn name(&self) -> CommandName {
        CommandName::AlternateHeadings
    }

    fn generate(
        &self,
        command: &CommandDeclaration,
        context: &CommandContext<'_>,
    ) -> Result<Vec<GeneratedSide>, DeclarationError> {
        let target = context.target_level(command);
        let breaks_end = command.delimiter == Some(DelimiterKind::HorizontalRule);
        let mut sides: Vec<GeneratedSide> = Vec::new();

        for (idx, delimiter) in context.delimiters.iter().enumerate() {
            let Some(heading) = delimiter.as_heading() else {
                continue;
            };
            if heading.level != target {
                continue;
            }
            let Some(own_id) = heading_card_id(heading) else {
                tracing::debug!(offset = heading.start, "heading has no text to use as card id");
                continue;
            };

            let side = if sides.len() % 2 == 0 { Side::Front } else { Side::Back };
            let id = match (side, sides.last()) {
                (Side::Back, Some(front)) => front.declaration.id.clone(),
                _ => own_id,
            };

            sides.push(GeneratedSide {
                declaration: CardDeclaration::note_scoped(&id, side, command.deck_id.clone(), true),
                range: SectionRange::new(
                    Some(delimiter.clone()),
                    context.end_after(idx + 1, target, breaks_end),
                ),
                span: SpanKind::Section,
            });
        }

        if sides.len() % 2 == 1 {
            tracing::debug!(
                id = sides.last().map(|s| s.declaration.id.as_str()).unwrap_or_default(),
                "alternate headings left a front without a back"
            );
        }
        Ok(sides)
    }
}
