//! Heading is front: every heading at the target level is a question and the
//! text below it, up to the next heading at that level or higher, its answer.

use super::{heading_card_id, CommandContext, CommandStrategy, GeneratedSide};
use crate::declaration::{CardDeclaration, CommandDeclaration, CommandName};
use crate::error::DeclarationError;
use crate::extract::SpanKind;
use crate::id::Side;
use crate::range::SectionRange;

/// Strategy for `name: heading is front`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingIsFront;

impl CommandStrategy for HeadingIsFront {
    fn name(&self) -> CommandName {
        CommandName::HeadingIsFront
    }

    fn generate(
        &self,
        command: &CommandDeclaration,
        context: &CommandContext<'_>,
    ) -> Result<Vec<GeneratedSide>, DeclarationError> {
        let target = context.target_level(command);
        let mut sides = Vec::new();

        for (idx, delimiter) in context.delimiters.iter().enumerate() {
            let Some(heading) = delimiter.as_heading() else {
                continue;
            };
            if heading.level != target {
                continue;
            }
            let Some(id) = heading_card_id(heading) else {
                tracing::debug!(offset = heading.start, "heading has no text to use as card id");
                continue;
            };
            let deck_id = &command.deck_id;

            // The front collapses onto the heading itself.
            sides.push(GeneratedSide {
                declaration: CardDeclaration::note_scoped(&id, Side::Front, deck_id.clone(), true),
                range: SectionRange::new(Some(delimiter.clone()), Some(delimiter.clone())),
                span: SpanKind::Title,
            });
            sides.push(GeneratedSide {
                declaration: CardDeclaration::note_scoped(&id, Side::Back, deck_id.clone(), true),
                range: SectionRange::new(
                    Some(delimiter.clone()),
                    context.end_after(idx + 1, target, false),
                ),
                span: SpanKind::Body,
            });
        }
        Ok(sides)
    }
}
