//! Heading and delimiter: a heading plus the text up to the next horizontal
//! rule is the front, the text after the rule up to the next sibling heading
//! is the back.

use super::{heading_card_id, CommandContext, CommandStrategy, GeneratedSide};
use crate::declaration::{CardDeclaration, CommandDeclaration, CommandName, DelimiterKind};
use crate::error::DeclarationError;
use crate::extract::SpanKind;
use crate::id::Side;
use crate::outline::Delimiter;
use crate::range::SectionRange;

/// Strategy for `name: heading and delimiter`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingAndDelimiter;

enum State<'a> {
    BetweenFronts,
    InFront {
        heading: &'a Delimiter,
        id: String,
        level: u8,
    },
    InBack {
        id: String,
        rule: &'a Delimiter,
        front_level: u8,
    },
}

impl CommandStrategy for HeadingAndDelimiter {
    fn name(&self) -> CommandName {
        CommandName::HeadingAndDelimiter
    }

    fn generate(
        &self,
        command: &CommandDeclaration,
        context: &CommandContext<'_>,
    ) -> Result<Vec<GeneratedSide>, DeclarationError> {
        if command.delimiter == Some(DelimiterKind::Heading) {
            return Err(DeclarationError::Invalid(
                "heading and delimiter only splits on a horizontal rule".to_string(),
            ));
        }

        let target = context.target_level(command);
        let deck_id = &command.deck_id;
        let mut sides = Vec::new();
        let mut state = State::BetweenFronts;

        for delimiter in context.delimiters {
            // Close whatever the current heading closes before looking at it as a new front.
            if let Some(level) = delimiter.level() {
                state = match state {
                    State::InBack {
                        id,
                        rule,
                        front_level,
                    } if level <= front_level => {
                        sides.push(back_side(&id, rule, Some(delimiter.clone()), deck_id));
                        State::BetweenFronts
                    }
                    State::InFront {
                        heading,
                        level: front_level,
                        ..
                    } if level <= front_level => {
                        tracing::debug!(
                            offset = heading.start(),
                            "heading has no delimiter before the next heading"
                        );
                        State::BetweenFronts
                    }
                    other => other,
                };
            }

            state = match (state, delimiter) {
                (State::BetweenFronts, Delimiter::Heading(h)) if h.level == target => {
                    match heading_card_id(h) {
                        Some(id) => State::InFront {
                            heading: delimiter,
                            id,
                            level: h.level,
                        },
                        None => {
                            tracing::debug!(
                                offset = h.start,
                                "heading has no text to use as card id"
                            );
                            State::BetweenFronts
                        }
                    }
                }
                (State::InFront { heading, id, level }, Delimiter::Break(_)) => {
                    sides.push(GeneratedSide {
                        declaration: CardDeclaration::note_scoped(
                            &id,
                            Side::Front,
                            deck_id.clone(),
                            true,
                        ),
                        range: SectionRange::new(Some(heading.clone()), Some(delimiter.clone())),
                        span: SpanKind::Section,
                    });
                    State::InBack {
                        id,
                        rule: delimiter,
                        front_level: level,
                    }
                }
                (other, _) => other,
            };
        }

        match state {
            State::InBack { id, rule, .. } => {
                sides.push(back_side(&id, rule, context.section_end.cloned(), deck_id));
            }
            State::InFront { heading, .. } => {
                tracing::debug!(
                    offset = heading.start(),
                    "heading has no delimiter before the section ends"
                );
            }
            State::BetweenFronts => {}
        }
        Ok(sides)
    }
}

fn back_side(
    id: &str,
    rule: &Delimiter,
    end: Option<Delimiter>,
    deck_id: &Option<String>,
) -> GeneratedSide {
    GeneratedSide {
        declaration: CardDeclaration::note_scoped(id, Side::Back, deck_id.clone(), true),
        range: SectionRange::new(Some(rule.clone()), end),
        span: SpanKind::Body,
    }
}
