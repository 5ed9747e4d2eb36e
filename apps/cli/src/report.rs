//! Plain-text rendering of index and lookup results.

use std::fmt::Write;

use notecard_core::{CardLookup, FullId, IdScope, NoteIndex, PostParseInfo, Side};

/// One line per indexed side, followed by a diagnostics summary.
pub fn index_listing(index: &NoteIndex) -> String {
    let mut out = String::new();
    for scoped in &index.ids {
        let id = &scoped.id.id;
        let scope = match scoped.scope {
            IdScope::Unique => "unique",
            IdScope::NoteScoped => "note",
        };
        let _ = write!(out, "{:<6} {}", scope, id);
        if !scoped.id.deck_ids.is_empty() {
            let _ = write!(out, "  [{}]", scoped.id.deck_ids.join(", "));
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "{} sides, {} problems",
        index.ids.len(),
        index.diagnostics.len()
    );
    out
}

/// Both sides of a resolved card, or what is missing.
pub fn card_lookup(id: &FullId, lookup: &CardLookup) -> String {
    let mut out = String::new();
    match lookup {
        CardLookup::Complete(card) => {
            let _ = writeln!(out, "--- front ({})", card.front_id);
            let _ = writeln!(out, "{}", card.front_markdown);
            let _ = writeln!(out, "--- back ({})", card.back_id);
            let _ = writeln!(out, "{}", card.back_markdown);
        }
        CardLookup::Incomplete(partial) => {
            let (found, markdown) = match (&partial.front_id, &partial.back_id) {
                (Some(front), _) => (front, partial.front_markdown.as_deref()),
                (None, Some(back)) => (back, partial.back_markdown.as_deref()),
                (None, None) => return format!("{} not found\n", id),
            };
            let missing = partial.missing_side().unwrap_or(Side::Back);
            let _ = writeln!(out, "--- {} ({})", missing.opposite(), found);
            let _ = writeln!(out, "{}", markdown.unwrap_or_default());
            let _ = writeln!(out, "--- {} side of {} not found", missing, id);
        }
        CardLookup::NotFound => {
            let _ = writeln!(out, "{} not found", id);
        }
    }
    out
}

/// Every diagnostic, one per line, grouped by kind.
pub fn diagnostics(info: &PostParseInfo) -> String {
    if info.is_empty() {
        return "no problems found\n".to_string();
    }
    let mut out = String::new();
    for d in &info.incomplete_declarations {
        let _ = writeln!(
            out,
            "{}:{}: {} side declared without an id",
            d.note_id, d.block.start, d.side
        );
    }
    for d in &info.invalid_commands {
        let _ = writeln!(out, "{}:{}: {}", d.note_id, d.block.start, d.reason);
    }
    for d in &info.invalid_yaml {
        let _ = writeln!(
            out,
            "{}:{}: malformed declaration: {}",
            d.note_id, d.block.start, d.message
        );
    }
    for d in &info.duplicate_ids {
        let _ = writeln!(
            out,
            "{}: duplicate {} (first declared in {})",
            d.id.id.id.note_id, d.id, d.first_note_id
        );
    }
    for d in &info.unreadable_notes {
        let _ = writeln!(out, "{}: unreadable: {}", d.note_id, d.message);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use notecard_core::diagnostics::{DuplicateId, IncompleteDeclaration, UnreadableNote};
    use notecard_core::{DeckableFullId, MaybeParsedCard, ParsedCard, ScopedId};
    use pretty_assertions::assert_eq;

    fn scoped(
        note: &str,
        card: &str,
        side: Side,
        scope: IdScope,
        deck: Option<&str>,
    ) -> ScopedId {
        ScopedId {
            id: DeckableFullId::new(
                FullId::new(note, card, Some(side)),
                deck.map(str::to_string),
            ),
            scope,
        }
    }

    #[test]
    fn listing_shows_scope_and_decks() {
        let index = NoteIndex {
            ids: vec![
                scoped("a.md", "x", Side::Front, IdScope::NoteScoped, None),
                scoped("b.md", "y", Side::Back, IdScope::Unique, Some("bio")),
            ],
            diagnostics: PostParseInfo::default(),
        };
        assert_eq!(
            index_listing(&index),
            "note   a.md#x@front\nunique b.md#y@back  [bio]\n2 sides, 0 problems\n"
        );
    }

    #[test]
    fn complete_card_prints_both_sides() {
        let id = FullId::card("a.md", "x");
        let lookup = CardLookup::Complete(ParsedCard {
            front_id: id.with_side(Side::Front),
            front_markdown: "Foo".to_string(),
            back_id: id.with_side(Side::Back),
            back_markdown: "Bar".to_string(),
        });
        assert_eq!(
            card_lookup(&id, &lookup),
            "--- front (a.md#x@front)\nFoo\n--- back (a.md#x@back)\nBar\n"
        );
    }

    #[test]
    fn incomplete_card_names_missing_side() {
        let id = FullId::card("a.md", "x");
        let mut partial = MaybeParsedCard::default();
        partial.fill(id.with_side(Side::Back), "Bar".to_string());
        assert_eq!(
            card_lookup(&id, &CardLookup::Incomplete(partial)),
            "--- back (a.md#x@back)\nBar\n--- front side of a.md#x not found\n"
        );
        assert_eq!(card_lookup(&id, &CardLookup::NotFound), "a.md#x not found\n");
    }

    #[test]
    fn diagnostics_lines() {
        assert_eq!(diagnostics(&PostParseInfo::default()), "no problems found\n");

        let info = PostParseInfo {
            incomplete_declarations: vec![IncompleteDeclaration {
                note_id: "a.md".to_string(),
                side: Side::Front,
                deck_id: None,
                block: 4..30,
            }],
            duplicate_ids: vec![DuplicateId {
                id: scoped("b.md", "k", Side::Front, IdScope::Unique, None),
                first_note_id: "a.md".to_string(),
            }],
            unreadable_notes: vec![UnreadableNote {
                note_id: "c.md".to_string(),
                message: "stream did not contain valid UTF-8".to_string(),
            }],
            ..Default::default()
        };
        assert_eq!(
            diagnostics(&info),
            concat!(
                "a.md:4: front side declared without an id\n",
                "b.md: duplicate unique:front:k (first declared in a.md)\n",
                "c.md: unreadable: stream did not contain valid UTF-8\n",
            )
        );
    }
}
