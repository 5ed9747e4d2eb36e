//! Card lookup by id.

use crate::error::{IndexError, Result};
use crate::extract::extract_content;
use crate::id::{FullId, IdScope};
use crate::index::scan_note;
use crate::source::NoteSource;
use crate::types::{CardLookup, MaybeParsedCard, ParseSettings};
use std::collections::HashSet;

/// Order in which notes are searched for a card.
///
/// The requested note comes first, then `likely` notes that exist, then the
/// rest in store order. Every note appears once.
pub fn likelihood_order(
    note_ids: &[String],
    requested_note: &str,
    likely: &[String],
) -> Vec<String> {
    let known: HashSet<&str> = note_ids.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut order = Vec::with_capacity(note_ids.len());

    let preferred = std::iter::once(requested_note).chain(likely.iter().map(String::as_str));
    for id in preferred.chain(note_ids.iter().map(String::as_str)) {
        if known.contains(id) && seen.insert(id) {
            order.push(id.to_string());
        }
    }
    order
}

/// Resolve both sides of the card `id` points at.
///
/// Unique ids may have their sides in any note; note-scoped ids are only
/// looked up in `id.note_id`. Notes are read one at a time and the search
/// stops as soon as both sides are found. The side of `id` is ignored.
/// Notes the store fails to read are skipped; a missing outline aborts.
pub async fn resolve_card<S: NoteSource>(
    source: &S,
    id: &FullId,
    scope: IdScope,
    likely_note_ids: &[String],
    settings: &ParseSettings,
) -> Result<CardLookup> {
    id.validate()?;
    let card_id = crate::id::normalize_card_id(&id.card_id);
    let order = likelihood_order(&source.note_ids(), &id.note_id, likely_note_ids);
    let mut card = MaybeParsedCard::default();

    for note_id in order {
        if scope == IdScope::NoteScoped && note_id != id.note_id {
            continue;
        }

        let note = match source.read_note(&note_id).await {
            Ok(note) => note,
            Err(e @ IndexError::OutlineUnavailable { .. }) => return Err(e),
            Err(e) => {
                tracing::warn!(note = %note_id, "skipping unreadable note: {}", e);
                continue;
            }
        };
        let scan = scan_note(&note)?;
        let ranges = scan.side_ranges();

        for side in &scan.sides {
            let declaration = &side.declaration;
            if declaration.scope != scope
                || declaration.id != card_id
                || card.has(declaration.side)
            {
                continue;
            }
            let markdown = extract_content(
                &note.text,
                &side.location,
                &ranges,
                &scan.declaration_blocks,
                settings.extract,
            );
            card.fill(FullId::new(&note_id, &card_id, Some(declaration.side)), markdown);
        }

        if card.is_done(id, scope) {
            tracing::debug!(id = %id, note = %note_id, "resolved card");
            break;
        }
    }

    let lookup = card.into_lookup();
    if let CardLookup::Incomplete(partial) = &lookup {
        tracing::debug!(id = %id, missing = ?partial.missing_side(), "card is missing a side");
    }
    Ok(lookup)
}
