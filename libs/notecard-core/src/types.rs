//! Core result and settings types.

use crate::diagnostics::PostParseInfo;
use crate::extract::ExtractOptions;
use crate::id::{FullId, IdScope, ScopedId, Side};
use serde::{Deserialize, Serialize};

/// Settings shared by indexing and resolving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseSettings {
    pub extract: ExtractOptions,
}

/// Every side found in a note or corpus, plus what went wrong along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteIndex {
    pub ids: Vec<ScopedId>,
    pub diagnostics: PostParseInfo,
}

/// A card with both sides resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCard {
    pub front_id: FullId,
    pub front_markdown: String,
    pub back_id: FullId,
    pub back_markdown: String,
}

/// A card while its sides are being collected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaybeParsedCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_id: Option<FullId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_markdown: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_id: Option<FullId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_markdown: Option<String>,
}

impl MaybeParsedCard {
    pub fn has(&self, side: Side) -> bool {
        match side {
            Side::Front => self.front_id.is_some(),
            Side::Back => self.back_id.is_some(),
        }
    }

    /// Record a side unless it is already filled. Returns whether it was recorded.
    pub fn fill(&mut self, id: FullId, markdown: String) -> bool {
        let (slot_id, slot_markdown) = match id.side {
            Some(Side::Front) => (&mut self.front_id, &mut self.front_markdown),
            Some(Side::Back) => (&mut self.back_id, &mut self.back_markdown),
            None => return false,
        };
        if slot_id.is_some() {
            return false;
        }
        *slot_id = Some(id);
        *slot_markdown = Some(markdown);
        true
    }

    /// Whether the search for `requested` can stop.
    ///
    /// Unique ids only need both sides. Note-scoped ids need both sides from
    /// the requested note.
    pub fn is_done(&self, requested: &FullId, scope: IdScope) -> bool {
        match (&self.front_id, &self.back_id) {
            (Some(front), Some(back)) => match scope {
                IdScope::Unique => front.card_equals(requested) && back.card_equals(requested),
                IdScope::NoteScoped => {
                    front.equals(requested, false) && back.equals(requested, false)
                }
            },
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.front_id.is_none() && self.back_id.is_none()
    }

    /// Side that was not found, if exactly one is missing.
    pub fn missing_side(&self) -> Option<Side> {
        match (self.has(Side::Front), self.has(Side::Back)) {
            (true, false) => Some(Side::Back),
            (false, true) => Some(Side::Front),
            _ => None,
        }
    }

    /// Final lookup result.
    pub fn into_lookup(self) -> CardLookup {
        match self {
            MaybeParsedCard {
                front_id: Some(front_id),
                front_markdown: Some(front_markdown),
                back_id: Some(back_id),
                back_markdown: Some(back_markdown),
            } => CardLookup::Complete(ParsedCard {
                front_id,
                front_markdown,
                back_id,
                back_markdown,
            }),
            partial if partial.is_empty() => CardLookup::NotFound,
            partial => CardLookup::Incomplete(partial),
        }
    }
}

/// Outcome of resolving one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CardLookup {
    Complete(ParsedCard),
    /// Only one side was found.
    Incomplete(MaybeParsedCard),
    NotFound,
}

impl CardLookup {
    pub fn complete(&self) -> Option<&ParsedCard> {
        match self {
            Self::Complete(card) => Some(card),
            _ => None,
        }
    }

    pub fn incomplete(&self) -> Option<&MaybeParsedCard> {
        match self {
            Self::Incomplete(card) => Some(card),
            _ => None,
        }
    }
}
