//! Card identifiers.

use crate::error::{IndexError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One half of a flashcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Front,
    Back,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }

    /// Parse a side name. Accepts `f`, `front`, `b` and `back` in any case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "f" | "front" => Some(Self::Front),
            "b" | "back" => Some(Self::Back),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How far an identifier's uniqueness reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdScope {
    /// Unique across the whole corpus; the two sides may live in different notes.
    Unique,
    /// Unique within one note; both sides must share it.
    NoteScoped,
}

impl IdScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::NoteScoped => "note_scoped",
        }
    }
}

/// Lower-case and trim a card id. Card ids compare case-insensitively.
pub fn normalize_card_id(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Fully-qualified reference to a card, or to one side of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FullId {
    pub note_id: String,
    pub card_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
}

impl FullId {
    pub fn new(note_id: impl Into<String>, card_id: &str, side: Option<Side>) -> Self {
        Self {
            note_id: note_id.into(),
            card_id: normalize_card_id(card_id),
            side,
        }
    }

    /// Reference to the card as a whole rather than one side.
    pub fn card(note_id: impl Into<String>, card_id: &str) -> Self {
        Self::new(note_id, card_id, None)
    }

    pub fn with_side(&self, side: Side) -> Self {
        Self {
            side: Some(side),
            ..self.clone()
        }
    }

    pub fn card_equals(&self, other: &FullId) -> bool {
        self.card_id == other.card_id
    }

    pub fn note_equals(&self, other: &FullId) -> bool {
        self.note_id == other.note_id
    }

    /// Note and card match; the side is compared only when `check_side` is set.
    pub fn equals(&self, other: &FullId, check_side: bool) -> bool {
        self.card_equals(other)
            && self.note_equals(other)
            && (!check_side || self.side == other.side)
    }

    /// Ensure the id can be used as a lookup key.
    pub fn validate(&self) -> Result<()> {
        if self.note_id.trim().is_empty() {
            return Err(IndexError::MissingComponent {
                component: "note id",
            });
        }
        if self.card_id.is_empty() {
            return Err(IndexError::MissingComponent {
                component: "card id",
            });
        }
        Ok(())
    }
}

impl fmt::Display for FullId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.note_id, self.card_id)?;
        if let Some(side) = self.side {
            write!(f, "@{}", side)?;
        }
        Ok(())
    }
}

/// A [`FullId`] together with the decks its declaration names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckableFullId {
    #[serde(flatten)]
    pub id: FullId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deck_ids: Vec<String>,
}

impl DeckableFullId {
    pub fn new(id: FullId, deck_id: Option<String>) -> Self {
        Self {
            id,
            deck_ids: deck_id.into_iter().collect(),
        }
    }
}

/// An indexed side and the scope its id was declared with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedId {
    #[serde(flatten)]
    pub id: DeckableFullId,
    pub scope: IdScope,
}

impl ScopedId {
    /// Key under which two declarations count as duplicates.
    ///
    /// Unique ids collide across notes, note-scoped ids only inside one note.
    pub fn duplicate_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ScopedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = &self.id.id;
        let side = id.side.map(|s| s.as_str()).unwrap_or("card");
        match self.scope {
            IdScope::Unique => write!(f, "{}:{}:{}", self.scope.as_str(), side, id.card_id),
            IdScope::NoteScoped => write!(
                f,
                "{}:{}:{}:{}",
                self.scope.as_str(),
                side,
                id.card_id,
                id.note_id
            ),
        }
    }
}
