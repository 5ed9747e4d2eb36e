//! Soft problems found while indexing, kept for user-facing reports.

use crate::id::{ScopedId, Side};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A card side declared without an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompleteDeclaration {
    pub note_id: String,
    pub side: Side,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck_id: Option<String>,
    pub block: Range<usize>,
}

/// A declaration with a recognized shape but unusable values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidDeclaration {
    pub note_id: String,
    pub source: String,
    pub block: Range<usize>,
    pub reason: String,
}

/// A declaration block whose YAML does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidYaml {
    pub note_id: String,
    pub block: Range<usize>,
    pub message: String,
}

/// A side declared again after its first declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateId {
    pub id: ScopedId,
    /// Note holding the declaration that was kept.
    pub first_note_id: String,
}

/// A note the store could not read; the rest of the corpus is still indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadableNote {
    pub note_id: String,
    pub message: String,
}

/// Diagnostics accumulated while indexing one note or a whole corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostParseInfo {
    pub incomplete_declarations: Vec<IncompleteDeclaration>,
    pub invalid_commands: Vec<InvalidDeclaration>,
    pub invalid_yaml: Vec<InvalidYaml>,
    pub duplicate_ids: Vec<DuplicateId>,
    #[serde(default)]
    pub unreadable_notes: Vec<UnreadableNote>,
}

impl PostParseInfo {
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.incomplete_declarations.len()
            + self.invalid_commands.len()
            + self.invalid_yaml.len()
            + self.duplicate_ids.len()
            + self.unreadable_notes.len()
    }

    /// Append everything from `other`.
    pub fn merge(&mut self, other: PostParseInfo) {
        self.incomplete_declarations.extend(other.incomplete_declarations);
        self.invalid_commands.extend(other.invalid_commands);
        self.invalid_yaml.extend(other.invalid_yaml);
        self.duplicate_ids.extend(other.duplicate_ids);
        self.unreadable_notes.extend(other.unreadable_notes);
    }

    /// Notes that have at least one diagnostic, sorted and deduplicated.
    pub fn affected_notes(&self) -> Vec<String> {
        let mut notes: Vec<String> = self
            .incomplete_declarations
            .iter()
            .map(|d| d.note_id.clone())
            .chain(self.invalid_commands.iter().map(|d| d.note_id.clone()))
            .chain(self.invalid_yaml.iter().map(|d| d.note_id.clone()))
            .chain(self.duplicate_ids.iter().map(|d| d.id.id.id.note_id.clone()))
            .chain(self.unreadable_notes.iter().map(|d| d.note_id.clone()))
            .collect();
        notes.sort();
        notes.dedup();
        notes
    }
}
