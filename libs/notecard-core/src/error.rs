//! Error types for notecard-core.

use thiserror::Error;

/// Result type alias using IndexError.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Errors that abort an indexing or resolve operation.
///
/// Only structural problems end up here. Malformed declarations, unknown
/// commands and duplicate ids are collected as diagnostics instead.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("missing {component} in card id")]
    MissingComponent { component: &'static str },

    #[error("outline unavailable for {note_id}, reload the note index")]
    OutlineUnavailable { note_id: String },

    #[error("note not found: {note_id}")]
    NoteNotFound { note_id: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a declaration block could not be turned into a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    #[error("malformed declaration: {0}")]
    Yaml(String),

    /// A card side without an `id`. Callers may generate one and rewrite the block.
    #[error("declaration has no id")]
    Incomplete {
        side: crate::id::Side,
        deck_id: Option<String>,
    },

    #[error("invalid declaration: {0}")]
    Invalid(String),
}
