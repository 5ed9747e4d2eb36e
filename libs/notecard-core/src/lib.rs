//! Core library for flashcards written inside markdown notes.
//!
//! Provides:
//! - Markdown outlines (headings, blocks, frontmatter) with byte offsets
//! - Card declarations: inline markers, fenced blocks and frontmatter entries
//! - Commands that generate cards from heading structure
//! - Side content extraction
//! - Indexing and cross-note card lookup over a note store

pub mod commands;
pub mod declaration;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod id;
pub mod index;
pub mod marker;
pub mod outline;
pub mod range;
pub mod resolve;
pub mod source;
pub mod types;

pub use declaration::{
    parse_declaration_block, serialize_declaration, CardDeclaration, CommandDeclaration,
    CommandName, Declaration, DelimiterKind,
};
pub use diagnostics::PostParseInfo;
pub use error::{DeclarationError, IndexError, Result};
pub use extract::{extract_content, ExtractOptions, SideRange, SpanKind};
pub use id::{DeckableFullId, FullId, IdScope, ScopedId, Side};
pub use index::{index_corpus, index_note, scan_note, LocatedSide, NoteScan};
pub use outline::{build_outline, Delimiter, Heading, Outline};
pub use range::{range_for_section, SectionRange};
pub use resolve::{likelihood_order, resolve_card};
pub use source::{FsSource, MemorySource, NoteSnapshot, NoteSource};
pub use types::{CardLookup, MaybeParsedCard, NoteIndex, ParseSettings, ParsedCard};
