//! Per-note scanning and id enumeration.
//!
//! Declarations are discovered in a fixed order: frontmatter, then headings
//! with inline markers, then declaration blocks, each in outline order. When
//! the same scoped id shows up twice the first declaration wins.

use crate::commands::{run_command, CommandContext};
use crate::declaration::{
    is_declaration_block, parse_declaration_block, parse_declaration_map, CardDeclaration,
    CommandDeclaration, Declaration, DECLARATION_TAGS,
};
use crate::diagnostics::{
    DuplicateId, IncompleteDeclaration, InvalidDeclaration, InvalidYaml, PostParseInfo,
    UnreadableNote,
};
use crate::error::{DeclarationError, IndexError, Result};
use crate::extract::{SideRange, SpanKind};
use crate::id::{DeckableFullId, FullId, ScopedId};
use crate::marker::find_marker;
use crate::outline::{Outline, SectionKind};
use crate::range::{heading_range_for_section, SectionRange};
use crate::source::{NoteSnapshot, NoteSource};
use crate::types::NoteIndex;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::ops::Range;

/// A card side declared in a note and where its content lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSide {
    pub declaration: CardDeclaration,
    pub location: SideRange,
}

impl LocatedSide {
    pub fn scoped_id(&self, note_id: &str) -> ScopedId {
        ScopedId {
            id: DeckableFullId::new(
                FullId::new(note_id, &self.declaration.id, Some(self.declaration.side)),
                self.declaration.deck_id.clone(),
            ),
            scope: self.declaration.scope,
        }
    }
}

/// Everything one pass over a note found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteScan {
    pub note_id: String,
    /// Sides in discovery order, duplicates removed.
    pub sides: Vec<LocatedSide>,
    /// Every declaration block (and declaring frontmatter) in the note.
    pub declaration_blocks: Vec<Range<usize>>,
    pub diagnostics: PostParseInfo,
}

impl NoteScan {
    pub fn side_ranges(&self) -> Vec<SideRange> {
        self.sides.iter().map(|s| s.location.clone()).collect()
    }
}

/// Collects sides and diagnostics for one note.
struct Scanner<'a> {
    note_id: &'a str,
    text: &'a str,
    outline: &'a Outline,
    scan: NoteScan,
    seen: HashSet<String>,
}

impl<'a> Scanner<'a> {
    fn new(note: &'a NoteSnapshot, outline: &'a Outline) -> Self {
        Self {
            note_id: &note.id,
            text: &note.text,
            outline,
            scan: NoteScan {
                note_id: note.id.clone(),
                ..Default::default()
            },
            seen: HashSet::new(),
        }
    }

    fn run(mut self) -> NoteScan {
        self.scan_frontmatter();
        self.scan_headings();
        self.scan_blocks();
        self.scan
    }

    fn scan_frontmatter(&mut self) {
        let outline = self.outline;
        let Some(frontmatter) = &outline.frontmatter else {
            return;
        };
        let block = frontmatter.start..frontmatter.end;
        for tag in DECLARATION_TAGS {
            let Some(Value::Object(map)) = frontmatter.data.get(tag) else {
                continue;
            };
            self.scan.declaration_blocks.push(block.clone());
            let source = serde_json::to_string(map).unwrap_or_default();
            match parse_declaration_map(map) {
                Ok(Declaration::Card(card)) => {
                    let location = SideRange {
                        range: SectionRange::default(),
                        span: SpanKind::Section,
                        block: Some(block.clone()),
                    };
                    self.push_side(card, location);
                }
                Ok(Declaration::Command(command)) => {
                    let delimiters = outline.delimiters();
                    let context = CommandContext {
                        parent_level: 0,
                        delimiters: &delimiters,
                        section_end: None,
                    };
                    self.push_generated(&command, &context, &source, block.clone());
                }
                Err(e) => self.record_error(e, &source, block.clone()),
            }
        }
    }

    fn scan_headings(&mut self) {
        let outline = self.outline;
        for heading in &outline.headings {
            let Some(marker) = find_marker(&heading.text) else {
                continue;
            };
            let walk = heading_range_for_section(heading.start..heading.end, outline);
            let declaration = CardDeclaration::note_scoped(&marker.id, marker.side, None, false);
            let location = SideRange {
                range: walk.range,
                span: SpanKind::Section,
                block: None,
            };
            self.push_side(declaration, location);
        }
    }

    fn scan_blocks(&mut self) {
        let (text, outline) = (self.text, self.outline);
        for section in &outline.sections {
            if section.kind != SectionKind::Code {
                continue;
            }
            let block = section.range();
            let Some(source) = text.get(block.clone()) else {
                continue;
            };
            if !is_declaration_block(source) {
                continue;
            }
            self.scan.declaration_blocks.push(block.clone());

            match parse_declaration_block(source) {
                Ok(None) => {}
                Ok(Some(Declaration::Card(card))) => {
                    let walk = heading_range_for_section(block.clone(), outline);
                    let location = SideRange {
                        range: walk.range,
                        span: SpanKind::Section,
                        block: Some(block),
                    };
                    self.push_side(card, location);
                }
                Ok(Some(Declaration::Command(command))) => {
                    let walk = heading_range_for_section(block.clone(), outline);
                    let context = CommandContext {
                        parent_level: walk
                            .range
                            .start
                            .as_ref()
                            .and_then(|d| d.level())
                            .unwrap_or(0),
                        delimiters: &walk.interior,
                        section_end: walk.range.end.as_ref(),
                    };
                    self.push_generated(&command, &context, source, block);
                }
                Err(e) => self.record_error(e, source, block),
            }
        }
    }

    fn push_generated(
        &mut self,
        command: &CommandDeclaration,
        context: &CommandContext<'_>,
        source: &str,
        block: Range<usize>,
    ) {
        match run_command(command, context) {
            Ok(generated) => {
                tracing::debug!(
                    note = self.note_id,
                    command = %command.name,
                    sides = generated.len(),
                    "expanded command"
                );
                for side in generated {
                    let location = SideRange {
                        range: side.range,
                        span: side.span,
                        block: None,
                    };
                    self.push_side(side.declaration, location);
                }
                for heading in context.untitled_targets(command) {
                    let reason = format!(
                        "heading at offset {} has no text to use as a card id",
                        heading.start
                    );
                    self.record_error(DeclarationError::Invalid(reason), source, block.clone());
                }
            }
            Err(e) => self.record_error(e, source, block),
        }
    }

    fn push_side(&mut self, declaration: CardDeclaration, location: SideRange) {
        let side = LocatedSide { declaration, location };
        let id = side.scoped_id(self.note_id);
        if !self.seen.insert(id.duplicate_key()) {
            tracing::warn!(note = self.note_id, id = %id, "duplicate card id");
            self.scan.diagnostics.duplicate_ids.push(DuplicateId {
                id,
                first_note_id: self.note_id.to_string(),
            });
            return;
        }
        self.scan.sides.push(side);
    }

    fn record_error(&mut self, error: DeclarationError, source: &str, block: Range<usize>) {
        let note_id = self.note_id.to_string();
        let diagnostics = &mut self.scan.diagnostics;
        match error {
            DeclarationError::Yaml(message) => {
                tracing::warn!(
                    note = %note_id,
                    offset = block.start,
                    "malformed declaration: {}",
                    message
                );
                diagnostics.invalid_yaml.push(InvalidYaml {
                    note_id,
                    block,
                    message,
                });
            }
            DeclarationError::Incomplete { side, deck_id } => {
                tracing::debug!(note = %note_id, offset = block.start, "declaration without id");
                diagnostics.incomplete_declarations.push(IncompleteDeclaration {
                    note_id,
                    side,
                    deck_id,
                    block,
                });
            }
            DeclarationError::Invalid(reason) => {
                tracing::warn!(
                    note = %note_id,
                    offset = block.start,
                    "invalid declaration: {}",
                    reason
                );
                diagnostics.invalid_commands.push(InvalidDeclaration {
                    note_id,
                    source: source.to_string(),
                    block,
                    reason,
                });
            }
        }
    }
}

/// Scan one note for sides. Fails only when the note has no outline.
pub fn scan_note(note: &NoteSnapshot) -> Result<NoteScan> {
    let outline = note.outline()?;
    Ok(Scanner::new(note, outline).run())
}

/// Enumerate every side declared in one note.
pub fn index_note(note: &NoteSnapshot) -> Result<NoteIndex> {
    let scan = scan_note(note)?;
    Ok(NoteIndex {
        ids: scan.sides.iter().map(|s| s.scoped_id(&scan.note_id)).collect(),
        diagnostics: scan.diagnostics,
    })
}

/// Enumerate every side in the store, one note at a time.
///
/// Unique ids declared in more than one note are reported as duplicates;
/// the note read first keeps the id. A note the store fails to read is
/// reported and skipped; a missing outline still aborts.
pub async fn index_corpus<S: NoteSource>(source: &S) -> Result<NoteIndex> {
    let mut corpus = NoteIndex::default();
    let mut first_seen: HashMap<String, String> = HashMap::new();

    for note_id in source.note_ids() {
        let note = match source.read_note(&note_id).await {
            Ok(note) => note,
            Err(e @ IndexError::OutlineUnavailable { .. }) => return Err(e),
            Err(e) => {
                tracing::warn!(note = %note_id, "skipping unreadable note: {}", e);
                corpus.diagnostics.unreadable_notes.push(UnreadableNote {
                    note_id: note_id.clone(),
                    message: e.to_string(),
                });
                continue;
            }
        };
        let index = index_note(&note)?;
        corpus.diagnostics.merge(index.diagnostics);

        for id in index.ids {
            let key = id.duplicate_key();
            if let Some(first_note_id) = first_seen.get(&key) {
                tracing::warn!(
                    id = %id,
                    first = %first_note_id,
                    "duplicate card id across notes"
                );
                corpus.diagnostics.duplicate_ids.push(DuplicateId {
                    id,
                    first_note_id: first_note_id.clone(),
                });
                continue;
            }
            first_seen.insert(key, note_id.clone());
            corpus.ids.push(id);
        }
    }

    tracing::info!(
        sides = corpus.ids.len(),
        diagnostics = corpus.diagnostics.len(),
        "indexed notes"
    );
    Ok(corpus)
}
