//! Access to note text and outlines.

use crate::error::{IndexError, Result};
use crate::outline::Outline;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One note's text and outline as read at one moment.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteSnapshot {
    pub id: String,
    pub text: String,
    /// `None` when the host has not indexed the note yet.
    pub outline: Option<Outline>,
}

impl NoteSnapshot {
    /// Snapshot with an outline computed from the markdown text.
    pub fn from_markdown(id: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let outline = Outline::from_markdown(&text);
        Self {
            id: id.into(),
            text,
            outline: Some(outline),
        }
    }

    pub fn outline(&self) -> Result<&Outline> {
        self.outline.as_ref().ok_or_else(|| IndexError::OutlineUnavailable {
            note_id: self.id.clone(),
        })
    }
}

/// Store of notes the index reads from.
#[allow(async_fn_in_trait)]
pub trait NoteSource {
    /// Every note id, in the store's own order.
    fn note_ids(&self) -> Vec<String>;

    /// Read one note.
    async fn read_note(&self, note_id: &str) -> Result<NoteSnapshot>;
}

/// In-memory note store.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    notes: Vec<NoteSnapshot>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a note.
    pub fn insert(&mut self, note: NoteSnapshot) {
        match self.notes.iter_mut().find(|n| n.id == note.id) {
            Some(existing) => *existing = note,
            None => self.notes.push(note),
        }
    }

    /// Add a markdown note, computing its outline.
    pub fn insert_markdown(&mut self, id: &str, text: &str) {
        self.insert(NoteSnapshot::from_markdown(id, text));
    }

    pub fn with_markdown(mut self, id: &str, text: &str) -> Self {
        self.insert_markdown(id, text);
        self
    }
}

impl NoteSource for MemorySource {
    fn note_ids(&self) -> Vec<String> {
        self.notes.iter().map(|n| n.id.clone()).collect()
    }

    async fn read_note(&self, note_id: &str) -> Result<NoteSnapshot> {
        self.notes
            .iter()
            .find(|n| n.id == note_id)
            .cloned()
            .ok_or_else(|| IndexError::NoteNotFound {
                note_id: note_id.to_string(),
            })
    }
}

/// Directory of markdown files. Note ids are `/`-separated relative paths.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
    note_ids: Vec<String>,
}

impl FsSource {
    /// Scan `root` recursively for `.md` files. Hidden directories are skipped.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(IndexError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("not a directory: {}", root.display()),
            )));
        }

        let mut note_ids: Vec<String> = WalkDir::new(&root)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().map(|ext| ext == "md").unwrap_or(false))
            .filter_map(|e| relative_note_id(&root, e.path()))
            .collect();
        note_ids.sort();

        tracing::debug!(root = %root.display(), notes = note_ids.len(), "opened note directory");
        Ok(Self { root, note_ids })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl NoteSource for FsSource {
    fn note_ids(&self) -> Vec<String> {
        self.note_ids.clone()
    }

    async fn read_note(&self, note_id: &str) -> Result<NoteSnapshot> {
        if !self.note_ids.iter().any(|id| id == note_id) {
            return Err(IndexError::NoteNotFound {
                note_id: note_id.to_string(),
            });
        }
        let text = tokio::fs::read_to_string(self.root.join(note_id)).await?;
        Ok(NoteSnapshot::from_markdown(note_id, text))
    }
}

fn relative_note_id(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    Some(parts.join("/"))
}
