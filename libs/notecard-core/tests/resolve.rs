//! Card lookup across the fixture vault.

mod common;

use notecard_core::{
    resolve_card, CardLookup, FullId, IdScope, IndexError, MemorySource, NoteSnapshot, Side,
};
use pretty_assertions::assert_eq;

use common::{ids, settings, vault};

async fn lookup(note: &str, card: &str, scope: IdScope, likely: &[String]) -> CardLookup {
    resolve_card(&vault(), &FullId::card(note, card), scope, likely, &settings())
        .await
        .unwrap()
}

/// Test the inline marker example resolves both sides.
#[tokio::test]
async fn test_inline_markers() {
    let lookup = lookup("inline.md", "x", IdScope::NoteScoped, &[]).await;
    let card = lookup.complete().unwrap();
    assert_eq!(card.front_markdown, "Foo");
    assert_eq!(card.back_markdown, "Bar");
    assert_eq!(card.front_id, FullId::new("inline.md", "x", Some(Side::Front)));
}

/// Test marker headings are kept when both hide options are off.
#[tokio::test]
async fn test_inline_markers_shown() {
    let mut settings = settings();
    settings.extract.hide_card_marker = false;
    settings.extract.hide_declaration_block = false;
    let lookup = resolve_card(
        &vault(),
        &FullId::card("inline.md", "x"),
        IdScope::NoteScoped,
        &[],
        &settings,
    )
    .await
    .unwrap();
    let card = lookup.complete().unwrap();
    assert!(card.front_markdown.starts_with("## front@x"));
    assert!(card.front_markdown.ends_with("Foo"));
    assert!(!card.front_markdown.contains("Bar"));
}

/// Test alternate headings pair consecutive subheadings.
#[tokio::test]
async fn test_alternate_headings_cards() {
    let france = lookup("capitals.md", "France", IdScope::NoteScoped, &[]).await;
    let card = france.complete().unwrap();
    assert_eq!(card.front_markdown, "## France\n\nEurope");
    assert_eq!(card.back_markdown, "## Paris\n\nSeine");

    let spain = lookup("capitals.md", "spain", IdScope::NoteScoped, &[]).await;
    let card = spain.complete().unwrap();
    assert_eq!(card.front_markdown, "## Spain\n\nIberia");
    assert_eq!(card.back_markdown, "## Madrid\n\nPlaza");

    // Backs reuse the front's id.
    assert_eq!(
        lookup("capitals.md", "paris", IdScope::NoteScoped, &[]).await,
        CardLookup::NotFound
    );
}

/// Test heading and delimiter splits at the horizontal rule.
#[tokio::test]
async fn test_heading_and_delimiter_card() {
    let lookup = lookup("quiz.md", "What is Rust?", IdScope::NoteScoped, &[]).await;
    let card = lookup.complete().unwrap();
    assert_eq!(card.front_markdown, "## What is Rust?\n\nA language?");
    assert_eq!(card.back_markdown, "A systems language.");
}

/// Test a heading with no rule produces no card.
#[tokio::test]
async fn test_heading_without_delimiter_is_skipped() {
    assert_eq!(
        lookup("quiz.md", "unanswered", IdScope::NoteScoped, &[]).await,
        CardLookup::NotFound
    );
}

/// Test heading is front from a frontmatter command.
#[tokio::test]
async fn test_heading_is_front_from_frontmatter() {
    let lookup = lookup("glossary.md", "ownership", IdScope::NoteScoped, &[]).await;
    let card = lookup.complete().unwrap();
    assert_eq!(card.front_markdown, "Ownership");
    assert_eq!(card.back_markdown, "Each value has one owner.");

    let borrowing = resolve_card(
        &vault(),
        &FullId::card("glossary.md", "borrowing"),
        IdScope::NoteScoped,
        &[],
        &settings(),
    )
    .await
    .unwrap();
    assert_eq!(
        borrowing.complete().unwrap().back_markdown,
        "References without ownership."
    );
}

/// Test unique ids are resolved across notes.
#[tokio::test]
async fn test_unique_card_across_notes() {
    let lookup = lookup("biology.md", "photo", IdScope::Unique, &ids(&["answers.md"])).await;
    let card = lookup.complete().unwrap();

    assert_eq!(card.front_id.note_id, "biology.md");
    assert!(card.front_markdown.starts_with("# Photosynthesis"));
    assert!(card.front_markdown.ends_with("What does chlorophyll absorb?"));
    assert!(!card.front_markdown.contains("```"));
    assert!(!card.front_markdown.contains("pigment"));

    assert_eq!(card.back_id.note_id, "answers.md");
    assert!(card.back_markdown.starts_with("# Light"));
    assert!(card.back_markdown.ends_with("Red and blue light."));
    assert!(!card.back_markdown.contains("side: back"));
}

/// Test the requested note may hold neither side of a unique card.
#[tokio::test]
async fn test_unique_card_requested_from_unrelated_note() {
    let lookup = lookup("inline.md", "photo", IdScope::Unique, &ids(&["answers.md"])).await;
    let card = lookup.complete().unwrap();
    assert_eq!(card.front_id.note_id, "biology.md");
    assert_eq!(card.back_id.note_id, "answers.md");
    assert!(card.back_markdown.ends_with("Red and blue light."));
}

/// Test a unique id is found without hints.
#[tokio::test]
async fn test_unique_card_without_hints() {
    let lookup = lookup("answers.md", "PHOTO", IdScope::Unique, &[]).await;
    assert!(lookup.complete().is_some());
}

/// Test a nested side is reported incomplete.
#[tokio::test]
async fn test_single_side_is_incomplete() {
    let lookup = lookup("biology.md", "pigment", IdScope::NoteScoped, &[]).await;
    let partial = lookup.incomplete().unwrap();
    assert_eq!(partial.front_markdown.as_deref(), Some("Which pigment is green?"));
    assert_eq!(partial.missing_side(), Some(Side::Back));
}

/// Test unknown ids are not found.
#[tokio::test]
async fn test_unknown_card() {
    assert_eq!(
        lookup("biology.md", "nothing", IdScope::Unique, &[]).await,
        CardLookup::NotFound
    );
}

/// Test resolving twice yields the same card.
#[tokio::test]
async fn test_resolve_is_repeatable() {
    let first = lookup("quiz.md", "what is rust?", IdScope::NoteScoped, &[]).await;
    let second = lookup("quiz.md", "what is rust?", IdScope::NoteScoped, &[]).await;
    assert_eq!(first, second);
}

/// Test a note without an outline fails the lookup.
#[tokio::test]
async fn test_missing_outline() {
    let mut source = MemorySource::new();
    source.insert(NoteSnapshot {
        id: "raw.md".to_string(),
        text: common::INLINE.to_string(),
        outline: None,
    });
    let result = resolve_card(
        &source,
        &FullId::card("raw.md", "x"),
        IdScope::NoteScoped,
        &[],
        &settings(),
    )
    .await;
    assert!(matches!(
        result,
        Err(IndexError::OutlineUnavailable { note_id }) if note_id == "raw.md"
    ));
}
