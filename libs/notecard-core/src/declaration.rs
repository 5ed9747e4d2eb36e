//! Declaration blocks embedded in notes.
//!
//! # Format
//! ````markdown
//! ```card
//! side: front
//! id: ownership
//! deck: rust
//! ```
//!
//! ```card
//! name: alternate headings
//! level: 1
//! ```
//! ````
//!
//! Block contents are lower-cased before parsing, so keys and values are
//! case-insensitive. The user-facing `deck` key maps to `deck_id`.

use crate::error::DeclarationError;
use crate::id::{normalize_card_id, IdScope, Side};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Fence language tags that mark a declaration block. The first is used when serializing.
pub const DECLARATION_TAGS: [&str; 2] = ["card", "flashcard"];

/// Commands that generate cards from a heading pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandName {
    AlternateHeadings,
    HeadingAndDelimiter,
    HeadingIsFront,
}

impl CommandName {
    pub const ALL: [CommandName; 3] = [
        Self::AlternateHeadings,
        Self::HeadingAndDelimiter,
        Self::HeadingIsFront,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlternateHeadings => "alternate headings",
            Self::HeadingAndDelimiter => "heading and delimiter",
            Self::HeadingIsFront => "heading is front",
        }
    }

    /// Parse a command name. Hyphens and underscores count as spaces.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = normalize_words(value);
        Self::ALL.into_iter().find(|c| c.as_str() == normalized)
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural marker a command splits sides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelimiterKind {
    Heading,
    HorizontalRule,
}

impl DelimiterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::HorizontalRule => "horizontal rule",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match normalize_words(value).as_str() {
            "heading" => Some(Self::Heading),
            "horizontal rule" | "rule" | "hr" => Some(Self::HorizontalRule),
            _ => None,
        }
    }
}

/// Declares one side of one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDeclaration {
    pub id: String,
    pub side: Side,
    pub scope: IdScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck_id: Option<String>,
    pub auto_generated: bool,
}

impl CardDeclaration {
    /// An explicit, globally unique declaration as written in a block.
    pub fn explicit(id: &str, side: Side, deck_id: Option<String>) -> Self {
        Self {
            id: normalize_card_id(id),
            side,
            scope: IdScope::Unique,
            deck_id,
            auto_generated: false,
        }
    }

    /// A note-scoped declaration produced from heading text or a command.
    pub fn note_scoped(
        id: &str,
        side: Side,
        deck_id: Option<String>,
        auto_generated: bool,
    ) -> Self {
        Self {
            id: normalize_card_id(id),
            side,
            scope: IdScope::NoteScoped,
            deck_id,
            auto_generated,
        }
    }
}

/// Generates many card declarations from a heading pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDeclaration {
    pub name: CommandName,
    /// Depth of the target headings relative to the containing heading. At least 1.
    pub level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<DelimiterKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Card(CardDeclaration),
    Command(CommandDeclaration),
}

/// Key/value shape shared by parsing and serialization.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct DeclarationFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    side: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delimiter: Option<Value>,
    #[serde(rename = "deck", skip_serializing_if = "Option::is_none")]
    deck_id: Option<Value>,
}

/// The fence language tag of `source`, lower-cased, if it opens with a fence.
pub fn fence_tag(source: &str) -> Option<String> {
    split_fence(source).map(|(tag, _)| tag)
}

/// Whether `source` is a fenced block carrying a declaration tag.
pub fn is_declaration_block(source: &str) -> bool {
    fence_tag(source).is_some_and(|tag| DECLARATION_TAGS.contains(&tag.as_str()))
}

/// Parse a fenced block, fences included.
///
/// Returns `Ok(None)` when the block is not a declaration block at all.
pub fn parse_declaration_block(source: &str) -> Result<Option<Declaration>, DeclarationError> {
    let Some((tag, body)) = split_fence(source) else {
        return Ok(None);
    };
    if !DECLARATION_TAGS.contains(&tag.as_str()) {
        return Ok(None);
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(&body.to_lowercase())
        .map_err(|e| DeclarationError::Yaml(e.to_string()))?;
    let value: Value =
        serde_json::to_value(yaml).map_err(|e| DeclarationError::Invalid(e.to_string()))?;
    match value {
        Value::Object(map) => parse_declaration_map(&map).map(Some),
        Value::Null => Err(DeclarationError::Invalid("empty declaration".to_string())),
        _ => Err(DeclarationError::Invalid(
            "declaration must be a set of key: value pairs".to_string(),
        )),
    }
}

/// Interpret an already-parsed mapping, e.g. a frontmatter entry.
pub fn parse_declaration_map(map: &Map<String, Value>) -> Result<Declaration, DeclarationError> {
    let fields: DeclarationFields = serde_json::from_value(Value::Object(map.clone()))
        .map_err(|e| DeclarationError::Invalid(e.to_string()))?;

    let deck_id = optional_scalar(fields.deck_id.as_ref(), "deck")?;

    if let Some(side) = fields.side.as_ref() {
        let raw_side = scalar(side, "side")?;
        let side = Side::parse(&raw_side)
            .ok_or_else(|| DeclarationError::Invalid(format!("unknown side `{}`", raw_side)))?;
        let id = optional_scalar(fields.id.as_ref(), "id")?.filter(|id| !id.trim().is_empty());
        return match id {
            Some(id) => Ok(Declaration::Card(CardDeclaration::explicit(&id, side, deck_id))),
            None => Err(DeclarationError::Incomplete { side, deck_id }),
        };
    }

    if let Some(name) = fields.name.as_ref() {
        let raw_name = scalar(name, "name")?;
        let name = CommandName::parse(&raw_name)
            .ok_or_else(|| DeclarationError::Invalid(format!("unknown command `{}`", raw_name)))?;
        let level = parse_level(fields.level.as_ref())?;
        let delimiter = match optional_scalar(fields.delimiter.as_ref(), "delimiter")? {
            Some(raw) => Some(DelimiterKind::parse(&raw).ok_or_else(|| {
                DeclarationError::Invalid(format!("unknown delimiter `{}`", raw))
            })?),
            None => None,
        };
        return Ok(Declaration::Command(CommandDeclaration {
            name,
            level,
            delimiter,
            deck_id,
        }));
    }

    Err(DeclarationError::Invalid(
        "declaration needs either `side` or `name`".to_string(),
    ))
}

/// Render a declaration as a fenced block using the primary tag.
pub fn serialize_declaration(declaration: &Declaration) -> Result<String, DeclarationError> {
    let fields = match declaration {
        Declaration::Card(card) => DeclarationFields {
            side: Some(Value::from(card.side.as_str())),
            id: Some(Value::from(card.id.as_str())),
            deck_id: card.deck_id.as_deref().map(Value::from),
            ..Default::default()
        },
        Declaration::Command(command) => DeclarationFields {
            name: Some(Value::from(command.name.as_str())),
            level: Some(Value::from(command.level)),
            delimiter: command.delimiter.map(|d| Value::from(d.as_str())),
            deck_id: command.deck_id.as_deref().map(Value::from),
            ..Default::default()
        },
    };
    let yaml = serde_yaml::to_string(&fields).map_err(|e| DeclarationError::Yaml(e.to_string()))?;
    Ok(format!("```{}\n{}```\n", DECLARATION_TAGS[0], yaml))
}

fn parse_level(value: Option<&Value>) -> Result<u8, DeclarationError> {
    let Some(value) = value else {
        return Ok(1);
    };
    let level = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    match level {
        Some(level @ 1..=6) => Ok(level as u8),
        _ => Err(DeclarationError::Invalid(format!(
            "level must be a number from 1 to 6, got `{}`",
            value
        ))),
    }
}

fn scalar(value: &Value, key: &str) -> Result<String, DeclarationError> {
    match value {
        Value::String(s) => Ok(s.trim().to_lowercase()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(DeclarationError::Invalid(format!("`{}` must be a single value", key))),
    }
}

fn optional_scalar(value: Option<&Value>, key: &str) -> Result<Option<String>, DeclarationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar(value, key).map(Some),
    }
}

fn normalize_words(value: &str) -> String {
    value
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a fenced block into its lower-cased tag and inner text.
fn split_fence(source: &str) -> Option<(String, &str)> {
    let source = source.trim_start();
    let (first, rest) = source.split_once('\n').unwrap_or((source, ""));
    let first = first.trim();

    let fence_char = first.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let fence_len = first.chars().take_while(|c| *c == fence_char).count();
    if fence_len < 3 {
        return None;
    }
    let tag = first[fence_len..].split_whitespace().next()?.to_lowercase();

    let mut body_end = rest.len();
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.len() >= fence_len && trimmed.chars().all(|c| c == fence_char) {
            body_end = offset;
            break;
        }
        offset += line.len();
    }
    Some((tag, &rest[..body_end]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_card_declaration() {
        let source = "```card\nside: front\nid: Ownership\ndeck: Rust\n```\n";
        let declaration = parse_declaration_block(source).unwrap().unwrap();
        assert_eq!(
            declaration,
            Declaration::Card(CardDeclaration {
                id: "ownership".to_string(),
                side: Side::Front,
                scope: IdScope::Unique,
                deck_id: Some("rust".to_string()),
                auto_generated: false,
            })
        );
    }

    #[test]
    fn second_tag_spelling_and_tilde_fence() {
        let source = "~~~FlashCard\nSIDE: B\nid: 42\n~~~";
        let declaration = parse_declaration_block(source).unwrap().unwrap();
        match declaration {
            Declaration::Card(card) => {
                assert_eq!(card.side, Side::Back);
                assert_eq!(card.id, "42");
            }
            other => panic!("expected card, got {:?}", other),
        }
    }

    #[test]
    fn other_languages_are_ignored() {
        assert_eq!(parse_declaration_block("```rust\nfn main() {}\n```").unwrap(), None);
        assert_eq!(parse_declaration_block("plain text").unwrap(), None);
        assert!(!is_declaration_block("```\nside: front\n```"));
        assert!(is_declaration_block("```card\n```"));
    }

    #[test]
    fn missing_id_is_incomplete() {
        let err = parse_declaration_block("```card\nside: back\ndeck: d\n```").unwrap_err();
        assert_eq!(
            err,
            DeclarationError::Incomplete {
                side: Side::Back,
                deck_id: Some("d".to_string()),
            }
        );
    }

    #[test]
    fn malformed_yaml_is_reported() {
        let err = parse_declaration_block("```card\nside: [front\n```").unwrap_err();
        assert!(matches!(err, DeclarationError::Yaml(_)));
    }

    #[test]
    fn unknown_side_or_command_is_invalid() {
        let err = parse_declaration_block("```card\nside: middle\nid: x\n```").unwrap_err();
        assert!(matches!(err, DeclarationError::Invalid(_)));
        let err = parse_declaration_block("```card\nname: every paragraph\n```").unwrap_err();
        assert_eq!(
            err,
            DeclarationError::Invalid("unknown command `every paragraph`".to_string())
        );
        let err = parse_declaration_block("```card\nfoo: bar\n```").unwrap_err();
        assert!(matches!(err, DeclarationError::Invalid(_)));
        let err = parse_declaration_block("```card\n```").unwrap_err();
        assert!(matches!(err, DeclarationError::Invalid(_)));
    }

    #[test]
    fn parse_command_with_defaults() {
        let declaration = parse_declaration_block("```card\nname: Alternate-Headings\n```")
            .unwrap()
            .unwrap();
        assert_eq!(
            declaration,
            Declaration::Command(CommandDeclaration {
                name: CommandName::AlternateHeadings,
                level: 1,
                delimiter: None,
                deck_id: None,
            })
        );
    }

    #[test]
    fn parse_command_fields() {
        let source = concat!(
            "```card\nname: heading and delimiter\n",
            "level: 2\ndelimiter: horizontal rule\n```",
        );
        let declaration = parse_declaration_block(source).unwrap().unwrap();
        assert_eq!(
            declaration,
            Declaration::Command(CommandDeclaration {
                name: CommandName::HeadingAndDelimiter,
                level: 2,
                delimiter: Some(DelimiterKind::HorizontalRule),
                deck_id: None,
            })
        );
    }

    #[test]
    fn invalid_command_values() {
        for source in [
            "```card\nname: heading is front\nlevel: 0\n```",
            "```card\nname: heading is front\nlevel: deep\n```",
            "```card\nname: alternate headings\ndelimiter: comma\n```",
        ] {
            let err = parse_declaration_block(source).unwrap_err();
            assert!(matches!(err, DeclarationError::Invalid(_)), "{}", source);
        }
    }

    #[test]
    fn serialize_round_trip_keeps_deck() {
        let source = "```card\nside: front\nid: abc\ndeck: languages\n```\n";
        let parsed = parse_declaration_block(source).unwrap().unwrap();
        let serialized = serialize_declaration(&parsed).unwrap();
        assert!(serialized.contains("deck: languages"));
        assert!(!serialized.contains("deck_id"));
        assert_eq!(parse_declaration_block(&serialized).unwrap().unwrap(), parsed);
    }

    #[test]
    fn serialize_omits_unset_deck() {
        let declaration = Declaration::Card(CardDeclaration::explicit("abc", Side::Back, None));
        let serialized = serialize_declaration(&declaration).unwrap();
        assert_eq!(serialized, "```card\nside: back\nid: abc\n```\n");
    }

    #[test]
    fn serialize_command() {
        let declaration = Declaration::Command(CommandDeclaration {
            name: CommandName::HeadingIsFront,
            level: 2,
            delimiter: None,
            deck_id: Some("d".to_string()),
        });
        let serialized = serialize_declaration(&declaration).unwrap();
        assert_eq!(
            serialized,
            "```card\nname: heading is front\nlevel: 2\ndeck: d\n```\n"
        );
        assert_eq!(parse_declaration_block(&serialized).unwrap().unwrap(), declaration);
    }

    #[test]
    fn frontmatter_map() {
        let mut map = Map::new();
        map.insert("side".to_string(), Value::from("Front"));
        map.insert("id".to_string(), Value::from("Whole-Note"));
        let declaration = parse_declaration_map(&map).unwrap();
        match declaration {
            Declaration::Card(card) => {
                assert_eq!(card.id, "whole-note");
                assert_eq!(card.side, Side::Front);
            }
            other => panic!("expected card, got {:?}", other),
        }
    }
}
