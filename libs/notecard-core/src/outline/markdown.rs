//! Outline builder for raw markdown text.

use super::{Frontmatter, Heading, Outline, Section, SectionKind};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde_json::{Map, Value};

impl Outline {
    /// Build an outline from markdown text.
    pub fn from_markdown(text: &str) -> Self {
        build_outline(text)
    }
}

/// Compute headings, top-level sections and frontmatter for `text`.
pub fn build_outline(text: &str) -> Outline {
    let frontmatter = extract_frontmatter(text);
    let body_start = frontmatter.as_ref().map(|f| f.end).unwrap_or(0);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);

    let mut outline = Outline {
        frontmatter,
        ..Default::default()
    };
    let mut depth = 0usize;
    let mut heading: Option<Heading> = None;

    for (event, range) in Parser::new_ext(&text[body_start..], options).into_offset_iter() {
        let start = range.start + body_start;
        let end = range.end + body_start;
        match event {
            Event::Start(tag) => {
                if depth == 0 {
                    let kind = section_kind(&tag);
                    if let Tag::Heading { level, .. } = tag {
                        heading = Some(Heading {
                            text: String::new(),
                            level: heading_level(level),
                            start,
                            end,
                        });
                    }
                    outline.sections.push(Section { kind, start, end });
                }
                depth += 1;
            }
            Event::End(tag) => {
                depth = depth.saturating_sub(1);
                if depth == 0 && matches!(tag, TagEnd::Heading(_)) {
                    if let Some(mut finished) = heading.take() {
                        finished.text = finished.text.trim().to_string();
                        outline.headings.push(finished);
                    }
                }
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some(h) = heading.as_mut() {
                    h.text.push_str(&t);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(h) = heading.as_mut() {
                    h.text.push(' ');
                }
            }
            Event::Rule if depth == 0 => {
                outline.sections.push(Section {
                    kind: SectionKind::ThematicBreak,
                    start,
                    end,
                });
            }
            _ => {}
        }
    }

    outline
}

fn section_kind(tag: &Tag<'_>) -> SectionKind {
    match tag {
        Tag::Heading { .. } => SectionKind::Heading,
        Tag::CodeBlock(_) => SectionKind::Code,
        Tag::Paragraph => SectionKind::Paragraph,
        Tag::List(_) => SectionKind::List,
        Tag::BlockQuote => SectionKind::BlockQuote,
        Tag::Table(_) => SectionKind::Table,
        Tag::HtmlBlock => SectionKind::Html,
        _ => SectionKind::Other,
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Locate a `---` delimited YAML block at the very start of the text.
///
/// The returned range covers both fence lines. Unparseable YAML still yields a
/// frontmatter block with empty data so its text never leaks into content.
fn extract_frontmatter(text: &str) -> Option<Frontmatter> {
    let bom = if text.starts_with('\u{feff}') { '\u{feff}'.len_utf8() } else { 0 };
    let mut lines = text[bom..].split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let yaml_start = bom + first.len();
    let mut offset = yaml_start;
    for line in lines {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            let data = parse_yaml_map(&text[yaml_start..offset]).unwrap_or_default();
            return Some(Frontmatter {
                data,
                start: 0,
                end: offset + line.len(),
            });
        }
        offset += line.len();
    }
    None
}

fn parse_yaml_map(yaml: &str) -> Option<Map<String, Value>> {
    let yaml_value: serde_yaml::Value = match serde_yaml::from_str(yaml) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("ignoring malformed frontmatter: {}", e);
            return None;
        }
    };
    match serde_json::to_value(yaml_value).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
