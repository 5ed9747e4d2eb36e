//! Shared fixtures: a small vault exercising every way of declaring cards.

#![allow(dead_code)]

use std::path::Path;

use notecard_core::{MemorySource, ParseSettings};

pub const CAPITALS: &str = "# Capitals

```card
name: alternate headings
```

## France

Europe

## Paris

Seine

## Spain

Iberia

## Madrid

Plaza
";

pub const QUIZ: &str = "# Quiz

```card
name: heading and delimiter
deck: Languages
```

## What is Rust?

A language?

---

A systems language.

## Unanswered

No rule here.
";

pub const BIOLOGY: &str = "# Photosynthesis

```card
side: front
id: photo
```

What does chlorophyll absorb?

## Detail front@pigment

Which pigment is green?
";

pub const ANSWERS: &str = "# Light

```card
side: back
id: photo
```

Red and blue light.
";

pub const GLOSSARY: &str = "---
card:
  name: heading is front
  level: 2
---
# Glossary

## Ownership

Each value has one owner.

## Borrowing

References without ownership.
";

pub const INLINE: &str = "## front@x\nFoo\n## back@x\nBar";

pub const BROKEN: &str = "# Broken

```card
side: front
```

```flashcard
name: shuffle
```
";

/// Every fixture note, in store order.
pub fn notes() -> Vec<(&'static str, &'static str)> {
    vec![
        ("capitals.md", CAPITALS),
        ("quiz.md", QUIZ),
        ("biology.md", BIOLOGY),
        ("answers.md", ANSWERS),
        ("glossary.md", GLOSSARY),
        ("inline.md", INLINE),
        ("broken.md", BROKEN),
    ]
}

/// In-memory store holding every fixture note.
pub fn vault() -> MemorySource {
    notes()
        .into_iter()
        .fold(MemorySource::new(), |source, (id, text)| source.with_markdown(id, text))
}

/// Write every fixture note under `dir`.
pub fn write_vault(dir: &Path) {
    for (id, text) in notes() {
        std::fs::write(dir.join(id), text).unwrap();
    }
}

pub fn settings() -> ParseSettings {
    ParseSettings::default()
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
