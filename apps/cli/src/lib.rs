pub mod args;
pub mod report;

use std::process::ExitCode;

use anyhow::Context;
use notecard_core::{index_corpus, resolve_card, FsSource, FullId, IdScope, ParseSettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::{Cli, Commands};

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let source = FsSource::open(&cli.vault)
        .with_context(|| format!("opening vault {}", cli.vault.display()))?;
    tracing::debug!(vault = %source.root().display(), "vault opened");

    match cli.command {
        Commands::List { json } => {
            let index = index_corpus(&source).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&index)?);
            } else {
                print!("{}", report::index_listing(&index));
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Show {
            note,
            card,
            unique,
            likely,
            show_markers,
            show_declarations,
        } => {
            let mut settings = ParseSettings::default();
            settings.extract.hide_card_marker = !show_markers;
            settings.extract.hide_declaration_block = !show_declarations;

            let scope = if unique { IdScope::Unique } else { IdScope::NoteScoped };
            let id = FullId::card(note, &card);
            let lookup = resolve_card(&source, &id, scope, &likely, &settings).await?;
            print!("{}", report::card_lookup(&id, &lookup));
            Ok(if lookup.complete().is_some() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Check => {
            let index = index_corpus(&source).await?;
            print!("{}", report::diagnostics(&index.diagnostics));
            Ok(if index.diagnostics.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
