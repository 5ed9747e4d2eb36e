use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notecards")]
#[command(about = "Index and look up flashcards declared in markdown notes", long_about = None)]
pub struct Cli {
    /// Directory holding the markdown notes
    #[arg(long, env = "NOTECARDS_VAULT", default_value = ".", global = true)]
    pub vault: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every indexed card side
    #[command(alias = "ls")]
    List {
        /// Print the index as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve one card and print both sides
    Show {
        /// Note the card is declared in, relative to the vault
        note: String,

        /// Card id
        card: String,

        /// Look the id up across all notes instead of only `note`
        #[arg(long)]
        unique: bool,

        /// Notes to search first
        #[arg(long = "likely")]
        likely: Vec<String>,

        /// Keep headings that carry an inline marker
        #[arg(long)]
        show_markers: bool,

        /// Keep the card's own declaration block
        #[arg(long)]
        show_declarations: bool,
    },

    /// Report declaration problems; exits with 1 when any are found
    Check,
}
