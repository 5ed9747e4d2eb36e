use std::process::ExitCode;

use clap::Parser;
use notecards_cli::args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    notecards_cli::run(cli).await
}
