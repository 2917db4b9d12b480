//! dbot CLI: run the time, chat or brief bot. Config from env (`.env` supported) and optional CLI args.

use anyhow::Result;
use clap::Parser;
use dbot_cli::{run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    run(cli.command).await
}
