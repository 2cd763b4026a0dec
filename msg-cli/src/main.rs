//! msgs CLI: list, get, delete and create messages in the JSON document. Config from env and
//! optional CLI args.

use anyhow::{Context, Result};
use clap::Parser;
use msg_cli::{execute, load_config, Cli};
use msg_core::{init_tracing, MessageService};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.file.clone())?;

    init_tracing(&config.log_file)
        .with_context(|| format!("Initialize logging to {}", config.log_file))?;

    let service = MessageService::open(&config).await.with_context(|| {
        format!(
            "Open message document {} (check MESSAGES_FILE)",
            config.messages_file.display()
        )
    })?;

    let outcome = execute(&service, cli.command).await?;
    println!("{}", outcome.output);

    if !outcome.success {
        std::process::exit(1);
    }
    Ok(())
}
