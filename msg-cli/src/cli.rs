//! CLI parser, config loading and command execution.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use msg_core::{MessageService, StoreConfig};
use tracing::info;

#[derive(Parser)]
#[command(name = "msgs")]
#[command(about = "Message store CLI: list, get, delete, create", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Document path; overrides MESSAGES_FILE.
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Print all messages as JSON, highest id first.
    List,
    /// Print one message as JSON, or `null` if there is none with that id.
    Get {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Delete the first message with the id and print the status code.
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Append a message and print the status code.
    Create {
        /// Message id; defaults to the current time in milliseconds.
        #[arg(long, allow_negative_numbers = true)]
        id: Option<i64>,
        text: String,
    },
}

/// What a command printed and whether it succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub success: bool,
}

/// Load StoreConfig from environment. If `file` is provided it overrides MESSAGES_FILE.
pub fn load_config(file: Option<PathBuf>) -> Result<StoreConfig> {
    Ok(StoreConfig::load(file)?)
}

/// Runs one command against the service.
pub async fn execute(service: &MessageService, command: Commands) -> Result<Outcome> {
    let outcome = match command {
        Commands::List => {
            let messages = service.list_sorted().await;
            Outcome {
                output: serde_json::to_string_pretty(&messages)?,
                success: true,
            }
        }
        Commands::Get { id } => {
            let message = service.get_by_id(id).await;
            Outcome {
                output: serde_json::to_string(&message)?,
                success: true,
            }
        }
        Commands::Delete { id } => {
            let status = service.delete_by_id(id).await;
            Outcome {
                output: status.to_string(),
                success: status.is_success(),
            }
        }
        Commands::Create { id, text } => {
            let id = id.unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
            info!(id, "Creating message");
            let status = service.create(id, &text).await;
            Outcome {
                output: status.to_string(),
                success: status.is_success(),
            }
        }
    };
    Ok(outcome)
}
