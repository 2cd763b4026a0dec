use std::env;
use std::path::PathBuf;

use crate::error::{CoreError, Result};

/// Default document location, relative to the working directory.
pub const DEFAULT_MESSAGES_FILE: &str = "src/messages.json";
pub const DEFAULT_LOG_FILE: &str = "logs/messages.log";

/// Message store configuration, loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub messages_file: PathBuf,
    /// Initialize an empty document when the file does not exist.
    pub create_if_missing: bool,
    pub log_file: String,
}

impl StoreConfig {
    /// Loads config from `MESSAGES_FILE`, `MESSAGES_CREATE_IF_MISSING` and `LOG_FILE`.
    /// A `file` override takes precedence over `MESSAGES_FILE`.
    pub fn load(file: Option<PathBuf>) -> Result<Self> {
        let messages_file = file.unwrap_or_else(|| {
            env::var("MESSAGES_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MESSAGES_FILE))
        });
        let create_if_missing = match env::var("MESSAGES_CREATE_IF_MISSING") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                CoreError::Config(format!(
                    "MESSAGES_CREATE_IF_MISSING must be true or false, got {:?}",
                    raw
                ))
            })?,
            Err(_) => true,
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());

        Ok(Self {
            messages_file,
            create_if_missing,
            log_file,
        })
    }
}
