//! # msg-core
//!
//! The message service contract on top of [`storage::MessageRepository`]: [`MessageService`],
//! [`StatusCode`], environment config and tracing initialization. Transport-agnostic; an API
//! layer or the msg-cli binary calls the four service operations.

pub mod config;
pub mod error;
pub mod logger;
pub mod service;
pub mod status;

pub use config::StoreConfig;
pub use error::{CoreError, Result};
pub use logger::init_tracing;
pub use service::MessageService;
pub use status::StatusCode;
pub use storage::MessageRecord;
