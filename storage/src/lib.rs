//! Storage crate: file-backed message persistence and repository abstractions.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – MessageRecord, MessageDocument
//! - [`repository`] – Repository trait
//! - [`message_repo`] – MessageRepository (JSON document file)
//! - [`json_file`] – JsonFileManager

mod error;
mod json_file;
mod message_repo;
mod models;
mod repository;


pub use error::StorageError;
pub use json_file::JsonFileManager;
pub use message_repo::MessageRepository;
pub use models::{MessageDocument, MessageRecord};
pub use repository::Repository;
