//! Message service: the four calls the API layer makes.
//!
//! Storage failures are logged here and collapsed into the coarse contract: an empty
//! list, an absent message, or [`StatusCode::Failure`].

use storage::{MessageRecord, MessageRepository};
use tracing::{error, info, instrument, warn};

use crate::config::StoreConfig;
use crate::error::Result;
use crate::status::StatusCode;

#[derive(Clone)]
pub struct MessageService {
    repo: MessageRepository,
}

impl MessageService {
    pub fn new(repo: MessageRepository) -> Self {
        Self { repo }
    }

    /// Opens the repository described by `config`.
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let repo =
            MessageRepository::with_options(&config.messages_file, config.create_if_missing)
                .await?;
        Ok(Self::new(repo))
    }

    /// All messages, highest id first. Empty when the document cannot be read.
    #[instrument(skip(self))]
    pub async fn list_sorted(&self) -> Vec<MessageRecord> {
        match self.repo.list_sorted().await {
            Ok(messages) => messages,
            Err(e) => {
                error!(error = %e, "Failed to list messages");
                Vec::new()
            }
        }
    }

    /// The first message with `id`. `None` both when absent and when the document cannot be read.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Option<MessageRecord> {
        self.repo.get_by_id(id).await.unwrap_or_else(|e| {
            error!(error = %e, id, "Failed to get message");
            None
        })
    }

    /// Deletes the first message with `id`.
    ///
    /// Returns `Success` whenever the document was rewritten, including when no message had
    /// that id; callers cannot tell a removal from a miss. Use
    /// [`MessageRepository::delete_by_id`] when the difference matters.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> StatusCode {
        match self.repo.delete_by_id(id).await {
            Ok(true) => StatusCode::Success,
            Ok(false) => {
                warn!(id, "No message to delete");
                StatusCode::Success
            }
            Err(e) => {
                error!(error = %e, id, "Failed to delete message");
                StatusCode::Failure
            }
        }
    }

    /// Appends a message. Ids are not checked for uniqueness.
    #[instrument(skip(self, text))]
    pub async fn create(&self, id: i64, text: &str) -> StatusCode {
        match self.repo.create(&MessageRecord::new(id, text)).await {
            Ok(()) => {
                info!(id, "Message created");
                StatusCode::Success
            }
            Err(e) => {
                error!(error = %e, id, "Failed to create message");
                StatusCode::Failure
            }
        }
    }
}
