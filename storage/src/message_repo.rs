//! Message repository: persistence and queries for messages.
//!
//! Uses JsonFileManager and the models (MessageDocument, MessageRecord).
//! Every call re-reads the whole document; mutations rewrite it.
//! All repositories opened on the same file within a process share one lock, so
//! read-modify-write cycles are serialized and cannot lose each other's updates.
//! Other processes writing the file are not coordinated.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError, Weak};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::json_file::JsonFileManager;
use crate::models::{MessageDocument, MessageRecord};
use crate::repository::Repository;

#[derive(Clone)]
pub struct MessageRepository {
    file: JsonFileManager,
    lock: Arc<RwLock<()>>,
}

impl MessageRepository {
    /// Opens the document at `path`, creating an empty one if it does not exist.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::with_options(path, true).await
    }

    pub async fn with_options(
        path: impl AsRef<Path>,
        create_if_missing: bool,
    ) -> Result<Self, StorageError> {
        let file = JsonFileManager::new(path, create_if_missing).await?;
        let canonical = tokio::fs::canonicalize(file.path())
            .await
            .map_err(StorageError::io(file.path()))?;
        Ok(Self {
            file,
            lock: lock_for(canonical),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// All messages ordered by descending id.
    pub async fn list_sorted(&self) -> Result<Vec<MessageRecord>, StorageError> {
        let _guard = self.lock.read().await;
        let messages = self.file.read().await?.sorted_desc();
        info!("Retrieved {} messages", messages.len());
        Ok(messages)
    }

    /// First message with the given id, if any.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<MessageRecord>, StorageError> {
        let _guard = self.lock.read().await;
        let document = self.file.read().await?;
        let message = document.find(id).cloned();
        debug!(id, found = message.is_some(), "Looked up message");
        Ok(message)
    }

    /// Removes the first message with the given id and rewrites the document.
    ///
    /// The document is rewritten even when no message matched. Returns whether
    /// a message was removed.
    pub async fn delete_by_id(&self, id: i64) -> Result<bool, StorageError> {
        let removed = self
            .mutate(|document| document.remove_first(id).is_some())
            .await?;
        info!(id, removed, "Deleted message");
        Ok(removed)
    }

    /// Appends a message and rewrites the document. Duplicate ids are accepted.
    pub async fn create(&self, record: &MessageRecord) -> Result<(), StorageError> {
        let record = record.clone();
        let id = record.id;
        self.mutate(move |document| document.push(record)).await?;
        info!(id, "Saved message");
        Ok(())
    }

    /// Read-modify-write under the write lock. Nothing is written if the read fails.
    async fn mutate<R>(
        &self,
        f: impl FnOnce(&mut MessageDocument) -> R,
    ) -> Result<R, StorageError> {
        let _guard = self.lock.write().await;
        let mut document = self.file.read().await?;
        let out = f(&mut document);
        self.file.write(&document).await?;
        Ok(out)
    }
}

/// Returns the process-wide lock for a canonical document path.
fn lock_for(path: PathBuf) -> Arc<RwLock<()>> {
    static LOCKS: OnceLock<Mutex<HashMap<PathBuf, Weak<RwLock<()>>>>> = OnceLock::new();

    let mut locks = LOCKS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    locks.retain(|_, lock| lock.strong_count() > 0);

    if let Some(lock) = locks.get(&path).and_then(Weak::upgrade) {
        return lock;
    }
    let lock = Arc::new(RwLock::new(()));
    locks.insert(path, Arc::downgrade(&lock));
    lock
}

#[async_trait]
impl Repository<MessageRecord> for MessageRepository {
    type Id = i64;

    async fn save(&self, entity: &MessageRecord) -> Result<(), StorageError> {
        self.create(entity).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<MessageRecord>, StorageError> {
        self.get_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<MessageRecord>, StorageError> {
        self.list_sorted().await
    }

    async fn delete(&self, id: i64) -> Result<bool, StorageError> {
        self.delete_by_id(id).await
    }
}
