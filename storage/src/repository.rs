use async_trait::async_trait;

use crate::error::StorageError;

#[async_trait]
pub trait Repository<T> {
    type Id: Send + Sync;

    async fn save(&self, entity: &T) -> Result<(), StorageError>;
    async fn find_by_id(&self, id: Self::Id) -> Result<Option<T>, StorageError>;
    async fn find_all(&self) -> Result<Vec<T>, StorageError>;
    /// Returns `true` when an entity was actually removed.
    async fn delete(&self, id: Self::Id) -> Result<bool, StorageError>;
}
