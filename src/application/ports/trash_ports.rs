use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dtos::trash_dto::{RestoredItemDto, TrashedItemDto};
use crate::common::errors::Result;

/// Port for trash-related use cases
#[async_trait]
pub trait TrashUseCase: Send + Sync {
    /// List the items currently held in the user's trash
    async fn list_trash(&self, user_id: &Uuid) -> Result<Vec<TrashedItemDto>>;

    /// Intercept a deletion: copy the item and relocate its version history
    /// into the user's holding areas and record provenance metadata. The
    /// live copy itself is removed by the surrounding deletion flow, only
    /// after this call has returned
    async fn move_to_trash(&self, user_id: &Uuid, path: &str) -> Result<TrashedItemDto>;

    /// Restore a held item to its original location, falling back to the
    /// view root when that location is gone
    async fn restore(&self, user_id: &Uuid, name: &str, deleted_at: i64)
        -> Result<RestoredItemDto>;

    /// Drop every item of the user older than the retention window
    ///
    /// Returns how many items were expired.
    async fn expire(&self, user_id: &Uuid) -> Result<usize>;
}
