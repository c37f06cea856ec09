use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::trashed_item::TrashedItem;

/// DTO representing an item held in the trash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrashedItemDto {
    pub name: String,
    /// Restore key, paired with `name`
    pub deleted_at: i64,
    pub trashed_at: DateTime<Utc>,
    pub days_until_deletion: i64,
    pub location: String,
    pub item_type: String, // "file" o "dir"
    pub mime_type: Option<String>,
}

impl TrashedItemDto {
    pub fn new(item: &TrashedItem, retention_window: Duration) -> Self {
        let trashed_at = DateTime::from_timestamp(item.deleted_at, 0).unwrap_or_default();
        let expires_at = trashed_at + retention_window;
        let days_until_deletion = (expires_at - Utc::now()).num_days().max(0);

        Self {
            name: item.name.clone(),
            deleted_at: item.deleted_at,
            trashed_at,
            days_until_deletion,
            location: item.location.clone(),
            item_type: item.item_type.as_str().to_string(),
            mime_type: item.mime_type.clone(),
        }
    }
}

/// Outcome of a restore operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoredItemDto {
    /// Name the item was restored under; carries a ".restored" suffix
    /// when the original name was already taken
    pub restored_name: String,
    /// View path (area included) the content landed at
    pub restored_path: String,
    /// False when the original parent was gone and the view root was used
    pub original_location_used: bool,
}
