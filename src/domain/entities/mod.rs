pub mod trashed_item;

// Re-exportar para facilitar acceso
pub use trashed_item::{TrashedItem, TrashedItemType};
