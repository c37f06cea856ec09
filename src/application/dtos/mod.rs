pub mod trash_dto;

// Re-exportar para facilitar acceso
pub use trash_dto::{RestoredItemDto, TrashedItemDto};
