pub mod trash_repository;

// Re-exportar para facilitar acceso
pub use trash_repository::TrashRepository;
