pub mod recursive_copier;
pub mod trash_service;
pub mod version_set_service;


// Re-exportar para facilitar acceso
pub use recursive_copier::RecursiveCopier;
pub use trash_service::TrashService;
pub use version_set_service::VersionSetService;
