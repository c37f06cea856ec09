pub mod deletion_clock;
pub mod path_service;
pub mod trash_naming;

// Re-exportar para facilitar acceso
pub use deletion_clock::DeletionClock;
pub use path_service::StoragePath;
