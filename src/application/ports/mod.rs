pub mod storage_ports;
pub mod trash_ports;
pub mod version_ports;

// Re-exportaciones para facilitar el acceso a los principales puertos
pub use storage_ports::StorageViewPort;
pub use trash_ports::TrashUseCase;
pub use version_ports::VersionStorePort;
