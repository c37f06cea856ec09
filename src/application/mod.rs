pub mod dtos;
pub mod ports;
pub mod services;

// Re-exportaciones para facilitar el acceso a los principales puertos
pub use ports::storage_ports::StorageViewPort;
pub use ports::trash_ports::TrashUseCase;
pub use ports::version_ports::VersionStorePort;
