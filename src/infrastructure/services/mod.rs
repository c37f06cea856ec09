pub mod fs_storage_view;
pub mod fs_version_store;
pub mod trash_sweep_service;

// Re-exportar para facilitar acceso
pub use fs_storage_view::FsStorageView;
pub use fs_version_store::FsVersionStore;
pub use trash_sweep_service::TrashSweepService;
