// Exportar los módulos principales del proyecto
pub mod common;
pub mod domain;
pub mod application;
pub mod infrastructure;

// Re-exportaciones públicas comunes
pub use application::dtos::trash_dto::{RestoredItemDto, TrashedItemDto};
pub use application::ports::storage_ports::StorageViewPort;
pub use application::ports::trash_ports::TrashUseCase;
pub use application::ports::version_ports::VersionStorePort;
pub use application::services::trash_service::TrashService;
pub use application::services::version_set_service::VersionSetService;
pub use common::config::AppConfig;
pub use common::errors::{DomainError, ErrorKind};
pub use common::locks::UserLockRegistry;
pub use domain::entities::trashed_item::{TrashedItem, TrashedItemType};
pub use domain::repositories::trash_repository::TrashRepository;
pub use domain::services::path_service::StoragePath;
pub use infrastructure::repositories::trash_fs_repository::TrashFsRepository;
pub use infrastructure::repositories::trash_pg_repository::TrashPgRepository;
pub use infrastructure::services::fs_storage_view::FsStorageView;
pub use infrastructure::services::fs_version_store::FsVersionStore;
pub use infrastructure::services::trash_sweep_service::TrashSweepService;
