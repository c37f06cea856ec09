pub mod trash_fs_repository;

// Repositorio PostgreSQL
pub mod trash_pg_repository;

// Re-exportar para facilitar acceso
pub use trash_fs_repository::TrashFsRepository;
pub use trash_pg_repository::TrashPgRepository;
