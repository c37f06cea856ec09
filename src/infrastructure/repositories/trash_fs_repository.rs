use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::common::errors::{DomainError, Result};
use crate::domain::entities::trashed_item::TrashedItem;
use crate::domain::repositories::trash_repository::TrashRepository;

/// Repositorio de metadatos de papelera sobre un índice JSON
///
/// Alternativa sin base de datos pensada para despliegues pequeños y para
/// pruebas. Mantiene todas las filas en un único archivo de índice y
/// serializa los ciclos de lectura-modificación-escritura con un lock.
pub struct TrashFsRepository {
    index_path: PathBuf,
    index_lock: Mutex<()>,
}

impl TrashFsRepository {
    /// El índice vive en <storage_root>/.trash/trash_index.json, fuera de
    /// las vistas por usuario
    pub fn new(storage_root: impl AsRef<Path>) -> Self {
        Self {
            index_path: storage_root.as_ref().join(".trash").join("trash_index.json"),
            index_lock: Mutex::new(()),
        }
    }

    async fn ensure_meta_dir(&self) -> Result<()> {
        if let Some(parent) = self.index_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::internal_error("Trash", "Failed to create trash index directory")
                    .with_source(e)
            })?;
        }
        Ok(())
    }

    async fn load_index(&self) -> Result<Vec<TrashedItem>> {
        if !self.index_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.index_path).await.map_err(|e| {
            DomainError::internal_error("Trash", "Failed to read trash index").with_source(e)
        })?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            DomainError::internal_error("Trash", "Failed to parse trash index").with_source(e)
        })
    }

    async fn save_index(&self, items: &[TrashedItem]) -> Result<()> {
        self.ensure_meta_dir().await?;

        let content = serde_json::to_string_pretty(items).map_err(|e| {
            DomainError::internal_error("Trash", "Failed to serialize trash index").with_source(e)
        })?;

        fs::write(&self.index_path, content).await.map_err(|e| {
            DomainError::internal_error("Trash", "Failed to write trash index").with_source(e)
        })
    }
}

#[async_trait]
impl TrashRepository for TrashFsRepository {
    #[instrument(skip(self))]
    async fn insert(&self, item: &TrashedItem) -> Result<()> {
        let _guard = self.index_lock.lock().await;

        let mut items = self.load_index().await?;
        let duplicate = items.iter().any(|existing| {
            existing.user_id == item.user_id
                && existing.name == item.name
                && existing.deleted_at == item.deleted_at
        });
        if duplicate {
            return Err(DomainError::already_exists(
                "Trash",
                format!(
                    "Ya existe una fila para {} con marca {}",
                    item.name, item.deleted_at
                ),
            ));
        }

        debug!(
            "Insertando fila de papelera: usuario={}, nombre={}, marca={}",
            item.user_id, item.name, item.deleted_at
        );
        items.push(item.clone());
        self.save_index(&items).await
    }

    #[instrument(skip(self))]
    async fn find_item(
        &self,
        user_id: &Uuid,
        name: &str,
        deleted_at: i64,
    ) -> Result<Vec<TrashedItem>> {
        let _guard = self.index_lock.lock().await;

        let items = self.load_index().await?;
        Ok(items
            .into_iter()
            .filter(|item| {
                item.user_id == *user_id && item.name == name && item.deleted_at == deleted_at
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: &Uuid) -> Result<Vec<TrashedItem>> {
        let _guard = self.index_lock.lock().await;

        let items = self.load_index().await?;
        let mut rows: Vec<TrashedItem> = items
            .into_iter()
            .filter(|item| item.user_id == *user_id)
            .collect();
        // Mismo orden que el repositorio SQL: más recientes primero
        rows.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at).then(a.name.cmp(&b.name)));
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn list_older_than(&self, user_id: &Uuid, cutoff: i64) -> Result<Vec<TrashedItem>> {
        let _guard = self.index_lock.lock().await;

        let items = self.load_index().await?;
        let mut rows: Vec<TrashedItem> = items
            .into_iter()
            .filter(|item| item.user_id == *user_id && item.deleted_at < cutoff)
            .collect();
        rows.sort_by(|a, b| a.deleted_at.cmp(&b.deleted_at).then(a.name.cmp(&b.name)));
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn delete_item(&self, user_id: &Uuid, name: &str, deleted_at: i64) -> Result<u64> {
        let _guard = self.index_lock.lock().await;

        let mut items = self.load_index().await?;
        let before = items.len();
        items.retain(|item| {
            !(item.user_id == *user_id && item.name == name && item.deleted_at == deleted_at)
        });
        let removed = (before - items.len()) as u64;

        if removed > 0 {
            self.save_index(&items).await?;
        }
        debug!(
            "Eliminadas {} filas de papelera (usuario={}, nombre={}, marca={})",
            removed, user_id, name, deleted_at
        );
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn delete_older_than(&self, user_id: &Uuid, cutoff: i64) -> Result<u64> {
        let _guard = self.index_lock.lock().await;

        let mut items = self.load_index().await?;
        let before = items.len();
        items.retain(|item| !(item.user_id == *user_id && item.deleted_at < cutoff));
        let removed = (before - items.len()) as u64;

        if removed > 0 {
            self.save_index(&items).await?;
        }
        debug!(
            "Eliminadas {} filas expiradas del usuario {}",
            removed, user_id
        );
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<Uuid>> {
        let _guard = self.index_lock.lock().await;

        let items = self.load_index().await?;
        let mut users: Vec<Uuid> = items.into_iter().map(|item| item.user_id).collect();
        users.sort();
        users.dedup();
        Ok(users)
    }
}
