use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::application::dtos::trash_dto::{RestoredItemDto, TrashedItemDto};
use crate::application::ports::storage_ports::StorageViewPort;
use crate::application::ports::trash_ports::TrashUseCase;
use crate::application::services::recursive_copier::RecursiveCopier;
use crate::application::services::version_set_service::VersionSetService;
use crate::common::config::RetentionConfig;
use crate::common::errors::{DomainError, Result};
use crate::common::locks::UserLockRegistry;
use crate::domain::entities::trashed_item::{TrashedItem, TrashedItemType};
use crate::domain::repositories::trash_repository::TrashRepository;
use crate::domain::services::deletion_clock::DeletionClock;
use crate::domain::services::path_service::StoragePath;
use crate::domain::services::trash_naming::{self, FILES_DIR, TRASH_DIR, VERSIONS_TRASH_DIR};

/// Servicio de aplicación para operaciones de papelera
///
/// Las operaciones de un mismo usuario se serializan con un lock por
/// usuario; el reloj de borrado garantiza marcas únicas por (usuario,
/// nombre) incluso dentro del mismo segundo.
pub struct TrashService {
    trash_repository: Arc<dyn TrashRepository>,
    storage: Arc<dyn StorageViewPort>,
    copier: RecursiveCopier,
    versions: VersionSetService,
    clock: DeletionClock,
    locks: Arc<UserLockRegistry>,
    retention: RetentionConfig,
}

impl TrashService {
    /// Composición: la misma vista de almacenamiento respalda el copiado
    /// recursivo y el conjunto de versiones; el repositorio de metadatos
    /// puede ser PostgreSQL o el índice JSON. Con un `VersionSetService`
    /// deshabilitado el servicio funciona sin seguimiento de versiones.
    pub fn new(
        trash_repository: Arc<dyn TrashRepository>,
        storage: Arc<dyn StorageViewPort>,
        versions: VersionSetService,
        locks: Arc<UserLockRegistry>,
        retention: RetentionConfig,
    ) -> Self {
        Self {
            trash_repository,
            copier: RecursiveCopier::new(storage.clone()),
            storage,
            versions,
            clock: DeletionClock::new(),
            locks,
            retention,
        }
    }

    /// Expira los elementos del usuario anteriores al corte dado
    ///
    /// Pensado para pruebas y mantenimiento; la operación normal usa la
    /// ventana de retención configurada.
    pub async fn expire_older_than(&self, user_id: &Uuid, cutoff: i64) -> Result<usize> {
        let _guard = self.locks.acquire(user_id).await?;
        self.expire_locked(user_id, cutoff).await
    }

    /// Marca de corte actual: ahora menos la ventana de retención
    fn cutoff(&self) -> i64 {
        Utc::now().timestamp() - self.retention.retention_window().num_seconds()
    }

    /// Crea las áreas de retención del usuario si aún no existen
    async fn ensure_holding_areas(&self, user_id: &Uuid) -> Result<()> {
        self.storage
            .ensure_directory(user_id, &StoragePath::from_string(TRASH_DIR))
            .await?;
        self.storage
            .ensure_directory(user_id, &StoragePath::from_string(VERSIONS_TRASH_DIR))
            .await?;
        Ok(())
    }

    /// Primer nombre libre de la secuencia "", ".restored", ".restored1", ...
    async fn unique_restore_name(
        &self,
        user_id: &Uuid,
        parent: &StoragePath,
        base: &str,
    ) -> Result<String> {
        let mut attempt = 0;
        loop {
            let candidate = trash_naming::restored_name(base, attempt);
            let target = trash_naming::in_area(FILES_DIR, &parent.join(&candidate));
            if !self.storage.exists(user_id, &target).await? {
                return Ok(candidate);
            }
            attempt += 1;
        }
    }

    /// Pasada de expiración con el lock del usuario ya adquirido
    ///
    /// Los artefactos se borran a mejor esfuerzo: un fallo se registra y
    /// la pasada continúa. Las filas de metadatos se retiran siempre, en
    /// una sola operación, para que un artefacto huérfano no reviva el
    /// elemento en listados posteriores.
    async fn expire_locked(&self, user_id: &Uuid, cutoff: i64) -> Result<usize> {
        let expired = self.trash_repository.list_older_than(user_id, cutoff).await?;
        if expired.is_empty() {
            return Ok(0);
        }

        for item in &expired {
            let artifact = trash_naming::trash_artifact_path(&item.name, item.deleted_at);
            if let Err(e) = self.storage.delete(user_id, &artifact).await {
                error!("Error al borrar el artefacto expirado {}: {}", artifact, e);
            }
            if let Err(e) = self.versions.purge(user_id, item).await {
                error!(
                    "Error al borrar las versiones retenidas de {}: {}",
                    item.artifact_name(),
                    e
                );
            }
        }

        let removed = self.trash_repository.delete_older_than(user_id, cutoff).await?;
        info!(
            "Expirados {} elementos del usuario {} (corte {})",
            removed, user_id, cutoff
        );
        Ok(removed as usize)
    }
}

#[async_trait]
impl TrashUseCase for TrashService {
    #[instrument(skip(self))]
    async fn list_trash(&self, user_id: &Uuid) -> Result<Vec<TrashedItemDto>> {
        debug!("Listando la papelera del usuario {}", user_id);
        let items = self.trash_repository.list_for_user(user_id).await?;
        let window = self.retention.retention_window();
        Ok(items
            .iter()
            .map(|item| TrashedItemDto::new(item, window))
            .collect())
    }

    #[instrument(skip(self))]
    async fn move_to_trash(&self, user_id: &Uuid, path: &str) -> Result<TrashedItemDto> {
        info!("Moviendo a papelera: ruta={}, usuario={}", path, user_id);

        let rel = StoragePath::from_string(path);
        let name = rel.file_name().ok_or_else(|| {
            DomainError::validation_error("Trash", "Cannot trash the view root")
        })?;

        let _guard = self.locks.acquire(user_id).await?;

        let source = trash_naming::in_area(FILES_DIR, &rel);
        if !self.storage.exists(user_id, &source).await? {
            return Err(DomainError::not_found("Trash", rel.to_string()));
        }

        self.ensure_holding_areas(user_id).await?;

        let deleted_at = self.clock.next(user_id).await;
        let is_dir = self.storage.is_directory(user_id, &source).await?;
        let item_type = if is_dir {
            TrashedItemType::Directory
        } else {
            TrashedItemType::File
        };
        let mime_type = if is_dir {
            None
        } else {
            Some(self.storage.mime_type(user_id, &source).await?)
        };
        let location = rel.parent().unwrap_or_else(StoragePath::root).to_string();

        let item = TrashedItem::new(*user_id, name, deleted_at, location, item_type, mime_type);
        let artifact = trash_naming::trash_artifact_path(&item.name, item.deleted_at);

        // Copiar primero: si la copia falla no debe quedar fila de metadatos
        if let Err(e) = self.copier.copy_tree(user_id, &source, &artifact).await {
            if let Err(cleanup) = self.storage.delete(user_id, &artifact).await {
                error!("Error al limpiar la copia parcial {}: {}", artifact, cleanup);
            }
            return Err(e);
        }

        if let Err(e) = self.trash_repository.insert(&item).await {
            if let Err(cleanup) = self.storage.delete(user_id, &artifact).await {
                error!("Error al limpiar el artefacto {}: {}", artifact, cleanup);
            }
            return Err(e);
        }

        // Con el contenido y la fila ya durables pueden viajar las versiones.
        // El original sigue en el área activa: lo retira el flujo de borrado
        // que nos invocó, nunca antes de que la copia sea durable.
        self.versions.relocate_to_trash(user_id, &rel, &item).await?;

        debug!("Elemento retenido como {}", artifact);

        // Pasada de expiración al final de cada movimiento; sus fallos no
        // deben tumbar un movimiento ya completado
        if let Err(e) = self.expire_locked(user_id, self.cutoff()).await {
            error!("Error en la expiración tras el movimiento: {}", e);
        }

        Ok(TrashedItemDto::new(&item, self.retention.retention_window()))
    }

    #[instrument(skip(self))]
    async fn restore(
        &self,
        user_id: &Uuid,
        name: &str,
        deleted_at: i64,
    ) -> Result<RestoredItemDto> {
        info!(
            "Restaurando {} (marca {}) para el usuario {}",
            name, deleted_at, user_id
        );

        let _guard = self.locks.acquire(user_id).await?;

        let mut rows = self
            .trash_repository
            .find_item(user_id, name, deleted_at)
            .await?;
        if rows.len() != 1 {
            error!(
                "trash bin database inconsistent! (usuario={}, nombre={}, marca={}, filas={})",
                user_id,
                name,
                deleted_at,
                rows.len()
            );
            return Err(DomainError::inconsistency(
                "Trash",
                format!(
                    "Expected exactly one metadata row for {}, found {}",
                    trash_naming::artifact_name(name, deleted_at),
                    rows.len()
                ),
            ));
        }
        let item = rows.remove(0);

        // Destino: la ubicación original, o la raíz si ya no existe
        let mut parent = StoragePath::from_string(&item.location);
        let mut original_location_used = true;
        if !parent.is_empty() {
            let parent_area = trash_naming::in_area(FILES_DIR, &parent);
            if !self.storage.is_directory(user_id, &parent_area).await? {
                warn!(
                    "La ubicación original {} ya no existe; se restaura en la raíz",
                    item.location
                );
                parent = StoragePath::root();
                original_location_used = false;
            }
        }

        let restored_name = self.unique_restore_name(user_id, &parent, &item.name).await?;
        if restored_name != item.name {
            debug!(
                "El nombre {} está ocupado; se restaura como {}",
                item.name, restored_name
            );
        }

        let artifact = trash_naming::trash_artifact_path(&item.name, item.deleted_at);
        let target = trash_naming::in_area(FILES_DIR, &parent.join(&restored_name));

        if !self.storage.rename(user_id, &artifact, &target).await? {
            return Err(DomainError::not_found("Trash", artifact.to_string()));
        }

        // Las versiones viajan solo con el contenido ya restaurado; si su
        // movimiento falla, la fila queda para reintentar la restauración
        self.versions
            .restore_from_trash(user_id, &item, &parent, &restored_name)
            .await?;

        let removed = self
            .trash_repository
            .delete_item(user_id, &item.name, item.deleted_at)
            .await?;
        if removed == 0 {
            warn!(
                "La fila de {} ya no estaba al completar la restauración",
                item.artifact_name()
            );
        }

        info!("Restaurado {} en {}", item.artifact_name(), target);
        Ok(RestoredItemDto {
            restored_name,
            restored_path: target.to_string(),
            original_location_used,
        })
    }

    #[instrument(skip(self))]
    async fn expire(&self, user_id: &Uuid) -> Result<usize> {
        self.expire_older_than(user_id, self.cutoff()).await
    }
}
