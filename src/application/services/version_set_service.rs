use std::sync::Arc;

use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::application::ports::storage_ports::StorageViewPort;
use crate::application::ports::version_ports::VersionStorePort;
use crate::common::errors::Result;
use crate::domain::entities::trashed_item::TrashedItem;
use crate::domain::services::path_service::StoragePath;
use crate::domain::services::trash_naming::{self, VERSIONS_DIR, VERSIONS_TRASH_DIR};

/// Servicio de aplicación para reubicar conjuntos de versiones
///
/// Un directorio viaja con su subárbol de versiones entero; un archivo
/// viaja versión a versión. Ambos casos pasan por aquí para que el
/// servicio de papelera no distinga tipos.
///
/// Cuando el almacén de versiones no está configurado, todas las
/// operaciones son no-ops.
pub struct VersionSetService {
    storage: Arc<dyn StorageViewPort>,
    versions: Option<Arc<dyn VersionStorePort>>,
}

impl VersionSetService {
    pub fn new(
        storage: Arc<dyn StorageViewPort>,
        versions: Option<Arc<dyn VersionStorePort>>,
    ) -> Self {
        Self { storage, versions }
    }

    /// Mueve las versiones de un elemento recién retenido al área de
    /// retención de versiones
    ///
    /// Debe llamarse solo después de que el contenido del elemento ya
    /// esté en el área de retención. Devuelve cuántos movimientos se
    /// realizaron.
    #[instrument(skip(self))]
    pub async fn relocate_to_trash(
        &self,
        user_id: &Uuid,
        rel_path: &StoragePath,
        item: &TrashedItem,
    ) -> Result<usize> {
        let Some(versions) = &self.versions else {
            return Ok(0);
        };

        if item.is_directory() {
            // El subárbol de versiones del directorio viaja entero
            let from = trash_naming::in_area(VERSIONS_DIR, rel_path);
            let to = StoragePath::from_string(VERSIONS_TRASH_DIR).join(&item.artifact_name());
            let moved = versions.move_version(user_id, &from, &to).await?;
            return Ok(usize::from(moved));
        }

        let parent = rel_path.parent().unwrap_or_else(StoragePath::root);
        let mut moved = 0;
        for version in versions.list_versions(user_id, rel_path).await? {
            let from = trash_naming::in_area(
                VERSIONS_DIR,
                &parent.join(&trash_naming::version_file_name(&item.name, &version)),
            );
            let to = StoragePath::from_string(VERSIONS_TRASH_DIR).join(
                &trash_naming::version_artifact_name(&item.name, &version, item.deleted_at),
            );
            if versions.move_version(user_id, &from, &to).await? {
                moved += 1;
            } else {
                warn!("Versión {} desaparecida antes de retenerla", from);
            }
        }

        debug!("{} versiones retenidas para {}", moved, item.name);
        Ok(moved)
    }

    /// Devuelve las versiones retenidas de un elemento a su área activa
    ///
    /// El contenido ya debe estar restaurado en target_parent bajo
    /// restored_name. Devuelve cuántos movimientos se realizaron.
    #[instrument(skip(self))]
    pub async fn restore_from_trash(
        &self,
        user_id: &Uuid,
        item: &TrashedItem,
        target_parent: &StoragePath,
        restored_name: &str,
    ) -> Result<usize> {
        let Some(versions) = &self.versions else {
            return Ok(0);
        };

        if item.is_directory() {
            let from = StoragePath::from_string(VERSIONS_TRASH_DIR).join(&item.artifact_name());
            let to =
                trash_naming::in_area(VERSIONS_DIR, &target_parent.join(restored_name));
            let moved = versions.move_version(user_id, &from, &to).await?;
            return Ok(usize::from(moved));
        }

        let mut moved = 0;
        for version in versions
            .list_versions_in_trash(user_id, &item.name, item.deleted_at)
            .await?
        {
            let from = StoragePath::from_string(VERSIONS_TRASH_DIR).join(
                &trash_naming::version_artifact_name(&item.name, &version, item.deleted_at),
            );
            let to = trash_naming::in_area(
                VERSIONS_DIR,
                &target_parent.join(&trash_naming::version_file_name(restored_name, &version)),
            );
            if versions.move_version(user_id, &from, &to).await? {
                moved += 1;
            } else {
                warn!("Versión retenida {} desaparecida antes de restaurarla", from);
            }
        }

        debug!("{} versiones restauradas para {}", moved, item.name);
        Ok(moved)
    }

    /// Borra definitivamente las versiones retenidas de un artefacto
    #[instrument(skip(self))]
    pub async fn purge(&self, user_id: &Uuid, item: &TrashedItem) -> Result<()> {
        let Some(versions) = &self.versions else {
            return Ok(());
        };

        if item.is_directory() {
            let path = StoragePath::from_string(VERSIONS_TRASH_DIR).join(&item.artifact_name());
            self.storage.delete(user_id, &path).await?;
            return Ok(());
        }

        for version in versions
            .list_versions_in_trash(user_id, &item.name, item.deleted_at)
            .await?
        {
            let path = StoragePath::from_string(VERSIONS_TRASH_DIR).join(
                &trash_naming::version_artifact_name(&item.name, &version, item.deleted_at),
            );
            self.storage.delete(user_id, &path).await?;
        }

        Ok(())
    }
}
