use async_trait::async_trait;
use uuid::Uuid;

use crate::common::errors::Result;
use crate::domain::services::path_service::StoragePath;

/// Puerto secundario hacia el almacén de versiones de un usuario
#[async_trait]
pub trait VersionStorePort: Send + Sync + 'static {
    /// Identificadores de versión de un elemento del área activa
    ///
    /// La ruta es relativa al área "files". Un elemento sin versiones
    /// produce una lista vacía.
    async fn list_versions(&self, user_id: &Uuid, path: &StoragePath) -> Result<Vec<String>>;

    /// Identificadores de las versiones retenidas de un artefacto
    async fn list_versions_in_trash(
        &self,
        user_id: &Uuid,
        name: &str,
        deleted_at: i64,
    ) -> Result<Vec<String>>;

    /// Mueve un archivo o directorio de versiones entre áreas de la vista
    ///
    /// Las rutas incluyen el área. Devuelve false si el origen no existe.
    async fn move_version(
        &self,
        user_id: &Uuid,
        from: &StoragePath,
        to: &StoragePath,
    ) -> Result<bool>;
}
