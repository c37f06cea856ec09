use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;

use crate::common::errors::Result;
use crate::domain::services::path_service::StoragePath;

/// Puerto secundario hacia la vista de almacenamiento de un usuario
///
/// Todas las rutas son relativas a la raíz de la vista del usuario e
/// incluyen el área ("files/...", "files_trashbin/...").
#[async_trait]
pub trait StorageViewPort: Send + Sync + 'static {
    /// Verifica si la ruta existe y es un directorio
    async fn is_directory(&self, user_id: &Uuid, path: &StoragePath) -> Result<bool>;

    /// Nombres de las entradas directas de un directorio, en orden estable
    ///
    /// Un directorio inexistente produce una lista vacía.
    async fn list_children(&self, user_id: &Uuid, path: &StoragePath) -> Result<Vec<String>>;

    /// Copia un archivo regular; sobrescribe el destino si existe
    async fn copy_file(&self, user_id: &Uuid, from: &StoragePath, to: &StoragePath)
        -> Result<()>;

    /// Mueve un archivo o directorio, creando el directorio padre del destino
    ///
    /// Devuelve false si el origen no existe.
    async fn rename(&self, user_id: &Uuid, from: &StoragePath, to: &StoragePath) -> Result<bool>;

    /// Elimina un archivo o un directorio con todo su contenido
    ///
    /// Devuelve false si la ruta no existía.
    async fn delete(&self, user_id: &Uuid, path: &StoragePath) -> Result<bool>;

    /// Verifica si la ruta existe
    async fn exists(&self, user_id: &Uuid, path: &StoragePath) -> Result<bool>;

    /// Tipo MIME del elemento en la ruta dada
    async fn mime_type(&self, user_id: &Uuid, path: &StoragePath) -> Result<String>;

    /// Crea el directorio (y sus padres) si no existe
    async fn ensure_directory(&self, user_id: &Uuid, path: &StoragePath) -> Result<()>;

    /// Ruta física absoluta que respalda una ruta de la vista
    fn resolve_path(&self, user_id: &Uuid, path: &StoragePath) -> PathBuf;
}
