use async_trait::async_trait;
use uuid::Uuid;

use crate::common::errors::Result;
use crate::domain::entities::trashed_item::TrashedItem;

#[async_trait]
pub trait TrashRepository: Send + Sync {
    /// Inserta la fila de metadatos de un elemento recién retenido
    async fn insert(&self, item: &TrashedItem) -> Result<()>;

    /// Filas que coinciden con la clave (usuario, nombre, marca)
    ///
    /// Devuelve todas las coincidencias; el llamador decide qué hacer
    /// cuando no hay exactamente una.
    async fn find_item(&self, user_id: &Uuid, name: &str, deleted_at: i64)
        -> Result<Vec<TrashedItem>>;

    /// Todos los elementos retenidos de un usuario
    async fn list_for_user(&self, user_id: &Uuid) -> Result<Vec<TrashedItem>>;

    /// Elementos del usuario con marca de borrado estrictamente anterior al corte
    async fn list_older_than(&self, user_id: &Uuid, cutoff: i64) -> Result<Vec<TrashedItem>>;

    /// Borra la fila identificada por la clave; devuelve cuántas filas había
    async fn delete_item(&self, user_id: &Uuid, name: &str, deleted_at: i64) -> Result<u64>;

    /// Borra en una sola operación todas las filas del usuario anteriores al corte
    async fn delete_older_than(&self, user_id: &Uuid, cutoff: i64) -> Result<u64>;

    /// Usuarios con al menos un elemento retenido
    async fn list_users(&self) -> Result<Vec<Uuid>>;
}
