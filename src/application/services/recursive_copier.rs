use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::storage_ports::StorageViewPort;
use crate::common::errors::Result;
use crate::domain::services::path_service::StoragePath;

/// Copia recursiva de árboles dentro de la vista de un usuario
///
/// Recorre en el orden estable que entrega list_children, así que dos
/// copias del mismo árbol visitan las entradas igual.
pub struct RecursiveCopier {
    storage: Arc<dyn StorageViewPort>,
}

impl RecursiveCopier {
    pub fn new(storage: Arc<dyn StorageViewPort>) -> Self {
        Self { storage }
    }

    /// Copia el elemento, archivo o directorio, de from a to
    #[instrument(skip(self))]
    pub async fn copy_tree(
        &self,
        user_id: &Uuid,
        from: &StoragePath,
        to: &StoragePath,
    ) -> Result<()> {
        if self.storage.is_directory(user_id, from).await? {
            self.copy_dir(user_id, from.clone(), to.clone()).await
        } else {
            self.storage.copy_file(user_id, from, to).await
        }
    }

    fn copy_dir<'a>(
        &'a self,
        user_id: &'a Uuid,
        from: StoragePath,
        to: StoragePath,
    ) -> BoxFuture<'a, Result<()>> {
        async move {
            self.storage.ensure_directory(user_id, &to).await?;

            for child in self.storage.list_children(user_id, &from).await? {
                let child_from = from.join(&child);
                let child_to = to.join(&child);
                if self.storage.is_directory(user_id, &child_from).await? {
                    self.copy_dir(user_id, child_from, child_to).await?;
                } else {
                    self.storage.copy_file(user_id, &child_from, &child_to).await?;
                }
            }

            Ok(())
        }
        .boxed()
    }
}
