use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::storage_ports::StorageViewPort;
use crate::application::ports::version_ports::VersionStorePort;
use crate::common::errors::Result;
use crate::domain::services::path_service::StoragePath;
use crate::domain::services::trash_naming::{
    self, VERSIONS_DIR, VERSIONS_TRASH_DIR,
};

/// Almacén de versiones sobre la vista de almacenamiento
///
/// Las versiones viven como archivos planos "<nombre>.v<id>" junto a la
/// ruta del archivo dentro de files_versions, y como artefactos
/// "<nombre>.v<id>.d<marca>" en la raíz de versions_trashbin. Este
/// adaptador sólo enumera identificadores y mueve rutas; la política de
/// cuándo hacerlo vive en la capa de aplicación.
pub struct FsVersionStore {
    view: Arc<dyn StorageViewPort>,
}

impl FsVersionStore {
    pub fn new(view: Arc<dyn StorageViewPort>) -> Self {
        Self { view }
    }
}

#[async_trait]
impl VersionStorePort for FsVersionStore {
    #[instrument(skip(self))]
    async fn list_versions(&self, user_id: &Uuid, path: &StoragePath) -> Result<Vec<String>> {
        let Some(name) = path.file_name() else {
            return Ok(Vec::new());
        };
        let parent = path.parent().unwrap_or_else(StoragePath::root);
        let dir = trash_naming::in_area(VERSIONS_DIR, &parent);

        let mut versions = Vec::new();
        for child in self.view.list_children(user_id, &dir).await? {
            if let Some((base, version)) = trash_naming::split_version_suffix(&child) {
                if base == name {
                    versions.push(version.to_string());
                }
            }
        }
        Ok(versions)
    }

    #[instrument(skip(self))]
    async fn list_versions_in_trash(
        &self,
        user_id: &Uuid,
        name: &str,
        deleted_at: i64,
    ) -> Result<Vec<String>> {
        let dir = StoragePath::from_string(VERSIONS_TRASH_DIR);

        let mut versions = Vec::new();
        for child in self.view.list_children(user_id, &dir).await? {
            let Some((stem, stamp)) = trash_naming::parse_artifact_name(&child) else {
                continue;
            };
            if stamp != deleted_at {
                continue;
            }
            if let Some((base, version)) = trash_naming::split_version_suffix(&stem) {
                if base == name {
                    versions.push(version.to_string());
                }
            }
        }
        Ok(versions)
    }

    async fn move_version(
        &self,
        user_id: &Uuid,
        from: &StoragePath,
        to: &StoragePath,
    ) -> Result<bool> {
        self.view.rename(user_id, from, to).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::TimeoutConfig;
    use crate::infrastructure::services::fs_storage_view::FsStorageView;
    use tempfile::TempDir;

    fn store(root: &TempDir) -> (FsVersionStore, Arc<FsStorageView>, Uuid) {
        let view = Arc::new(FsStorageView::new(
            root.path().to_path_buf(),
            TimeoutConfig::default(),
        ));
        (FsVersionStore::new(view.clone()), view, Uuid::new_v4())
    }

    #[tokio::test]
    async fn list_versions_matches_only_the_requested_file() {
        let root = TempDir::new().unwrap();
        let (store, view, user) = store(&root);

        view.ensure_directory(&user, &StoragePath::from_string("files_versions/docs"))
            .await
            .unwrap();
        let dir = root.path().join(user.to_string()).join("files_versions/docs");
        for name in ["a.txt.v1", "a.txt.v2", "a.txt.backup", "b.txt.v1"] {
            std::fs::write(dir.join(name), b"x").unwrap();
        }

        let versions = store
            .list_versions(&user, &StoragePath::from_string("docs/a.txt"))
            .await
            .unwrap();
        assert_eq!(versions, vec!["1", "2"]);

        let missing = store
            .list_versions(&user, &StoragePath::from_string("docs/nope.txt"))
            .await
            .unwrap();
        assert!(missing.is_empty());
    }

    #[tokio::test]
    async fn list_versions_in_trash_checks_name_and_stamp() {
        let root = TempDir::new().unwrap();
        let (store, view, user) = store(&root);

        view.ensure_directory(&user, &StoragePath::from_string("versions_trashbin"))
            .await
            .unwrap();
        let dir = root.path().join(user.to_string()).join("versions_trashbin");
        for name in ["a.txt.v1.d100", "a.txt.v2.d100", "a.txt.v1.d200", "b.txt.v1.d100"] {
            std::fs::write(dir.join(name), b"x").unwrap();
        }

        let versions = store
            .list_versions_in_trash(&user, "a.txt", 100)
            .await
            .unwrap();
        assert_eq!(versions, vec!["1", "2"]);
    }
}
