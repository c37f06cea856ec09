use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::time;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::application::ports::storage_ports::StorageViewPort;
use crate::common::config::TimeoutConfig;
use crate::common::errors::{DomainError, Result};
use crate::domain::services::path_service::StoragePath;

/// Vista de almacenamiento respaldada por el sistema de archivos
///
/// Cada usuario tiene un directorio propio bajo la raíz; las rutas de la
/// vista se resuelven como root/<user_id>/<área>/<segmentos>.
pub struct FsStorageView {
    root_dir: PathBuf,
    timeouts: TimeoutConfig,
}

impl FsStorageView {
    pub fn new(root_dir: PathBuf, timeouts: TimeoutConfig) -> Self {
        Self { root_dir, timeouts }
    }

    fn absolute(&self, user_id: &Uuid, path: &StoragePath) -> PathBuf {
        let mut abs = self.root_dir.join(user_id.to_string());
        for segment in path.segments() {
            abs.push(segment);
        }
        abs
    }
}

#[async_trait]
impl StorageViewPort for FsStorageView {
    async fn is_directory(&self, user_id: &Uuid, path: &StoragePath) -> Result<bool> {
        match fs::metadata(self.absolute(user_id, path)).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::from(e)),
        }
    }

    #[instrument(skip(self))]
    async fn list_children(&self, user_id: &Uuid, path: &StoragePath) -> Result<Vec<String>> {
        let abs = self.absolute(user_id, path);

        let read = time::timeout(self.timeouts.dir_timeout(), async {
            let mut reader = match fs::read_dir(&abs).await {
                Ok(reader) => reader,
                Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Vec::new()),
                Err(e) => return Err(e),
            };
            let mut names = Vec::new();
            while let Some(entry) = reader.next_entry().await? {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
            Ok(names)
        })
        .await
        .map_err(|_| {
            DomainError::timeout("Storage", format!("Timeout listing directory {}", path))
        })?;

        let mut names = read.map_err(|e| {
            DomainError::internal_error("Storage", format!("Failed to list {}", path)).with_source(e)
        })?;
        // Orden estable para que dos recorridos del mismo árbol coincidan
        names.sort();
        Ok(names)
    }

    #[instrument(skip(self))]
    async fn copy_file(
        &self,
        user_id: &Uuid,
        from: &StoragePath,
        to: &StoragePath,
    ) -> Result<()> {
        let from_abs = self.absolute(user_id, from);
        let to_abs = self.absolute(user_id, to);

        time::timeout(self.timeouts.file_timeout(), fs::copy(&from_abs, &to_abs))
            .await
            .map_err(|_| {
                DomainError::timeout("Storage", format!("Timeout copying {}", from))
            })?
            .map_err(|e| {
                DomainError::internal_error("Storage", format!("Failed to copy {} to {}", from, to))
                    .with_source(e)
            })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn rename(&self, user_id: &Uuid, from: &StoragePath, to: &StoragePath) -> Result<bool> {
        let from_abs = self.absolute(user_id, from);
        let to_abs = self.absolute(user_id, to);

        match fs::metadata(&from_abs).await {
            Ok(_) => {}
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(DomainError::from(e)),
        }

        if let Some(parent) = to_abs.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::internal_error("Storage", format!("Failed to create parent of {}", to))
                    .with_source(e)
            })?;
        }

        time::timeout(self.timeouts.file_timeout(), fs::rename(&from_abs, &to_abs))
            .await
            .map_err(|_| {
                DomainError::timeout("Storage", format!("Timeout moving {}", from))
            })?
            .map_err(|e| {
                DomainError::internal_error("Storage", format!("Failed to move {} to {}", from, to))
                    .with_source(e)
            })?;

        debug!("Movido {} a {}", from, to);
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: &Uuid, path: &StoragePath) -> Result<bool> {
        let abs = self.absolute(user_id, path);

        let metadata = match fs::metadata(&abs).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(DomainError::from(e)),
        };

        let removal = async {
            if metadata.is_dir() {
                fs::remove_dir_all(&abs).await
            } else {
                fs::remove_file(&abs).await
            }
        };

        time::timeout(self.timeouts.dir_timeout(), removal)
            .await
            .map_err(|_| {
                DomainError::timeout("Storage", format!("Timeout deleting {}", path))
            })?
            .map_err(|e| {
                DomainError::internal_error("Storage", format!("Failed to delete {}", path))
                    .with_source(e)
            })?;

        Ok(true)
    }

    async fn exists(&self, user_id: &Uuid, path: &StoragePath) -> Result<bool> {
        match fs::metadata(self.absolute(user_id, path)).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::from(e)),
        }
    }

    async fn mime_type(&self, user_id: &Uuid, path: &StoragePath) -> Result<String> {
        let abs = self.absolute(user_id, path);
        let metadata = fs::metadata(&abs)
            .await
            .map_err(|e| match e.kind() {
                IoErrorKind::NotFound => DomainError::not_found("Storage", path.to_string()),
                _ => DomainError::from(e),
            })?;

        if metadata.is_dir() {
            return Ok("httpd/unix-directory".to_string());
        }
        Ok(mime_guess::from_path(&abs).first_or_octet_stream().to_string())
    }

    async fn ensure_directory(&self, user_id: &Uuid, path: &StoragePath) -> Result<()> {
        let abs = self.absolute(user_id, path);
        fs::create_dir_all(&abs).await.map_err(|e| {
            DomainError::internal_error("Storage", format!("Failed to create directory {}", path))
                .with_source(e)
        })?;
        Ok(())
    }

    fn resolve_path(&self, user_id: &Uuid, path: &StoragePath) -> PathBuf {
        self.absolute(user_id, path)
    }
}
