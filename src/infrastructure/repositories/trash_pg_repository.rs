use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::common::errors::{DomainError, Result};
use crate::domain::entities::trashed_item::{TrashedItem, TrashedItemType};
use crate::domain::repositories::trash_repository::TrashRepository;

/// Repositorio de metadatos de papelera sobre PostgreSQL
///
/// Las filas viven en trash.items con clave primaria
/// (user_id, name, deleted_at), la misma identidad que llevan los
/// artefactos retenidos en disco.
pub struct TrashPgRepository {
    pool: Arc<PgPool>,
}

impl TrashPgRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    // Método auxiliar para mapear errores SQL a errores de dominio
    fn map_sqlx_error(err: sqlx::Error) -> DomainError {
        match err {
            sqlx::Error::RowNotFound => {
                DomainError::not_found("Trash", "Fila de papelera no encontrada")
            }
            sqlx::Error::Database(db_err) => {
                if db_err.code().map_or(false, |code| code == "23505") {
                    // Código para violación de unicidad en PostgreSQL
                    DomainError::already_exists(
                        "Trash",
                        "Ya existe una fila con ese usuario, nombre y marca de borrado",
                    )
                } else {
                    DomainError::internal_error(
                        "Trash",
                        format!("Error de base de datos: {}", db_err),
                    )
                }
            }
            _ => DomainError::internal_error("Trash", format!("Error de base de datos: {}", err)),
        }
    }

    fn row_to_item(row: &PgRow) -> Result<TrashedItem> {
        let type_str: String = row.get("item_type");
        let item_type = TrashedItemType::parse(&type_str).ok_or_else(|| {
            DomainError::internal_error(
                "Trash",
                format!("Tipo de elemento desconocido en la base de datos: {}", type_str),
            )
        })?;

        Ok(TrashedItem {
            name: row.get("name"),
            deleted_at: row.get("deleted_at"),
            location: row.get("location"),
            item_type,
            mime_type: row.get("mime_type"),
            user_id: row.get("user_id"),
        })
    }
}

#[async_trait]
impl TrashRepository for TrashPgRepository {
    #[instrument(skip(self))]
    async fn insert(&self, item: &TrashedItem) -> Result<()> {
        debug!(
            "Insertando fila de papelera: usuario={}, nombre={}, marca={}",
            item.user_id, item.name, item.deleted_at
        );

        sqlx::query(
            r#"
            INSERT INTO trash.items (
                user_id, name, deleted_at, location, item_type, mime_type
            ) VALUES (
                $1, $2, $3, $4, $5, $6
            )
            "#,
        )
        .bind(item.user_id)
        .bind(&item.name)
        .bind(item.deleted_at)
        .bind(&item.location)
        .bind(item.item_type.as_str())
        .bind(&item.mime_type)
        .execute(&*self.pool)
        .await
        .map_err(Self::map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_item(
        &self,
        user_id: &Uuid,
        name: &str,
        deleted_at: i64,
    ) -> Result<Vec<TrashedItem>> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, name, deleted_at, location, item_type, mime_type
            FROM trash.items
            WHERE user_id = $1 AND name = $2 AND deleted_at = $3
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(deleted_at)
        .fetch_all(&*self.pool)
        .await
        .map_err(Self::map_sqlx_error)?;

        rows.iter().map(Self::row_to_item).collect()
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: &Uuid) -> Result<Vec<TrashedItem>> {
        debug!("Listando papelera del usuario {}", user_id);

        let rows = sqlx::query(
            r#"
            SELECT user_id, name, deleted_at, location, item_type, mime_type
            FROM trash.items
            WHERE user_id = $1
            ORDER BY deleted_at DESC, name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&*self.pool)
        .await
        .map_err(Self::map_sqlx_error)?;

        rows.iter().map(Self::row_to_item).collect()
    }

    #[instrument(skip(self))]
    async fn list_older_than(&self, user_id: &Uuid, cutoff: i64) -> Result<Vec<TrashedItem>> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, name, deleted_at, location, item_type, mime_type
            FROM trash.items
            WHERE user_id = $1 AND deleted_at < $2
            ORDER BY deleted_at ASC, name ASC
            "#,
        )
        .bind(user_id)
        .bind(cutoff)
        .fetch_all(&*self.pool)
        .await
        .map_err(Self::map_sqlx_error)?;

        rows.iter().map(Self::row_to_item).collect()
    }

    #[instrument(skip(self))]
    async fn delete_item(&self, user_id: &Uuid, name: &str, deleted_at: i64) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM trash.items
            WHERE user_id = $1 AND name = $2 AND deleted_at = $3
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(deleted_at)
        .execute(&*self.pool)
        .await
        .map_err(Self::map_sqlx_error)?;

        debug!(
            "Eliminadas {} filas de papelera (usuario={}, nombre={}, marca={})",
            result.rows_affected(),
            user_id,
            name,
            deleted_at
        );
        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete_older_than(&self, user_id: &Uuid, cutoff: i64) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM trash.items
            WHERE user_id = $1 AND deleted_at < $2
            "#,
        )
        .bind(user_id)
        .bind(cutoff)
        .execute(&*self.pool)
        .await
        .map_err(Self::map_sqlx_error)?;

        debug!(
            "Eliminadas {} filas expiradas del usuario {}",
            result.rows_affected(),
            user_id
        );
        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<Uuid>> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT user_id FROM trash.items
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(Self::map_sqlx_error)?;

        Ok(rows.iter().map(|row| row.get("user_id")).collect())
    }
}
