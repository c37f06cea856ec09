use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, Executor, PgPool};
use std::time::Duration;

use crate::common::config::AppConfig;

pub async fn create_database_pool(config: &AppConfig) -> Result<PgPool> {
    tracing::info!(
        "Inicializando conexión a PostgreSQL con URL: {}",
        config
            .database
            .connection_string
            .replace("postgres://", "postgres://[user]:[pass]@")
    );

    let mut attempt = 0;
    const MAX_ATTEMPTS: usize = 3;

    while attempt < MAX_ATTEMPTS {
        attempt += 1;
        tracing::info!("Intento de conexión a PostgreSQL #{}", attempt);

        // Crear el pool de conexiones con las opciones de configuración
        match PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .min_connections(config.database.min_connections)
            .acquire_timeout(Duration::from_secs(config.database.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.database.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.database.max_lifetime_secs))
            .connect(&config.database.connection_string)
            .await
        {
            Ok(pool) => match ensure_schema(&pool).await {
                Ok(()) => {
                    tracing::info!("Conexión a PostgreSQL establecida correctamente");
                    return Ok(pool);
                }
                Err(e) => {
                    tracing::error!("Error al preparar el esquema de papelera: {}", e);
                    if attempt >= MAX_ATTEMPTS {
                        return Err(anyhow::anyhow!(
                            "Error en la conexión a PostgreSQL: {}",
                            e
                        ));
                    }
                }
            },
            Err(e) => {
                tracing::error!("Error al conectar a PostgreSQL: {}", e);
                if attempt >= MAX_ATTEMPTS {
                    return Err(anyhow::anyhow!("Error en la conexión a PostgreSQL: {}", e));
                }
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }

    Err(anyhow::anyhow!(
        "No se pudo establecer la conexión a PostgreSQL después de {} intentos",
        MAX_ATTEMPTS
    ))
}

/// Crea el esquema y la tabla de metadatos de papelera si no existen
async fn ensure_schema(pool: &PgPool) -> Result<()> {
    pool.execute(
        r#"
        CREATE SCHEMA IF NOT EXISTS trash;

        -- Una fila por elemento retenido; la clave replica la unicidad
        -- (usuario, nombre, marca de borrado) de los artefactos en disco
        CREATE TABLE IF NOT EXISTS trash.items (
            user_id UUID NOT NULL,
            name TEXT NOT NULL,
            deleted_at BIGINT NOT NULL,
            location TEXT NOT NULL,
            item_type VARCHAR(4) NOT NULL,
            mime_type TEXT,
            PRIMARY KEY (user_id, name, deleted_at)
        );

        CREATE INDEX IF NOT EXISTS idx_trash_items_user ON trash.items(user_id);
        CREATE INDEX IF NOT EXISTS idx_trash_items_deleted_at ON trash.items(deleted_at);
    "#,
    )
    .await?;

    Ok(())
}
