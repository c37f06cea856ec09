use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{debug, error, info, instrument};

use crate::application::ports::trash_ports::TrashUseCase;
use crate::common::errors::Result;
use crate::domain::repositories::trash_repository::TrashRepository;

/// Servicio para el barrido automático de elementos expirados en la papelera
pub struct TrashSweepService {
    trash_service: Arc<dyn TrashUseCase>,
    trash_repository: Arc<dyn TrashRepository>,
    sweep_interval: Duration,
}

impl TrashSweepService {
    pub fn new(
        trash_service: Arc<dyn TrashUseCase>,
        trash_repository: Arc<dyn TrashRepository>,
        sweep_interval: Duration,
    ) -> Self {
        Self {
            trash_service,
            trash_repository,
            sweep_interval: sweep_interval.max(Duration::from_secs(60 * 60)), // Mínimo 1 hora
        }
    }

    /// Inicia el trabajo de barrido periódico
    #[instrument(skip(self))]
    pub async fn start_sweep_job(&self) {
        let trash_repository = self.trash_repository.clone();
        let trash_service = self.trash_service.clone();
        let interval_duration = self.sweep_interval;

        info!(
            "Iniciando trabajo de barrido de papelera con intervalo de {} segundos",
            interval_duration.as_secs()
        );

        tokio::spawn(async move {
            let mut interval = time::interval(interval_duration);

            // Primera ejecución inmediata
            Self::sweep_all_users(trash_repository.clone(), trash_service.clone())
                .await
                .unwrap_or_else(|e| error!("Error en el barrido inicial de la papelera: {:?}", e));

            loop {
                interval.tick().await;
                debug!("Ejecutando tarea programada de barrido de papelera");

                if let Err(e) =
                    Self::sweep_all_users(trash_repository.clone(), trash_service.clone()).await
                {
                    error!("Error en el barrido programado de la papelera: {:?}", e);
                }
            }
        });
    }

    /// Expira los elementos vencidos de todos los usuarios con filas en la papelera
    #[instrument(skip(trash_repository, trash_service))]
    async fn sweep_all_users(
        trash_repository: Arc<dyn TrashRepository>,
        trash_service: Arc<dyn TrashUseCase>,
    ) -> Result<()> {
        debug!("Comenzando barrido de elementos expirados en la papelera");

        let users = trash_repository.list_users().await?;

        if users.is_empty() {
            debug!("No hay usuarios con elementos en la papelera");
            return Ok(());
        }

        let mut removed = 0;
        for user_id in users {
            debug!("Expirando elementos de la papelera del usuario {}", user_id);

            // Si falla un usuario, continuar con los demás
            match trash_service.expire(&user_id).await {
                Ok(count) => removed += count,
                Err(e) => {
                    error!(
                        "Error expirando la papelera del usuario {}: {:?}",
                        user_id, e
                    );
                }
            }
        }

        info!(
            "Barrido de papelera completado: {} elementos eliminados",
            removed
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::application::dtos::trash_dto::{RestoredItemDto, TrashedItemDto};
    use crate::common::errors::DomainError;
    use crate::domain::entities::trashed_item::TrashedItem;

    struct StaticUserRepository {
        users: Vec<Uuid>,
    }

    #[async_trait]
    impl TrashRepository for StaticUserRepository {
        async fn insert(&self, _item: &TrashedItem) -> Result<()> {
            Ok(())
        }

        async fn find_item(
            &self,
            _user_id: &Uuid,
            _name: &str,
            _deleted_at: i64,
        ) -> Result<Vec<TrashedItem>> {
            Ok(Vec::new())
        }

        async fn list_for_user(&self, _user_id: &Uuid) -> Result<Vec<TrashedItem>> {
            Ok(Vec::new())
        }

        async fn list_older_than(&self, _user_id: &Uuid, _cutoff: i64) -> Result<Vec<TrashedItem>> {
            Ok(Vec::new())
        }

        async fn delete_item(&self, _user_id: &Uuid, _name: &str, _deleted_at: i64) -> Result<u64> {
            Ok(0)
        }

        async fn delete_older_than(&self, _user_id: &Uuid, _cutoff: i64) -> Result<u64> {
            Ok(0)
        }

        async fn list_users(&self) -> Result<Vec<Uuid>> {
            Ok(self.users.clone())
        }
    }

    /// Registra qué usuarios se expiraron; uno de ellos siempre falla
    struct RecordingTrashService {
        failing_user: Uuid,
        expired: Mutex<Vec<Uuid>>,
    }

    #[async_trait]
    impl TrashUseCase for RecordingTrashService {
        async fn list_trash(&self, _user_id: &Uuid) -> Result<Vec<TrashedItemDto>> {
            Ok(Vec::new())
        }

        async fn move_to_trash(&self, _user_id: &Uuid, _path: &str) -> Result<TrashedItemDto> {
            Err(DomainError::internal_error("Trash", "not exercised by the sweep"))
        }

        async fn restore(
            &self,
            _user_id: &Uuid,
            _name: &str,
            _deleted_at: i64,
        ) -> Result<RestoredItemDto> {
            Err(DomainError::internal_error("Trash", "not exercised by the sweep"))
        }

        async fn expire(&self, user_id: &Uuid) -> Result<usize> {
            if *user_id == self.failing_user {
                return Err(DomainError::internal_error("Trash", "injected expire failure"));
            }
            self.expired.lock().unwrap().push(*user_id);
            Ok(1)
        }
    }

    #[tokio::test]
    async fn one_failing_user_does_not_stop_the_sweep() {
        let failing = Uuid::new_v4();
        let healthy = Uuid::new_v4();

        // El usuario que falla va primero para probar que el barrido sigue
        let repository = Arc::new(StaticUserRepository {
            users: vec![failing, healthy],
        });
        let service = Arc::new(RecordingTrashService {
            failing_user: failing,
            expired: Mutex::new(Vec::new()),
        });

        TrashSweepService::sweep_all_users(repository, service.clone())
            .await
            .unwrap();

        assert_eq!(*service.expired.lock().unwrap(), vec![healthy]);
    }

    #[test]
    fn sweep_interval_is_clamped_to_an_hour() {
        let repository = Arc::new(StaticUserRepository { users: Vec::new() });
        let service = Arc::new(RecordingTrashService {
            failing_user: Uuid::new_v4(),
            expired: Mutex::new(Vec::new()),
        });

        let sweeper = TrashSweepService::new(service, repository, Duration::from_secs(1));
        assert_eq!(sweeper.sweep_interval, Duration::from_secs(60 * 60));
    }
}
