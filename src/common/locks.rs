use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time;
use uuid::Uuid;

use crate::common::config::TimeoutConfig;
use crate::common::errors::{DomainError, Result};

/// Registro de locks por usuario
///
/// Serializa las operaciones de papelera de un mismo usuario dentro del
/// proceso. Operaciones de usuarios distintos proceden en paralelo.
pub struct UserLockRegistry {
    /// Mapa de usuario a su lock. Crece con los usuarios vistos; no se desaloja.
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
    timeouts: TimeoutConfig,
}

impl UserLockRegistry {
    pub fn new(timeouts: TimeoutConfig) -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
            timeouts,
        }
    }

    /// Adquiere el lock del usuario con timeout configurado
    pub async fn acquire(&self, user_id: &Uuid) -> Result<OwnedMutexGuard<()>> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(*user_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        time::timeout(self.timeouts.lock_timeout(), lock.lock_owned())
            .await
            .map_err(|_| {
                DomainError::timeout(
                    "Trash",
                    format!("Timeout al adquirir el lock del usuario {}", user_id),
                )
            })
    }
}
