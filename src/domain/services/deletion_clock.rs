use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Reloj de borrado por usuario
///
/// Emite marcas de borrado estrictamente crecientes por usuario:
/// max(ahora, última + 1). Dos borrados del mismo nombre dentro del
/// mismo segundo reciben marcas distintas, así que ni los artefactos
/// ni las filas de metadatos colisionan.
pub struct DeletionClock {
    last: Mutex<HashMap<Uuid, i64>>,
}

impl DeletionClock {
    pub fn new() -> Self {
        Self {
            last: Mutex::new(HashMap::new()),
        }
    }

    /// Próxima marca de borrado para el usuario, en segundos Unix
    pub async fn next(&self, user_id: &Uuid) -> i64 {
        self.advance(user_id, Utc::now().timestamp()).await
    }

    async fn advance(&self, user_id: &Uuid, now: i64) -> i64 {
        let mut last = self.last.lock().await;
        let entry = last.entry(*user_id).or_insert(0);
        let stamp = now.max(*entry + 1);
        *entry = stamp;
        stamp
    }
}

impl Default for DeletionClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stamps_are_strictly_increasing_within_a_second() {
        let clock = DeletionClock::new();
        let user = Uuid::new_v4();

        assert_eq!(clock.advance(&user, 100).await, 100);
        assert_eq!(clock.advance(&user, 100).await, 101);
        assert_eq!(clock.advance(&user, 100).await, 102);
    }

    #[tokio::test]
    async fn clock_never_goes_backwards() {
        let clock = DeletionClock::new();
        let user = Uuid::new_v4();

        assert_eq!(clock.advance(&user, 200).await, 200);
        assert_eq!(clock.advance(&user, 150).await, 201);
    }

    #[tokio::test]
    async fn users_have_independent_clocks() {
        let clock = DeletionClock::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        assert_eq!(clock.advance(&alice, 100).await, 100);
        assert_eq!(clock.advance(&alice, 100).await, 101);
        assert_eq!(clock.advance(&bob, 100).await, 100);
    }
}
