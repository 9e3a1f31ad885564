use std::sync::{Arc, Mutex};

use crate::{config::Config, db::Db, error::AppError};

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
    /// Serializes whole read-modify-write operations across requests.
    lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(db: Db, config: Config) -> Self {
        Self {
            db,
            config,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Runs one domain operation with exclusive access to the store.
    ///
    /// The operation does file I/O, so it runs on the blocking pool and never
    /// stalls the async workers.
    pub async fn with_db<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&Db) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        let lock = self.lock.clone();

        run_blocking(move || {
            let _guard = lock
                .lock()
                .map_err(|_| AppError::InternalServerError("state lock poisoned".to_string()))?;
            op(&db)
        })
        .await
    }
}

/// Runs slow synchronous work (password hashing, file access) on the
/// blocking pool. Does not take the store lock.
pub async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Blocking task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    #[tokio::test(flavor = "current_thread")]
    async fn slow_operation_does_not_stall_the_runtime() {
        let state = AppState::new(Db::in_memory(), Config::default());

        let slow = tokio::spawn({
            let state = state.clone();
            async move {
                state
                    .with_db(|_| {
                        std::thread::sleep(Duration::from_millis(300));
                        Ok(Instant::now())
                    })
                    .await
            }
        });

        // On a single-threaded runtime this timer only fires if the operation
        // above is running somewhere else.
        tokio::time::sleep(Duration::from_millis(20)).await;
        let ticked = Instant::now();

        let finished = slow.await.unwrap().unwrap();
        assert!(ticked < finished);
    }

    #[tokio::test]
    async fn operations_see_each_others_writes() {
        let state = AppState::new(Db::in_memory(), Config::default());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let state = state.clone();
                tokio::spawn(async move {
                    state
                        .with_db(move |db| {
                            let mut seen: Vec<u32> = db.read_for_update("counter")?;
                            seen.push(i);
                            db.write("counter", &seen)
                        })
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let seen: Vec<u32> = state.with_db(|db| db.read("counter")).await.unwrap();
        assert_eq!(seen.len(), 8);
    }
}
