use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::{config::AppConfig, storage::Storage};

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl AuthSettings {
    pub fn new(jwt_secret: impl Into<String>, token_ttl_hours: i64) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_hours,
        }
    }
}

impl From<&AppConfig> for AuthSettings {
    fn from(config: &AppConfig) -> Self {
        Self::new(config.jwt_secret.clone(), config.token_ttl_hours)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub auth: AuthSettings,
    write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(storage: Storage, auth: AuthSettings) -> Self {
        Self {
            storage,
            auth,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Serializes read-modify-write cycles on the document store within this
    /// process. Hold the guard from the first load until the last save.
    pub async fn begin_write(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}
