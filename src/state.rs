use std::sync::Arc;

use crate::backend::{Backend, SqliteBackend, SupabaseBackend};
use crate::config::{BackendConfig, Config};
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            cookie_secure: false,
        }
    }

    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let backend: Arc<dyn Backend> = match &config.backend {
            BackendConfig::Supabase(supabase) => Arc::new(SupabaseBackend::new(supabase.clone())?),
            BackendConfig::Local { database_url } => {
                Arc::new(SqliteBackend::connect(database_url).await?)
            }
        };

        Ok(Self {
            backend,
            cookie_secure: config.cookie_secure,
        })
    }
}
