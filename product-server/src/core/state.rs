use std::sync::Arc;

use shared::error::AppResult;

use crate::core::Config;
use crate::db::DbService;

/// Shared request state; cloning is cheap
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }

    /// Build the pool and run the startup database check
    ///
    /// Only a malformed database URL is an error. An unreachable database is
    /// logged and the server still comes up.
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::connect_lazy(config)?;
        db.bootstrap().await;
        Ok(Self::new(config.clone(), db))
    }
}
