use crate::service::ServiceRegistry;
use crate::storage::StorageManager;

use crate::{config::AppConfig, error::BotResult};

/// Everything the handlers need, built once at startup and handed to the dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub service_registry: ServiceRegistry,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> BotResult<Self> {
        let store = StorageManager::open(&config.storage).await?;

        let service_registry = ServiceRegistry::new(config, store)?;

        Ok(Self { service_registry })
    }
}
