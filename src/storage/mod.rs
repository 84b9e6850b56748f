mod error;
mod memory;
mod turso;
mod upstash;

pub use error::StorageError;
pub use memory::MemoryCache;
pub use turso::TursoClient;
pub use upstash::RedisClient;

use async_trait::async_trait;
use std::sync::Arc;
use teloxide::types::UserId;

use crate::{config::StorageConfig, service::user::UserProfile};

/// Keyed persistence for user profiles. The conversation layer only ever sees this trait.
#[async_trait]
pub trait ProfileStore: Send + Sync + 'static {
    async fn get(&self, user_id: UserId) -> Result<Option<UserProfile>, StorageError>;
    async fn upsert(&self, profile: &UserProfile) -> Result<(), StorageError>;
}

pub struct StorageManager;

impl StorageManager {
    pub async fn open(config: &StorageConfig) -> Result<Arc<dyn ProfileStore>, StorageError> {
        let store: Arc<dyn ProfileStore> = match config {
            StorageConfig::Memory { capacity } => {
                warn!("Using in-memory profile store, profiles are lost on restart");
                Arc::new(MemoryCache::<String>::new(*capacity))
            }
            StorageConfig::Redis { url } => Arc::new(RedisClient::new(url).await?),
            StorageConfig::Turso { url, token } => Arc::new(TursoClient::new(url, token).await?),
        };

        Ok(store)
    }
}
