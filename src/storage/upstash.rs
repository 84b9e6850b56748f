use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use std::sync::Arc;
use teloxide::types::UserId;

use crate::service::user::UserProfile;

use super::{ProfileStore, StorageError};

#[derive(Clone)]
pub struct RedisClient {
    inner: Arc<redis::Client>,
}

impl RedisClient {
    pub async fn new(url: &str) -> Result<Self, StorageError> {
        info!("Initializing RedisClient...");
        let redis = Arc::new(Client::open(url)?);

        let mut conn = redis.get_multiplexed_async_connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        if pong != "PONG" {
            return Err(StorageError::Redis("Redis connection test failed".to_string()));
        }
        info!("Redis connection test successful");
        info!("RedisClient initialized");
        Ok(Self { inner: redis })
    }

    pub async fn get_connection(&self) -> Result<MultiplexedConnection, StorageError> {
        let conn = self.inner.get_multiplexed_async_connection().await?;
        Ok(conn)
    }

    fn profile_key(user_id: UserId) -> String {
        format!("profile:{}", user_id)
    }
}

#[async_trait]
impl ProfileStore for RedisClient {
    async fn get(&self, user_id: UserId) -> Result<Option<UserProfile>, StorageError> {
        let mut conn = self.get_connection().await?;
        let value: Option<String> = conn.get(Self::profile_key(user_id)).await?;

        if let Some(v) = value {
            Ok(Some(serde_json::from_str(&v)?))
        } else {
            Ok(None)
        }
    }

    async fn upsert(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let mut conn = self.get_connection().await?;
        let serialized = serde_json::to_string(profile)?;
        conn.set::<_, _, ()>(Self::profile_key(profile.user_id), serialized).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_key() {
        assert_eq!(RedisClient::profile_key(UserId(123456)), "profile:123456");
    }
}
