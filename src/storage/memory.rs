use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use teloxide::types::UserId;

use crate::service::user::UserProfile;

use super::{ProfileStore, StorageError};

/// Process-local store. Profiles are kept as JSON so every backend round-trips the same
/// serialized shape.
#[derive(Clone, Debug)]
pub struct MemoryCache<T: Clone> {
    cache: Arc<DashMap<String, T>>,
}

impl<T: Clone> MemoryCache<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Arc::new(DashMap::with_capacity(capacity)),
        }
    }

    pub fn get(&self, key: &str) -> Option<T> {
        self.cache.get(key).map(|value| value.value().clone())
    }

    pub fn set(&self, key: &str, value: T) {
        self.cache.insert(key.to_string(), value);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl ProfileStore for MemoryCache<String> {
    async fn get(&self, user_id: UserId) -> Result<Option<UserProfile>, StorageError> {
        match MemoryCache::get(self, &user_id.to_string()) {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn upsert(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let json = serde_json::to_string(profile)?;
        self.set(&profile.user_id.to_string(), json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::service::dialogue::model::DialogueState;

    #[tokio::test]
    async fn test_get_missing_profile() {
        let store = MemoryCache::<String>::new(8);
        assert!(ProfileStore::get(&store, UserId(1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_overwrites() {
        let store = MemoryCache::<String>::new(8);
        let mut profile = UserProfile::new(UserId(1), "Asha", Utc::now());
        store.upsert(&profile).await.unwrap();

        profile.state = DialogueState::WaitingOwnerName;
        profile.business.name = Some("Chai Point".to_string());
        store.upsert(&profile).await.unwrap();

        let stored = ProfileStore::get(&store, UserId(1)).await.unwrap().unwrap();
        assert_eq!(stored, profile);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_profiles_are_keyed_by_user() {
        let store = MemoryCache::<String>::new(8);
        store.upsert(&UserProfile::new(UserId(1), "Asha", Utc::now())).await.unwrap();
        store.upsert(&UserProfile::new(UserId(2), "Ravi", Utc::now())).await.unwrap();

        let ravi = ProfileStore::get(&store, UserId(2)).await.unwrap().unwrap();
        assert_eq!(ravi.first_name, "Ravi");
        assert_eq!(store.len(), 2);
    }
}
