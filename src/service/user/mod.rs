mod model;

pub use model::{BusinessDetails, UserProfile};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use teloxide::types::UserId;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::storage::{ProfileStore, StorageError};

/// Held while one user's profile is being updated. The lock entry is dropped with the last
/// holder so the map only tracks users with requests in flight.
pub struct UserLock {
    user_id: UserId,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<DashMap<UserId, Arc<Mutex<()>>>>,
}

impl Drop for UserLock {
    fn drop(&mut self) {
        self.guard.take();
        // waiters hold their own clone of the Arc
        self.locks
            .remove_if(&self.user_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn ProfileStore>,
    locks: Arc<DashMap<UserId, Arc<Mutex<()>>>>,
}

impl UserService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        info!("Initializing user service");
        Self {
            store,
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Serializes profile read-modify-write cycles for one user. Hold the guard from the
    /// first `resolve` until the final `save`.
    pub async fn lock(&self, user_id: UserId) -> UserLock {
        let lock = self
            .locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        UserLock {
            user_id,
            guard: Some(lock.lock_owned().await),
            locks: Arc::clone(&self.locks),
        }
    }

    /// Loads the profile, creating and persisting it on first contact.
    pub async fn resolve(
        &self,
        user_id: UserId,
        first_name: &str,
        now: DateTime<Utc>,
    ) -> Result<UserProfile, StorageError> {
        if let Some(profile) = self.store.get(user_id).await? {
            return Ok(profile);
        }

        info!("Creating profile for user {}", user_id);
        let profile = UserProfile::new(user_id, first_name, now);
        self.store.upsert(&profile).await?;

        Ok(profile)
    }

    #[cfg(test)]
    pub async fn get(&self, user_id: UserId) -> Result<Option<UserProfile>, StorageError> {
        self.store.get(user_id).await
    }

    pub async fn save(&self, profile: &UserProfile) -> Result<(), StorageError> {
        self.store.upsert(profile).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryCache;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryCache::<String>::new(8)))
    }

    #[tokio::test]
    async fn test_resolve_creates_once() {
        let users = service();
        let first_contact = Utc::now();

        let created = users.resolve(UserId(5), "Asha", first_contact).await.unwrap();
        assert_eq!(created.started_at, first_contact);

        let again = users.resolve(UserId(5), "Someone Else", Utc::now()).await.unwrap();
        assert_eq!(again.first_name, "Asha");
        assert_eq!(again.started_at, first_contact);
    }

    #[tokio::test]
    async fn test_save_persists() {
        let users = service();
        let mut profile = users.resolve(UserId(5), "Asha", Utc::now()).await.unwrap();
        profile.content_generated = 3;
        users.save(&profile).await.unwrap();

        let stored = users.get(UserId(5)).await.unwrap().unwrap();
        assert_eq!(stored.content_generated, 3);
    }

    #[tokio::test]
    async fn test_lock_entries_are_released() {
        let users = service();

        let first = users.lock(UserId(1)).await;
        let second = users.lock(UserId(2)).await;
        assert_eq!(users.locks.len(), 2);

        drop(first);
        assert!(!users.locks.contains_key(&UserId(1)));
        assert_eq!(users.locks.len(), 1);

        drop(second);
        assert!(users.locks.is_empty());
    }

    #[tokio::test]
    async fn test_lock_entry_survives_while_waited_on() {
        let users = service();
        let held = users.lock(UserId(1)).await;

        let waiter = {
            let users = users.clone();
            tokio::spawn(async move {
                let _lock = users.lock(UserId(1)).await;
            })
        };
        // let the waiter reach the mutex
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        drop(held);
        assert!(users.locks.contains_key(&UserId(1)));

        waiter.await.unwrap();
        assert!(users.locks.is_empty());
    }

    #[tokio::test]
    async fn test_lock_is_per_user() {
        let users = service();
        let _first = users.lock(UserId(1)).await;

        // a different user is not blocked
        let other = tokio::time::timeout(std::time::Duration::from_millis(100), users.lock(UserId(2))).await;
        assert!(other.is_ok());

        // the same user is
        let same = tokio::time::timeout(std::time::Duration::from_millis(100), users.lock(UserId(1))).await;
        assert!(same.is_err());
    }
}
