use async_trait::async_trait;
use chrono::Utc;
use libsql::{params, Builder, Connection, Database};
use std::sync::Arc;
use teloxide::types::UserId;

use crate::service::user::UserProfile;

use super::{ProfileStore, StorageError};

const CREATE_PROFILES_TABLE: &str = "CREATE TABLE IF NOT EXISTS user_profiles (
    user_id INTEGER PRIMARY KEY,
    profile TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

#[derive(Clone)]
pub struct TursoClient {
    inner: Arc<Database>,
}

impl TursoClient {
    pub async fn new(url: &str, token: &str) -> Result<Self, StorageError> {
        info!("Initializing TursoClient...");
        let db = Builder::new_remote(url.to_string(), token.to_string()).build().await?;

        let client = Self { inner: Arc::new(db) };
        client.get_connection()?.execute(CREATE_PROFILES_TABLE, ()).await?;

        info!("TursoClient initialized");
        Ok(client)
    }

    pub fn get_connection(&self) -> Result<Connection, StorageError> {
        Ok(self.inner.connect()?)
    }
}

#[async_trait]
impl ProfileStore for TursoClient {
    async fn get(&self, user_id: UserId) -> Result<Option<UserProfile>, StorageError> {
        let conn = self.get_connection()?;
        let mut rows = conn
            .query(
                "SELECT profile FROM user_profiles WHERE user_id = ?1 LIMIT 1",
                params![user_id.0 as i64],
            )
            .await?;

        match rows.next().await? {
            Some(row) => {
                let json = row.get::<String>(0)?;
                Ok(Some(serde_json::from_str(&json)?))
            }
            None => Ok(None),
        }
    }

    async fn upsert(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let conn = self.get_connection()?;
        let json = serde_json::to_string(profile)?;

        conn.execute(
            "INSERT INTO user_profiles (user_id, profile, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id) DO UPDATE SET profile = excluded.profile, updated_at = excluded.updated_at",
            params![profile.user_id.0 as i64, json, Utc::now().to_rfc3339()],
        )
        .await?;

        Ok(())
    }
}
