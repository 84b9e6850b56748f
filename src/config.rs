use shuttle_runtime::SecretStore;
use std::str::FromStr;

use crate::service::{content::gemini::DEFAULT_BASE_URL, plan::FREE_TRIAL_QUOTA};

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MEMORY_CAPACITY: usize = 1_000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing secret: {0}")]
    Missing(String),
    #[error("Invalid secret {key}: {value}")]
    Invalid { key: String, value: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub telegram: TelegramConfig,
    pub gemini: GeminiConfig,
    pub usage: UsageConfig,
    pub storage: StorageConfig,
}

#[derive(Clone, Debug)]
pub struct TelegramConfig(pub String);

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// Without a key every post falls back to the offline template.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct UsageConfig {
    pub free_trial_posts: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageConfig {
    Memory { capacity: usize },
    Redis { url: String },
    Turso { url: String, token: String },
}

pub fn build_config(secret_store: &SecretStore) -> Result<AppConfig, ConfigError> {
    info!("Building AppConfig...");
    let config = build_config_from(|key| secret_store.get(key))?;
    info!("AppConfig built");
    Ok(config)
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::Missing(key.to_string()))
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError> {
    match optional(lookup, key) {
        Some(value) => value.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

pub fn build_config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<AppConfig, ConfigError> {
    let storage = match optional(&lookup, "PROFILE_STORE").as_deref().map(str::trim) {
        None | Some("memory") => StorageConfig::Memory {
            capacity: DEFAULT_MEMORY_CAPACITY,
        },
        Some("redis") => StorageConfig::Redis {
            url: required(&lookup, "REDIS_URL")?,
        },
        Some("turso") => StorageConfig::Turso {
            url: required(&lookup, "TURSO_URL")?,
            token: required(&lookup, "TURSO_TOKEN")?,
        },
        Some(other) => {
            return Err(ConfigError::Invalid {
                key: "PROFILE_STORE".to_string(),
                value: other.to_string(),
            })
        }
    };

    Ok(AppConfig {
        telegram: TelegramConfig(required(&lookup, "TELEGRAM_BOT_TOKEN")?),
        gemini: GeminiConfig {
            api_key: optional(&lookup, "GEMINI_API_KEY"),
            model: optional(&lookup, "GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: optional(&lookup, "GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs: parsed(&lookup, "GEMINI_TIMEOUT_SECS", DEFAULT_GEMINI_TIMEOUT_SECS)?,
        },
        usage: UsageConfig {
            free_trial_posts: parsed(&lookup, "FREE_TRIAL_POSTS", FREE_TRIAL_QUOTA)?,
        },
        storage,
    })
}
