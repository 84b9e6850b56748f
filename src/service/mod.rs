use std::{sync::Arc, time::Duration};

use content::{ContentGenerator, GeminiClient, OfflineGenerator, TextGenerator};
use dialogue::{ConversationEngine, DialogueService};
use usage::UsageGate;
use user::UserService;

use crate::{config::AppConfig, storage::ProfileStore, utils::http};

pub mod content;
pub mod dialogue;
mod error;
pub mod plan;
pub mod usage;
pub mod user;

pub use error::ServiceError;

#[derive(Clone)]
pub struct ServiceRegistry {
    pub dialogue: DialogueService,
}

impl ServiceRegistry {
    pub fn new(config: &AppConfig, store: Arc<dyn ProfileStore>) -> Result<Self, ServiceError> {
        info!("Initializing service registry");

        let generator: Arc<dyn TextGenerator> = match &config.gemini.api_key {
            Some(api_key) => {
                let builder =
                    reqwest::Client::builder().timeout(Duration::from_secs(config.gemini.timeout_secs));
                let client = http::build_client(builder)?;
                info!("Using Gemini model {}", config.gemini.model);
                Arc::new(GeminiClient::new(
                    client,
                    &config.gemini.base_url,
                    &config.gemini.model,
                    api_key,
                ))
            }
            None => {
                warn!("GEMINI_API_KEY not set, every post will use the offline template");
                Arc::new(OfflineGenerator)
            }
        };

        let user = UserService::new(store);
        let engine = ConversationEngine::new(UsageGate::new(config.usage.free_trial_posts));
        let dialogue = DialogueService::new(user, engine, ContentGenerator::new(generator));

        info!("Service registry initialized");

        Ok(Self { dialogue })
    }
}
