mod error;
pub mod gemini;

pub use error::GenerationError;
pub use gemini::GeminiClient;

use async_trait::async_trait;
use std::sync::Arc;

use crate::service::{dialogue::model::ContentKind, user::UserProfile};

/// A single call to an external text model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Stands in for the model when no API key is configured.
pub struct OfflineGenerator;

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationSource {
    Provider,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub text: String,
    pub source: GenerationSource,
}

#[derive(Clone)]
pub struct ContentGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl ContentGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn generate(&self, profile: &UserProfile, kind: ContentKind) -> Result<String, GenerationError> {
        let prompt = build_prompt(profile, kind);
        self.generator.generate(&prompt).await
    }

    /// Never fails: any provider error is logged and replaced with [`fallback_content`].
    pub async fn generate_or_fallback(&self, profile: &UserProfile, kind: ContentKind) -> Generated {
        match self.generate(profile, kind).await {
            Ok(text) => Generated {
                text,
                source: GenerationSource::Provider,
            },
            Err(e) => {
                warn!(
                    "Content generation failed for user {}, using fallback: {}",
                    profile.user_id, e
                );
                Generated {
                    text: fallback_content(profile),
                    source: GenerationSource::Fallback,
                }
            }
        }
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("not specified")
}

pub fn build_prompt(profile: &UserProfile, kind: ContentKind) -> String {
    let business = &profile.business;
    let name = field(&business.name);
    let industry = field(&business.industry);

    format!(
        "Create an engaging {kind} social media post for {name}, a {industry} business in India.
Business Details:
- Name: {name}
- Industry: {industry}
- Owner: {owner}
- Brand Voice: {voice}
- Colors: {colors}
Requirements:
1. Write in Hinglish (Hindi + English mix) for Indian audience
2. Include 8-12 relevant hashtags
3. Add emojis naturally
4. Include clear call-to-action
5. Keep it 150-200 words
6. Make it authentic and engaging
Generate content that is accurate to the brand type and what the brand needs for promotion.",
        kind = kind.as_str(),
        owner = field(&business.owner),
        voice = field(&business.voice),
        colors = field(&business.colors),
    )
}

/// Deterministic post built from the business name and industry only.
pub fn fallback_content(profile: &UserProfile) -> String {
    let name = profile
        .business
        .name
        .clone()
        .unwrap_or_else(|| t!("content.default_business_name").to_string());
    let industry = profile
        .business
        .industry
        .clone()
        .unwrap_or_else(|| t!("content.default_industry").to_string());
    let hashtag: String = name.to_lowercase().split_whitespace().collect();

    t!(
        "content.fallback",
        name = name,
        industry = industry,
        hashtag = hashtag
    )
    .to_string()
}
