use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use teloxide::types::UserId;

use crate::service::{dialogue::model::DialogueState, plan::Plan};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub first_name: String,
    pub state: DialogueState,
    #[serde(default)]
    pub business: BusinessDetails,
    pub plan: Plan,
    pub subscription_active: bool,
    pub content_generated: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_token: Option<String>,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_generated_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    pub fn new(user_id: UserId, first_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            first_name: first_name.into(),
            state: DialogueState::Started,
            business: BusinessDetails::default(),
            plan: Plan::FreeTrial,
            subscription_active: false,
            content_generated: 0,
            subscription_started_at: None,
            payment_token: None,
            started_at: now,
            last_generated_at: None,
        }
    }

    /// Switches the profile to a paid plan. The usage counter starts over.
    pub fn activate(&mut self, plan: Plan, token: &str, now: DateTime<Utc>) {
        self.plan = plan;
        self.subscription_active = true;
        self.content_generated = 0;
        self.subscription_started_at = Some(now);
        self.payment_token = Some(token.to_string());
    }

    pub fn record_generation(&mut self, now: DateTime<Utc>) {
        self.content_generated = self.content_generated.saturating_add(1);
        self.last_generated_at = Some(now);
    }
}
