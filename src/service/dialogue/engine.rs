use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use teloxide::types::UserId;

use crate::service::{
    plan::{PlanCatalog, PlanError, DEFAULT_PAID_PLAN},
    usage::{QuotaStatus, UsageGate},
    user::UserProfile,
};

use super::{
    model::{ContentKind, DialogueState, Input},
    reply::{self, Reply},
};

static PAYMENT_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]{6,20}$").unwrap());

pub fn is_payment_token(text: &str) -> bool {
    PAYMENT_TOKEN_REGEX.is_match(text)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub user_id: UserId,
    pub first_name: String,
    pub input: Input,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Reply(Reply),
    /// The usage counter has already been charged and `quota` reflects it; the caller
    /// produces the content.
    Generate { kind: ContentKind, quota: QuotaStatus },
}

/// The per-user state machine.
///
/// Routing precedence, first match wins:
/// 1. `/start` resets the dialogue from any state
/// 2. an over-quota trial user is moved to `TrialExpired`
/// 3. plans and help
/// 4. payment inputs while `TrialExpired`
/// 5. the current onboarding step
/// 6. menu actions in accepting states
/// 7. the generic menu reply
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversationEngine {
    gate: UsageGate,
}

impl ConversationEngine {
    pub fn new(gate: UsageGate) -> Self {
        Self { gate }
    }

    pub fn gate(&self) -> &UsageGate {
        &self.gate
    }

    /// Applies one inbound message to `profile`. On error the caller must discard the
    /// mutated profile.
    pub fn step(
        &self,
        profile: &mut UserProfile,
        message: &InboundMessage,
        now: DateTime<Utc>,
    ) -> Result<Outcome, PlanError> {
        let trial_posts = self.gate.free_trial_quota();

        if message.input == Input::Start {
            profile.state = DialogueState::Started;
            profile.first_name = message.first_name.clone();
            return Ok(Outcome::Reply(reply::welcome(&profile.first_name, trial_posts)));
        }

        if profile.state != DialogueState::TrialExpired && self.gate.is_over_quota(profile) {
            debug!("User {} is over the free trial quota", profile.user_id);
            profile.state = DialogueState::TrialExpired;
            return Ok(Outcome::Reply(reply::upgrade(profile.content_generated, trial_posts)));
        }

        match &message.input {
            Input::SeePlans => return Ok(Outcome::Reply(reply::pricing(profile.state, trial_posts))),
            Input::Help => return Ok(Outcome::Reply(reply::help(profile.state))),
            _ => {}
        }

        if profile.state == DialogueState::TrialExpired {
            match &message.input {
                Input::MadePayment => return Ok(Outcome::Reply(reply::ask_payment_token())),
                Input::Text(token) if is_payment_token(token) => {
                    let plan = PlanCatalog::get(DEFAULT_PAID_PLAN)?;
                    profile.activate(plan.id, token, now);
                    profile.state = DialogueState::Paid;
                    info!("User {} activated plan {}", profile.user_id, plan.id);
                    return Ok(Outcome::Reply(reply::payment_activated(plan)));
                }
                _ => {}
            }
        }

        if let Some(reply) = self.onboarding(profile, &message.input) {
            return Ok(Outcome::Reply(reply));
        }

        if profile.state.is_accepting() {
            match &message.input {
                Input::Stats => {
                    let quota = self.gate.describe_quota(profile)?;
                    return Ok(Outcome::Reply(reply::stats(profile, &quota)));
                }
                Input::Generate(kind) => {
                    profile.record_generation(now);
                    let quota = self.gate.describe_quota(profile)?;
                    return Ok(Outcome::Generate { kind: *kind, quota });
                }
                _ => {}
            }
        }

        Ok(Outcome::Reply(reply::unknown(profile.state)))
    }

    /// Builds the reply carrying generated content, with the usage footer.
    pub fn content_reply(&self, text: &str, quota: &QuotaStatus) -> Reply {
        reply::generated(text, quota)
    }

    fn onboarding(&self, profile: &mut UserProfile, input: &Input) -> Option<Reply> {
        if profile.state == DialogueState::Started && *input == Input::SetupTeam {
            profile.state = DialogueState::WaitingBusinessName;
            return Some(reply::onboarding_prompt(profile.state));
        }

        profile.state.onboarding_step()?;

        // blank text and menu buttons leave the step unanswered
        let text = match input {
            Input::Text(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => return Some(reply::onboarding_prompt(profile.state)),
        };

        let business = &mut profile.business;
        let next = match profile.state {
            DialogueState::WaitingBusinessName => {
                business.name = Some(text);
                DialogueState::WaitingOwnerName
            }
            DialogueState::WaitingOwnerName => {
                business.owner = Some(text);
                DialogueState::WaitingIndustry
            }
            DialogueState::WaitingIndustry => {
                business.industry = Some(text);
                DialogueState::WaitingBrandVoice
            }
            DialogueState::WaitingBrandVoice => {
                business.voice = Some(text);
                DialogueState::WaitingBrandColors
            }
            DialogueState::WaitingBrandColors => {
                business.colors = Some(text);
                DialogueState::SetupComplete
            }
            _ => return None,
        };
        profile.state = next;

        if next == DialogueState::SetupComplete {
            info!("User {} completed onboarding", profile.user_id);
            Some(reply::setup_complete(profile))
        } else {
            Some(reply::onboarding_prompt(next))
        }
    }
}
