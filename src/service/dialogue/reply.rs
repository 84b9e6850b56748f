use crate::service::{
    plan::{PlanCatalog, PlanInfo, Quota},
    usage::QuotaStatus,
    user::UserProfile,
};

use super::model::DialogueState;

/// Reply keyboard shown under a message. Rendered into buttons by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    Welcome,
    BrandVoice,
    ContentMenu,
    Upgrade,
}

impl Keyboard {
    /// The menu that fits a state when no step-specific keyboard applies.
    pub fn for_state(state: DialogueState) -> Option<Self> {
        match state {
            DialogueState::Started => Some(Keyboard::Welcome),
            DialogueState::SetupComplete | DialogueState::Paid => Some(Keyboard::ContentMenu),
            DialogueState::TrialExpired => Some(Keyboard::Upgrade),
            DialogueState::WaitingBrandVoice => Some(Keyboard::BrandVoice),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: Option<Keyboard>) -> Self {
        self.keyboard = keyboard;
        self
    }

    /// Sent when a request could not be processed.
    pub fn failure() -> Self {
        Self::new(t!("messages.error"))
    }
}

fn quota_label(quota: Quota) -> String {
    match quota {
        Quota::Limited(limit) => limit.to_string(),
        Quota::Unlimited => t!("messages.quota.unlimited").to_string(),
    }
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

pub(super) fn welcome(first_name: &str, trial_posts: u32) -> Reply {
    Reply::new(t!("messages.welcome", first_name = first_name, trial_posts = trial_posts))
        .with_keyboard(Some(Keyboard::Welcome))
}

pub(super) fn help(state: DialogueState) -> Reply {
    Reply::new(t!("messages.help")).with_keyboard(Keyboard::for_state(state))
}

pub(super) fn pricing(state: DialogueState, trial_posts: u32) -> Reply {
    let mut text = t!("messages.pricing.header", trial_posts = trial_posts).to_string();
    for PlanInfo {
        name,
        price,
        monthly_quota,
        ..
    } in PlanCatalog::all()
    {
        text.push('\n');
        text.push_str(&t!(
            "messages.pricing.plan",
            name = name,
            price = price,
            quota = quota_label(*monthly_quota)
        ));
    }
    text.push_str("\n\n");
    text.push_str(&t!("messages.pricing.footer"));

    Reply::new(text).with_keyboard(Keyboard::for_state(state))
}

pub(super) fn upgrade(used: u32, trial_posts: u32) -> Reply {
    Reply::new(t!("messages.upgrade", used = used, trial_posts = trial_posts)).with_keyboard(Some(Keyboard::Upgrade))
}

pub(super) fn ask_payment_token() -> Reply {
    Reply::new(t!("messages.payment.ask_token"))
}

pub(super) fn payment_activated(plan: &PlanInfo) -> Reply {
    Reply::new(t!(
        "messages.payment.activated",
        plan = plan.name,
        quota = quota_label(plan.monthly_quota)
    ))
    .with_keyboard(Some(Keyboard::ContentMenu))
}

pub(super) fn onboarding_prompt(state: DialogueState) -> Reply {
    let key = match state {
        DialogueState::WaitingBusinessName => "messages.onboarding.business_name",
        DialogueState::WaitingOwnerName => "messages.onboarding.owner_name",
        DialogueState::WaitingIndustry => "messages.onboarding.industry",
        DialogueState::WaitingBrandVoice => "messages.onboarding.brand_voice",
        _ => "messages.onboarding.brand_colors",
    };

    Reply::new(t!(key)).with_keyboard(Keyboard::for_state(state))
}

pub(super) fn setup_complete(profile: &UserProfile) -> Reply {
    let business = &profile.business;
    Reply::new(t!(
        "messages.onboarding.complete",
        name = or_dash(&business.name),
        owner = or_dash(&business.owner),
        industry = or_dash(&business.industry),
        voice = or_dash(&business.voice),
        colors = or_dash(&business.colors)
    ))
    .with_keyboard(Some(Keyboard::ContentMenu))
}

pub(super) fn stats(profile: &UserProfile, quota: &QuotaStatus) -> Reply {
    let business = &profile.business;
    let remaining = match quota.remaining {
        Some(remaining) => remaining.to_string(),
        None => t!("messages.quota.unlimited").to_string(),
    };

    Reply::new(t!(
        "messages.stats",
        name = or_dash(&business.name),
        industry = or_dash(&business.industry),
        plan = quota.plan_name,
        used = quota.used,
        limit = quota_label(quota.limit),
        remaining = remaining
    ))
    .with_keyboard(Keyboard::for_state(profile.state))
}

pub(super) fn generated(text: &str, quota: &QuotaStatus) -> Reply {
    let footer = t!(
        "messages.content.footer",
        used = quota.used,
        limit = quota_label(quota.limit)
    );

    Reply::new(format!("{}\n\n{}", text, footer)).with_keyboard(Some(Keyboard::ContentMenu))
}

pub(super) fn unknown(state: DialogueState) -> Reply {
    Reply::new(t!("messages.unknown")).with_keyboard(Keyboard::for_state(state))
}
