use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Default, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    #[default]
    Started,
    // Onboarding
    WaitingBusinessName,
    WaitingOwnerName,
    WaitingIndustry,
    WaitingBrandVoice,
    WaitingBrandColors,
    SetupComplete,
    // Subscription
    TrialExpired,
    Paid,
}

impl DialogueState {
    /// States in which content can be requested.
    pub fn is_accepting(&self) -> bool {
        matches!(self, DialogueState::SetupComplete | DialogueState::Paid)
    }

    /// Position of an onboarding step, `None` outside onboarding.
    pub fn onboarding_step(&self) -> Option<u8> {
        match self {
            DialogueState::WaitingBusinessName => Some(1),
            DialogueState::WaitingOwnerName => Some(2),
            DialogueState::WaitingIndustry => Some(3),
            DialogueState::WaitingBrandVoice => Some(4),
            DialogueState::WaitingBrandColors => Some(5),
            _ => None,
        }
    }
}

/// Kind of marketing copy a user can request.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    General,
    Offer,
    Festival,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::General => "general",
            ContentKind::Offer => "offer",
            ContentKind::Festival => "festival",
        }
    }
}

/// A normalized inbound message. Produced by the transport layer so that routing never
/// depends on button copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Start,
    Help,
    SetupTeam,
    SeePlans,
    MadePayment,
    Stats,
    Generate(ContentKind),
    Text(String),
}
