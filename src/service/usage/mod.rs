mod model;

pub use model::QuotaStatus;

use crate::service::{
    plan::{PlanCatalog, PlanError, Quota, FREE_TRIAL_QUOTA},
    user::UserProfile,
};

/// Decides whether a profile may keep generating content.
///
/// Only the free trial blocks. Paid plans carry a monthly quota in the catalog but it is
/// shown to the user and never enforced.
#[derive(Debug, Clone, Copy)]
pub struct UsageGate {
    free_trial_quota: u32,
}

impl Default for UsageGate {
    fn default() -> Self {
        Self::new(FREE_TRIAL_QUOTA)
    }
}

impl UsageGate {
    pub fn new(free_trial_quota: u32) -> Self {
        Self { free_trial_quota }
    }

    pub fn free_trial_quota(&self) -> u32 {
        self.free_trial_quota
    }

    pub fn is_over_quota(&self, profile: &UserProfile) -> bool {
        !profile.subscription_active && Quota::Limited(self.free_trial_quota).is_reached(profile.content_generated)
    }

    pub fn describe_quota(&self, profile: &UserProfile) -> Result<QuotaStatus, PlanError> {
        let used = profile.content_generated;

        let (plan_name, limit) = if profile.subscription_active {
            let info = PlanCatalog::get(profile.plan)?;
            (info.name.to_string(), info.monthly_quota)
        } else {
            (t!("plans.free_trial").to_string(), Quota::Limited(self.free_trial_quota))
        };

        Ok(QuotaStatus {
            plan: profile.plan,
            plan_name,
            used,
            limit,
            remaining: limit.remaining(used),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use teloxide::types::UserId;

    use super::*;
    use crate::service::plan::Plan;

    fn profile_with(generated: u32, active: bool) -> UserProfile {
        let mut profile = UserProfile::new(UserId(1), "Asha", Utc::now());
        profile.content_generated = generated;
        profile.subscription_active = active;
        profile
    }

    #[test]
    fn test_is_over_quota() {
        let gate = UsageGate::default();

        for generated in 0..FREE_TRIAL_QUOTA {
            assert!(!gate.is_over_quota(&profile_with(generated, false)));
        }
        assert!(gate.is_over_quota(&profile_with(FREE_TRIAL_QUOTA, false)));
        assert!(gate.is_over_quota(&profile_with(FREE_TRIAL_QUOTA + 10, false)));

        // paid plans are never blocked, not even past their monthly quota
        assert!(!gate.is_over_quota(&profile_with(500, true)));
    }

    #[test]
    fn test_activation_clears_over_quota() {
        let gate = UsageGate::default();
        let mut profile = profile_with(99, false);
        assert!(gate.is_over_quota(&profile));

        profile.activate(Plan::Starter, "ABC12345", Utc::now());

        assert!(!gate.is_over_quota(&profile));
    }

    #[test]
    fn test_custom_trial_quota() {
        let gate = UsageGate::new(2);
        assert!(!gate.is_over_quota(&profile_with(1, false)));
        assert!(gate.is_over_quota(&profile_with(2, false)));
    }

    #[test]
    fn test_describe_trial_quota() {
        let gate = UsageGate::default();
        let status = gate.describe_quota(&profile_with(3, false)).unwrap();

        assert_eq!(status.plan, Plan::FreeTrial);
        assert_eq!(status.used, 3);
        assert_eq!(status.limit, Quota::Limited(FREE_TRIAL_QUOTA));
        assert_eq!(status.remaining, Some(FREE_TRIAL_QUOTA - 3));
    }

    #[test]
    fn test_describe_paid_quota() {
        let gate = UsageGate::default();
        let mut profile = profile_with(0, false);
        profile.activate(Plan::Professional, "ABC12345", Utc::now());
        profile.content_generated = 250;

        let status = gate.describe_quota(&profile).unwrap();
        assert_eq!(status.plan_name, "Professional");
        assert_eq!(status.limit, Quota::Unlimited);
        assert_eq!(status.remaining, None);
    }

    #[test]
    fn test_describe_active_trial_is_invariant_violation() {
        let gate = UsageGate::default();
        let profile = profile_with(0, true);

        assert_eq!(
            gate.describe_quota(&profile),
            Err(PlanError::UnknownPlan("free_trial".to_string()))
        );
    }
}
