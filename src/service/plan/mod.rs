mod model;

pub use model::{Plan, PlanInfo, Quota};

/// Posts a user may generate before a subscription is required.
pub const FREE_TRIAL_QUOTA: u32 = 5;

/// The plan activated when a payment token is accepted.
pub const DEFAULT_PAID_PLAN: Plan = Plan::Starter;

static PLANS: [PlanInfo; 3] = [
    PlanInfo {
        id: Plan::Starter,
        name: "Starter",
        price: 1499,
        monthly_quota: Quota::Limited(30),
    },
    PlanInfo {
        id: Plan::Growth,
        name: "Growth",
        price: 3499,
        monthly_quota: Quota::Limited(100),
    },
    PlanInfo {
        id: Plan::Professional,
        name: "Professional",
        price: 9999,
        monthly_quota: Quota::Unlimited,
    },
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("Unknown plan: {0}")]
    UnknownPlan(String),
}

pub struct PlanCatalog;

impl PlanCatalog {
    /// Paid tiers in ascending price order.
    pub fn all() -> &'static [PlanInfo] {
        &PLANS
    }

    pub fn get(plan: Plan) -> Result<&'static PlanInfo, PlanError> {
        PLANS
            .iter()
            .find(|info| info.id == plan)
            .ok_or_else(|| PlanError::UnknownPlan(plan.to_string()))
    }

    /// Resolves a plan by its stored identifier.
    #[cfg(test)]
    pub fn lookup(id: &str) -> Result<&'static PlanInfo, PlanError> {
        Self::get(id.parse::<Plan>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        let starter = PlanCatalog::lookup("starter").unwrap();
        assert_eq!(starter.name, "Starter");
        assert_eq!(starter.price, 1499);
        assert_eq!(starter.monthly_quota, Quota::Limited(30));

        let growth = PlanCatalog::get(Plan::Growth).unwrap();
        assert_eq!(growth.monthly_quota, Quota::Limited(100));

        let professional = PlanCatalog::lookup("Professional").unwrap();
        assert_eq!(professional.monthly_quota, Quota::Unlimited);
    }

    #[test]
    fn test_unknown_plan() {
        assert_eq!(
            PlanCatalog::lookup("enterprise"),
            Err(PlanError::UnknownPlan("enterprise".to_string()))
        );
        // the trial is a profile plan but not a catalog tier
        assert_eq!(
            PlanCatalog::get(Plan::FreeTrial),
            Err(PlanError::UnknownPlan("free_trial".to_string()))
        );
    }

    #[test]
    fn test_catalog_is_sorted_by_price() {
        let prices: Vec<u32> = PlanCatalog::all().iter().map(|p| p.price).collect();
        let mut sorted = prices.clone();
        sorted.sort();
        assert_eq!(prices, sorted);
    }

    #[test]
    fn test_unlimited_quota() {
        assert!(!Quota::Unlimited.is_reached(u32::MAX));
        assert_eq!(Quota::Unlimited.remaining(1_000), None);
        assert!(Quota::Limited(30).is_reached(30));
        assert_eq!(Quota::Limited(30).remaining(31), Some(0));
    }
}
