use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::PlanError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    #[default]
    FreeTrial,
    Starter,
    Growth,
    Professional,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::FreeTrial => "free_trial",
            Plan::Starter => "starter",
            Plan::Growth => "growth",
            Plan::Professional => "professional",
        }
    }
}

impl FromStr for Plan {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free_trial" => Ok(Plan::FreeTrial),
            "starter" => Ok(Plan::Starter),
            "growth" => Ok(Plan::Growth),
            "professional" => Ok(Plan::Professional),
            other => Err(PlanError::UnknownPlan(other.to_string())),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monthly post allowance of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quota {
    Limited(u32),
    Unlimited,
}

impl Quota {
    /// `true` once `used` reaches the allowance. Never true for `Unlimited`.
    pub fn is_reached(&self, used: u32) -> bool {
        match self {
            Quota::Limited(limit) => used >= *limit,
            Quota::Unlimited => false,
        }
    }

    pub fn remaining(&self, used: u32) -> Option<u32> {
        match self {
            Quota::Limited(limit) => Some(limit.saturating_sub(used)),
            Quota::Unlimited => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanInfo {
    pub id: Plan,
    pub name: &'static str,
    /// Monthly price in Indian rupees.
    pub price: u32,
    pub monthly_quota: Quota,
}
