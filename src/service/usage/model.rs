use crate::service::plan::{Plan, Quota};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaStatus {
    pub plan: Plan,
    pub plan_name: String,
    /// Posts generated since the trial started or the plan was activated.
    pub used: u32,
    /// Free trial allowance, or the plan's monthly allowance.
    pub limit: Quota,
    /// `None` when unlimited.
    pub remaining: Option<u32>,
}
