//! Analysis criteria.
//!
//! Every criterion scores closed trades only unless it is built with
//! [`OpenTradePolicy::CloseAtLastPrice`](ta_core::OpenTradePolicy).

mod drawdown;
mod profit;
mod trades;
mod versus;

pub use drawdown::MaximumDrawdownCriterion;
pub use profit::{
    AverageProfitableTradesCriterion, BuyAndHoldCriterion, RewardRiskRatioCriterion,
    TotalProfitCriterion,
};
pub use trades::NumberOfTradesCriterion;
pub use versus::VersusBuyAndHoldCriterion;

macro_rules! policy_builder {
    ($($name:ident),* $(,)?) => {
        $(impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            /// Score the open trade according to `policy`.
            pub fn with_policy(policy: ta_core::OpenTradePolicy) -> Self {
                Self { policy }
            }

            pub fn policy(&self) -> ta_core::OpenTradePolicy {
                self.policy
            }
        })*
    };
}

policy_builder!(
    TotalProfitCriterion,
    AverageProfitableTradesCriterion,
    RewardRiskRatioCriterion,
    NumberOfTradesCriterion,
    MaximumDrawdownCriterion,
);
