use chrono::NaiveDate;
use std::sync::Arc;

use super::{Contract, ContractState};
use crate::{Bill, BillingPeriod, PlanLabel, RateTable};

/// Month-to-month contract: flat monthly fee, every minute billed, no commitment.
#[derive(Debug, Clone)]
pub struct PayPerUseContract {
    state: ContractState,
}

impl PayPerUseContract {
    /// Create a pay-per-use contract starting on `start`.
    #[must_use]
    pub fn new(start: NaiveDate, rates: Arc<RateTable>) -> Self {
        Self {
            state: ContractState::new(start, rates),
        }
    }
}

impl Contract for PayPerUseContract {
    fn state(&self) -> &ContractState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ContractState {
        &mut self.state
    }

    fn plan(&self) -> PlanLabel {
        PlanLabel::Payg
    }

    fn rollover(&mut self, _period: BillingPeriod, bill: Bill) -> Option<Bill> {
        let rate = self.state.rates().payg_rate_per_minute;
        let fee = self.state.rates().payg_monthly_fee;
        let (previous, bill) = self.state.install(bill);
        bill.set_rates(PlanLabel::Payg, rate);
        bill.add_fixed_cost(fee);
        previous
    }
}
