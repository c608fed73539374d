use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::{Contract, ContractState};
use crate::{Bill, BillingPeriod, Call, PlanLabel, RateTable, Result};

/// Prepaid contract drawing calls down from a credit balance.
///
/// The balance is negative while credit remains and turns positive once the
/// customer owes more than was prepaid. At each rollover a balance with less
/// than the top-up threshold of credit left is topped up, and the balance is
/// carried onto the new bill as a fixed-cost line.
#[derive(Debug, Clone)]
pub struct PrepaidContract {
    state: ContractState,
    balance: Decimal,
}

impl PrepaidContract {
    /// Create a prepaid contract starting on `start` with `credit` prepaid.
    #[must_use]
    pub fn new(start: NaiveDate, credit: Decimal, rates: Arc<RateTable>) -> Self {
        Self {
            state: ContractState::new(start, rates),
            balance: -credit,
        }
    }

    /// Running balance; negative means credit remains.
    #[must_use]
    pub const fn balance(&self) -> Decimal {
        self.balance
    }
}

impl Contract for PrepaidContract {
    fn state(&self) -> &ContractState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ContractState {
        &mut self.state
    }

    fn plan(&self) -> PlanLabel {
        PlanLabel::Prepaid
    }

    fn rollover(&mut self, period: BillingPeriod, bill: Bill) -> Option<Bill> {
        let rates = Arc::clone(&self.state.rates);
        if self.balance > -rates.prepaid_top_up_threshold {
            self.balance -= rates.prepaid_top_up_amount;
            tracing::debug!(
                %period,
                top_up = %rates.prepaid_top_up_amount,
                balance = %self.balance,
                "prepaid balance topped up"
            );
        }

        let (previous, bill) = self.state.install(bill);
        bill.set_rates(PlanLabel::Prepaid, rates.prepaid_rate_per_minute);
        bill.add_fixed_cost(self.balance);
        previous
    }

    fn bill_call(&mut self, call: &Call) -> Result<()> {
        let rate = self.state.rates.prepaid_rate_per_minute;
        let minutes = call.billable_minutes();
        self.state.bill_mut()?.add_billed_minutes(minutes);
        self.balance += rate * Decimal::from(minutes);
        Ok(())
    }

    /// Settle the line: any amount owed beyond the prepaid credit.
    ///
    /// Unused credit is not refunded.
    fn cancel(&mut self) -> Result<Decimal> {
        self.state.clear_start();
        Ok(self.balance.max(Decimal::ZERO))
    }

    fn can_cancel(&self) -> bool {
        true
    }
}
