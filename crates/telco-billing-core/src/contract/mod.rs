//! Phone-line contracts.
//!
//! Every contract type implements [`Contract`]: it is rolled into each new
//! month with a fresh [`Bill`], bills the calls made that month, and settles
//! the amount owed when the line is cancelled.
//!
//! | type | monthly fee | included minutes | extras |
//! |---|---|---|---|
//! | [`PayPerUseContract`] | yes | none | none |
//! | [`TermContract`] | yes | refreshed monthly | deposit, commitment window |
//! | [`PrepaidContract`] | none | none | prepaid balance with auto top-up |

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;

use crate::{Bill, BillingError, BillingPeriod, Call, PlanLabel, RateTable, Result};

mod payg;
mod prepaid;
mod term;
mod terms;

pub use payg::PayPerUseContract;
pub use prepaid::PrepaidContract;
pub use term::TermContract;
pub use terms::ContractTerms;

/// State shared by every contract type.
///
/// Holds the start date, the rate table and the bill for the current month.
/// The contract owns only the live bill; earlier bills are handed back to the
/// driver at each rollover.
#[derive(Debug, Clone)]
pub struct ContractState {
    start: Option<NaiveDate>,
    bill: Option<Bill>,
    rates: Arc<RateTable>,
}

impl ContractState {
    /// Create the state for a contract starting on `start`.
    #[must_use]
    pub fn new(start: NaiveDate, rates: Arc<RateTable>) -> Self {
        Self {
            start: Some(start),
            bill: None,
            rates,
        }
    }

    /// Start date, or `None` once the contract has been cancelled.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start
    }

    /// Rate table the contract bills with.
    #[must_use]
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Bill for the current month, if the contract has been rolled over.
    #[must_use]
    pub const fn bill(&self) -> Option<&Bill> {
        self.bill.as_ref()
    }

    /// Mutable access to the current bill.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::NoActiveBill`] before the first rollover.
    pub fn bill_mut(&mut self) -> Result<&mut Bill> {
        self.bill.as_mut().ok_or(BillingError::NoActiveBill)
    }

    /// Cost of the current bill.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::NoActiveBill`] before the first rollover.
    pub fn current_cost(&self) -> Result<Decimal> {
        self.bill
            .as_ref()
            .map(Bill::cost)
            .ok_or(BillingError::NoActiveBill)
    }

    /// Take ownership of `bill` as the current bill.
    ///
    /// Returns the previous bill, if any, along with the newly installed one.
    pub fn install(&mut self, bill: Bill) -> (Option<Bill>, &mut Bill) {
        let previous = self.bill.take();
        (previous, self.bill.insert(bill))
    }

    /// Mark the contract cancelled.
    pub fn clear_start(&mut self) {
        self.start = None;
    }
}

/// A pricing agreement for one phone line.
///
/// Calls and month ticks must be delivered in chronological order; the
/// contract does not reorder or deduplicate them.
pub trait Contract: fmt::Debug {
    /// Shared contract state.
    fn state(&self) -> &ContractState;

    /// Mutable shared contract state.
    fn state_mut(&mut self) -> &mut ContractState;

    /// Plan this contract bills under.
    fn plan(&self) -> PlanLabel;

    /// Advance into `period`, taking ownership of that month's `bill`.
    ///
    /// Sets the bill's plan and rate and adds the month's fixed charges.
    /// Returns the previous month's bill, which the contract no longer holds.
    fn rollover(&mut self, period: BillingPeriod, bill: Bill) -> Option<Bill>;

    /// Add `call` to the current bill.
    ///
    /// The default charges every started minute at the bill's rate.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::NoActiveBill`] before the first rollover.
    fn bill_call(&mut self, call: &Call) -> Result<()> {
        self.state_mut()
            .bill_mut()?
            .add_billed_minutes(call.billable_minutes());
        Ok(())
    }

    /// Cancel the contract and return the amount owed to close the line.
    ///
    /// The default returns the current bill's cost.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::NoActiveBill`] before the first rollover.
    fn cancel(&mut self) -> Result<Decimal> {
        let cost = self.state().current_cost()?;
        self.state_mut().clear_start();
        Ok(cost)
    }

    /// Whether [`Contract::cancel`] would succeed now.
    ///
    /// The default requires a current bill.
    fn can_cancel(&self) -> bool {
        self.bill().is_some()
    }

    /// Start date, or `None` once cancelled.
    fn start_date(&self) -> Option<NaiveDate> {
        self.state().start_date()
    }

    /// Whether the contract has been cancelled.
    fn is_cancelled(&self) -> bool {
        self.state().start_date().is_none()
    }

    /// Bill for the current month.
    fn bill(&self) -> Option<&Bill> {
        self.state().bill()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn jan() -> BillingPeriod {
        BillingPeriod::new(2019, 1).unwrap()
    }

    fn state() -> ContractState {
        ContractState::new(
            NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
            Arc::new(RateTable::default()),
        )
    }

    #[test]
    fn state_without_bill_reports_no_active_bill() {
        let mut state = state();
        assert!(state.bill().is_none());
        assert!(matches!(state.bill_mut(), Err(BillingError::NoActiveBill)));
        assert!(matches!(state.current_cost(), Err(BillingError::NoActiveBill)));
    }

    #[test]
    fn install_hands_back_previous_bill() {
        let mut state = state();
        let mut first = Bill::new(jan());
        first.add_fixed_cost(dec!(5));

        let (previous, _) = state.install(first);
        assert!(previous.is_none());

        let (previous, current) = state.install(Bill::new(jan().next()));
        assert_eq!(current.period(), jan().next());
        assert_eq!(previous.unwrap().cost(), dec!(5));
    }

    #[test]
    fn clear_start_cancels() {
        let mut state = state();
        assert!(state.start_date().is_some());
        state.clear_start();
        assert!(state.start_date().is_none());
    }
}
