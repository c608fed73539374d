use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::{Contract, ContractState};
use crate::{Bill, BillingError, BillingPeriod, Call, PlanLabel, RateTable, Result};

/// Fixed-term contract with included minutes and a one-time deposit.
///
/// The deposit is charged on the first month's bill. Included minutes are
/// reset to the full allowance at every rollover up to the end date's month;
/// unused minutes do not carry over. The first rollover into a month after
/// the end date's month fulfils the commitment: from then on the line keeps
/// the term fee and rate but gets no included minutes, and cancelling returns
/// the deposit.
///
/// Fulfilment is tracked on its own flag. The start date is only cleared by
/// [`Contract::cancel`], so a fulfilled contract is still an active line.
#[derive(Debug, Clone)]
pub struct TermContract {
    state: ContractState,
    end: NaiveDate,
    commitment_fulfilled: bool,
}

impl TermContract {
    /// Create a term contract running from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::InvalidTerm`] unless `end` falls in a later
    /// month than `start`.
    pub fn new(start: NaiveDate, end: NaiveDate, rates: Arc<RateTable>) -> Result<Self> {
        if BillingPeriod::from_date(end) <= BillingPeriod::from_date(start) {
            return Err(BillingError::InvalidTerm { start, end });
        }
        Ok(Self {
            state: ContractState::new(start, rates),
            end,
            commitment_fulfilled: false,
        })
    }

    /// Last day of the commitment.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end
    }

    /// Whether a rollover past the end date's month has happened.
    #[must_use]
    pub const fn is_commitment_fulfilled(&self) -> bool {
        self.commitment_fulfilled
    }
}

impl Contract for TermContract {
    fn state(&self) -> &ContractState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ContractState {
        &mut self.state
    }

    fn plan(&self) -> PlanLabel {
        PlanLabel::Term
    }

    fn rollover(&mut self, period: BillingPeriod, bill: Bill) -> Option<Bill> {
        let rates = Arc::clone(&self.state.rates);
        let past_end = period > BillingPeriod::from_date(self.end);
        let first_month = self
            .state
            .start
            .is_some_and(|start| BillingPeriod::from_date(start) == period);

        let (previous, bill) = self.state.install(bill);
        bill.set_rates(PlanLabel::Term, rates.term_rate_per_minute);
        bill.add_fixed_cost(rates.term_monthly_fee);

        if past_end {
            if !self.commitment_fulfilled {
                tracing::debug!(%period, end = %self.end, "term commitment fulfilled");
            }
            self.commitment_fulfilled = true;
        } else {
            bill.add_free_minutes(rates.term_free_minutes - bill.free_minutes());
            if first_month {
                bill.add_fixed_cost(rates.term_deposit);
            }
        }
        previous
    }

    fn bill_call(&mut self, call: &Call) -> Result<()> {
        let bill = self.state.bill_mut()?;
        let minutes = call.billable_minutes();
        let free = bill.free_minutes();

        match i64::try_from(minutes) {
            Ok(needed) if free >= needed => bill.add_free_minutes(-needed),
            _ => {
                let covered = u64::try_from(free).unwrap_or(0);
                bill.add_billed_minutes(minutes - covered);
                bill.add_free_minutes(-free);
            }
        }
        Ok(())
    }

    /// Settle the line.
    ///
    /// Once the commitment is fulfilled the deposit is returned against the
    /// current bill. Cancelling inside the term forfeits it, so the current
    /// bill is owed as-is.
    fn cancel(&mut self) -> Result<Decimal> {
        let cost = self.state.current_cost()?;
        self.state.clear_start();
        if self.commitment_fulfilled {
            Ok(cost - self.state.rates.term_deposit)
        } else {
            Ok(cost)
        }
    }
}
