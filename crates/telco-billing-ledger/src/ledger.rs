//! The ledger: every line in a billing run, advanced month by month.

use std::collections::BTreeMap;
use std::sync::Arc;
use telco_billing_core::{BillingPeriod, ContractTerms, PhoneNumber, RateTable};

use crate::{CallLog, CallRecord, LedgerError, PhoneLine, Result, Settlement};

/// Routes month ticks and calls to phone lines.
///
/// The ledger keeps a single current month. Advancing it rolls every line
/// through each month in between, so monthly fees are charged even for months
/// with no calls. A line is only rolled into months from its start date on.
/// Months never move backwards.
#[derive(Debug)]
pub struct Ledger {
    rates: Arc<RateTable>,
    lines: BTreeMap<PhoneNumber, PhoneLine>,
    current: Option<BillingPeriod>,
}

impl Ledger {
    /// Create an empty ledger billing with `rates`.
    #[must_use]
    pub fn new(rates: Arc<RateTable>) -> Self {
        Self {
            rates,
            lines: BTreeMap::new(),
            current: None,
        }
    }

    /// Month currently being billed, if any call or tick has arrived.
    #[must_use]
    pub const fn current_period(&self) -> Option<BillingPeriod> {
        self.current
    }

    /// Look up a line.
    #[must_use]
    pub fn line(&self, number: &PhoneNumber) -> Option<&PhoneLine> {
        self.lines.get(number)
    }

    /// All open lines, ordered by number.
    pub fn lines(&self) -> impl Iterator<Item = &PhoneLine> {
        self.lines.values()
    }

    /// Sign up a line under `terms`.
    ///
    /// A line added mid-run is rolled into the current month straight away,
    /// unless its contract starts later.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateLine`] if the number is taken, or
    /// [`LedgerError::Billing`] if the terms are invalid.
    pub fn add_line(&mut self, number: PhoneNumber, terms: ContractTerms) -> Result<()> {
        if self.lines.contains_key(&number) {
            return Err(LedgerError::DuplicateLine { number });
        }

        let plan = terms.plan();
        let contract = terms.into_contract(Arc::clone(&self.rates))?;
        let mut line = PhoneLine::new(number.clone(), contract);
        if let Some(period) = self.current.filter(|&period| line.is_active_in(period)) {
            line.new_month(period);
        }

        tracing::info!(line = %number, plan = plan.as_str(), "Line added");
        self.lines.insert(number, line);
        Ok(())
    }

    /// Advance the ledger to `period`, rolling every line into each month up to it.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::OutOfOrder`] if `period` is before the current month.
    pub fn advance_to(&mut self, period: BillingPeriod) -> Result<()> {
        let mut next = match self.current {
            Some(current) if period < current => {
                return Err(LedgerError::OutOfOrder { period, current });
            }
            Some(current) if period == current => return Ok(()),
            Some(current) => current.next(),
            None => period,
        };

        loop {
            for line in self.lines.values_mut() {
                if line.is_active_in(next) {
                    line.new_month(next);
                }
            }
            self.current = Some(next);
            tracing::debug!(period = %next, lines = self.lines.len(), "Month opened");
            if next == period {
                return Ok(());
            }
            next = next.next();
        }
    }

    /// Bill a call to its source line, advancing the month if needed.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::OutOfOrder`] for a call from an earlier month, or
    /// [`LedgerError::UnknownLine`] if the source line is not in the ledger.
    pub fn record_call(&mut self, record: &CallRecord) -> Result<()> {
        if !self.lines.contains_key(&record.source) {
            return Err(LedgerError::UnknownLine {
                number: record.source.clone(),
            });
        }
        self.advance_to(record.period())?;

        let line = self
            .lines
            .get_mut(&record.source)
            .ok_or_else(|| LedgerError::UnknownLine {
                number: record.source.clone(),
            })?;
        line.make_call(&record.to_call())
    }

    /// Close a line and return what it owes.
    ///
    /// The line is removed from the ledger once settled.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownLine`] if the line is not in the ledger, or
    /// [`LedgerError::Billing`] if it has not been billed for any month yet.
    pub fn cancel_line(&mut self, number: &PhoneNumber) -> Result<Settlement> {
        let line = self
            .lines
            .get_mut(number)
            .ok_or_else(|| LedgerError::UnknownLine {
                number: number.clone(),
            })?;
        let settlement = line.cancel()?;
        self.lines.remove(number);

        tracing::info!(
            line = %number,
            plan = settlement.plan.as_str(),
            amount_owed = %settlement.amount_owed,
            "Line cancelled"
        );
        Ok(settlement)
    }

    /// Close every line, in number order.
    ///
    /// Every line is checked before any is closed, so a failure leaves the
    /// ledger untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotBilled`] for the first line that cannot
    /// settle yet.
    pub fn settle_all(&mut self) -> Result<Vec<Settlement>> {
        if let Some(line) = self.lines.values().find(|line| !line.can_settle()) {
            return Err(LedgerError::NotBilled {
                number: line.number().clone(),
            });
        }

        let numbers: Vec<PhoneNumber> = self.lines.keys().cloned().collect();
        numbers
            .iter()
            .map(|number| self.cancel_line(number))
            .collect()
    }

    /// Sign up every line in `log`, then bill its calls in chronological order.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`Ledger::add_line`] or [`Ledger::record_call`].
    pub fn replay(&mut self, log: &CallLog) -> Result<()> {
        for record in &log.lines {
            self.add_line(record.number.clone(), record.contract.clone())?;
        }
        let calls = log.chronological_calls();
        for call in &calls {
            self.record_call(call)?;
        }
        tracing::info!(
            lines = log.lines.len(),
            calls = calls.len(),
            period = ?self.current,
            "Call log replayed"
        );
        Ok(())
    }
}
