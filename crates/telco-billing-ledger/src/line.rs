//! Phone lines: a contract plus its statement history.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use telco_billing_core::{Bill, BillSummary, BillingPeriod, Call, Contract, PhoneNumber, PlanLabel};

use crate::Result;

/// Final amount owed when a line is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// The closed line.
    pub number: PhoneNumber,

    /// Plan the line was on.
    pub plan: PlanLabel,

    /// Bill for the month the line was closed in.
    pub final_bill: Option<BillSummary>,

    /// Amount owed to close the line; negative means money is returned.
    pub amount_owed: Decimal,
}

/// One phone line and its billing history.
///
/// The contract owns only the current month's bill. Each rollover hands the
/// previous bill back, and the line files it as a statement.
#[derive(Debug)]
pub struct PhoneLine {
    number: PhoneNumber,
    contract: Box<dyn Contract>,
    statements: BTreeMap<BillingPeriod, BillSummary>,
}

impl PhoneLine {
    /// Create a line billed under `contract`.
    #[must_use]
    pub fn new(number: PhoneNumber, contract: Box<dyn Contract>) -> Self {
        Self {
            number,
            contract,
            statements: BTreeMap::new(),
        }
    }

    /// Phone number of the line.
    #[must_use]
    pub const fn number(&self) -> &PhoneNumber {
        &self.number
    }

    /// Contract the line is billed under.
    #[must_use]
    pub fn contract(&self) -> &dyn Contract {
        self.contract.as_ref()
    }

    /// Whether the contract has started by `period`.
    ///
    /// A cancelled contract has no start and is never active.
    #[must_use]
    pub fn is_active_in(&self, period: BillingPeriod) -> bool {
        self.contract
            .start_date()
            .is_some_and(|start| BillingPeriod::from_date(start) <= period)
    }

    /// Whether [`PhoneLine::cancel`] would succeed now.
    #[must_use]
    pub fn can_settle(&self) -> bool {
        self.contract.can_cancel()
    }

    /// Start billing `period` with a fresh bill and file last month's bill.
    pub fn new_month(&mut self, period: BillingPeriod) {
        if let Some(previous) = self.contract.rollover(period, Bill::new(period)) {
            self.statements.insert(previous.period(), previous.summary());
        }
    }

    /// Bill `call` to this line.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LedgerError::Billing`] if the line has not been rolled
    /// into a month yet.
    pub fn make_call(&mut self, call: &Call) -> Result<()> {
        self.contract.bill_call(call)?;
        Ok(())
    }

    /// Cancel the contract and settle the line.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LedgerError::Billing`] if the contract cannot settle.
    pub fn cancel(&mut self) -> Result<Settlement> {
        let final_bill = self.contract.bill().map(Bill::summary);
        let amount_owed = self.contract.cancel()?;
        Ok(Settlement {
            number: self.number.clone(),
            plan: self.contract.plan(),
            final_bill,
            amount_owed,
        })
    }

    /// Statement for `period`, whether filed or still open.
    #[must_use]
    pub fn statement(&self, period: BillingPeriod) -> Option<BillSummary> {
        match self.contract.bill() {
            Some(bill) if bill.period() == period => Some(bill.summary()),
            _ => self.statements.get(&period).cloned(),
        }
    }

    /// All statements in chronological order, ending with the open month.
    #[must_use]
    pub fn statements(&self) -> Vec<BillSummary> {
        self.statements
            .values()
            .cloned()
            .chain(self.contract.bill().map(Bill::summary))
            .collect()
    }
}
