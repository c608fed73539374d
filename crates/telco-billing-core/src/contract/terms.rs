use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{Contract, PayPerUseContract, PrepaidContract, TermContract};
use crate::{PlanLabel, RateTable, Result};

/// Signup terms for a line, as found in call logs and signup records.
///
/// ```
/// use telco_billing_core::ContractTerms;
///
/// let terms: ContractTerms = serde_json::from_str(
///     r#"{ "type": "term", "start": "2018-11-15", "end": "2019-11-15" }"#,
/// ).unwrap();
/// assert!(matches!(terms, ContractTerms::Term { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ContractTerms {
    /// Month-to-month, no commitment.
    PayPerUse {
        /// Signup date.
        start: NaiveDate,
    },

    /// Fixed term with included minutes and a deposit.
    Term {
        /// Signup date.
        start: NaiveDate,
        /// End of the commitment.
        end: NaiveDate,
    },

    /// Prepaid credit.
    Prepaid {
        /// Signup date.
        start: NaiveDate,
        /// Credit bought at signup.
        credit: Decimal,
    },
}

impl ContractTerms {
    /// Signup date.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        match self {
            Self::PayPerUse { start } | Self::Term { start, .. } | Self::Prepaid { start, .. } => {
                *start
            }
        }
    }

    /// Plan the resulting contract bills under.
    #[must_use]
    pub const fn plan(&self) -> PlanLabel {
        match self {
            Self::PayPerUse { .. } => PlanLabel::Payg,
            Self::Term { .. } => PlanLabel::Term,
            Self::Prepaid { .. } => PlanLabel::Prepaid,
        }
    }

    /// Build the contract these terms describe, billing with `rates`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BillingError::InvalidTerm`] for a term contract whose
    /// end is not in a later month than its start.
    pub fn into_contract(self, rates: Arc<RateTable>) -> Result<Box<dyn Contract>> {
        let contract: Box<dyn Contract> = match self {
            Self::PayPerUse { start } => Box::new(PayPerUseContract::new(start, rates)),
            Self::Term { start, end } => Box::new(TermContract::new(start, end, rates)?),
            Self::Prepaid { start, credit } => Box::new(PrepaidContract::new(start, credit, rates)),
        };
        Ok(contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bill, BillingError, BillingPeriod};
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn deserialize_each_variant() {
        let json = r#"[
            { "type": "pay_per_use", "start": "2019-01-01" },
            { "type": "term", "start": "2019-01-01", "end": "2019-12-31" },
            { "type": "prepaid", "start": "2019-01-01", "credit": 40 }
        ]"#;
        let terms: Vec<ContractTerms> = serde_json::from_str(json).unwrap();
        assert_eq!(terms[0].plan(), PlanLabel::Payg);
        assert_eq!(terms[1].plan(), PlanLabel::Term);
        assert_eq!(
            terms[2],
            ContractTerms::Prepaid {
                start: date(2019, 1, 1),
                credit: dec!(40)
            }
        );
        assert!(terms.iter().all(|t| t.start_date() == date(2019, 1, 1)));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let json = r#"{ "type": "family_plan", "start": "2019-01-01" }"#;
        assert!(serde_json::from_str::<ContractTerms>(json).is_err());
    }

    #[test]
    fn into_contract_builds_matching_plan() {
        let rates = Arc::new(RateTable::default());
        let period = BillingPeriod::new(2019, 1).unwrap();
        let terms = [
            ContractTerms::PayPerUse { start: date(2019, 1, 1) },
            ContractTerms::Term {
                start: date(2019, 1, 1),
                end: date(2019, 6, 1),
            },
            ContractTerms::Prepaid {
                start: date(2019, 1, 1),
                credit: dec!(20),
            },
        ];

        for terms in terms {
            let plan = terms.plan();
            let mut contract = terms.into_contract(Arc::clone(&rates)).unwrap();
            assert_eq!(contract.plan(), plan);
            contract.rollover(period, Bill::new(period));
            assert_eq!(contract.bill().unwrap().plan(), Some(plan));
        }
    }

    #[test]
    fn into_contract_rejects_single_month_term() {
        let terms = ContractTerms::Term {
            start: date(2019, 1, 1),
            end: date(2019, 1, 31),
        };
        assert!(matches!(
            terms.into_contract(Arc::new(RateTable::default())),
            Err(BillingError::InvalidTerm { .. })
        ));
    }
}
