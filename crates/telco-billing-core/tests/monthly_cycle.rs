//! Multi-month billing cycles driven through the public contract API.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use telco_billing_core::{
    Bill, BillingPeriod, Call, Contract, ContractTerms, PlanLabel, PrepaidContract, RateTable,
    TermContract,
};

// ============================================================================
// Helpers
// ============================================================================

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn period(year: i32, month: u32) -> BillingPeriod {
    BillingPeriod::new(year, month).unwrap()
}

/// Roll `contract` through every month from `from` to `to` inclusive, placing
/// `calls_per_month` calls of `seconds` each month. Returns the closed bills.
fn run_months(
    contract: &mut dyn Contract,
    from: BillingPeriod,
    to: BillingPeriod,
    calls_per_month: usize,
    seconds: u64,
) -> Vec<Bill> {
    let mut closed = Vec::new();
    let mut month = from;
    while month <= to {
        if let Some(previous) = contract.rollover(month, Bill::new(month)) {
            closed.push(previous);
        }
        for _ in 0..calls_per_month {
            contract.bill_call(&Call::new(seconds, month)).unwrap();
        }
        month = month.next();
    }
    closed
}

// ============================================================================
// Term contracts
// ============================================================================

#[test]
fn term_year_bills_deposit_once_and_keeps_it_on_early_exit() {
    let rates = Arc::new(RateTable::default());
    let mut contract = TermContract::new(date(2018, 1, 10), date(2018, 12, 10), rates).unwrap();

    // 3 calls of 40 minutes: 100 free, 20 billed at 0.10 each month.
    let closed = run_months(&mut contract, period(2018, 1), period(2018, 6), 3, 40 * 60);

    assert_eq!(closed.len(), 5);
    assert_eq!(closed[0].cost(), dec!(322));
    assert!(closed[1..].iter().all(|bill| bill.cost() == dec!(22)));

    let current = contract.bill().unwrap().cost();
    assert_eq!(current, dec!(22));
    // Cancelled inside the term: the deposit is forfeited.
    assert_eq!(contract.cancel().unwrap(), dec!(22));
}

#[test]
fn term_past_end_bills_every_minute() {
    let rates = Arc::new(RateTable::default());
    let mut contract = TermContract::new(date(2018, 1, 10), date(2018, 3, 10), rates).unwrap();

    let closed = run_months(&mut contract, period(2018, 1), period(2018, 5), 1, 30 * 60);
    // January to April closed; April is the first month past the March end.
    assert_eq!(closed.len(), 4);
    assert_eq!(closed[2].free_minutes(), 70);
    let past_end = &closed[3..];

    assert!(contract.is_commitment_fulfilled());
    assert!(past_end.iter().all(|bill| bill.free_minutes() == 0));
    assert_eq!(contract.bill().unwrap().cost(), dec!(23));
    assert_eq!(contract.cancel().unwrap(), dec!(-277));
}

// ============================================================================
// Prepaid contracts
// ============================================================================

#[test]
fn prepaid_tops_up_as_credit_runs_low() {
    let rates = Arc::new(RateTable::default());
    let mut contract = PrepaidContract::new(date(2019, 1, 1), dec!(40), rates);

    // 400 minutes a month at 0.025 = 10.00 of credit per month.
    run_months(&mut contract, period(2019, 1), period(2019, 3), 4, 100 * 60);
    // -40 -> -30 -> -20 -> -10 after March's calls; no top-up yet.
    assert_eq!(contract.balance(), dec!(-10));

    run_months(&mut contract, period(2019, 4), period(2019, 4), 4, 100 * 60);
    // April rollover sees -10: not above the threshold, so no top-up; calls bring it to 0.
    assert_eq!(contract.balance(), Decimal::ZERO);

    contract.rollover(period(2019, 5), Bill::new(period(2019, 5)));
    assert_eq!(contract.balance(), dec!(-25));
    assert_eq!(contract.bill().unwrap().fixed_cost(), dec!(-25));
    assert_eq!(contract.cancel().unwrap(), Decimal::ZERO);
}

// ============================================================================
// Mixed portfolios
// ============================================================================

#[test]
fn custom_rate_table_flows_into_every_plan() {
    let rates = Arc::new(RateTable {
        payg_monthly_fee: dec!(30),
        term_monthly_fee: dec!(15),
        term_deposit: dec!(100),
        term_free_minutes: 10,
        ..RateTable::default()
    });
    let jan = period(2019, 1);

    let mut payg = ContractTerms::PayPerUse { start: date(2019, 1, 1) }
        .into_contract(Arc::clone(&rates))
        .unwrap();
    let mut term = ContractTerms::Term {
        start: date(2019, 1, 1),
        end: date(2019, 12, 31),
    }
    .into_contract(Arc::clone(&rates))
    .unwrap();

    payg.rollover(jan, Bill::new(jan));
    term.rollover(jan, Bill::new(jan));
    term.bill_call(&Call::new(15 * 60, jan)).unwrap();

    assert_eq!(payg.bill().unwrap().cost(), dec!(30));
    assert_eq!(term.plan(), PlanLabel::Term);
    assert_eq!(term.bill().unwrap().billed_minutes(), 5);
    assert_eq!(term.bill().unwrap().cost(), dec!(115.5));
}
