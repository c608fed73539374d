//! Billing periods (calendar months).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{BillingError, Result};

/// One calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBillingPeriod")]
pub struct BillingPeriod {
    year: i32,
    month: u32,
}

/// Unchecked wire form of [`BillingPeriod`].
#[derive(Deserialize)]
struct RawBillingPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawBillingPeriod> for BillingPeriod {
    type Error = BillingError;

    fn try_from(raw: RawBillingPeriod) -> Result<Self> {
        Self::new(raw.year, raw.month)
    }
}

impl BillingPeriod {
    /// Create a period for `month` (1..=12) of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::InvalidMonth`] if `month` is out of range.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(BillingError::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }

    /// The period containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1..=12.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// The following month.
    #[must_use]
    pub const fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
