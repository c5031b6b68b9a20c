//! Whole-month durations.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::interval::DateRange;

/// Counts complete months from `start` to `end`.
///
/// Month boundaries crossed, minus one when the end day-of-month falls
/// before the start day-of-month. The trailing partial month is dropped.
/// Never negative.
#[must_use]
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut months = i64::from(end.year() - start.year()) * 12 + i64::from(end.month())
        - i64::from(start.month());
    if end.day() < start.day() {
        months -= 1;
    }
    months.max(0)
}

/// Sums whole months over already-merged ranges.
#[must_use]
pub fn total_months(ranges: &[DateRange]) -> i64 {
    ranges.iter().map(DateRange::months).sum()
}

/// A month count split into years and remaining months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Tenure {
    pub years: i64,
    pub months: i64,
}

impl Tenure {
    /// Negative counts are treated as zero.
    #[must_use]
    pub const fn from_months(total_months: i64) -> Self {
        let total = if total_months < 0 { 0 } else { total_months };
        Self {
            years: total / 12,
            months: total % 12,
        }
    }

    #[must_use]
    pub const fn total_months(&self) -> i64 {
        self.years * 12 + self.months
    }
}

impl fmt::Display for Tenure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} years and {} months", self.years, self.months)
    }
}
