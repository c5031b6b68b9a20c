//! Date ranges: clamping records into bounded ranges and merging islands.
//!
//! # Merge Rule
//!
//! Ranges are sorted by `(start, end)` and scanned once. A range whose start
//! is on or before the end of the current island joins it, so overlapping
//! ranges and ranges that touch on the same day both collapse. The output is
//! sorted and strictly separated: for consecutive islands `a`, `b`,
//! `a.end < b.start`.

use chrono::NaiveDate;
use serde::Serialize;

use crate::category::{Category, classify};
use crate::duration::months_between;
use crate::record::RawExperienceRecord;

/// Earliest date any range may start on. Older stored dates are raised to it.
pub const EPOCH_FLOOR: NaiveDate = match NaiveDate::from_ymd_opt(1900, 1, 1) {
    Some(date) => date,
    None => panic!("1900-01-01 is a valid date"),
};

/// A closed range of calendar dates with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Returns `None` when `end` is before `start`.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Whole months elapsed from start to end.
    #[must_use]
    pub fn months(&self) -> i64 {
        months_between(self.start, self.end)
    }
}

/// A record's bounded date range tagged with its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedInterval {
    pub category: Category,
    pub range: DateRange,
}

/// Bounds a record's dates relative to `today`.
///
/// - start is raised to [`EPOCH_FLOOR`]
/// - current engagements and open-ended records end `today`
/// - end dates after `today` are lowered to `today`
///
/// Returns `None` if the record has no start date or if the bounded end
/// falls before the bounded start (e.g. a start date in the future).
#[must_use]
pub fn clamp(record: &RawExperienceRecord, today: NaiveDate) -> Option<ClampedInterval> {
    let start = record.start_date?.max(EPOCH_FLOOR);
    let end_candidate = if record.is_current {
        today
    } else {
        record.end_date.unwrap_or(today)
    };
    let range = DateRange::new(start, end_candidate.min(today))?;

    Some(ClampedInterval {
        category: classify(record),
        range,
    })
}

/// Collapses ranges into the minimal sorted set of disjoint, non-touching
/// islands covering the same days.
#[must_use]
pub fn merge<I>(ranges: I) -> Vec<DateRange>
where
    I: IntoIterator<Item = DateRange>,
{
    let mut sorted: Vec<DateRange> = ranges.into_iter().collect();
    sorted.sort_unstable();

    let mut merged: Vec<DateRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        if let Some(last) = merged.last_mut() {
            if range.start <= last.end {
                last.end = last.end.max(range.end);
            } else {
                merged.push(range);
            }
        } else {
            merged.push(range);
        }
    }

    merged
}
