//! Experience report assembly.
//!
//! # Algorithm Summary
//!
//! 1. Clamp every record against the evaluation date, dropping unusable ones
//! 2. For each assignable category, merge its ranges and sum whole months
//! 3. Merge the ranges of all categories together for the total row, so time
//!    spent in two categories at once is counted once
//! 4. Emit one row per category in [`Category::ALL`] order

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;

use crate::category::Category;
use crate::duration::{Tenure, total_months};
use crate::interval::{ClampedInterval, clamp, merge};
use crate::record::RawExperienceRecord;

/// Accumulated experience for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub category: Category,
    pub years: i64,
    pub months: i64,
    pub total_months: i64,
    /// "N years and M months".
    pub description: String,
}

impl CategoryReport {
    #[must_use]
    pub fn new(category: Category, total_months: i64) -> Self {
        let tenure = Tenure::from_months(total_months);
        Self {
            category,
            years: tenure.years,
            months: tenure.months,
            total_months: tenure.total_months(),
            description: tenure.to_string(),
        }
    }
}

/// The four report rows, in [`Category::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExperienceReport {
    rows: [CategoryReport; 4],
}

impl ExperienceReport {
    /// Rows in report order.
    #[must_use]
    pub fn rows(&self) -> &[CategoryReport] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, category: Category) -> &CategoryReport {
        &self.rows[category.index()]
    }

    /// Row for the union of all categories.
    #[must_use]
    pub fn total(&self) -> &CategoryReport {
        self.row(Category::Total)
    }
}

/// Builds the experience report for one person's records as of `today`.
///
/// Records without a start date, or whose clamped range is inverted, are
/// left out. A person with no usable records gets four zero rows.
#[must_use]
pub fn build_report(records: &[RawExperienceRecord], today: NaiveDate) -> ExperienceReport {
    let mut clamped: Vec<ClampedInterval> = Vec::with_capacity(records.len());
    for record in records {
        match clamp(record, today) {
            Some(interval) => clamped.push(interval),
            None => tracing::trace!(?record, "excluding record without a usable date range"),
        }
    }

    let months_for = |category: Category| {
        let ranges = clamped
            .iter()
            .filter(|interval| interval.category == category)
            .map(|interval| interval.range);
        total_months(&merge(ranges))
    };
    let overall = total_months(&merge(clamped.iter().map(|interval| interval.range)));

    let rows = Category::ALL.map(|category| match category {
        Category::Total => CategoryReport::new(category, overall),
        _ => CategoryReport::new(category, months_for(category)),
    });

    tracing::debug!(
        records = records.len(),
        usable = clamped.len(),
        total_months = overall,
        "built experience report"
    );

    ExperienceReport { rows }
}

/// Builds one report per person in parallel, preserving input order.
#[must_use]
pub fn build_reports<R>(people: &[R], today: NaiveDate) -> Vec<ExperienceReport>
where
    R: AsRef<[RawExperienceRecord]> + Sync,
{
    people
        .par_iter()
        .map(|records| build_report(records.as_ref(), today))
        .collect()
}
