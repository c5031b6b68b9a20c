//! Core domain logic for work-experience time reports.
//!
//! This crate contains the fundamental types and logic for:
//! - Categorization: public servant, private employee or independent worker
//! - Clamping: bounding each record's dates to a valid range
//! - Merging: collapsing overlapping and touching date ranges into islands
//! - Reporting: whole-month totals per category and for the union of all
//!
//! Everything here is pure. Callers fetch records and supply the evaluation
//! date; no clock or storage is touched.

pub mod category;
mod duration;
pub mod interval;
pub mod record;
mod report;
pub mod types;

pub use category::{Category, classify};
pub use duration::{Tenure, months_between, total_months};
pub use interval::{ClampedInterval, DateRange, EPOCH_FLOOR, clamp, merge};
pub use record::{RawExperienceRecord, Sector};
pub use report::{CategoryReport, ExperienceReport, build_report, build_reports};
pub use types::{DocumentNumber, ValidationError};
