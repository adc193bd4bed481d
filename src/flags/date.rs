//! Day-threshold flags raised from date answers
//!
//! A flag fires when `(reference_date - answer_date).days >= threshold`.
//! Thresholds are signed: `-7` fires for any date up to a week after the
//! reference date, which is how "lockout within the next week" is written.

use chrono::{Local, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

/// Accepted date format for date answers
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Flag label → signed day threshold
pub type DateThresholds = BTreeMap<String, i64>;

/// Parse a `YYYY-MM-DD` answer
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Signed number of whole days from `answer_date` to `reference_date`
pub fn days_elapsed(answer_date: NaiveDate, reference_date: NaiveDate) -> i64 {
    (reference_date - answer_date).num_days()
}

/// Labels whose threshold has been reached
///
/// `reference_date` defaults to today. An unparseable `answer_date` raises
/// nothing instead of failing.
pub fn evaluate_date_flags(
    thresholds: &DateThresholds,
    answer_date: &str,
    reference_date: Option<NaiveDate>,
) -> BTreeSet<String> {
    let Some(date) = parse_date(answer_date) else {
        tracing::debug!(answer_date, "unparseable date, no date flags raised");
        return BTreeSet::new();
    };

    let elapsed = days_elapsed(date, reference_date.unwrap_or_else(today));

    thresholds
        .iter()
        .filter(|(_, threshold)| elapsed >= **threshold)
        .map(|(label, _)| label.clone())
        .collect()
}
