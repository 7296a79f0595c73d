//! Sunday-aligned weekly bucketing.

use std::collections::BTreeMap;

use chatpulse_core::Taxonomy;
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

use crate::tags::{empty_counts, tally};
use crate::types::WeeklyBucket;

/// The Sunday on or before the timestamp's UTC date.
#[must_use]
pub fn week_start(timestamp: DateTime<Utc>) -> NaiveDate {
    let date = timestamp.date_naive();
    let offset = u64::from(date.weekday().num_days_from_sunday());
    // Subtracting at most six days from a valid date only fails at the very
    // start of chrono's range.
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Bucket key: ISO date (`YYYY-MM-DD`) of the week start.
#[must_use]
pub fn week_key(timestamp: DateTime<Utc>) -> String {
    week_start(timestamp).format("%Y-%m-%d").to_string()
}

/// Week buckets in ascending key order.
#[derive(Debug, Default)]
pub struct WeeklyTrends {
    buckets: BTreeMap<String, WeeklyBucket>,
}

impl WeeklyTrends {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one message into its week and tag its body against `themes`.
    ///
    /// Every message counts toward `total`, including ones with an empty body.
    pub fn record(&mut self, timestamp: DateTime<Utc>, lowered_body: &str, themes: &Taxonomy) {
        let bucket = self
            .buckets
            .entry(week_key(timestamp))
            .or_insert_with(|| WeeklyBucket {
                total: 0,
                theme_counts: empty_counts(themes),
            });
        bucket.total += 1;
        tally(&mut bucket.theme_counts, themes, lowered_body);
    }

    #[must_use]
    pub fn into_buckets(self) -> BTreeMap<String, WeeklyBucket> {
        self.buckets
    }
}
