use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scorer::Sentiment;

/// One ingested chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRecord {
    /// Unique within one region's batch only.
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Free text; may be empty.
    pub body: String,
    /// Originating chat group.
    pub group: String,
    pub region: String,
}

impl MessageRecord {
    /// Whether the body is non-empty. Empty bodies are skipped by the
    /// sentiment, tagging and phrase stages but still land in a week bucket.
    /// A whitespace-only body counts as present and scores neutral.
    #[must_use]
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}

/// Sentiment split over the messages that have a body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentTally {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl SentimentTally {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.positive + self.negative + self.neutral
    }
}

/// Category name to hit count. Keys are exactly the configured categories.
pub type CategoryCounts = BTreeMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseEntry {
    /// Two adjacent lower-cased tokens joined by a space.
    pub phrase: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyBucket {
    pub total: u64,
    #[serde(alias = "themes")]
    pub theme_counts: CategoryCounts,
}

/// The persisted aggregate for one region.
///
/// Contains no run-time dependent fields, so analysing the same input twice
/// serializes to identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisArtifact {
    pub message_count: u64,
    pub sentiments: SentimentTally,
    pub theme_count: CategoryCounts,
    pub needs_count: CategoryCounts,
    pub top_phrases: Vec<PhraseEntry>,
    /// Keyed by ISO week-start date; ascending key order is chronological.
    pub weekly_trends: BTreeMap<String, WeeklyBucket>,
}

impl AnalysisArtifact {
    /// Pretty-printed JSON as written to disk.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; with string-keyed maps this does not
    /// happen in practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_serializes_with_camel_case_keys() {
        let mut artifact = AnalysisArtifact {
            message_count: 2,
            ..AnalysisArtifact::default()
        };
        artifact.theme_count.insert("housing".to_string(), 1);
        artifact.weekly_trends.insert(
            "2024-06-09".to_string(),
            WeeklyBucket {
                total: 2,
                theme_counts: artifact.theme_count.clone(),
            },
        );

        let value: serde_json::Value = serde_json::from_str(&artifact.to_json().unwrap()).unwrap();
        assert_eq!(value["messageCount"], 2);
        assert_eq!(value["sentiments"]["neutral"], 0);
        assert_eq!(value["themeCount"]["housing"], 1);
        assert!(value["needsCount"].as_object().unwrap().is_empty());
        assert!(value["topPhrases"].as_array().unwrap().is_empty());
        assert_eq!(value["weeklyTrends"]["2024-06-09"]["total"], 2);
        assert_eq!(value["weeklyTrends"]["2024-06-09"]["themeCounts"]["housing"], 1);
    }

    #[test]
    fn weekly_bucket_reads_legacy_themes_key() {
        let bucket: WeeklyBucket =
            serde_json::from_str(r#"{"total": 3, "themes": {"work": 2}}"#).unwrap();
        assert_eq!(bucket.total, 3);
        assert_eq!(bucket.theme_counts.get("work"), Some(&2));
    }

    #[test]
    fn tally_total_sums_all_fields() {
        let mut tally = SentimentTally::default();
        tally.record(Sentiment::Positive);
        tally.record(Sentiment::Negative);
        tally.record(Sentiment::Neutral);
        tally.record(Sentiment::Neutral);
        assert_eq!(tally.total(), 4);
        assert_eq!(tally.neutral, 2);
    }

    #[test]
    fn only_a_truly_empty_body_is_skipped() {
        let mut record = MessageRecord {
            id: "1".to_string(),
            timestamp: Utc::now(),
            body: "  \t".to_string(),
            group: "g".to_string(),
            region: "POL".to_string(),
        };
        assert!(record.has_body());
        record.body.clear();
        assert!(!record.has_body());
    }
}
