//! Aggregation of all analysis stages into one artifact.

use chatpulse_core::TaxonomyFile;

use crate::error::AnalysisError;
use crate::parser::{parse_records, ParseIssue, ParseReport};
use crate::phrases::{PhraseCounter, TOP_PHRASES};
use crate::scorer::{LexicalScorer, Sentiment};
use crate::store::{ArtifactStore, RegionSource};
use crate::tags::{empty_counts, tally};
use crate::tokenize::tokenize;
use crate::types::{AnalysisArtifact, MessageRecord, SentimentTally};
use crate::weekly::WeeklyTrends;

/// Result of one region's run: the persisted artifact plus parse
/// diagnostics that are deliberately kept out of it.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub artifact: AnalysisArtifact,
    pub parse: ParseReport,
}

/// Run every stage over `records` in a single pass.
///
/// Each stage writes only its own accumulator, so the result does not depend
/// on stage order. Records without a body contribute to `message_count` and
/// their week's `total` only.
#[must_use]
pub fn aggregate(
    records: &[MessageRecord],
    region: &str,
    scorer: &LexicalScorer,
    taxonomy: &TaxonomyFile,
) -> AnalysisArtifact {
    let mut sentiments = SentimentTally::default();
    let mut theme_count = empty_counts(&taxonomy.themes);
    let mut needs_count = empty_counts(&taxonomy.needs);
    let mut phrases = PhraseCounter::new();
    let mut weekly = WeeklyTrends::new();

    for record in records {
        let lowered = record.body.to_lowercase();
        weekly.record(record.timestamp, &lowered, &taxonomy.themes);

        if !record.has_body() {
            continue;
        }

        let tokens = tokenize(&record.body);
        sentiments.record(Sentiment::from_score(
            scorer.score_tokens(&tokens, region),
        ));
        tally(&mut theme_count, &taxonomy.themes, &lowered);
        tally(&mut needs_count, &taxonomy.needs, &lowered);
        phrases.add_message(&tokens);
    }

    AnalysisArtifact {
        message_count: records.len() as u64,
        sentiments,
        theme_count,
        needs_count,
        top_phrases: phrases.top(TOP_PHRASES),
        weekly_trends: weekly.into_buckets(),
    }
}

/// Analyse one region end to end: read its export, parse, aggregate, persist.
///
/// # Errors
///
/// - [`AnalysisError::NoAnalysisData`] if the region has no export.
/// - [`AnalysisError::Io`] if the export exists but cannot be read.
/// - [`AnalysisError::Persistence`] if the artifact cannot be written. Not
///   retried here.
pub fn analyze_region<S>(
    region: &str,
    store: &S,
    scorer: &LexicalScorer,
    taxonomy: &TaxonomyFile,
) -> Result<AnalysisOutcome, AnalysisError>
where
    S: RegionSource + ArtifactStore,
{
    tracing::info!(region, "starting analysis");

    let text = store.source_text(region).map_err(|e| match e {
        AnalysisError::SourceNotFound { region, path } => AnalysisError::NoAnalysisData {
            region,
            reason: format!("no message export at {path}"),
        },
        other => other,
    })?;

    let batch = parse_records(&text, region);
    log_parse_issues(region, &batch.report);

    let artifact = aggregate(&batch.records, region, scorer, taxonomy);
    store.save_artifact(region, &artifact)?;

    tracing::info!(
        region,
        messages = artifact.message_count,
        positive = artifact.sentiments.positive,
        negative = artifact.sentiments.negative,
        neutral = artifact.sentiments.neutral,
        weeks = artifact.weekly_trends.len(),
        timestamp_fallbacks = batch.report.timestamp_fallbacks,
        malformed_rows = batch.report.malformed_rows,
        "analysis complete"
    );

    Ok(AnalysisOutcome {
        artifact,
        parse: batch.report,
    })
}

fn log_parse_issues(region: &str, report: &ParseReport) {
    for issue in &report.issues {
        match issue {
            ParseIssue::MalformedRecord { line, fields } => {
                tracing::warn!(region, line, fields, "malformed row salvaged with empty fields");
            }
            ParseIssue::TimestampFallback { line, raw } => {
                tracing::warn!(region, line, raw = %raw, "unparseable date; using current time");
            }
        }
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
