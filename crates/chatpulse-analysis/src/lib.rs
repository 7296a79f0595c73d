//! Message analysis pipeline for regional chat exports.
//!
//! Parses a region's raw message file, scores every message for sentiment,
//! tags it against the theme and need/pain taxonomies, counts adjacent-word
//! phrases, buckets messages into Sunday-aligned weeks, and persists the
//! aggregate as one JSON artifact per region.

pub mod error;
pub mod parser;
pub mod phrases;
pub mod pipeline;
pub mod scorer;
pub mod store;
pub mod tags;
pub mod tokenize;
pub mod types;
pub mod weekly;

mod lexicon;

pub use error::AnalysisError;
pub use parser::{parse_records, ParseIssue, ParseReport, ParsedBatch};
pub use pipeline::{aggregate, analyze_region, AnalysisOutcome};
pub use scorer::{LexicalScorer, Sentiment};
pub use store::{ArtifactStore, FsStore, RegionSource};
pub use types::{
    AnalysisArtifact, CategoryCounts, MessageRecord, PhraseEntry, SentimentTally, WeeklyBucket,
};
