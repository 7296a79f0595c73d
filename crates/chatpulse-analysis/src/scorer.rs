//! Lexicon-based sentiment scoring.
//!
//! A message's score is the mean polarity weight over all of its tokens.
//! Tokens and lexicon entries are both reduced by the Snowball stemmer of
//! the region's language. No lexicon weight exceeds
//! [`MAX_WEIGHT`](crate::lexicon::MAX_WEIGHT), so appending a maximally
//! positive token can never lower the mean.

use std::collections::HashMap;

use chatpulse_core::Language;
use rust_stemmers::{Algorithm, Stemmer};

use crate::lexicon;
use crate::tokenize::tokenize;

/// Scores above this are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.2;
/// Scores below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

struct Lexicon {
    stemmer: Stemmer,
    weights: HashMap<String, i8>,
}

impl Lexicon {
    fn new(language: Language) -> Self {
        let (algorithm, entries) = match language {
            Language::English => (Algorithm::English, lexicon::ENGLISH),
            Language::Russian => (Algorithm::Russian, lexicon::RUSSIAN),
        };
        let stemmer = Stemmer::create(algorithm);
        let mut weights = HashMap::with_capacity(entries.len());
        for &(word, weight) in entries {
            // First entry wins when two surface forms share a stem.
            weights
                .entry(stemmer.stem(word).into_owned())
                .or_insert(weight.clamp(-lexicon::MAX_WEIGHT, lexicon::MAX_WEIGHT));
        }
        Self { stemmer, weights }
    }

    fn weight(&self, token: &str) -> i8 {
        self.weights
            .get(self.stemmer.stem(token).as_ref())
            .copied()
            .unwrap_or(0)
    }
}

/// Sentiment scorer with an explicit `region -> language` table.
///
/// Regions missing from the table use [`Language::default`].
pub struct LexicalScorer {
    languages: HashMap<String, Language>,
    english: Lexicon,
    russian: Lexicon,
}

impl std::fmt::Debug for LexicalScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexicalScorer")
            .field("languages", &self.languages)
            .field("english_entries", &self.english.weights.len())
            .field("russian_entries", &self.russian.weights.len())
            .finish()
    }
}

impl Default for LexicalScorer {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl LexicalScorer {
    #[must_use]
    pub fn new(languages: HashMap<String, Language>) -> Self {
        Self {
            languages,
            english: Lexicon::new(Language::English),
            russian: Lexicon::new(Language::Russian),
        }
    }

    #[must_use]
    pub fn language_for(&self, region: &str) -> Language {
        self.languages.get(region).copied().unwrap_or_default()
    }

    fn lexicon(&self, language: Language) -> &Lexicon {
        match language {
            Language::English => &self.english,
            Language::Russian => &self.russian,
        }
    }

    /// Mean polarity of already tokenized text. Zero tokens score `0.0`.
    #[must_use]
    pub fn score_tokens(&self, tokens: &[String], region: &str) -> f64 {
        if tokens.is_empty() {
            return 0.0;
        }
        let lexicon = self.lexicon(self.language_for(region));
        let sum: i32 = tokens.iter().map(|t| i32::from(lexicon.weight(t))).sum();
        #[allow(clippy::cast_precision_loss)]
        let len = tokens.len() as f64;
        f64::from(sum) / len
    }

    #[must_use]
    pub fn score(&self, body: &str, region: &str) -> f64 {
        self.score_tokens(&tokenize(body), region)
    }

    #[must_use]
    pub fn classify(&self, body: &str, region: &str) -> Sentiment {
        Sentiment::from_score(self.score(body, region))
    }
}
