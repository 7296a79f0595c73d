//! Adjacent-token phrase counting.

use std::collections::HashMap;

use crate::types::PhraseEntry;

/// Number of phrases kept in the artifact.
pub const TOP_PHRASES: usize = 20;

/// Global bigram frequency table, in first-seen order.
#[derive(Debug, Default)]
pub struct PhraseCounter {
    index: HashMap<String, usize>,
    entries: Vec<PhraseEntry>,
}

impl PhraseCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every adjacent pair in one message's tokens. Pairs never span
    /// two messages; fewer than two tokens add nothing.
    pub fn add_message(&mut self, tokens: &[String]) {
        for pair in tokens.windows(2) {
            let phrase = format!("{} {}", pair[0], pair[1]);
            if let Some(&slot) = self.index.get(&phrase) {
                self.entries[slot].count += 1;
            } else {
                self.index.insert(phrase.clone(), self.entries.len());
                self.entries.push(PhraseEntry { phrase, count: 1 });
            }
        }
    }

    #[must_use]
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// The `n` most frequent phrases, descending by count. Equal counts keep
    /// first-seen order: `entries` is in insertion order and `sort_by` is
    /// stable.
    #[must_use]
    pub fn top(mut self, n: usize) -> Vec<PhraseEntry> {
        self.entries.sort_by(|a, b| b.count.cmp(&a.count));
        self.entries.truncate(n);
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::tokenize;

    fn count(messages: &[&str]) -> PhraseCounter {
        let mut counter = PhraseCounter::new();
        for m in messages {
            counter.add_message(&tokenize(m));
        }
        counter
    }

    #[test]
    fn single_token_message_adds_nothing() {
        let counter = count(&["hello", ""]);
        assert_eq!(counter.distinct(), 0);
        assert!(counter.top(TOP_PHRASES).is_empty());
    }

    #[test]
    fn bigrams_do_not_cross_messages() {
        let counter = count(&["need housing", "help now"]);
        let phrases: Vec<_> = counter.top(10).into_iter().map(|p| p.phrase).collect();
        assert_eq!(phrases, vec!["need housing", "help now"]);
    }

    #[test]
    fn counts_accumulate_and_sort_descending() {
        let counter = count(&["need housing help", "need housing", "housing help"]);
        let top = counter.top(10);
        assert_eq!(
            top,
            vec![
                PhraseEntry {
                    phrase: "need housing".to_string(),
                    count: 2
                },
                PhraseEntry {
                    phrase: "housing help".to_string(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let counter = count(&["a b", "c d", "e f", "c d", "a b", "e f"]);
        let phrases: Vec<_> = counter.top(10).into_iter().map(|p| p.phrase).collect();
        assert_eq!(phrases, vec!["a b", "c d", "e f"]);
    }

    #[test]
    fn top_is_capped() {
        let text: Vec<String> = (0..30).map(|i| format!("w{i}")).collect();
        let mut counter = PhraseCounter::new();
        counter.add_message(&text);
        assert_eq!(counter.distinct(), 29);
        assert_eq!(counter.top(TOP_PHRASES).len(), TOP_PHRASES);
    }

    #[test]
    fn phrases_are_lowercase() {
        let top = count(&["Need HOUSING"]).top(1);
        assert_eq!(top[0].phrase, "need housing");
    }
}
