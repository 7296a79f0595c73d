//! Word tokenization shared by the sentiment and phrase stages.

use unicode_segmentation::UnicodeSegmentation;

/// Split text into lower-cased words on Unicode word boundaries.
///
/// Punctuation, whitespace and emoji are dropped; Cyrillic and Latin words
/// are handled alike.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(str::to_lowercase).collect()
}
