//! Keyword tagging against a taxonomy.
//!
//! A category matches a message when any of its keywords occurs in the
//! lower-cased body as a plain substring, so stems such as `жиль` match
//! every inflection. A message adds at most one hit per category.

use chatpulse_core::Taxonomy;

use crate::types::CategoryCounts;

/// A zeroed count map with exactly the taxonomy's categories as keys.
#[must_use]
pub fn empty_counts(taxonomy: &Taxonomy) -> CategoryCounts {
    taxonomy.categories().map(|c| (c.to_string(), 0)).collect()
}

/// Categories with at least one keyword contained in `lowered_body`.
pub fn matching_categories<'a>(
    taxonomy: &'a Taxonomy,
    lowered_body: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    taxonomy
        .iter()
        .filter(move |(_, keywords)| keywords.iter().any(|k| lowered_body.contains(k.as_str())))
        .map(|(category, _)| category)
}

/// Add one hit to every category matching `lowered_body`.
///
/// `counts` is expected to come from [`empty_counts`] for the same taxonomy.
pub fn tally(counts: &mut CategoryCounts, taxonomy: &Taxonomy, lowered_body: &str) {
    for category in matching_categories(taxonomy, lowered_body) {
        *counts.entry(category.to_string()).or_insert(0) += 1;
    }
}
