//! Keyword taxonomies for theme and need/pain tagging.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// A validated `category -> keywords` mapping.
///
/// Keywords are stored lower-cased so matchers only lower-case the message
/// body. Categories iterate in sorted order, which keeps every count map
/// derived from a taxonomy deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    categories: BTreeMap<String, Vec<String>>,
}

impl Taxonomy {
    /// Build a taxonomy, lower-casing every keyword.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for a blank category name, a
    /// category with no keywords, or a blank keyword.
    pub fn new(categories: BTreeMap<String, Vec<String>>) -> Result<Self, ConfigError> {
        let mut normalized = BTreeMap::new();
        for (category, keywords) in categories {
            if category.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "taxonomy category name must be non-empty".to_string(),
                ));
            }
            if keywords.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "taxonomy category '{category}' has no keywords"
                )));
            }
            if keywords.iter().any(|k| k.trim().is_empty()) {
                // A blank keyword is a substring of every body.
                return Err(ConfigError::Validation(format!(
                    "taxonomy category '{category}' contains a blank keyword"
                )));
            }
            let lowered = keywords.iter().map(|k| k.to_lowercase()).collect();
            normalized.insert(category, lowered);
        }
        Ok(Self {
            categories: normalized,
        })
    }

    /// Category names in iteration order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, keywords)| (name.as_str(), keywords.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct RawTaxonomyFile {
    #[serde(default)]
    themes: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    needs: BTreeMap<String, Vec<String>>,
}

/// The two independently configured taxonomies.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyFile {
    pub themes: Taxonomy,
    pub needs: Taxonomy,
}

/// Load and validate both taxonomies from one YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_taxonomy(path: &Path) -> Result<TaxonomyFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_taxonomy(&content, &path.display().to_string())
}

fn parse_taxonomy(content: &str, origin: &str) -> Result<TaxonomyFile, ConfigError> {
    let raw: RawTaxonomyFile =
        serde_yaml::from_str(content).map_err(|e| ConfigError::FileParse {
            path: origin.to_string(),
            source: e,
        })?;
    Ok(TaxonomyFile {
        themes: Taxonomy::new(raw.themes)?,
        needs: Taxonomy::new(raw.needs)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<TaxonomyFile, ConfigError> {
        parse_taxonomy(content, "inline")
    }

    #[test]
    fn keywords_are_lowercased() {
        let file = parse(
            r"
themes:
  housing: [Жиль, Rent]
needs:
  documents: [ВНЖ]
",
        )
        .unwrap();
        let housing: Vec<_> = file.themes.iter().collect();
        assert_eq!(housing[0].0, "housing");
        assert_eq!(housing[0].1, ["жиль".to_string(), "rent".to_string()]);
        assert_eq!(file.needs.iter().next().unwrap().1, ["внж".to_string()]);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let file = parse("themes:\n  work: [job]\n").unwrap();
        assert_eq!(file.themes.len(), 1);
        assert!(file.needs.is_empty());
    }

    #[test]
    fn categories_iterate_sorted() {
        let file = parse("themes:\n  work: [job]\n  housing: [rent]\n  banks: [iban]\n").unwrap();
        let names: Vec<_> = file.themes.categories().collect();
        assert_eq!(names, vec!["banks", "housing", "work"]);
    }

    #[test]
    fn blank_keyword_is_rejected() {
        let err = parse("themes:\n  work: [job, '  ']\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("blank keyword")));
    }

    #[test]
    fn empty_keyword_list_is_rejected() {
        let err = parse("needs:\n  work: []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("no keywords")));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let err = parse("themes: [not, a, map]").unwrap_err();
        assert!(matches!(err, ConfigError::FileParse { .. }));
    }
}
