use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Languages with a built-in sentiment lexicon and stemmer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Baseline for regions without an explicit mapping.
    #[default]
    English,
    Russian,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::English => write!(f, "english"),
            Language::Russian => write!(f, "russian"),
        }
    }
}

fn default_active() -> bool {
    true
}

fn default_report_language() -> String {
    "Russian".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Upper-case region code, e.g. `POL`. Addresses every file of the region.
    pub code: String,
    pub name: String,
    /// Lexicon language. `None` falls back to [`Language::default`].
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    /// Natural language the generated report should be written in.
    #[serde(default = "default_report_language")]
    pub report_language: String,
}

impl RegionConfig {
    #[must_use]
    pub fn lexicon_language(&self) -> Language {
        self.language.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionsFile {
    pub regions: Vec<RegionConfig>,
}

impl RegionsFile {
    /// Look up a region by code, case-insensitively.
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&RegionConfig> {
        self.regions
            .iter()
            .find(|r| r.code.eq_ignore_ascii_case(code))
    }

    pub fn active(&self) -> impl Iterator<Item = &RegionConfig> {
        self.regions.iter().filter(|r| r.active)
    }

    /// Region code to lexicon language. Regions without an explicit language
    /// are left out so the scorer applies its baseline.
    #[must_use]
    pub fn language_table(&self) -> HashMap<String, Language> {
        self.regions
            .iter()
            .filter_map(|r| r.language.map(|lang| (r.code.clone(), lang)))
            .collect()
    }
}

/// Load and validate the region catalogue from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_regions(path: &Path) -> Result<RegionsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let regions_file: RegionsFile =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::FileParse {
            path: path.display().to_string(),
            source: e,
        })?;

    validate_regions(&regions_file)?;

    Ok(regions_file)
}

fn validate_regions(regions_file: &RegionsFile) -> Result<(), ConfigError> {
    let mut seen_codes = HashSet::new();

    for region in &regions_file.regions {
        if region.code.is_empty() || !region.code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::Validation(format!(
                "region code '{}' must be non-empty upper-case ASCII letters",
                region.code
            )));
        }

        if region.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "region '{}' must have a non-empty name",
                region.code
            )));
        }

        if !seen_codes.insert(region.code.to_ascii_uppercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate region code: '{}'",
                region.code
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "regions_test.rs"]
mod tests;
