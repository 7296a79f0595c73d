use thiserror::Error;

/// Errors surfaced by a region's analysis run. Each carries the region code
/// so callers can log and decide on a retry.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("source for region {region} not found at {path}")]
    SourceNotFound { region: String, path: String },

    #[error("no analysis data for region {region}: {reason}")]
    NoAnalysisData { region: String, reason: String },

    #[error("{stage} I/O error for region {region}: {source}")]
    Io {
        region: String,
        stage: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to persist artifact for region {region} at {path}: {reason}")]
    Persistence {
        region: String,
        path: String,
        reason: String,
    },

    #[error("artifact for region {region} could not be decoded: {source}")]
    Decode {
        region: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AnalysisError {
    /// Region code the error belongs to.
    #[must_use]
    pub fn region(&self) -> &str {
        match self {
            AnalysisError::SourceNotFound { region, .. }
            | AnalysisError::NoAnalysisData { region, .. }
            | AnalysisError::Io { region, .. }
            | AnalysisError::Persistence { region, .. }
            | AnalysisError::Decode { region, .. } => region,
        }
    }
}
