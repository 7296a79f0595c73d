use chatpulse_analysis::AnalysisError;
use chatpulse_core::ConfigError;
use thiserror::Error;

/// Errors returned while generating a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Network or TLS failure, or a non-2xx status from the provider.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered without any usable text.
    #[error("provider returned an empty completion")]
    EmptyCompletion,

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid provider base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to {action} report for {region} at {path}: {source}")]
    Io {
        region: String,
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
}
