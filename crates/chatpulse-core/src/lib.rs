//! Configuration for the chatpulse workspace: environment-driven settings,
//! the region catalogue and the theme / needs taxonomies.

pub mod app_config;
pub mod config;
pub mod paths;
pub mod regions;
pub mod taxonomy;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, LlmSettings};
pub use config::{load_app_config, load_app_config_from_env};
pub use paths::DataPaths;
pub use regions::{load_regions, Language, RegionConfig, RegionsFile};
pub use taxonomy::{load_taxonomy, Taxonomy, TaxonomyFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read config file {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    FileParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config validation failed: {0}")]
    Validation(String),
}
