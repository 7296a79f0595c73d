//! Report generation: cache lookup, prompt, provider call, persistence.

use std::io::ErrorKind;
use std::time::Duration;

use chatpulse_analysis::{parse_records, ArtifactStore, FsStore, RegionSource};
use chatpulse_core::{AppConfig, DataPaths, RegionConfig};

use crate::cache::TtlCache;
use crate::client::LlmClient;
use crate::error::ReportError;
use crate::prompt::{build_prompt, MAX_SAMPLE_MESSAGES};
use crate::retry::retry_with_backoff;

/// Cache kind under which finished reports are stored.
pub const REPORT_CACHE_KIND: &str = "report";

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_BASE_MS: u64 = 2_000;

#[derive(Debug)]
pub struct ReportGenerator {
    client: LlmClient,
    store: FsStore,
    cache: TtlCache,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl ReportGenerator {
    #[must_use]
    pub fn new(client: LlmClient, store: FsStore, cache: TtlCache) -> Self {
        Self {
            client,
            store,
            cache,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
        }
    }

    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Wires client, store and cache from application config.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Config`] when `LLM_API_KEY` is not set, or the
    /// client construction errors of [`LlmClient::from_settings`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ReportError> {
        let client = LlmClient::from_settings(&config.llm)?;
        let paths = DataPaths::new(&config.data_dir);
        let cache = TtlCache::new(paths.clone(), Duration::from_secs(config.cache_ttl_secs));
        Ok(Self::new(client, FsStore::new(paths), cache)
            .with_retry(config.llm.max_retries, config.llm.retry_backoff_base_ms))
    }

    /// Returns the region's report, generating a new one when the cache has
    /// nothing fresh or `force_new` is set.
    ///
    /// # Errors
    ///
    /// - [`ReportError::Analysis`] when the region has no artifact or no
    ///   message export.
    /// - Provider errors from [`LlmClient::complete`] once retries are spent.
    /// - [`ReportError::Io`] if the report file cannot be written.
    pub async fn generate(
        &self,
        region: &RegionConfig,
        force_new: bool,
    ) -> Result<String, ReportError> {
        let code = region.code.as_str();
        if !force_new {
            if let Some(cached) = self.cache.get(REPORT_CACHE_KIND, code) {
                tracing::info!(region = %code, "using cached report");
                return Ok(cached);
            }
        }

        let artifact = self.store.load_artifact(code)?;
        let source = self.store.source_text(code)?;
        let batch = parse_records(&source, code);
        let samples: Vec<&str> = batch
            .records
            .iter()
            .filter(|r| !r.body.trim().is_empty())
            .take(MAX_SAMPLE_MESSAGES)
            .map(|r| r.body.as_str())
            .collect();

        let prompt = build_prompt(region, &artifact, &samples);
        tracing::info!(
            region = %code,
            messages = artifact.message_count,
            samples = samples.len(),
            endpoint = %self.client.endpoint(),
            "requesting report"
        );

        let report = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.client.complete(&prompt)
        })
        .await?;

        self.save_report(code, &report)?;
        self.cache.put(REPORT_CACHE_KIND, code, &report);
        tracing::info!(region = %code, chars = report.chars().count(), "report generated and saved");
        Ok(report)
    }

    /// The last report written for `region`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] when the file exists but cannot be read.
    pub fn latest_report(&self, region: &str) -> Result<Option<String>, ReportError> {
        let path = self.store.paths().report_file(region);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ReportError::Io {
                region: region.to_string(),
                action: "read",
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    fn save_report(&self, region: &str, report: &str) -> Result<(), ReportError> {
        let path = self.store.paths().report_file(region);
        let io_error = |source| ReportError::Io {
            region: region.to_string(),
            action: "write",
            path: path.display().to_string(),
            source,
        };
        std::fs::create_dir_all(self.store.paths().reports_dir()).map_err(io_error)?;
        std::fs::write(&path, report).map_err(io_error)
    }
}
