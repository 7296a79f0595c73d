//! Time-to-live file cache under `cache/{kind}_{REGION}.json`.
//!
//! Freshness is judged by the file's modification time. The cache never
//! fails its caller: read problems are misses and write problems are logged.

use std::io::ErrorKind;
use std::time::Duration;

use chatpulse_core::DataPaths;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    content: String,
    /// Unix milliseconds at write time.
    timestamp: i64,
}

#[derive(Debug, Clone)]
pub struct TtlCache {
    paths: DataPaths,
    ttl: Duration,
}

impl TtlCache {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

    #[must_use]
    pub fn new(paths: DataPaths, ttl: Duration) -> Self {
        Self { paths, ttl }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached content for `(kind, region)` if younger than the TTL.
    #[must_use]
    pub fn get(&self, kind: &str, region: &str) -> Option<String> {
        let path = self.paths.cache_file(kind, region);
        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(kind, region, path = %path.display(), error = %e, "cache stat failed");
                return None;
            }
        };

        // An mtime in the future counts as age zero.
        let age = metadata
            .modified()
            .ok()
            .map_or(Duration::MAX, |mtime| mtime.elapsed().unwrap_or_default());
        if age >= self.ttl {
            tracing::debug!(kind, region, age_secs = age.as_secs(), "cache entry expired");
            return None;
        }

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(kind, region, path = %path.display(), error = %e, "cache read failed");
                return None;
            }
        };
        match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) => {
                tracing::debug!(kind, region, "cache hit");
                Some(entry.content)
            }
            Err(e) => {
                tracing::warn!(kind, region, path = %path.display(), error = %e, "corrupt cache entry ignored");
                None
            }
        }
    }

    /// Stores `content` for `(kind, region)`. Failures are logged, not returned.
    pub fn put(&self, kind: &str, region: &str, content: &str) {
        let path = self.paths.cache_file(kind, region);
        let entry = CacheEntry {
            content: content.to_owned(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        };

        let result = serde_json::to_string(&entry)
            .map_err(std::io::Error::other)
            .and_then(|json| {
                std::fs::create_dir_all(self.paths.cache_dir())?;
                std::fs::write(&path, json)
            });
        if let Err(e) = result {
            tracing::warn!(kind, region, path = %path.display(), error = %e, "cache write failed");
        }
    }
}
