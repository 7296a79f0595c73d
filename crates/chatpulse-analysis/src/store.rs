//! Region source and artifact persistence.
//!
//! Both traits are keyed by region code only; concurrent runs for different
//! regions touch disjoint files and need no locking.

use std::path::Path;

use chatpulse_core::DataPaths;

use crate::error::AnalysisError;
use crate::types::AnalysisArtifact;

/// Supplies the raw delimited export for a region.
pub trait RegionSource {
    /// # Errors
    ///
    /// Returns [`AnalysisError::SourceNotFound`] when the region has no export.
    fn source_text(&self, region: &str) -> Result<String, AnalysisError>;
}

/// Durable home of the analysis artifact, one per region.
pub trait ArtifactStore {
    /// Write the artifact, replacing any previous one for the region.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Persistence`] if the write fails.
    fn save_artifact(&self, region: &str, artifact: &AnalysisArtifact)
        -> Result<(), AnalysisError>;

    /// # Errors
    ///
    /// Returns [`AnalysisError::NoAnalysisData`] if no artifact exists yet.
    fn load_artifact(&self, region: &str) -> Result<AnalysisArtifact, AnalysisError>;
}

/// Filesystem-backed source and store over the data directory layout.
#[derive(Debug, Clone)]
pub struct FsStore {
    paths: DataPaths,
}

impl FsStore {
    #[must_use]
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }

    #[must_use]
    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    #[must_use]
    pub fn has_artifact(&self, region: &str) -> bool {
        self.paths.analysis_file(region).is_file()
    }
}

impl RegionSource for FsStore {
    fn source_text(&self, region: &str) -> Result<String, AnalysisError> {
        let path = self.paths.messages_file(region);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AnalysisError::SourceNotFound {
                    region: region.to_string(),
                    path: path.display().to_string(),
                })
            }
            Err(e) => Err(AnalysisError::Io {
                region: region.to_string(),
                stage: "ingest",
                source: e,
            }),
        }
    }
}

impl ArtifactStore for FsStore {
    fn save_artifact(
        &self,
        region: &str,
        artifact: &AnalysisArtifact,
    ) -> Result<(), AnalysisError> {
        let path = self.paths.analysis_file(region);
        let persistence = |reason: String| AnalysisError::Persistence {
            region: region.to_string(),
            path: path.display().to_string(),
            reason,
        };

        let json = artifact.to_json().map_err(|e| persistence(e.to_string()))?;
        write_atomic(&path, json.as_bytes()).map_err(|e| persistence(e.to_string()))?;

        tracing::debug!(region, path = %path.display(), "analysis artifact written");
        Ok(())
    }

    fn load_artifact(&self, region: &str) -> Result<AnalysisArtifact, AnalysisError> {
        let path = self.paths.analysis_file(region);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AnalysisError::NoAnalysisData {
                    region: region.to_string(),
                    reason: format!("no artifact at {}", path.display()),
                });
            }
            Err(e) => {
                return Err(AnalysisError::Io {
                    region: region.to_string(),
                    stage: "load-artifact",
                    source: e,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|e| AnalysisError::Decode {
            region: region.to_string(),
            source: e,
        })
    }
}

/// Write through a sibling temp file and rename, so readers never see a
/// half-written artifact.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PhraseEntry;

    fn store() -> (tempfile::TempDir, FsStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsStore::new(DataPaths::new(tmp.path()));
        (tmp, store)
    }

    #[test]
    fn missing_source_is_source_not_found() {
        let (_tmp, store) = store();
        let err = store.source_text("POL").unwrap_err();
        assert!(matches!(err, AnalysisError::SourceNotFound { ref region, .. } if region == "POL"));
    }

    #[test]
    fn reads_existing_source() {
        let (_tmp, store) = store();
        let path = store.paths().messages_file("POL");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "id,date,text,group,geo\n").unwrap();
        assert_eq!(store.source_text("POL").unwrap(), "id,date,text,group,geo\n");
    }

    #[test]
    fn missing_artifact_is_no_analysis_data() {
        let (_tmp, store) = store();
        assert!(!store.has_artifact("DEU"));
        let err = store.load_artifact("DEU").unwrap_err();
        assert!(matches!(err, AnalysisError::NoAnalysisData { .. }));
    }

    #[test]
    fn save_then_load_overwrites_previous() {
        let (_tmp, store) = store();
        let mut artifact = AnalysisArtifact {
            message_count: 1,
            ..AnalysisArtifact::default()
        };
        store.save_artifact("DEU", &artifact).unwrap();

        artifact.message_count = 5;
        artifact.top_phrases.push(PhraseEntry {
            phrase: "need help".to_string(),
            count: 2,
        });
        store.save_artifact("DEU", &artifact).unwrap();

        assert!(store.has_artifact("DEU"));
        assert_eq!(store.load_artifact("DEU").unwrap(), artifact);
        assert!(!store.paths().analyzed_dir().join("analysis_DEU.json.tmp").exists());
    }

    #[test]
    fn corrupt_artifact_is_decode_error() {
        let (_tmp, store) = store();
        let path = store.paths().analysis_file("DEU");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            store.load_artifact("DEU").unwrap_err(),
            AnalysisError::Decode { .. }
        ));
    }

    #[test]
    fn unwritable_location_is_persistence_error() {
        let tmp = tempfile::tempdir().unwrap();
        // A regular file where the data directory should be.
        let blocker = tmp.path().join("data");
        std::fs::write(&blocker, "x").unwrap();
        let store = FsStore::new(DataPaths::new(&blocker));
        let err = store
            .save_artifact("DEU", &AnalysisArtifact::default())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Persistence { ref region, .. } if region == "DEU"));
    }
}
