//! On-disk layout of the data directory.
//!
//! Every durable file is addressed by region code:
//!
//! ```text
//! <data_dir>/raw/messages_<REGION>.csv
//! <data_dir>/analyzed/analysis_<REGION>.json
//! <data_dir>/reports/report_<REGION>.txt
//! <data_dir>/cache/<kind>_<REGION>.json
//! ```

use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("raw")
    }

    #[must_use]
    pub fn analyzed_dir(&self) -> PathBuf {
        self.root.join("analyzed")
    }

    #[must_use]
    pub fn reports_dir(&self) -> PathBuf {
        self.root.join("reports")
    }

    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join("cache")
    }

    /// Raw message export for a region.
    #[must_use]
    pub fn messages_file(&self, region: &str) -> PathBuf {
        self.raw_dir().join(format!("messages_{region}.csv"))
    }

    /// Persisted analysis artifact for a region.
    #[must_use]
    pub fn analysis_file(&self, region: &str) -> PathBuf {
        self.analyzed_dir().join(format!("analysis_{region}.json"))
    }

    /// Last generated report text for a region.
    #[must_use]
    pub fn report_file(&self, region: &str) -> PathBuf {
        self.reports_dir().join(format!("report_{region}.txt"))
    }

    #[must_use]
    pub fn cache_file(&self, kind: &str, region: &str) -> PathBuf {
        self.cache_dir().join(format!("{kind}_{region}.json"))
    }

    /// Create the four sub-directories if they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if a directory cannot be created.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        for dir in [
            self.raw_dir(),
            self.analyzed_dir(),
            self.reports_dir(),
            self.cache_dir(),
        ] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_keyed_by_region() {
        let paths = DataPaths::new("/data");
        assert_eq!(
            paths.messages_file("POL"),
            PathBuf::from("/data/raw/messages_POL.csv")
        );
        assert_eq!(
            paths.analysis_file("POL"),
            PathBuf::from("/data/analyzed/analysis_POL.json")
        );
        assert_eq!(
            paths.report_file("DEU"),
            PathBuf::from("/data/reports/report_DEU.txt")
        );
        assert_eq!(
            paths.cache_file("report", "DEU"),
            PathBuf::from("/data/cache/report_DEU.json")
        );
    }

    #[test]
    fn ensure_dirs_creates_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(tmp.path().join("data"));
        paths.ensure_dirs().unwrap();
        assert!(paths.raw_dir().is_dir());
        assert!(paths.analyzed_dir().is_dir());
        assert!(paths.reports_dir().is_dir());
        assert!(paths.cache_dir().is_dir());
    }
}
