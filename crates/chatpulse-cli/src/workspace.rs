//! Everything a command needs, loaded once per process.

use anyhow::Context;
use chatpulse_analysis::{analyze_region, AnalysisError, AnalysisOutcome, FsStore, LexicalScorer};
use chatpulse_core::{
    load_regions, load_taxonomy, AppConfig, DataPaths, RegionConfig, RegionsFile, TaxonomyFile,
};

pub(crate) struct Workspace {
    pub config: AppConfig,
    pub regions: RegionsFile,
    pub taxonomy: TaxonomyFile,
    pub store: FsStore,
    pub scorer: LexicalScorer,
}

impl Workspace {
    /// Loads the region catalogue and taxonomies and prepares the data dir.
    pub fn load(config: AppConfig) -> anyhow::Result<Self> {
        let regions = load_regions(&config.regions_path)
            .with_context(|| format!("loading regions from {}", config.regions_path.display()))?;
        let taxonomy = load_taxonomy(&config.taxonomy_path).with_context(|| {
            format!("loading taxonomy from {}", config.taxonomy_path.display())
        })?;

        let paths = DataPaths::new(&config.data_dir);
        paths
            .ensure_dirs()
            .with_context(|| format!("creating data dirs under {}", config.data_dir.display()))?;

        let scorer = LexicalScorer::new(regions.language_table());

        tracing::info!(
            regions = regions.regions.len(),
            themes = taxonomy.themes.len(),
            needs = taxonomy.needs.len(),
            "workspace loaded"
        );

        Ok(Self {
            config,
            regions,
            taxonomy,
            store: FsStore::new(paths),
            scorer,
        })
    }

    pub fn region(&self, code: &str) -> anyhow::Result<&RegionConfig> {
        self.regions
            .find(code)
            .ok_or_else(|| anyhow::anyhow!("region '{code}' is not in the catalogue"))
    }

    pub fn active_codes(&self) -> Vec<String> {
        self.regions.active().map(|r| r.code.clone()).collect()
    }

    pub fn analyze(&self, code: &str) -> Result<AnalysisOutcome, AnalysisError> {
        analyze_region(code, &self.store, &self.scorer, &self.taxonomy)
    }
}
