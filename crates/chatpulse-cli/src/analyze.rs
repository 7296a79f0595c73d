//! `chatpulse analyze`: pipeline runs across regions.
//!
//! Each region runs on the blocking pool; runs for different regions touch
//! disjoint files, so they overlap freely up to the configured limit. A failed
//! region is reported and skipped.

use std::sync::Arc;

use chatpulse_analysis::AnalysisOutcome;
use futures::stream::{self, StreamExt};

use crate::workspace::Workspace;

/// Result of one region's run, keyed by region code.
pub(crate) type RegionResult = (String, anyhow::Result<AnalysisOutcome>);

/// Analyzes `codes` with at most `max_concurrent_regions` runs in flight.
/// Results come back sorted by region code.
pub(crate) async fn analyze_regions(workspace: &Arc<Workspace>, codes: &[String]) -> Vec<RegionResult> {
    let max_concurrent = workspace.config.max_concurrent_regions.max(1);

    let mut results: Vec<RegionResult> = stream::iter(codes.iter().cloned())
        .map(|code| {
            let workspace = Arc::clone(workspace);
            async move {
                let task_code = code.clone();
                let joined =
                    tokio::task::spawn_blocking(move || workspace.analyze(&task_code)).await;
                let outcome = match joined {
                    Ok(result) => result.map_err(anyhow::Error::from),
                    Err(e) => Err(anyhow::anyhow!("analysis task for {code} aborted: {e}")),
                };
                (code, outcome)
            }
        })
        .buffer_unordered(max_concurrent)
        .collect()
        .await;

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

pub(crate) async fn run_analyze(workspace: &Arc<Workspace>, region: Option<&str>) -> anyhow::Result<()> {
    let codes = match region {
        Some(code) => vec![workspace.region(code)?.code.clone()],
        None => workspace.active_codes(),
    };
    if codes.is_empty() {
        anyhow::bail!("no active regions configured in {}", workspace.config.regions_path.display());
    }

    tracing::info!(regions = codes.len(), "starting analysis");
    let results = analyze_regions(workspace, &codes).await;

    let mut failed = 0usize;
    for (code, outcome) in &results {
        match outcome {
            Ok(outcome) => {
                let a = &outcome.artifact;
                println!(
                    "{code}: {} messages (positive {}, negative {}, neutral {}), {} phrases, {} weeks",
                    a.message_count,
                    a.sentiments.positive,
                    a.sentiments.negative,
                    a.sentiments.neutral,
                    a.top_phrases.len(),
                    a.weekly_trends.len(),
                );
                if !outcome.parse.issues.is_empty() {
                    println!(
                        "{code}: {} malformed rows, {} timestamp fallbacks",
                        outcome.parse.malformed_rows, outcome.parse.timestamp_fallbacks
                    );
                }
            }
            Err(e) => {
                failed += 1;
                tracing::error!(region = %code, error = %e, "analysis failed");
                println!("{code}: failed: {e:#}");
            }
        }
    }

    if failed == results.len() {
        anyhow::bail!("analysis failed for all {failed} regions");
    }
    if failed > 0 {
        tracing::warn!(failed, total = results.len(), "analysis finished with failures");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chatpulse_core::{AppConfig, Environment, LlmSettings};

    use super::*;

    const REGIONS: &str = "regions:\n  - code: POL\n    name: Poland\n  - code: ESP\n    name: Spain\n    language: english\n  - code: RUS\n    name: Russia\n    active: false\n";
    const TAXONOMY: &str = "themes:\n  housing: [\"жиль\", \"apartment\"]\nneeds:\n  find_housing: [\"ищу жиль\"]\n";

    fn config(root: &Path) -> AppConfig {
        AppConfig {
            env: Environment::Test,
            log_level: "info".to_string(),
            data_dir: root.join("data"),
            regions_path: root.join("regions.yaml"),
            taxonomy_path: root.join("taxonomy.yaml"),
            max_concurrent_regions: 2,
            cache_ttl_secs: 3600,
            refresh_schedule: "0 0 0 * * *".to_string(),
            llm: LlmSettings {
                api_key: None,
                base_url: "http://127.0.0.1:1".to_string(),
                model: "m".to_string(),
                max_tokens: 10,
                timeout_secs: 1,
                max_retries: 0,
                retry_backoff_base_ms: 0,
            },
        }
    }

    fn workspace(root: &Path) -> Arc<Workspace> {
        std::fs::write(root.join("regions.yaml"), REGIONS).unwrap();
        std::fs::write(root.join("taxonomy.yaml"), TAXONOMY).unwrap();
        Arc::new(Workspace::load(config(root)).unwrap())
    }

    fn write_messages(workspace: &Workspace, code: &str, body: &str) {
        std::fs::write(workspace.store.paths().messages_file(code), body).unwrap();
    }

    #[test]
    fn only_active_regions_are_selected() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = workspace(tmp.path());
        assert_eq!(ws.active_codes(), vec!["POL".to_string(), "ESP".to_string()]);
    }

    #[tokio::test]
    async fn results_are_sorted_and_failures_isolated() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = workspace(tmp.path());
        write_messages(
            &ws,
            "POL",
            "id,date,text,group,geo\n1,2024-06-10,ищу жилье в Кракове,g,POL\n",
        );

        let results = analyze_regions(&ws, &ws.active_codes()).await;
        let codes: Vec<&str> = results.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(codes, vec!["ESP", "POL"]);

        assert!(results[0].1.is_err(), "ESP has no export");
        let pol = results[1].1.as_ref().unwrap();
        assert_eq!(pol.artifact.message_count, 1);
        assert_eq!(pol.artifact.needs_count["find_housing"], 1);
    }

    #[tokio::test]
    async fn run_fails_only_when_every_region_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = workspace(tmp.path());
        assert!(run_analyze(&ws, None).await.is_err());

        write_messages(&ws, "ESP", "id,date,text,group,geo\n1,2024-06-10,new apartment,g,ESP\n");
        assert!(run_analyze(&ws, None).await.is_ok());
    }

    #[tokio::test]
    async fn explicit_region_is_resolved_case_insensitively() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = workspace(tmp.path());
        write_messages(&ws, "RUS", "id,date,text,group,geo\n1,2024-06-10,привет,g,RUS\n");
        run_analyze(&ws, Some("rus")).await.unwrap();
        assert!(ws.store.has_artifact("RUS"));
        assert!(run_analyze(&ws, Some("XYZ")).await.is_err());
    }
}
