//! End-to-end analysis over a real data directory.

use std::collections::{BTreeMap, HashMap};

use chatpulse_analysis::{analyze_region, ArtifactStore, FsStore, LexicalScorer};
use chatpulse_core::{DataPaths, Language, Taxonomy, TaxonomyFile};

fn taxonomy() -> TaxonomyFile {
    let mut themes = BTreeMap::new();
    themes.insert("housing".to_string(), vec!["жиль".to_string()]);
    themes.insert("documents".to_string(), vec!["внж".to_string()]);
    let mut needs = BTreeMap::new();
    needs.insert("find_housing".to_string(), vec!["ищу жиль".to_string()]);
    TaxonomyFile {
        themes: Taxonomy::new(themes).unwrap(),
        needs: Taxonomy::new(needs).unwrap(),
    }
}

fn write_source(paths: &DataPaths, region: &str, body: &str) {
    paths.ensure_dirs().unwrap();
    std::fs::write(paths.messages_file(region), body).unwrap();
}

#[test]
fn analyses_region_file_and_writes_artifact() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = DataPaths::new(tmp.path());
    write_source(
        &paths,
        "RUS",
        "ID,Date,Text,Group,Geo\n\
         1,2024-06-10T09:00:00.000Z,Ищу жильё, срочно!,-1001,RUS\n\
         2,2024-06-11T09:00:00.000Z,Спасибо всем, всё отлично,-1001,RUS\n\
         3,2024-06-16T09:00:00.000Z,Продлили ВНЖ,-1002,RUS\n",
    );

    let mut languages = HashMap::new();
    languages.insert("RUS".to_string(), Language::Russian);
    let scorer = LexicalScorer::new(languages);
    let store = FsStore::new(paths.clone());

    let outcome = analyze_region("RUS", &store, &scorer, &taxonomy()).unwrap();
    let artifact = outcome.artifact;

    assert_eq!(artifact.message_count, 3);
    assert_eq!(artifact.sentiments.total(), 3);
    assert_eq!(artifact.sentiments.positive, 1);
    assert_eq!(artifact.theme_count["housing"], 1);
    assert_eq!(artifact.theme_count["documents"], 1);
    assert_eq!(artifact.needs_count["find_housing"], 1);
    assert_eq!(artifact.weekly_trends["2024-06-09"].total, 2);
    assert_eq!(artifact.weekly_trends["2024-06-16"].total, 1);
    assert_eq!(
        artifact.weekly_trends["2024-06-16"].theme_counts["documents"],
        1
    );
    assert!(outcome.parse.issues.is_empty());

    let on_disk = std::fs::read_to_string(paths.analysis_file("RUS")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&on_disk).unwrap();
    assert_eq!(value["messageCount"], 3);
    assert_eq!(store.load_artifact("RUS").unwrap(), artifact);
}

#[test]
fn rerun_produces_identical_bytes() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = DataPaths::new(tmp.path());
    write_source(
        &paths,
        "POL",
        "id,date,text,group,geo\n1,2024-06-10,ищу жилье рядом,g1,POL\n2,2024-06-12,ищу жилье,g1,POL\n",
    );
    let store = FsStore::new(paths.clone());
    let scorer = LexicalScorer::default();
    let taxonomy = taxonomy();

    analyze_region("POL", &store, &scorer, &taxonomy).unwrap();
    let first = std::fs::read(paths.analysis_file("POL")).unwrap();
    analyze_region("POL", &store, &scorer, &taxonomy).unwrap();
    let second = std::fs::read(paths.analysis_file("POL")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_region_file_fails_without_writing() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = DataPaths::new(tmp.path());
    let store = FsStore::new(paths.clone());
    let err = analyze_region("ITA", &store, &LexicalScorer::default(), &taxonomy()).unwrap_err();
    assert!(matches!(
        err,
        chatpulse_analysis::AnalysisError::NoAnalysisData { .. }
    ));
    assert!(!paths.analysis_file("ITA").exists());
}
