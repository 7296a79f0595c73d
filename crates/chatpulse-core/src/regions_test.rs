use std::io::Write;

use super::*;

fn region(code: &str, language: Option<Language>) -> RegionConfig {
    RegionConfig {
        code: code.to_string(),
        name: format!("Region {code}"),
        language,
        active: true,
        keywords: vec![],
        timezone: None,
        report_language: default_report_language(),
    }
}

fn write_yaml(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn unmapped_region_uses_baseline_language() {
    assert_eq!(region("POL", None).lexicon_language(), Language::English);
    assert_eq!(
        region("RUS", Some(Language::Russian)).lexicon_language(),
        Language::Russian
    );
}

#[test]
fn language_table_only_contains_explicit_mappings() {
    let file = RegionsFile {
        regions: vec![region("RUS", Some(Language::Russian)), region("POL", None)],
    };
    let table = file.language_table();
    assert_eq!(table.len(), 1);
    assert_eq!(table.get("RUS"), Some(&Language::Russian));
    assert!(!table.contains_key("POL"));
}

#[test]
fn find_is_case_insensitive() {
    let file = RegionsFile {
        regions: vec![region("DEU", None)],
    };
    assert!(file.find("deu").is_some());
    assert!(file.find("ESP").is_none());
}

#[test]
fn load_regions_applies_defaults() {
    let yaml = write_yaml(
        r#"
regions:
  - code: POL
    name: "Польша"
    timezone: Europe/Warsaw
  - code: RUS
    name: "Россия"
    language: russian
    active: false
"#,
    );
    let file = load_regions(yaml.path()).unwrap();
    assert_eq!(file.regions.len(), 2);

    let pol = file.find("POL").unwrap();
    assert!(pol.active);
    assert_eq!(pol.language, None);
    assert_eq!(pol.report_language, "Russian");
    assert_eq!(pol.timezone.as_deref(), Some("Europe/Warsaw"));

    let rus = file.find("RUS").unwrap();
    assert!(!rus.active);
    assert_eq!(rus.lexicon_language(), Language::Russian);

    let active: Vec<&str> = file.active().map(|r| r.code.as_str()).collect();
    assert_eq!(active, vec!["POL"]);
}

#[test]
fn load_regions_rejects_duplicate_codes() {
    let yaml = write_yaml(
        r"
regions:
  - code: POL
    name: A
  - code: POL
    name: B
",
    );
    let err = load_regions(yaml.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("duplicate")));
}

#[test]
fn load_regions_rejects_lowercase_code() {
    let yaml = write_yaml(
        r"
regions:
  - code: pol
    name: Poland
",
    );
    let err = load_regions(yaml.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn load_regions_rejects_unknown_language() {
    let yaml = write_yaml(
        r"
regions:
  - code: POL
    name: Poland
    language: klingon
",
    );
    let err = load_regions(yaml.path()).unwrap_err();
    assert!(matches!(err, ConfigError::FileParse { .. }));
}

#[test]
fn load_regions_missing_file_is_io_error() {
    let err = load_regions(Path::new("/definitely/not/here.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileIo { .. }));
}
