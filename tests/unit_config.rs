// tests/unit_config.rs
use decisional_core::analysis::Analyzer;
use decisional_core::config::Config;
use decisional_core::error::AnalysisError;
use std::fs;

#[test]
fn test_load_toml() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("decisional.toml");
    fs::write(&path, "[report]\nhigh_threshold = 15\nmedium_threshold = 8").unwrap();
    let c = Config::load_from(&path).unwrap();
    assert_eq!(c.report.high_threshold, 15);
    assert_eq!(c.report.medium_threshold, 8);
}

#[test]
fn test_missing_file() {
    let d = tempfile::tempdir().unwrap();
    let err = Config::load_from(&d.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, AnalysisError::Io { .. }));
}

#[test]
fn test_invalid_toml() {
    let err = Config::parse("[report\nhigh_threshold = ").unwrap_err();
    assert!(matches!(err, AnalysisError::Config(_)));
}

#[test]
fn test_excluded_identifiers_reach_scanner() {
    let code = "Status check(int v) {\n    if (v > 0) {\n    }\n}\n";

    let plain = Analyzer::default().analyze(code, "c++").unwrap();
    assert!(plain.methods.contains_key("check"));

    let config = Config::parse("[heuristics]\nexcluded_identifiers = [\"check\"]").unwrap();
    let tuned = Analyzer::new(config).analyze(code, "c++").unwrap();
    assert!(tuned.methods.is_empty());
    assert_eq!(tuned.total_dc, plain.total_dc);
}
