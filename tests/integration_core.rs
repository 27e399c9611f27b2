// tests/integration_core.rs
use decisional_core::analysis::{discover, Analyzer};
use decisional_core::lang::Lang;
use std::fs;
use tempfile::TempDir;

fn fixture() -> TempDir {
    let d = TempDir::new().unwrap();
    fs::write(d.path().join("app.py"), "def f(x):\n    if x:\n        return 1\n").unwrap();
    fs::write(d.path().join("Main.java"), "int g(int y) {\n    while (y > 0) {\n    }\n}\n").unwrap();
    fs::create_dir(d.path().join("native")).unwrap();
    fs::write(d.path().join("native/core.cpp"), "int h() {\n    return 0;\n}\n").unwrap();
    fs::write(d.path().join("README.md"), "# readme\n").unwrap();
    d
}

#[test]
fn test_analyze_path_infers_language() {
    let d = fixture();
    let a = Analyzer::default();

    let py = a.analyze_path(&d.path().join("app.py"), None).unwrap();
    assert_eq!(py.language, Lang::Python);
    assert_eq!(py.result.line_score(2), 4);
    assert!(py.source.starts_with("def f"));

    let java = a.analyze_path(&d.path().join("Main.java"), None).unwrap();
    assert_eq!(java.language, Lang::Java);
    // while: 1 * 3 * (1 + 1 + 2)
    assert_eq!(java.result.total_dc, 12);
}

#[test]
fn test_language_override() {
    let d = fixture();
    let path = d.path().join("snippet.txt");
    fs::write(&path, "if (a && b) {\n}\n").unwrap();

    let a = Analyzer::default();
    assert!(a.analyze_path(&path, None).is_err());
    assert_eq!(a.analyze_path(&path, Some(Lang::Cpp)).unwrap().result.total_dc, 10);
}

#[test]
fn test_discover_filters_and_sorts() {
    let d = fixture();
    let files = discover(&[d.path().to_path_buf()], None).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files.len(), 3);
    assert!(names.contains(&"core.cpp".to_string()));
    assert!(!names.contains(&"README.md".to_string()));
    let mut sorted = files.clone();
    sorted.sort();
    assert_eq!(files, sorted);
}

#[test]
fn test_discover_keeps_every_file_when_language_forced() {
    let d = fixture();
    fs::write(d.path().join("native/vec.inl"), "if (a && b) {\n}\n").unwrap();

    let inferred = discover(&[d.path().to_path_buf()], None).unwrap();
    assert!(!inferred.iter().any(|p| p.ends_with("native/vec.inl")));

    let forced = discover(&[d.path().to_path_buf()], Some(Lang::Cpp)).unwrap();
    assert_eq!(forced.len(), 5);
    assert!(forced.iter().any(|p| p.ends_with("native/vec.inl")));
}

#[test]
fn test_scan_collects_failures() {
    let d = fixture();
    let mut files = discover(&[d.path().to_path_buf()], None).unwrap();
    files.push(d.path().join("missing.py"));
    files.push(d.path().join("README.md"));

    let report = Analyzer::default().scan(&files, None);
    assert_eq!(report.files.len(), 3);
    assert_eq!(report.failures.len(), 2);
    assert!(report.has_errors());
    assert_eq!(report.total_dc(), 4 + 12);
}
