// tests/unit_analysis.rs
use decisional_core::analysis::{analyze, Analyzer};
use decisional_core::error::AnalysisError;
use decisional_core::types::{AnalysisResult, ConstructKind, ScopeScore};

const PYTHON_SAMPLE: &str = "\
class Queue:
    def drain(self, items, limit):
        count = 0
        for item in items:
            while count < limit and item:
                count = count + 1 if item.ready else count
            try:
                self.push(item)
            except ValueError:
                pass
        return count > 0 or not items
";

const JAVA_SAMPLE: &str = "\
public class Router {
    public int route(int code, boolean admin) {
        switch (code) {
            case 1:
                return admin ? 2 : 3;
        }
        for (int i = 0; i < code; i++) {
            if (i % 2 == 0 && admin) {
                code = code - 1;
            }
            else if (i > 10) {
                break;
            }
        }
        try {
            return code;
        }
        catch (Exception e) {
            return -1;
        }
    }
}
";

fn assert_registry_consistent(r: &AnalysisResult) {
    assert!(r.total_cc >= 1);
    for (kind, rec) in &r.structures {
        assert_eq!(rec.count, rec.nesting_levels.len(), "{kind} levels");
        assert_eq!(rec.level_counts.values().sum::<usize>(), rec.count, "{kind} histogram");
    }
}

#[test]
fn test_empty_source_is_baseline_for_every_language() {
    for tag in ["python", "java", "c++"] {
        let r = analyze("", tag).unwrap();
        assert_eq!(r.total_dc, 0, "{tag}");
        assert_eq!(r.total_cc, 1, "{tag}");
        assert!(r.line_scores.is_empty() && r.methods.is_empty());
        assert!(r.classes.is_empty() && r.structures.is_empty());
    }
}

#[test]
fn test_unconditional_method() {
    let py = analyze("def f():\n    return 1\n", "python").unwrap();
    assert_eq!(py.methods["f"], ScopeScore { dc: 0, cc: 1 });

    let java = analyze("int f() {\n    return 1;\n}\n", "java").unwrap();
    assert_eq!(java.methods["f"], ScopeScore { dc: 0, cc: 1 });
    assert_eq!((java.total_dc, java.total_cc), (0, 1));
}

#[test]
fn test_single_conjunction() {
    for (tag, code) in [
        ("python", "if a and b:\n    pass\n"),
        ("java", "if (a && b) {\n}\n"),
        ("c++", "if (a && b) {\n}\n"),
    ] {
        let r = analyze(code, tag).unwrap();
        assert_eq!(r.total_dc, 10, "{tag}");
        assert_eq!(r.total_cc, 2, "{tag}");
        assert_eq!(r.line_score(1), 10, "{tag}");
    }
}

#[test]
fn test_if_inside_while_doubles() {
    let alone = analyze("if a and b:\n    pass\n", "python").unwrap();
    let nested = analyze("while go:\n    if a and b:\n        pass\n", "python").unwrap();
    assert_eq!(nested.line_score(2), alone.line_score(1) * 2);
}

#[test]
fn test_unparseable_python_is_baseline() {
    let r = analyze("def broken(:\n  if while\n", "python").unwrap();
    assert!(r.is_baseline());
}

#[test]
fn test_unsupported_tag() {
    let err = analyze("console.log(1)", "javascript").unwrap_err();
    assert!(matches!(err, AnalysisError::UnsupportedLanguage(ref t) if t == "javascript"));
}

#[test]
fn test_python_sample() {
    let r = analyze(PYTHON_SAMPLE, "python").unwrap();
    assert_registry_consistent(&r);
    assert_eq!(r.line_scores.values().sum::<u64>(), r.total_dc);

    assert_eq!(r.structures[&ConstructKind::For].count, 1);
    assert_eq!(r.structures[&ConstructKind::While].nesting_levels, vec![2]);
    assert_eq!(r.structures[&ConstructKind::Ternary].nesting_levels, vec![2]);
    assert_eq!(r.structures[&ConstructKind::Try].nesting_levels, vec![1]);

    let for_nested = &r.structures[&ConstructKind::For].nested_conditions[&1];
    assert_eq!(for_nested[&ConstructKind::While], 1);
    assert_eq!(for_nested[&ConstructKind::Ternary], 1);
    assert_eq!(for_nested[&ConstructKind::Try], 1);

    // for, while, ternary, try, plus the `or` in the return statement.
    assert_eq!(r.total_cc, 6);
    assert_eq!(r.methods["drain"].cc, 6);
    assert_eq!(r.classes["Queue"].dc, r.total_dc);
}

#[test]
fn test_java_sample() {
    let r = analyze(JAVA_SAMPLE, "java").unwrap();
    assert_registry_consistent(&r);
    for kind in [
        ConstructKind::Switch,
        ConstructKind::Case,
        ConstructKind::Ternary,
        ConstructKind::For,
        ConstructKind::If,
        ConstructKind::ElseIf,
        ConstructKind::Catch,
    ] {
        assert!(r.structures.contains_key(&kind), "missing {kind}");
    }
    assert!(r.methods.contains_key("route"));
    assert!(r.classes.contains_key("Router"));
    let constructs: usize = r.structures.values().map(|s| s.count).sum();
    assert_eq!(r.total_cc, constructs as u64 + 1);
}

#[test]
fn test_idempotent() {
    let analyzer = Analyzer::default();
    for (code, tag) in [(PYTHON_SAMPLE, "python"), (JAVA_SAMPLE, "java")] {
        let first = serde_json::to_string(&analyzer.analyze(code, tag).unwrap()).unwrap();
        let second = serde_json::to_string(&analyzer.analyze(code, tag).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_concurrent_calls_do_not_interfere() {
    let analyzer = Analyzer::default();
    let expected = analyzer.analyze(PYTHON_SAMPLE, "python").unwrap();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| analyzer.analyze(PYTHON_SAMPLE, "python").unwrap()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}
