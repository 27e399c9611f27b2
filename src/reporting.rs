//! Console and JSON output for analysis results.
//!
//! Each line is classified into a heat band by its DC score. The console view
//! prints a heat-colored listing followed by the method, class and structure
//! breakdowns.

use crate::config::ReportConfig;
use crate::types::{AnalysisResult, FileAnalysis, ScanReport, ScopeScore};
use anyhow::Result;
use colored::{ColoredString, Colorize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeatLevel {
    Low,
    Medium,
    High,
}

impl HeatLevel {
    #[must_use]
    pub fn classify(score: u64, bands: &ReportConfig) -> Self {
        if score >= bands.high_threshold {
            Self::High
        } else if score >= bands.medium_threshold {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    fn paint(self, text: &str) -> ColoredString {
        match self {
            Self::Low => text.green(),
            Self::Medium => text.yellow(),
            Self::High => text.red().bold(),
        }
    }
}

/// Renders a result in the wire shape consumed by downstream collaborators.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_json(result: &AnalysisResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Renders every analyzed file as a JSON object keyed by path.
///
/// # Errors
/// Returns error if serialization fails.
pub fn scan_to_json(report: &ScanReport) -> Result<String> {
    let by_path: BTreeMap<String, &AnalysisResult> = report
        .files
        .iter()
        .map(|f| (f.path.display().to_string(), &f.result))
        .collect();
    Ok(serde_json::to_string_pretty(&by_path)?)
}

/// Prints a heat-colored report for every file plus any failures.
pub fn print_scan(report: &ScanReport, bands: &ReportConfig) {
    for file in &report.files {
        print_file(file, bands);
        println!();
    }
    for failure in &report.failures {
        println!(
            "{} {}: {}",
            "failed:".red().bold(),
            failure.path.display(),
            failure.message
        );
    }
    println!(
        "{} file(s), total DC {} in {}ms",
        report.files.len(),
        report.total_dc(),
        report.duration_ms
    );
}

pub fn print_file(file: &FileAnalysis, bands: &ReportConfig) {
    let r = &file.result;
    println!("{}", file.path.display().to_string().bold());
    println!(
        "  language: {}  {} {}  {} {}",
        file.language,
        "DC".cyan(),
        r.total_dc,
        "CC".cyan(),
        r.total_cc
    );
    println!();
    print_heat_listing(&file.source, r, bands);
    print_scopes("Methods", &r.methods);
    print_scopes("Classes", &r.classes);
    print_structures(r);
}

fn print_heat_listing(source: &str, r: &AnalysisResult, bands: &ReportConfig) {
    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let score = r.line_score(line_no);
        let heat = HeatLevel::classify(score, bands);
        let gutter = format!("{line_no:>4} {score:>4} |");
        println!("{} {}", heat.paint(&gutter), line);
    }
}

fn print_scopes(title: &str, scopes: &BTreeMap<String, ScopeScore>) {
    if scopes.is_empty() {
        return;
    }
    println!();
    println!("  {}", title.cyan().bold());
    for (name, score) in scopes {
        println!("    {name:<32} DC {:>5}  CC {:>3}", score.dc, score.cc);
    }
}

fn print_structures(r: &AnalysisResult) {
    if r.structures.is_empty() {
        return;
    }
    println!();
    println!("  {}", "Structures".cyan().bold());
    for (kind, rec) in &r.structures {
        let levels: Vec<String> = rec
            .level_counts
            .iter()
            .map(|(depth, n)| format!("d{depth}:{n}"))
            .collect();
        println!("    {:<8} x{:<4} {}", kind.name(), rec.count, levels.join(" ").dimmed());

        for (depth, nested) in &rec.nested_conditions {
            if nested.is_empty() {
                continue;
            }
            let inner: Vec<String> = nested.iter().map(|(k, n)| format!("{k}:{n}")).collect();
            println!("      {} {}", format!("at d{depth} contains").dimmed(), inner.join(", "));
        }
    }
}
