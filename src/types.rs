// src/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::lang::Lang;

/// Category of a control-flow element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstructKind {
    If,
    ElseIf,
    For,
    While,
    Switch,
    Case,
    Catch,
    Ternary,
    Try,
}

impl ConstructKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::ElseIf => "else-if",
            Self::For => "for",
            Self::While => "while",
            Self::Switch => "switch",
            Self::Case => "case",
            Self::Catch => "catch",
            Self::Ternary => "ternary",
            Self::Try => "try",
        }
    }
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// DC/CC pair for a method or class body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeScore {
    pub dc: u64,
    pub cc: u64,
}

impl ScopeScore {
    /// Fresh scope: no decisions yet, one baseline path.
    #[must_use]
    pub const fn baseline() -> Self {
        Self { dc: 0, cc: 1 }
    }
}

impl Default for ScopeScore {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Per-kind occurrence statistics.
///
/// Depth keys serialize as strings (`"0"`, `"1"`, ...) in JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureRecord {
    pub count: usize,
    pub nesting_levels: Vec<usize>,
    pub level_counts: BTreeMap<usize, usize>,
    pub nested_conditions: BTreeMap<usize, BTreeMap<ConstructKind, usize>>,
}

/// Complexity breakdown for one submitted source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "dc")]
    pub total_dc: u64,
    #[serde(rename = "cc")]
    pub total_cc: u64,
    pub line_scores: BTreeMap<usize, u64>,
    pub methods: BTreeMap<String, ScopeScore>,
    pub classes: BTreeMap<String, ScopeScore>,
    pub structures: BTreeMap<ConstructKind, StructureRecord>,
}

impl AnalysisResult {
    /// The result for source with no decisions: `dc = 0`, `cc = 1`, empty maps.
    #[must_use]
    pub fn baseline() -> Self {
        Self {
            total_dc: 0,
            total_cc: 1,
            line_scores: BTreeMap::new(),
            methods: BTreeMap::new(),
            classes: BTreeMap::new(),
            structures: BTreeMap::new(),
        }
    }

    /// DC attributed to a physical line (1-based), zero when nothing scored there.
    #[must_use]
    pub fn line_score(&self, line: usize) -> u64 {
        self.line_scores.get(&line).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_baseline(&self) -> bool {
        *self == Self::baseline()
    }
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self::baseline()
    }
}

/// One analyzed file, with the source kept for line-level rendering.
#[derive(Debug, Clone, Serialize)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub language: Lang,
    #[serde(skip)]
    pub source: String,
    pub result: AnalysisResult,
}

/// A file that could not be analyzed.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Aggregated results from analyzing multiple files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub files: Vec<FileAnalysis>,
    pub failures: Vec<FileFailure>,
    pub duration_ms: u128,
}

impl ScanReport {
    /// Returns true if any file failed to analyze.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty()
    }

    #[must_use]
    pub fn total_dc(&self) -> u64 {
        self.files.iter().map(|f| f.result.total_dc).sum()
    }
}
