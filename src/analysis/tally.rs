// src/analysis/tally.rs
//! Accumulators shared by both frontends. Created fresh for every analysis.

use super::registry::StructureRegistry;
use super::weights::CC_PER_CONSTRUCT;
use crate::types::{AnalysisResult, ScopeScore};
use std::collections::BTreeMap;

/// An open method or class body collecting its own DC/CC.
#[derive(Debug, Clone)]
pub struct ScopeFrame {
    pub name: String,
    pub score: ScopeScore,
}

impl ScopeFrame {
    #[must_use]
    pub fn open(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: ScopeScore::baseline(),
        }
    }

    /// Charges one construct occurrence to this scope.
    pub fn charge(&mut self, dc: u64) {
        self.score.dc += dc;
        self.score.cc += CC_PER_CONSTRUCT;
    }

    /// Adds independent paths without a construct (short-circuit operators).
    pub fn add_paths(&mut self, paths: u64) {
        self.score.cc += paths;
    }
}

/// Run-wide totals, per-line scores, closed scopes and structure registry.
#[derive(Debug)]
pub struct Tally {
    total_dc: u64,
    total_cc: u64,
    line_scores: BTreeMap<usize, u64>,
    methods: BTreeMap<String, ScopeScore>,
    classes: BTreeMap<String, ScopeScore>,
    pub structures: StructureRegistry,
}

impl Default for Tally {
    fn default() -> Self {
        Self::new()
    }
}

impl Tally {
    #[must_use]
    pub fn new() -> Self {
        Self {
            total_dc: 0,
            total_cc: 1,
            line_scores: BTreeMap::new(),
            methods: BTreeMap::new(),
            classes: BTreeMap::new(),
            structures: StructureRegistry::new(),
        }
    }

    /// Scores one construct occurrence on a 1-based source line.
    pub fn score(&mut self, line: usize, dc: u64) {
        self.total_dc += dc;
        self.total_cc += CC_PER_CONSTRUCT;
        *self.line_scores.entry(line).or_insert(0) += dc;
    }

    pub fn add_paths(&mut self, paths: u64) {
        self.total_cc += paths;
    }

    /// Stores a finished method. A later method with the same name replaces it.
    pub fn close_method(&mut self, frame: ScopeFrame) {
        self.methods.insert(frame.name, frame.score);
    }

    pub fn close_class(&mut self, frame: ScopeFrame) {
        self.classes.insert(frame.name, frame.score);
    }

    #[must_use]
    pub fn finish(self) -> AnalysisResult {
        AnalysisResult {
            total_dc: self.total_dc,
            total_cc: self.total_cc,
            line_scores: self.line_scores,
            methods: self.methods,
            classes: self.classes,
            structures: self.structures.into_records(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_tally_is_baseline() {
        assert!(Tally::new().finish().is_baseline());
    }

    #[test]
    fn test_scores_accumulate_per_line() {
        let mut t = Tally::new();
        t.score(3, 4);
        t.score(3, 6);
        t.score(5, 1);
        let r = t.finish();
        assert_eq!(r.total_dc, 11);
        assert_eq!(r.total_cc, 4);
        assert_eq!(r.line_score(3), 10);
        assert_eq!(r.line_scores.values().sum::<u64>(), r.total_dc);
    }

    #[test]
    fn test_frame_charge() {
        let mut f = ScopeFrame::open("run");
        f.charge(8);
        f.add_paths(2);
        assert_eq!(f.score, ScopeScore { dc: 8, cc: 4 });
    }
}
