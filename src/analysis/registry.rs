// src/analysis/registry.rs
//! Per-run construct statistics: counts, depth histograms, nesting shape.

use crate::types::{ConstructKind, StructureRecord};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct StructureRegistry {
    records: BTreeMap<ConstructKind, StructureRecord>,
}

impl StructureRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `kind` at `depth`.
    pub fn record(&mut self, kind: ConstructKind, depth: usize) {
        let record = self.records.entry(kind).or_default();
        record.count += 1;
        record.nesting_levels.push(depth);
        *record.level_counts.entry(depth).or_insert(0) += 1;
        record.nested_conditions.entry(depth).or_default();
    }

    /// Notes that a `child` construct was found nested under a `parent`
    /// occurring at `parent_depth`.
    pub fn note_nested(&mut self, parent: ConstructKind, parent_depth: usize, child: ConstructKind) {
        let nested = self
            .records
            .entry(parent)
            .or_default()
            .nested_conditions
            .entry(parent_depth)
            .or_default();
        *nested.entry(child).or_insert(0) += 1;
    }

    #[must_use]
    pub fn get(&self, kind: ConstructKind) -> Option<&StructureRecord> {
        self.records.get(&kind)
    }

    #[must_use]
    pub fn into_records(self) -> BTreeMap<ConstructKind, StructureRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_levels_and_histogram_in_step() {
        let mut reg = StructureRegistry::new();
        reg.record(ConstructKind::If, 0);
        reg.record(ConstructKind::If, 2);
        reg.record(ConstructKind::If, 0);

        let rec = reg.get(ConstructKind::If).unwrap();
        assert_eq!(rec.count, 3);
        assert_eq!(rec.nesting_levels, vec![0, 2, 0]);
        assert_eq!(rec.level_counts.get(&0), Some(&2));
        assert_eq!(rec.level_counts.get(&2), Some(&1));
        assert!(rec.nested_conditions.contains_key(&2));
        assert_eq!(rec.level_counts.values().sum::<usize>(), rec.count);
    }

    #[test]
    fn test_note_nested_creates_parent_entry() {
        let mut reg = StructureRegistry::new();
        reg.note_nested(ConstructKind::While, 1, ConstructKind::Ternary);
        reg.note_nested(ConstructKind::While, 1, ConstructKind::Ternary);

        let rec = reg.get(ConstructKind::While).unwrap();
        assert_eq!(rec.count, 0);
        assert!(rec.nesting_levels.is_empty());
        assert_eq!(rec.nested_conditions[&1][&ConstructKind::Ternary], 2);
    }
}
