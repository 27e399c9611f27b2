// src/analysis/weights.rs
//! Weight model: how much one construct occurrence adds to DC and CC.
//!
//! `DC = max(depth, 1) * base_weight(kind) * token_weight`
//!
//! CC is flat: every occurrence is one more independent path, whatever its
//! condition looks like.

use crate::types::ConstructKind;

/// CC added by every construct occurrence.
pub const CC_PER_CONSTRUCT: u64 = 1;

impl ConstructKind {
    #[must_use]
    pub const fn base_weight(self) -> u64 {
        match self {
            Self::If | Self::ElseIf | Self::For | Self::Switch | Self::Ternary => 2,
            Self::While => 3,
            Self::Case | Self::Catch | Self::Try => 1,
        }
    }
}

/// Token richness of a governing expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenWeight {
    /// Independent boolean clauses (one baseline plus one per combinator).
    pub conds: u64,
    /// Binary, comparison and boolean operators.
    pub ops: u64,
    /// Identifier and literal leaves.
    pub operands: u64,
}

impl TokenWeight {
    /// Weight for constructs without a boolean condition (`for`, `try`, `case`).
    #[must_use]
    pub const fn bare() -> Self {
        Self { conds: 1, ops: 0, operands: 0 }
    }

    #[must_use]
    pub const fn total(self) -> u64 {
        self.conds + self.ops + self.operands
    }
}

impl Default for TokenWeight {
    fn default() -> Self {
        Self::bare()
    }
}

#[must_use]
pub fn effective_depth(depth: usize) -> u64 {
    depth.max(1) as u64
}

/// DC contribution of one occurrence of `kind` at `depth`.
#[must_use]
pub fn dc_contribution(kind: ConstructKind, depth: usize, tokens: TokenWeight) -> u64 {
    effective_depth(depth) * kind.base_weight() * tokens.total()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_table() {
        assert_eq!(ConstructKind::If.base_weight(), 2);
        assert_eq!(ConstructKind::ElseIf.base_weight(), 2);
        assert_eq!(ConstructKind::While.base_weight(), 3);
        assert_eq!(ConstructKind::Case.base_weight(), 1);
        assert_eq!(ConstructKind::Try.base_weight(), 1);
    }

    #[test]
    fn test_top_level_depth_counts_as_one() {
        let t = TokenWeight { conds: 2, ops: 1, operands: 2 };
        assert_eq!(dc_contribution(ConstructKind::If, 0, t), 10);
        assert_eq!(dc_contribution(ConstructKind::If, 1, t), 10);
    }

    #[test]
    fn test_depth_scales_linearly() {
        let t = TokenWeight { conds: 1, ops: 1, operands: 2 };
        let shallow = dc_contribution(ConstructKind::If, 1, t);
        let deep = dc_contribution(ConstructKind::If, 2, t);
        assert_eq!(deep, shallow * 2);
    }

    #[test]
    fn test_bare_weight() {
        assert_eq!(TokenWeight::bare().total(), 1);
        assert_eq!(dc_contribution(ConstructKind::For, 3, TokenWeight::bare()), 6);
    }
}
