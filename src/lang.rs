use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use tree_sitter::Language;

use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lang {
    Python,
    Java,
    Cpp,
}

/// Which scoring frontend handles a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frontend {
    /// Exact grammar walk over a tree-sitter tree.
    SyntaxTree,
    /// Line-oriented pseudo-parse for brace-delimited sources.
    Heuristic,
}

impl Lang {
    /// Resolves a submitted language tag. Matching is case-insensitive.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Some(Self::Python),
            "java" => Some(Self::Java),
            "c++" | "cpp" | "cxx" | "cc" => Some(Self::Cpp),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext {
            "py" => Some(Self::Python),
            "java" => Some(Self::Java),
            "cpp" | "cc" | "cxx" | "c++" | "hpp" | "hh" | "hxx" | "h" => Some(Self::Cpp),
            _ => None,
        }
    }

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Java => "java",
            Self::Cpp => "c++",
        }
    }

    #[must_use]
    pub fn frontend(self) -> Frontend {
        match self {
            Self::Python => Frontend::SyntaxTree,
            Self::Java | Self::Cpp => Frontend::Heuristic,
        }
    }

    /// Grammar for languages scored by the syntax-tree frontend.
    #[must_use]
    pub fn grammar(self) -> Option<Language> {
        match self {
            Self::Python => Some(tree_sitter_python::language()),
            Self::Java | Self::Cpp => None,
        }
    }

    /// Identifiers that look like method headers to the block scanner but are
    /// really exception constructions (`runtime_error(msg) {` and friends).
    #[must_use]
    pub fn excluded_identifiers(self) -> &'static [&'static str] {
        match self {
            Self::Python => &[],
            Self::Java => JAVA_EXCEPTIONS,
            Self::Cpp => CPP_EXCEPTIONS,
        }
    }
}

const CPP_EXCEPTIONS: &[&str] = &[
    "runtime_error",
    "invalid_argument",
    "out_of_range",
    "logic_error",
    "domain_error",
    "length_error",
];

const JAVA_EXCEPTIONS: &[&str] = &[
    "RuntimeException",
    "IllegalArgumentException",
    "IllegalStateException",
    "NullPointerException",
    "IndexOutOfBoundsException",
    "UnsupportedOperationException",
    "ArithmeticException",
];

impl FromStr for Lang {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| AnalysisError::UnsupportedLanguage(s.to_string()))
    }
}

impl Serialize for Lang {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
