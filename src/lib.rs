pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod lang;
pub mod reporting;
pub mod types;

pub use analysis::{analyze, Analyzer};
pub use error::{AnalysisError, Result};
pub use types::{AnalysisResult, ConstructKind, ScopeScore, StructureRecord};
