// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Grammar violation in exactly-parsed source. Degraded to a baseline
    /// result inside the syntax-tree frontend; never returned to callers.
    #[error("Malformed source near line {line}")]
    MalformedSource { line: usize },

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Analysis failed: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    pub(crate) fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        AnalysisError::Io {
            source,
            path: path.into(),
        }
    }
}

impl From<toml::de::Error> for AnalysisError {
    fn from(e: toml::de::Error) -> Self {
        AnalysisError::Config(e.to_string())
    }
}

// Gracefully convert WalkDir errors
impl From<walkdir::Error> for AnalysisError {
    fn from(e: walkdir::Error) -> Self {
        AnalysisError::Internal(e.to_string())
    }
}
