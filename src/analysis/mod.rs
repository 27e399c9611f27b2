// src/analysis/mod.rs
//! Complexity engine: language dispatch and the file-level driver.

pub mod heuristic;
pub mod registry;
pub mod syntax;
pub mod tally;
pub mod weights;

use crate::config::Config;
use crate::error::{AnalysisError, Result};
use crate::lang::{Frontend, Lang};
use crate::types::{AnalysisResult, FileAnalysis, FileFailure, ScanReport};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Scores source text with default configuration.
///
/// # Errors
/// Returns `UnsupportedLanguage` for an unknown tag.
pub fn analyze(source: &str, tag: &str) -> Result<AnalysisResult> {
    Analyzer::default().analyze(source, tag)
}

/// Stateless between calls: every analysis builds its own accumulators, so
/// one `Analyzer` can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: Config,
}

impl Analyzer {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// # Errors
    /// Returns `UnsupportedLanguage` for an unknown tag, `Internal` if the
    /// selected frontend cannot run at all.
    pub fn analyze(&self, source: &str, tag: &str) -> Result<AnalysisResult> {
        let lang: Lang = tag.parse()?;
        self.analyze_lang(source, lang)
    }

    /// # Errors
    /// Returns `Internal` if the syntax-tree frontend cannot load its grammar.
    pub fn analyze_lang(&self, source: &str, lang: Lang) -> Result<AnalysisResult> {
        tracing::debug!(%lang, lines = source.lines().count(), "analyzing source");
        match lang.frontend() {
            Frontend::SyntaxTree => syntax::analyze(source, lang),
            Frontend::Heuristic => Ok(heuristic::analyze(
                source,
                lang,
                &self.config.heuristics.excluded_identifiers,
            )),
        }
    }

    /// Reads and scores one file. The language comes from `lang`, or from the
    /// file extension when `lang` is `None`.
    ///
    /// # Errors
    /// Returns `UnsupportedLanguage` if no language applies, `Io` if the file
    /// cannot be read.
    pub fn analyze_path(&self, path: &Path, lang: Option<Lang>) -> Result<FileAnalysis> {
        let language = match lang {
            Some(lang) => lang,
            None => lang_for_path(path)?,
        };
        let source = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(e, path))?;
        let result = self.analyze_lang(&source, language)?;
        Ok(FileAnalysis {
            path: path.to_path_buf(),
            language,
            source,
            result,
        })
    }

    /// Scores many files in parallel. Per-file errors are collected, not fatal.
    #[must_use]
    pub fn scan(&self, files: &[PathBuf], lang: Option<Lang>) -> ScanReport {
        let start = std::time::Instant::now();

        let outcomes: Vec<std::result::Result<FileAnalysis, FileFailure>> = files
            .par_iter()
            .map(|path| {
                self.analyze_path(path, lang).map_err(|e| FileFailure {
                    path: path.clone(),
                    message: e.to_string(),
                })
            })
            .collect();

        let mut report = ScanReport::default();
        for outcome in outcomes {
            match outcome {
                Ok(file) => report.files.push(file),
                Err(failure) => report.failures.push(failure),
            }
        }
        report.duration_ms = start.elapsed().as_millis();
        report
    }
}

fn lang_for_path(path: &Path) -> Result<Lang> {
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    Lang::from_ext(ext)
        .ok_or_else(|| AnalysisError::UnsupportedLanguage(format!("{} ({ext:?})", path.display())))
}

/// Expands directories into the supported source files beneath them.
/// Explicit file paths are kept as given. With a forced `lang`, every file
/// under a directory is kept. The result is sorted.
///
/// # Errors
/// Returns error if a directory cannot be walked.
pub fn discover(paths: &[PathBuf], lang: Option<Lang>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).follow_links(false) {
            let entry = entry?;
            let supported = lang.is_some() || lang_for_path(entry.path()).is_ok();
            if entry.file_type().is_file() && supported {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}
