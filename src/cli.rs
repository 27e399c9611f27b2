use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "decisional",
    version,
    about = "Decisional and cyclomatic complexity per line, method and class"
)]
pub struct Cli {
    /// Files or directories to analyze
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Language tag (python, java, c++). Inferred from extensions when omitted.
    #[arg(long, short)]
    pub lang: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Read source from stdin instead of files (requires --lang)
    #[arg(long)]
    pub stdin: bool,

    /// Config file (defaults to ./decisional.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
