// src/bin/decisional.rs
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use decisional_core::analysis::{self, Analyzer};
use decisional_core::cli::{Cli, OutputFormat};
use decisional_core::config::Config;
use decisional_core::lang::Lang;
use decisional_core::reporting;
use decisional_core::types::FileAnalysis;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(&cli) {
        eprintln!("{} {e}", "error:".red().bold());
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    let lang = cli.lang.as_deref().map(str::parse::<Lang>).transpose()?;
    let analyzer = Analyzer::new(config);

    if cli.stdin {
        let lang = lang.ok_or_else(|| anyhow!("--stdin requires --lang"))?;
        return run_stdin(&analyzer, lang, cli.format);
    }
    if cli.paths.is_empty() {
        return Err(anyhow!("no input paths (pass files, directories or --stdin)"));
    }
    run_paths(&analyzer, &cli.paths, lang, cli.format)
}

fn run_stdin(analyzer: &Analyzer, lang: Lang, format: OutputFormat) -> Result<()> {
    let mut source = String::new();
    io::stdin().read_to_string(&mut source)?;
    let result = analyzer.analyze_lang(&source, lang)?;

    match format {
        OutputFormat::Json => println!("{}", reporting::to_json(&result)?),
        OutputFormat::Text => {
            let file = FileAnalysis {
                path: PathBuf::from("<stdin>"),
                language: lang,
                source,
                result,
            };
            reporting::print_file(&file, &analyzer.config().report);
        }
    }
    Ok(())
}

fn run_paths(
    analyzer: &Analyzer,
    paths: &[PathBuf],
    lang: Option<Lang>,
    format: OutputFormat,
) -> Result<()> {
    let files = analysis::discover(paths, lang)?;
    if files.is_empty() {
        println!("No supported source files found.");
        return Ok(());
    }

    let report = analyzer.scan(&files, lang);
    match format {
        OutputFormat::Json => println!("{}", reporting::scan_to_json(&report)?),
        OutputFormat::Text => reporting::print_scan(&report, &analyzer.config().report),
    }

    if report.has_errors() {
        return Err(anyhow!("{} file(s) could not be analyzed", report.failures.len()));
    }
    Ok(())
}
