//! Checks SED-ML documents and lists every diagnostic.
//!
//! ```bash
//! validate_sedml experiment.sedml more_experiments/
//! ```
//!
//! Directories are searched (not recursively) for `*.sedml` files. The exit
//! status is the total number of errors, capped at 255.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use sedml::read_sedml;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SED-ML files, or directories holding them
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

fn sedml_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(path).with_context(|| format!("listing {}", path.display()))? {
        let file = entry?.path();
        if file.is_file() && file.extension().is_some_and(|ext| ext == "sedml") {
            files.push(file);
        }
    }
    files.sort();
    Ok(files)
}

/// Prints the report for one file and returns its error count.
fn validate(file: &Path, out: &mut impl Write) -> io::Result<usize> {
    let mut doc = read_sedml(file);
    if !doc.has_errors() {
        doc.check_consistency();
    }
    let log = doc.error_log();
    let errors = log.iter().filter(|d| d.is_error()).count();
    let warnings = log.len() - errors;
    writeln!(
        out,
        "file: {} has {} warning(s) and {} error(s)",
        file.display(),
        warnings,
        errors
    )?;
    for diagnostic in log {
        writeln!(
            out,
            "{} L{} C{}: {}",
            diagnostic.severity, diagnostic.line, diagnostic.column, diagnostic.message
        )?;
    }
    Ok(errors)
}

fn run(cli: &Cli) -> anyhow::Result<usize> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut total = 0;
    for path in &cli.paths {
        for file in sedml_files(path)? {
            total += validate(&file, &mut out)?;
        }
    }
    log::debug!("{} error(s) in total", total);
    Ok(total)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(errors) => ExitCode::from(errors.min(255) as u8),
        Err(error) => {
            eprintln!("validate_sedml: {:#}", error);
            ExitCode::from(2)
        }
    }
}
