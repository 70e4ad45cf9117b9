//! Prints a summary of a SED-ML document.
//!
//! ```bash
//! print_sedml experiment.sedml
//! ```
//!
//! Exits with status 2 on a usage error or when the document has errors, in
//! which case the error log is printed instead of the summary.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sedml::{read_sedml, write_summary};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the SED-ML document
    input: PathBuf,
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let doc = read_sedml(&cli.input);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if doc.has_errors() {
        write!(out, "{}", doc.error_log())?;
        return Ok(ExitCode::from(2));
    }
    write_summary(&doc, &mut out)?;
    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("print_sedml: {:#}", error);
            ExitCode::from(2)
        }
    }
}
