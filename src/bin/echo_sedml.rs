//! Reads a SED-ML document and writes it back out.
//!
//! ```bash
//! echo_sedml input.sedml output.sedml
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use sedml::{read_sedml, write_sedml};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Document to read
    input: PathBuf,
    /// Where to write the document
    output: PathBuf,
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let doc = read_sedml(&cli.input);
    if doc.has_errors() {
        print!("{}", doc.error_log());
        return Ok(ExitCode::from(2));
    }
    write_sedml(&doc, &cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    log::info!("{} -> {}", cli.input.display(), cli.output.display());
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("echo_sedml: {:#}", error);
            ExitCode::from(2)
        }
    }
}
