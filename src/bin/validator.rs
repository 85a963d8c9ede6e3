//! Statement Validator - CLI tool for validating bank-statement batches.

use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;
use statement_validator::{engine, BatchReport, Format};

#[derive(Parser)]
#[command(name = "statement_validate")]
#[command(about = "Validate a batch of bank-statement records (CSV or XML)", long_about = None)]
struct Cli {
    /// Input file path (or stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Input format (csv, xml); inferred from the input file extension
    /// when omitted
    #[arg(short, long)]
    format: Option<String>,

    /// Output file path for the JSON report (or stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let format = resolve_format(&cli)?;

    let report = if let Some(ref input_path) = cli.input {
        let file = File::open(input_path)?;
        engine::validate(file, format)?
    } else {
        engine::validate(io::stdin().lock(), format)?
    };

    if let Some(ref output_path) = cli.output {
        let mut file = File::create(output_path)?;
        write_report(&mut file, &report)?;
    } else {
        let mut stdout = io::stdout();
        write_report(&mut stdout, &report)?;
    }

    Ok(())
}

/// An explicit --format wins; otherwise the input file extension decides.
/// Rejects the request before the engine runs when neither names a
/// supported format.
fn resolve_format(cli: &Cli) -> Result<Format, Box<dyn std::error::Error>> {
    if let Some(ref format) = cli.format {
        return Ok(format.parse::<Format>()?);
    }
    match cli.input {
        Some(ref input_path) => Format::from_filename(input_path).ok_or_else(|| {
            format!("cannot detect format of '{}', pass --format", input_path).into()
        }),
        None => Err("reading from stdin requires --format".into()),
    }
}

fn write_report<W: Write>(writer: &mut W, report: &BatchReport) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}
