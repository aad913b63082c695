// src/bin/cli.rs
//
//! CLI front end: convert an Apache Combined Log Format access log into a
//! goreplay-compatible `.gor` file.
//!
//! Examples:
//! ```bash
//! clf2gor access.log requests.gor
//! clf2gor -v access.log.zst requests.gor     # rotated/compressed input
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use clf2gor::Converter;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Input access log in Apache Combined Log Format (`.zst` accepted)
    input: PathBuf,

    /// Output `.gor` file for goreplay (created, or truncated if present)
    output: PathBuf,

    #[arg(short = 'v',
        long,
        action = ArgAction::Count,
        help = "Increase log verbosity: -v = Info, -vv = Debug",
    )]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialise logging once, based on how many `-v` flags were given
    let filter = match cli.verbose {
        0 => "warn",        // no -v: WARN level
        1 => "info",        // -v: INFO level
        _ => "debug",       // -vv or more: DEBUG level
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    info!("Converting {} to {}", cli.input.display(), cli.output.display());

    let input = open_log_reader(&cli.input)?;
    let out_file = File::create(&cli.output)
        .with_context(|| format!("Failed to create output file: {}", cli.output.display()))?;
    let mut output = BufWriter::new(out_file);

    // A ConvertError already names the failed segment and the partial count
    let summary = Converter::new()
        .convert(input, &mut output)
        .context("Conversion aborted")?;

    output
        .flush()
        .with_context(|| format!("Failed to flush output file: {}", cli.output.display()))?;

    println!(
        "Converted {} log entries (skipped {}) to {}",
        summary.converted,
        summary.skipped,
        cli.output.display()
    );
    Ok(())
}

/// Open the input log for line-oriented reading, decompressing transparently
/// when the path ends in `.zst`.
fn open_log_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    if path.extension().map_or(false, |ext| ext == "zst") {
        let decoder = zstd::stream::read::Decoder::new(file)
            .with_context(|| "Failed to create zstd decoder")?;
        Ok(Box::new(BufReader::new(decoder)))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
