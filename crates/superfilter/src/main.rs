/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 */

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read, Write};
use superfilter::FilterConfig;
use superfilter::config::DEFAULT_FORMAT;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pandoc runs JSON filters as `filter FORMAT` with the document on stdin.
#[derive(Parser, Debug)]
#[command(name = "superfilter")]
#[command(version)]
#[command(about = "Pandoc JSON filter emitting LaTeX figures, tables and cross references")]
struct Args {
    /// Target format named by Pandoc (`beamer` enables column regions)
    #[arg(default_value = DEFAULT_FORMAT)]
    format: String,

    /// Rebuild every table as a booktabs tabular
    #[arg(long = "tables")]
    tables: bool,

    #[arg(short = 'i', long = "input", default_value = "-")]
    input: String,

    #[arg(short = 'o', long = "output", default_value = "-")]
    output: String,

    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "superfilter=debug"
    } else {
        "superfilter=warn"
    };
    // stdout carries the document, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_input(path: &str) -> Result<String> {
    let mut input = String::new();
    if path == "-" {
        io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
    } else {
        input = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file '{}'", path))?;
    }
    Ok(input)
}

fn write_output(path: &str, output: &str) -> Result<()> {
    if path == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        stdout.flush()?;
    } else {
        std::fs::write(path, output)
            .with_context(|| format!("Failed to write output file '{}'", path))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = FilterConfig::new(args.format).with_table_mode(args.tables);
    tracing::debug!(format = %config.format, tables = config.table_mode, "Starting filter");

    let input = read_input(&args.input)?;
    let output = superfilter::filter_json(&input, config)?;
    write_output(&args.output, &output)
}
