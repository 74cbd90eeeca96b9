use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Assemble regular expressions into a single pattern that matches the
/// union of their languages.
#[derive(Parser)]
#[command(name = "reunion", version)]
#[command(about = "Assemble regular expressions into one union pattern")]
struct Cli {
    /// Patterns to assemble; read one per line from stdin when absent.
    patterns: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let patterns = if cli.patterns.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("reading patterns from stdin")?
    } else {
        cli.patterns
    };

    let pattern = reunion::join(&patterns)?;
    println!("{}", pattern);
    Ok(())
}
