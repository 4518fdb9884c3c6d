//! trainset is a CLI tool that compiles a labeled training corpus from a table
//! of training data exported to CSV.
//!
//! Each table row may carry a label (`ALL_CAPS_WITH_UNDERSCORES`), a block of
//! comma-separated keywords and a URL, in any column. Rows without a label
//! inherit the one above them. The output directory receives `all_keywords.csv`
//! with one line per label, and one `<LABEL>_<n>.txt` file with the visible
//! text of every URL.
//!
//! By default existing files are never overwritten.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, info};

use trainset::{
    DataWriter, FetcherConfig, PageScraper, TableReader,
    constants::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT},
};

/// A CLI tool to compile training data from a CSV table of labels, keywords and URLs
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source CSV file
    input: PathBuf,
    /// Destination directory for keyword summary and page files
    output: PathBuf,
    /// Overwrite existing files
    #[arg(long, short)]
    force: bool,
    /// Timeout for every page request, in seconds
    #[arg(long, short, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
    /// User agent sent with every page request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    #[arg(long, short, action = clap::ArgAction::Count, help = "Output v(v...)erbosity: error (0), warn (1), info (2), debug (3), trace (4)", default_value_t = 2)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    let mut table_reader = TableReader::new(&cli.input);
    table_reader.read()?;

    let config = FetcherConfig {
        timeout: Duration::from_secs(cli.timeout),
        user_agent: cli.user_agent,
    };
    let scraper = PageScraper::new(&config)?;

    let writer = DataWriter::new(&cli.output, table_reader.snapshot(), scraper, cli.force);
    let report = writer
        .write()
        .await
        .with_context(|| format!("Unable to write training data to {}", cli.output.display()))?;

    info!(
        "Wrote {} pages to {}",
        report.written.len(),
        writer.dir().display()
    );
    Ok(())
}
