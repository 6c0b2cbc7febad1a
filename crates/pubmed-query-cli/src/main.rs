//! Command line interface for finding PubMed papers with industry-affiliated authors.
//!
//! The binary searches PubMed, keeps papers where at least one author lists a
//! pharmaceutical or biotech style affiliation, and writes them as CSV.
//!
//! # Usage
//!
//! ```bash
//! # Print matching papers as CSV on stdout
//! get-papers-list "crispr AND cancer"
//!
//! # Write them to a file instead, with debug logging
//! get-papers-list "crispr AND cancer" --file results.csv --debug
//!
//! # Identify yourself to NCBI and cap the number of search hits
//! get-papers-list "mRNA vaccine" --email me@example.com --max-results 200
//! ```
//!
//! Settings can also be kept in a TOML file (see `pubmed_query::configuration`),
//! read from `--config` or the platform configuration directory. Logs go to stderr
//! so the CSV on stdout stays clean.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use clap::{builder::ArgAction, Parser};
use console::style;
use pubmed_query::{configuration::Config, format, retriever::Entrez, Finder};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod error;

use crate::error::*;

/// Prefix for success messages
static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
static ERROR_PREFIX: &str = "✗ ";

/// Command line interface configuration and argument parsing
#[derive(Parser, Debug)]
#[command(
  name = "get-papers-list",
  author,
  version,
  about = "Find PubMed papers with at least one author from a pharmaceutical or biotech company"
)]
pub struct Cli {
  /// PubMed search query; the full PubMed query syntax is supported
  query: String,

  /// Write results to this CSV file instead of printing them
  #[arg(short, long)]
  file: Option<PathBuf>,

  /// Print debug information while running
  #[arg(short, long)]
  debug: bool,

  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(short, long, action = ArgAction::Count, help = "Increase logging verbosity")]
  verbose: u8,

  /// Maximum number of search hits to fetch (overrides the config file)
  #[arg(long)]
  max_results: Option<usize>,

  /// Path to a TOML config file. Defaults to the platform config directory.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Contact email reported to NCBI (overrides the config file)
  #[arg(long)]
  email: Option<String>,

  /// NCBI API key (overrides the config file)
  #[arg(long)]
  api_key: Option<String>,
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// `RUST_LOG` takes precedence when set.
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

impl Cli {
  /// Effective verbosity, with `--debug` raising it to at least debug level.
  fn verbosity(&self) -> u8 {
    if self.debug {
      self.verbose.max(3)
    } else {
      self.verbose
    }
  }

  /// Loads the config file and applies command line overrides.
  fn config(&self) -> Result<Config> {
    let mut config = match &self.config {
      Some(path) => Config::load(path)?,
      None => Config::load_or_default(Config::default_path())?,
    };
    if let Some(email) = &self.email {
      config = config.with_email(email);
    }
    if let Some(api_key) = &self.api_key {
      config = config.with_api_key(api_key);
    }
    if let Some(max_results) = self.max_results {
      config = config.with_max_results(max_results);
    }
    trace!("Using configuration {:?}", config);
    Ok(config)
  }
}

/// Runs the search and writes the CSV output.
async fn run(cli: &Cli) -> Result<()> {
  let config = cli.config()?;
  let max_results = config.max_results;
  let finder = Finder::new(Entrez::new(config)).with_max_results(max_results);

  debug!("Querying PubMed for {:?}", cli.query);
  let rows = finder.find(&cli.query).await;

  match &cli.file {
    Some(path) => {
      format::write_csv_file(&rows, path)?;
      eprintln!(
        "{}Wrote {} papers to {}",
        style(SUCCESS_PREFIX).green(),
        rows.len(),
        style(path.display()).cyan()
      );
    },
    None => format::write_csv(&rows, std::io::stdout().lock())?,
  }
  Ok(())
}

/// Entry point for the `get-papers-list` binary.
///
/// Exits with status 1 when the configuration cannot be loaded or the output cannot
/// be written. Search and fetch failures only produce an empty result.
#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  setup_logging(cli.verbosity());

  if let Err(e) = run(&cli).await {
    eprintln!("{}{}", style(ERROR_PREFIX).red(), e);
    std::process::exit(1);
  }
}
