//! Find PubMed papers written with at least one commercially affiliated author.
//!
//! `pubmed_query` searches PubMed through the NCBI Entrez E-utilities, normalizes the
//! returned records and keeps the papers where an author lists a pharmaceutical or
//! biotech style affiliation. It provides:
//!
//! - Search and fetch against the Entrez API
//! - XML record decoding into a navigable value tree
//! - Record normalization into [`Paper`](paper::Paper) values
//! - Keyword based academic/commercial affiliation classification
//! - CSV output of the qualifying papers
//!
//! # Getting Started
//!
//! ```no_run
//! use pubmed_query::{configuration::Config, format, retriever::Entrez, Finder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let entrez = Entrez::new(Config::default().with_email("me@example.com"));
//!   let rows = Finder::new(entrez).with_max_results(50).find("crispr cancer").await;
//!
//!   print!("{}", format::to_csv_string(&rows)?);
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`retriever`]: Entrez client and XML decoding
//! - [`record`]: Raw record access with explicit missing-field handling
//! - [`paper`]: Normalized paper types and the record normalizer
//! - [`classify`]: Affiliation keyword classification
//! - [`row`]: Output rows for qualifying papers
//! - [`format`]: CSV serialization
//! - [`configuration`]: Client configuration
//! - [`prelude`]: Common traits and types for ergonomic imports

#![warn(missing_docs)]

use std::{
  collections::HashSet,
  io::Write,
  path::{Path, PathBuf},
};

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, trace, warn};
#[cfg(test)] use tracing_test::traced_test;

pub mod classify;
pub mod configuration;
pub mod error;
pub mod format;
pub mod paper;
pub mod record;
pub mod retriever;
pub mod row;

use crate::{
  configuration::Config,
  error::*,
  paper::Paper,
  record::{Field, RawRecord},
  retriever::Source,
  row::OutputRow,
};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use pubmed_query::prelude::*;
///
/// fn qualifies(paper: &Paper) -> bool { build_row(paper).is_some() }
/// ```
pub mod prelude {
  pub use crate::{
    error::QueryError,
    paper::{normalize_all, Author, Paper},
    retriever::Source,
    row::{build_row, OutputRow},
    Finder,
  };
}

/// Default cap on the number of identifiers requested from a search.
pub const DEFAULT_MAX_RESULTS: usize = 10_000;

/// Runs the full search, fetch, normalize and filter pipeline against a [`Source`].
///
/// The finder never fails: collaborator errors surface as empty results and bad
/// records are dropped during normalization, so the worst outcome is a partial
/// (or empty) set of rows.
///
/// # Examples
///
/// ```no_run
/// # use pubmed_query::{configuration::Config, retriever::Entrez, Finder};
/// # async fn example() {
/// let finder = Finder::new(Entrez::new(Config::default())).with_max_results(20);
/// for row in finder.find("monoclonal antibody").await {
///   println!("{}: {}", row.pubmed_id, row.company_affiliations);
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Finder<S> {
  /// Where identifiers and records come from
  source:      S,
  /// Upper bound on search hits
  max_results: usize,
}

impl<S: Source> Finder<S> {
  /// Creates a finder over the given source using [`DEFAULT_MAX_RESULTS`].
  pub fn new(source: S) -> Self { Self { source, max_results: DEFAULT_MAX_RESULTS } }

  /// Sets the maximum number of search hits to fetch.
  pub fn with_max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results;
    self
  }

  /// Returns the configured search cap.
  pub fn max_results(&self) -> usize { self.max_results }

  /// Searches, fetches and normalizes every record matching `query`.
  pub async fn papers(&self, query: &str) -> Vec<Paper> {
    let ids = self.source.search(query, self.max_results).await;
    info!("Search for {:?} matched {} records", query, ids.len());
    if ids.is_empty() {
      return Vec::new();
    }

    let records = self.source.fetch(&ids).await;
    debug!("Fetched {} of {} records", records.len(), ids.len());
    paper::normalize_all(&records)
  }

  /// Returns the output rows for every paper matching `query` that has at least one
  /// commercial affiliation.
  pub async fn find(&self, query: &str) -> Vec<OutputRow> {
    let papers = self.papers(query).await;
    let rows = row::build_rows(&papers);
    info!("{} of {} papers have a company affiliation", rows.len(), papers.len());
    rows
  }
}
