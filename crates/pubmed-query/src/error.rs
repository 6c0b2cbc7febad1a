//! Error types for the pubmed-query library.
//!
//! Most operations in this crate degrade gracefully instead of failing: the
//! [`Source`](crate::retriever::Source) implementations log and return empty
//! results, and [`normalize_all`](crate::paper::normalize_all) drops bad records.
//! The fallible building blocks underneath them return [`QueryError`].
//!
//! # Examples
//!
//! ```
//! use pubmed_query::{error::QueryError, paper::normalize, record::RawRecord};
//!
//! let record = RawRecord::new(serde_json::json!({ "MedlineCitation": {} }));
//! match normalize(&record) {
//!   Err(QueryError::MalformedRecord(reason)) => println!("Skipping record: {}", reason),
//!   Err(e) => println!("Other error: {}", e),
//!   Ok(paper) => println!("Parsed {}", paper.pmid),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`pubmed_query`](crate) crate.
pub type Result<T> = core::result::Result<T, QueryError>;

/// Errors that can occur while retrieving, decoding or writing papers.
#[derive(Error, Debug)]
pub enum QueryError {
  /// A network request failed.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The Entrez server is unreachable
  /// - TLS errors occur
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The Entrez API answered with something other than a usable response,
  /// such as a non-success status or a payload missing the expected keys.
  #[error("API error: {0}")]
  ApiError(String),

  /// A JSON payload could not be decoded.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// An XML payload could not be tokenized.
  #[error(transparent)]
  Xml(#[from] quick_xml::Error),

  /// A raw record lacks a required substructure or has a shape the normalizer
  /// cannot interpret. The string names the offending field path.
  #[error("Malformed record: {0}")]
  MalformedRecord(String),

  /// Writing CSV output failed.
  #[error(transparent)]
  Csv(#[from] csv::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// A configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// A configuration could not be rendered as TOML.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// A configuration value is unusable, such as an empty or unparsable base URL.
  #[error("{0}")]
  Config(String),
}
