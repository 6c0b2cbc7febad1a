//! Errors surfaced by the `get-papers-list` binary.

use thiserror::Error;

/// Result alias for the CLI.
pub type Result<T> = core::result::Result<T, CliError>;

/// Failures that stop the CLI. Search and fetch problems never reach this type:
/// the library logs them and yields an empty result instead.
#[derive(Error, Debug)]
pub enum CliError {
  /// An error from the `pubmed_query` library, e.g. an unreadable config or an
  /// unwritable output file.
  #[error(transparent)]
  Query(#[from] pubmed_query::error::QueryError),

  /// Writing to the terminal failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}
