//! CSV serialization of [`OutputRow`]s.
//!
//! The header row is always written, in [`COLUMNS`](crate::row::COLUMNS) order, so an
//! empty result still produces a well-formed file.

use crate::row::COLUMNS;

use super::*;

/// Writes `rows` as CSV, header first, to `writer`.
pub fn write_csv<W: Write>(rows: &[OutputRow], writer: W) -> Result<()> {
  let mut csv = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
  csv.write_record(COLUMNS)?;
  for row in rows {
    csv.write_record(row.values())?;
  }
  csv.flush()?;
  Ok(())
}

/// Renders `rows` as a CSV document.
pub fn to_csv_string(rows: &[OutputRow]) -> Result<String> {
  let mut buffer = Vec::new();
  write_csv(rows, &mut buffer)?;
  Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Writes `rows` as CSV to a file, replacing any existing content.
pub fn write_csv_file(rows: &[OutputRow], path: impl AsRef<Path>) -> Result<()> {
  let path = path.as_ref();
  debug!("Writing {} rows to {}", rows.len(), path.display());
  write_csv(rows, std::fs::File::create(path)?)
}
