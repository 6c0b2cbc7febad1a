//! Output rows for papers with commercially affiliated authors.
//!
//! A paper qualifies when any affiliation of any author satisfies
//! [`is_company`](crate::classify::is_company). For a qualifying paper the row lists:
//!
//! - every author with at least one affiliation that is not academic, in author order
//!   (names are not deduplicated)
//! - every distinct commercial affiliation, in first-seen order
//! - the paper's corresponding email, unchanged

use crate::classify::{is_academic, is_company};

use super::*;

/// Separator used for multi-valued columns.
pub const SEPARATOR: &str = ", ";

/// Column names in output order.
pub const COLUMNS: [&str; 6] = [
  "PubmedID",
  "Title",
  "Publication Date",
  "Non-academic Author(s)",
  "Company Affiliation(s)",
  "Corresponding Author Email",
];

/// One line of output for a qualifying paper.
///
/// Field order matches [`COLUMNS`]; [`OutputRow::values`] yields them in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
  /// PubMed identifier
  pub pubmed_id:                  String,
  /// Article title
  pub title:                      String,
  /// Publication date as normalized
  pub publication_date:           String,
  /// Authors with a non-academic affiliation, joined with [`SEPARATOR`]
  pub non_academic_authors:       String,
  /// Distinct commercial affiliations, joined with [`SEPARATOR`]
  pub company_affiliations:       String,
  /// Corresponding author email, possibly empty
  pub corresponding_author_email: String,
}

impl OutputRow {
  /// Field values in [`COLUMNS`] order.
  pub fn values(&self) -> [&str; 6] {
    [
      &self.pubmed_id,
      &self.title,
      &self.publication_date,
      &self.non_academic_authors,
      &self.company_affiliations,
      &self.corresponding_author_email,
    ]
  }
}

/// Builds the output row for `paper`, or `None` if no affiliation is commercial.
pub fn build_row(paper: &Paper) -> Option<OutputRow> {
  if !paper.affiliations().any(is_company) {
    return None;
  }

  let non_academic_authors: Vec<&str> = paper
    .authors
    .iter()
    .filter(|author| author.affiliations.iter().any(|affiliation| !is_academic(affiliation)))
    .map(|author| author.name.as_str())
    .collect();

  let mut seen = HashSet::new();
  let company_affiliations: Vec<&str> = paper
    .affiliations()
    .filter(|affiliation| is_company(affiliation) && seen.insert(*affiliation))
    .collect();

  Some(OutputRow {
    pubmed_id:                  paper.pmid.clone(),
    title:                      paper.title.clone(),
    publication_date:           paper.publication_date.clone(),
    non_academic_authors:       non_academic_authors.join(SEPARATOR),
    company_affiliations:       company_affiliations.join(SEPARATOR),
    corresponding_author_email: paper.corresponding_email.clone(),
  })
}

/// Builds rows for every qualifying paper, preserving order.
pub fn build_rows(papers: &[Paper]) -> Vec<OutputRow> {
  papers
    .iter()
    .filter_map(|paper| {
      let row = build_row(paper);
      if row.is_none() {
        trace!("Paper {} has no company affiliation", paper.pmid);
      }
      row
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::paper::Author;

  fn author(name: &str, affiliations: &[&str]) -> Author {
    Author {
      name:         name.to_string(),
      affiliations: affiliations.iter().map(|a| a.to_string()).collect(),
    }
  }

  fn paper(authors: Vec<Author>) -> Paper {
    Paper {
      pmid: "42".to_string(),
      title: "On things".to_string(),
      publication_date: "2020-Unknown-Unknown".to_string(),
      authors,
      corresponding_email: "x@acme.com".to_string(),
    }
  }

  #[test]
  fn test_no_authors_or_affiliations_never_qualify() {
    assert!(build_row(&paper(vec![])).is_none());
    assert!(build_row(&paper(vec![author("A", &[]), author("B", &[])])).is_none());
  }

  #[test]
  fn test_academic_only_does_not_qualify() {
    let paper = paper(vec![author("A", &["Dept. of Biology, Example University"])]);
    assert!(build_row(&paper).is_none());
  }

  #[test]
  fn test_mixed_paper() {
    let paper = paper(vec![
      author("Ann Academic", &["Dept. of Biology, Example University"]),
      author("Cara Company", &["Acme Pharma Inc."]),
      author("Nora None", &[]),
      author("Gil Government", &["Ministry of Health"]),
    ]);

    let row = build_row(&paper).unwrap();
    assert_eq!(row.pubmed_id, "42");
    assert_eq!(row.title, "On things");
    assert_eq!(row.publication_date, "2020-Unknown-Unknown");
    assert_eq!(row.non_academic_authors, "Cara Company, Gil Government");
    assert_eq!(row.company_affiliations, "Acme Pharma Inc.");
    assert_eq!(row.corresponding_author_email, "x@acme.com");
  }

  #[test]
  fn test_any_non_academic_affiliation_includes_author() {
    let paper = paper(vec![author("Dual", &["Example University", "Acme Biotech Ltd"])]);

    let row = build_row(&paper).unwrap();
    assert_eq!(row.non_academic_authors, "Dual");
    assert_eq!(row.company_affiliations, "Acme Biotech Ltd");
  }

  #[test]
  fn test_company_affiliations_deduplicated_in_first_seen_order() {
    let paper = paper(vec![
      author("A", &["Beta Pharma Ltd", "Acme Pharma Inc."]),
      author("B", &["Acme Pharma Inc.", "Gamma Corporation"]),
      author("A", &["Beta Pharma Ltd"]),
    ]);

    let row = build_row(&paper).unwrap();
    assert_eq!(row.company_affiliations, "Beta Pharma Ltd, Acme Pharma Inc., Gamma Corporation");
    assert_eq!(row.non_academic_authors, "A, B, A");
  }

  #[test]
  fn test_build_rows_filters_and_keeps_order() {
    let mut first = paper(vec![author("A", &["Acme Pharma Inc."])]);
    first.pmid = "1".to_string();
    let mut second = paper(vec![author("B", &["Example University"])]);
    second.pmid = "2".to_string();
    let mut third = paper(vec![author("C", &["Omega Genetics"])]);
    third.pmid = "3".to_string();

    let rows = build_rows(&[first, second, third]);
    let ids: Vec<_> = rows.iter().map(|row| row.pubmed_id.as_str()).collect();
    assert_eq!(ids, ["1", "3"]);
  }

  #[test]
  fn test_values_follow_columns() {
    let row = build_row(&paper(vec![author("A", &["Acme Pharma Inc."])])).unwrap();
    assert_eq!(row.values(), [
      "42",
      "On things",
      "2020-Unknown-Unknown",
      "A",
      "Acme Pharma Inc.",
      "x@acme.com"
    ]);
  }
}
