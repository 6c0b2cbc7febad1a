//! Normalized paper types and the record normalizer.
//!
//! [`normalize`] turns one [`RawRecord`] into a [`Paper`], filling in documented
//! defaults for anything the record leaves out:
//!
//! | Field               | Source path                                   | Default               |
//! |---------------------|-----------------------------------------------|-----------------------|
//! | `pmid`              | `MedlineCitation.PMID`                        | `"Unknown"`           |
//! | `title`             | `MedlineCitation.Article.ArticleTitle`        | `"No title available"`|
//! | `publication_date`  | `Article.Journal.JournalIssue.PubDate`        | `"Unknown"` per part  |
//! | `authors`           | `Article.AuthorList.Author`                   | empty                 |
//! | `corresponding_email` | affiliation text                            | empty                 |
//!
//! A record without `MedlineCitation` or `MedlineCitation.Article` is malformed.
//! [`normalize_all`] logs and drops such records and keeps going.
//!
//! # Examples
//!
//! ```
//! use pubmed_query::{paper::normalize, record::RawRecord};
//! use serde_json::json;
//!
//! let record = RawRecord::new(json!({
//!   "MedlineCitation": {
//!     "PMID": "31452104",
//!     "Article": { "Journal": { "JournalIssue": { "PubDate": { "Year": "2020" } } } }
//!   }
//! }));
//! let paper = normalize(&record).unwrap();
//! assert_eq!(paper.publication_date, "2020-Unknown-Unknown");
//! assert_eq!(paper.title, "No title available");
//! ```

use super::*;

/// Placeholder for a missing identifier or date component.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for a missing title.
pub const NO_TITLE: &str = "No title available";

lazy_static! {
  /// Heuristic email matcher, not an RFC 5322 validator.
  static ref EMAIL: Regex =
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
}

/// A paper author as listed in the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
  /// "First Last", or empty when the record gives neither part
  pub name:         String,
  /// Raw affiliation strings in record order
  pub affiliations: Vec<String>,
}

/// A normalized PubMed article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paper {
  /// PubMed identifier
  pub pmid:                String,
  /// Article title
  pub title:               String,
  /// `Year-Month-Day`, each part taken verbatim from the record or `"Unknown"`
  pub publication_date:    String,
  /// Valid authors in record order
  pub authors:             Vec<Author>,
  /// Best guess at the corresponding author's email, empty if none was found
  pub corresponding_email: String,
}

impl Paper {
  /// Every affiliation string of every author, in author-then-affiliation order.
  pub fn affiliations(&self) -> impl Iterator<Item = &str> {
    self.authors.iter().flat_map(|author| author.affiliations.iter().map(String::as_str))
  }
}

/// Normalizes one record into a [`Paper`].
///
/// Returns [`QueryError::MalformedRecord`] when the record has no
/// `MedlineCitation.Article` element or when its author structure cannot be read.
pub fn normalize(record: &RawRecord) -> Result<Paper> {
  let citation = record.root().node("MedlineCitation", "MedlineCitation")?;
  let article = citation.node("Article", "MedlineCitation.Article")?;

  let pmid = citation
    .get("PMID")
    .first_text()
    .filter(|pmid| !pmid.is_empty())
    .unwrap_or_else(|| UNKNOWN.to_string());

  let title = article
    .get("ArticleTitle")
    .text()
    .filter(|title| !title.is_empty())
    .unwrap_or_else(|| NO_TITLE.to_string());

  let pub_date = article.get("Journal").get("JournalIssue").get("PubDate");
  let publication_date = ["Year", "Month", "Day"]
    .iter()
    .map(|part| date_part(pub_date.get(part)))
    .collect::<Vec<_>>()
    .join("-");

  let authors = parse_authors(article.get("AuthorList"))?;
  let corresponding_email = extract_corresponding_email(&authors);

  Ok(Paper { pmid, title, publication_date, authors, corresponding_email })
}

/// Normalizes a batch of records, dropping (and logging) any that fail.
///
/// The relative order of the surviving records is preserved.
pub fn normalize_all(records: &[RawRecord]) -> Vec<Paper> {
  let mut papers = Vec::with_capacity(records.len());
  for (index, record) in records.iter().enumerate() {
    match normalize(record) {
      Ok(paper) => papers.push(paper),
      Err(e) => error!("Error parsing record {}, dropping record: {}", index, e),
    }
  }
  if papers.len() < records.len() {
    warn!("Dropped {} of {} records", records.len() - papers.len(), records.len());
  }
  papers
}

/// One `Year`/`Month`/`Day` component. Lists contribute their first element and
/// absent components become `"Unknown"`; values are never checked against a calendar.
fn date_part(field: Field<'_>) -> String {
  match field {
    Field::List(items) =>
      items.first().and_then(|first| Field::from(first).text()).unwrap_or_else(|| UNKNOWN.into()),
    other => other.text().unwrap_or_else(|| UNKNOWN.into()),
  }
}

fn parse_authors(author_list: Field<'_>) -> Result<Vec<Author>> {
  let mut authors = Vec::new();
  for entry in author_list.get("Author").items("AuthorList.Author")? {
    if entry.attribute("ValidYN").as_deref() == Some("N") {
      trace!("Skipping author marked invalid");
      continue;
    }

    let fore_name = entry.get("ForeName").text().unwrap_or_default();
    let last_name = entry.get("LastName").text().unwrap_or_default();
    let name = format!("{fore_name} {last_name}").trim().to_string();

    let mut affiliations = Vec::new();
    for info in entry.get("AffiliationInfo").items("Author.AffiliationInfo")? {
      if let Some(affiliation) = info.get("Affiliation").text().filter(|a| !a.is_empty()) {
        affiliations.push(affiliation);
      }
    }

    authors.push(Author { name, affiliations });
  }
  Ok(authors)
}

/// Picks the most likely corresponding-author email from affiliation text.
///
/// The first email in an affiliation mentioning "correspond" wins outright, even over
/// emails seen earlier in the scan. Without such an affiliation, the first email found
/// anywhere is used. Returns an empty string when no email appears at all.
///
/// ```
/// use pubmed_query::paper::{extract_corresponding_email, Author};
///
/// let authors = vec![Author {
///   name:         "Jane Doe".into(),
///   affiliations: vec![
///     "Acme Pharma Inc., contact: x@acme.com".into(),
///     "Correspondence: y@acme.com".into(),
///   ],
/// }];
/// assert_eq!(extract_corresponding_email(&authors), "y@acme.com");
/// ```
pub fn extract_corresponding_email(authors: &[Author]) -> String {
  let mut candidates = Vec::new();
  for affiliation in authors.iter().flat_map(|author| &author.affiliations) {
    let mut matches = EMAIL.find_iter(affiliation).map(|m| m.as_str());
    if affiliation.to_lowercase().contains("correspond") {
      if let Some(email) = matches.next() {
        return email.to_string();
      }
      continue;
    }
    candidates.extend(matches);
  }
  candidates.first().map(|email| email.to_string()).unwrap_or_default()
}
