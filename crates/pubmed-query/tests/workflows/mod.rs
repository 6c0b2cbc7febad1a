use super::*;

#[traced_test]
#[test]
fn test_sample_normalization() {
  let papers = normalize_all(&sample_records());

  // The record without an `Article` element is dropped.
  let pmids: Vec<_> = papers.iter().map(|p| p.pmid.as_str()).collect();
  assert_eq!(pmids, ["38100001", "38100002", "38100004"]);
  assert!(logs_contain("dropping record"));

  let kras = &papers[0];
  assert_eq!(kras.title, "Targeting KRAS in pancreatic cancer.");
  assert_eq!(kras.publication_date, "2023-Dec-14");
  let names: Vec<_> = kras.authors.iter().map(|a| a.name.as_str()).collect();
  assert_eq!(names, ["Jane Doe", "Richard Roe", "Alex Smith"]);
  assert_eq!(kras.authors[1].affiliations.len(), 2);
  assert_eq!(kras.corresponding_email, "correspondence.roe@acme-pharma.com");

  assert_eq!(papers[1].publication_date, "Unknown-Unknown-Unknown");

  assert_eq!(papers[2].title, "No title available");
  assert_eq!(papers[2].publication_date, "2024-Unknown-Unknown");
  assert_eq!(papers[2].corresponding_email, "han@genomix.io");
}

#[test]
fn test_sample_rows() {
  let papers = normalize_all(&sample_records());
  let rows: Vec<OutputRow> = papers.iter().filter_map(build_row).collect();

  assert_eq!(rows.len(), 2);
  let kras = &rows[0];
  assert_eq!(kras.pubmed_id, "38100001");
  assert_eq!(kras.non_academic_authors, "Richard Roe, Alex Smith");
  assert_eq!(
    kras.company_affiliations,
    "Acme Pharmaceuticals Inc., Cambridge, MA, USA. richard.roe@acme-pharma.com., Electronic \
     address: correspondence.roe@acme-pharma.com."
  );
  assert_eq!(kras.corresponding_author_email, "correspondence.roe@acme-pharma.com");

  assert_eq!(rows[1].pubmed_id, "38100004");
  assert_eq!(rows[1].non_academic_authors, "Han Solo");
}

#[tokio::test]
async fn test_finder_against_mock_entrez() -> TestResult<()> {
  use httpmock::prelude::*;

  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/esearch.fcgi").query_param("term", "kras");
      then.status(200).json_body(serde_json::json!({
        "esearchresult": { "idlist": ["38100001", "38100002", "38100003", "38100004"] }
      }));
    })
    .await;
  server
    .mock_async(|when, then| {
      when.method(POST).path("/efetch.fcgi");
      then.status(200).body(sample_xml());
    })
    .await;

  let finder = Finder::new(Entrez::new(Config::default().with_base_url(server.url("/"))));
  let rows = finder.find("kras").await;
  let csv = format::to_csv_string(&rows)?;

  let mut lines = csv.lines();
  assert_eq!(
    lines.next(),
    Some(
      "PubmedID,Title,Publication Date,Non-academic Author(s),Company \
       Affiliation(s),Corresponding Author Email"
    )
  );
  assert!(lines
    .next()
    .unwrap()
    .starts_with("38100001,Targeting KRAS in pancreatic cancer.,2023-Dec-14,"));
  assert_eq!(
    lines.next(),
    Some(
      "38100004,No title available,2024-Unknown-Unknown,Han Solo,\"Genomix Genetics Company, San \
       Diego. han@genomix.io\",han@genomix.io"
    )
  );
  assert_eq!(lines.next(), None);
  Ok(())
}
