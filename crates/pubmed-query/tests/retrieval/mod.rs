use httpmock::prelude::*;
use serde_json::json;

use super::*;

fn entrez_for(server: &MockServer) -> Entrez {
  Entrez::new(
    Config::default()
      .with_base_url(server.url("/"))
      .with_email("tester@example.com")
      .with_api_key("key"),
  )
}

#[traced_test]
#[tokio::test]
async fn test_search_returns_ids() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when
        .method(GET)
        .path("/esearch.fcgi")
        .query_param("db", "pubmed")
        .query_param("term", "kras cancer")
        .query_param("retmax", "25")
        .query_param("retmode", "json")
        .query_param("email", "tester@example.com")
        .query_param("api_key", "key");
      then.status(200).header("Content-Type", "application/json").json_body(json!({
        "header": { "type": "esearch", "version": "0.3" },
        "esearchresult": { "count": "2", "retmax": "2", "idlist": ["38100001", "38100004"] }
      }));
    })
    .await;

  let ids = entrez_for(&server).search("kras cancer", 25).await;

  mock.assert_async().await;
  assert_eq!(ids, ["38100001", "38100004"]);
}

#[traced_test]
#[tokio::test]
async fn test_search_error_payload_is_empty() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.method(GET).path("/esearch.fcgi");
      then.status(200).json_body(json!({ "esearchresult": { "ERROR": "Invalid query" } }));
    })
    .await;

  assert!(entrez_for(&server).search("((", 10).await.is_empty());
  assert!(logs_contain("Invalid query"));
}

#[traced_test]
#[tokio::test]
async fn test_server_error_is_empty() {
  let server = MockServer::start_async().await;
  server
    .mock_async(|when, then| {
      when.path("/esearch.fcgi");
      then.status(500).body("boom");
    })
    .await;
  server
    .mock_async(|when, then| {
      when.path("/efetch.fcgi");
      then.status(429).body("slow down");
    })
    .await;
  let entrez = entrez_for(&server);

  assert!(entrez.search("anything", 10).await.is_empty());
  assert!(entrez.fetch(&["1".to_string()]).await.is_empty());
  assert!(logs_contain("esearch returned 500"));
  assert!(logs_contain("efetch returned 429"));
}

#[tokio::test]
async fn test_fetch_posts_ids_and_decodes_records() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when
        .method(POST)
        .path("/efetch.fcgi")
        .body_contains("id=38100001%2C38100004")
        .body_contains("retmode=xml");
      then.status(200).header("Content-Type", "text/xml").body(sample_xml());
    })
    .await;

  let records =
    entrez_for(&server).fetch(&["38100001".to_string(), "38100004".to_string()]).await;

  mock.assert_async().await;
  assert_eq!(records.len(), 4);
}

#[tokio::test]
async fn test_fetch_without_ids_makes_no_request() {
  let server = MockServer::start_async().await;
  let mock = server
    .mock_async(|when, then| {
      when.path("/efetch.fcgi");
      then.status(200).body(sample_xml());
    })
    .await;

  assert!(entrez_for(&server).fetch(&[]).await.is_empty());
  assert_eq!(mock.hits_async().await, 0);
}
