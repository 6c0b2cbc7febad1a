//! Search and fetch access to PubMed.
//!
//! The rest of the crate only sees the [`Source`] trait: a query yields record
//! identifiers and identifiers yield [`RawRecord`]s. Implementations absorb their own
//! failures, logging them and returning empty results, so a network outage never
//! reaches the normalizer as an error.
//!
//! [`Entrez`] is the production implementation backed by NCBI's E-utilities:
//!
//! ```no_run
//! use pubmed_query::{configuration::Config, retriever::{Entrez, Source}};
//!
//! # async fn example() {
//! let entrez = Entrez::new(Config::default().with_email("me@example.com"));
//! let ids = entrez.search("glioblastoma", 20).await;
//! let records = entrez.fetch(&ids).await;
//! println!("Fetched {} records", records.len());
//! # }
//! ```

use reqwest::{Response, Url};

use super::*;

pub mod xml;

/// Provider of PubMed identifiers and records.
#[async_trait]
pub trait Source: Send + Sync {
  /// Returns up to `max_results` identifiers matching `query`, or an empty list if
  /// the search fails.
  async fn search(&self, query: &str, max_results: usize) -> Vec<String>;

  /// Returns the records for `ids`, or an empty list if fetching fails. An empty
  /// `ids` slice yields an empty list without contacting the provider.
  async fn fetch(&self, ids: &[String]) -> Vec<RawRecord>;
}

/// Client for the Entrez `esearch` and `efetch` endpoints.
#[derive(Debug, Clone)]
pub struct Entrez {
  /// Endpoint, identification and limits
  config: Config,
  /// Shared HTTP connection pool
  client: reqwest::Client,
}

/// JSON body of an `esearch` response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
  esearchresult: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
  #[serde(default)]
  idlist: Vec<String>,
  #[serde(rename = "ERROR")]
  error:  Option<String>,
}

impl Entrez {
  /// Creates a client with a default HTTP client.
  pub fn new(config: Config) -> Self { Self::with_client(config, reqwest::Client::new()) }

  /// Creates a client reusing an existing HTTP client.
  pub fn with_client(config: Config, client: reqwest::Client) -> Self { Self { config, client } }

  /// Resolves an E-utilities endpoint such as `esearch.fcgi` against the base URL.
  fn endpoint(&self, name: &str) -> Result<Url> {
    let mut base = self.config.base_url.clone();
    if !base.ends_with('/') {
      base.push('/');
    }
    Url::parse(&base).and_then(|url| url.join(name)).map_err(|e| {
      QueryError::Config(format!("Invalid base URL {:?}: {}", self.config.base_url, e))
    })
  }

  /// Parameters NCBI expects on every request.
  fn common_params(&self) -> Vec<(&'static str, String)> {
    let mut params = vec![
      ("db", "pubmed".to_string()),
      ("tool", self.config.tool.clone()),
      ("email", self.config.email.clone()),
    ];
    if let Some(api_key) = &self.config.api_key {
      params.push(("api_key", api_key.clone()));
    }
    params
  }

  /// Runs an `esearch` query, returning the matching PMIDs.
  pub async fn try_search(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
    let url = self.endpoint("esearch.fcgi")?;
    let mut params = self.common_params();
    params.push(("term", query.to_string()));
    params.push(("retmax", max_results.to_string()));
    params.push(("retmode", "json".to_string()));

    debug!("Searching PubMed via {} for {:?}", url, query);
    let response = check_status(self.client.get(url).query(&params).send().await?, "esearch")?;
    let body: SearchResponse = serde_json::from_slice(&response.bytes().await?)?;

    match body.esearchresult {
      SearchResult { idlist, error: Some(error) } if idlist.is_empty() =>
        Err(QueryError::ApiError(error)),
      SearchResult { idlist, .. } => Ok(idlist),
    }
  }

  /// Runs an `efetch` request for `ids`, returning one record per article.
  ///
  /// Identifiers are sent as a form body so long identifier lists do not hit URL
  /// length limits.
  pub async fn try_fetch(&self, ids: &[String]) -> Result<Vec<RawRecord>> {
    let url = self.endpoint("efetch.fcgi")?;
    let mut params = self.common_params();
    params.push(("id", ids.join(",")));
    params.push(("retmode", "xml".to_string()));

    debug!("Fetching {} records via {}", ids.len(), url);
    let response = check_status(self.client.post(url).form(&params).send().await?, "efetch")?;
    let body = response.text().await?;
    trace!("efetch returned {} bytes", body.len());

    xml::parse_article_set(&body)
  }
}

/// Turns a non-success status into an [`QueryError::ApiError`].
fn check_status(response: Response, endpoint: &str) -> Result<Response> {
  let status = response.status();
  if status.is_success() {
    Ok(response)
  } else {
    Err(QueryError::ApiError(format!("{endpoint} returned {status}")))
  }
}

#[async_trait]
impl Source for Entrez {
  async fn search(&self, query: &str, max_results: usize) -> Vec<String> {
    match self.try_search(query, max_results).await {
      Ok(ids) => ids,
      Err(e) => {
        error!("Error searching PubMed: {}", e);
        Vec::new()
      },
    }
  }

  async fn fetch(&self, ids: &[String]) -> Vec<RawRecord> {
    if ids.is_empty() {
      return Vec::new();
    }
    match self.try_fetch(ids).await {
      Ok(records) => records,
      Err(e) => {
        error!("Error fetching papers: {}", e);
        Vec::new()
      },
    }
  }
}
