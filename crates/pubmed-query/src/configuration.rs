//! Client configuration for the Entrez E-utilities.
//!
//! NCBI asks every client to identify itself with a tool name and a contact email,
//! and accepts an optional API key for higher request allowances. These settings
//! live in a small TOML file:
//!
//! ```toml
//! base_url = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/"
//! email = "me@example.com"
//! tool = "pubmed-query"
//! api_key = "0123456789abcdef"
//! max_results = 500
//! ```

use super::*;

/// Default E-utilities endpoint.
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/";

/// Contact address sent when the user has not configured one.
pub const DEFAULT_EMAIL: &str = "your-email@example.com";

/// Settings shared by every Entrez request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Base URL the `esearch.fcgi`/`efetch.fcgi` endpoints are resolved against
  pub base_url:    String,
  /// Contact email reported to NCBI
  pub email:       String,
  /// Tool name reported to NCBI
  pub tool:        String,
  /// Optional NCBI API key
  #[serde(skip_serializing_if = "Option::is_none")]
  pub api_key:     Option<String>,
  /// Maximum number of identifiers a search asks for
  pub max_results: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      base_url:    DEFAULT_BASE_URL.to_string(),
      email:       DEFAULT_EMAIL.to_string(),
      tool:        env!("CARGO_PKG_NAME").to_string(),
      api_key:     None,
      max_results: DEFAULT_MAX_RESULTS,
    }
  }
}

impl Config {
  /// Location of the user's configuration file, e.g.
  /// `~/.config/pubmed-query/config.toml` on Linux.
  pub fn default_path() -> PathBuf {
    dirs::config_dir()
      .unwrap_or_else(|| PathBuf::from("."))
      .join(env!("CARGO_PKG_NAME"))
      .join("config.toml")
  }

  /// Reads a configuration from a TOML file. Keys missing from the file keep their
  /// default values.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
  }

  /// Loads the configuration at `path` when the file exists, otherwise returns the
  /// defaults.
  pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if path.exists() {
      Self::load(path)
    } else {
      trace!("No configuration at {}, using defaults", path.display());
      Ok(Self::default())
    }
  }

  /// Writes this configuration as TOML, creating parent directories as needed.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string(self)?)?;
    Ok(())
  }

  /// Sets the contact email.
  pub fn with_email(mut self, email: impl Into<String>) -> Self {
    self.email = email.into();
    self
  }

  /// Sets the NCBI API key.
  pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
    self.api_key = Some(api_key.into());
    self
  }

  /// Sets the E-utilities base URL.
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  /// Sets the maximum number of search hits.
  pub fn with_max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results;
    self
  }

  fn validate(&self) -> Result<()> {
    if self.base_url.trim().is_empty() {
      return Err(QueryError::Config("`base_url` must not be empty".to_string()));
    }
    if self.tool.trim().is_empty() {
      return Err(QueryError::Config("`tool` must not be empty".to_string()));
    }
    Ok(())
  }
}
