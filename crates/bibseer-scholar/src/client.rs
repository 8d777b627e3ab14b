use once_cell::sync::Lazy;
use regex::Regex;

use crate::ScholarError;
use crate::model::ScholarResponse;

const SERP_API_URL: &str = "https://serpapi.com/search";

const USER_AGENT: &str = concat!("bibseer/", env!("CARGO_PKG_VERSION"));

/// Client for the SerpAPI Google Scholar engine.
///
/// The credential is an explicit constructor argument; there is no
/// process-global key.
pub struct ScholarClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ScholarClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ScholarError> {
        Self::with_base_url(api_key, SERP_API_URL)
    }

    /// Client pointed at an alternate endpoint.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ScholarError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Search Google Scholar for the exact phrase of `title`
    /// (the title wrapped in quotation marks).
    pub async fn search_phrase(&self, title: &str) -> Result<ScholarResponse, ScholarError> {
        tracing::debug!(title, "scholar search");
        let query = format!("\"{}\"", title);
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[
                ("engine", "google_scholar"),
                ("api_key", self.api_key.as_str()),
                ("q", query.as_str()),
            ])
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Rewrite a `serpapi_scholar_link` for the expansion request: drop the
    /// embedded `q=` search term and everything after it. The credential is
    /// appended separately, at fetch time.
    pub fn strip_search_term(link: &str) -> String {
        static Q_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new("q=.*").unwrap());
        Q_TAIL.replace(link, "").into_owned()
    }

    /// Fetch the papers citing a result, via its `serpapi_scholar_link`.
    pub async fn fetch_citers(&self, link: &str) -> Result<ScholarResponse, ScholarError> {
        let stripped = Self::strip_search_term(link);
        tracing::debug!(link = %stripped, "cited-by expansion");
        let url = format!("{}&api_key={}", stripped, self.api_key);
        let resp = self.http.get(&url).send().await?;
        Self::decode(resp).await
    }

    async fn decode(resp: reqwest::Response) -> Result<ScholarResponse, ScholarError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(ScholarError::Status(status));
        }
        Ok(resp.json().await?)
    }
}

impl std::fmt::Debug for ScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScholarClient")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}
