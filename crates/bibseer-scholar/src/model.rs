//! Typed view of the Google Scholar search response.
//!
//! Every field the service may omit is an `Option`, so missing-data handling
//! is exhaustive pattern matching rather than ad hoc key lookups. Fields the
//! tool does not consume are ignored during deserialization.

use serde::Deserialize;

/// A search response page. `organic_results` may be absent entirely
/// (no matches, or a captcha/error payload); that decodes as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScholarResponse {
    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,
}

/// One search result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganicResult {
    pub result_id: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub inline_links: Option<InlineLinks>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InlineLinks {
    pub cited_by: Option<CitedBy>,
}

/// Pointer to the follow-up query listing papers that cite a result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CitedBy {
    pub total: Option<u64>,
    pub serpapi_scholar_link: Option<String>,
}

impl OrganicResult {
    /// The result's "cited by" section, if the service returned one.
    pub fn cited_by(&self) -> Option<&CitedBy> {
        self.inline_links.as_ref()?.cited_by.as_ref()
    }

    /// Citations the service reports for this result, 0 when absent.
    pub fn citation_total(&self) -> u64 {
        self.cited_by().and_then(|c| c.total).unwrap_or(0)
    }
}
