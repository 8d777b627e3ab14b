//! SerpAPI Google Scholar client: typed response model plus the two request
//! shapes this tool needs (exact-phrase search, cited-by expansion).

pub mod client;
pub mod model;

use thiserror::Error;

pub use client::ScholarClient;
pub use model::{CitedBy, InlineLinks, OrganicResult, ScholarResponse};

#[derive(Error, Debug)]
pub enum ScholarError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search API returned HTTP {0}")]
    Status(reqwest::StatusCode),
}
