//! The aggregation driver: one search plus one cited-by expansion per
//! bibliography title, folded into a [`CiterMap`].

use bibseer_scholar::{ScholarClient, ScholarError, ScholarResponse};

use crate::citers::CiterMap;

/// Progress events emitted while the aggregator runs. The library emits,
/// the binary decides how to render.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A title's search request is about to be issued.
    Searching {
        index: usize,
        total: usize,
        title: String,
    },
    /// The search returned no organic results for this title.
    NoResults { index: usize, total: usize },
    /// The first result carried no cited-by link.
    NoCitationData { index: usize, total: usize },
    /// The cited-by expansion request is about to be issued.
    /// `url` is the rewritten link without the credential.
    Expanding {
        index: usize,
        total: usize,
        url: String,
    },
    /// An expansion page was folded into the aggregate.
    Folded {
        index: usize,
        total: usize,
        citers: usize,
        unique: usize,
    },
    /// A request for this title failed; the run continues with the next one.
    TitleFailed {
        index: usize,
        total: usize,
        title: String,
        error: String,
    },
}

/// Find the papers citing each of `titles` and aggregate them.
///
/// Titles are processed in input order, strictly sequentially: each request
/// is fully awaited before the next is issued. A failed request is fatal
/// only for its own title.
pub async fn collect_citers(
    client: &ScholarClient,
    titles: &[String],
    mut progress: impl FnMut(ProgressEvent),
) -> CiterMap {
    let total = titles.len();
    let mut map = CiterMap::new();

    for (index, title) in titles.iter().enumerate() {
        progress(ProgressEvent::Searching {
            index,
            total,
            title: title.clone(),
        });

        if let Err(e) = expand_title(client, title, index, total, &mut map, &mut progress).await {
            tracing::warn!(title = %title, error = %e, "citation search failed; skipping title");
            progress(ProgressEvent::TitleFailed {
                index,
                total,
                title: title.clone(),
                error: e.to_string(),
            });
        }
    }

    map
}

/// The two-step query for one title. Missing data at any step means the
/// title contributes nothing; only transport/decode failures return Err.
async fn expand_title(
    client: &ScholarClient,
    title: &str,
    index: usize,
    total: usize,
    map: &mut CiterMap,
    progress: &mut impl FnMut(ProgressEvent),
) -> Result<(), ScholarError> {
    let search = client.search_phrase(title).await?;

    let Some(link) = first_cited_by_link(&search) else {
        if search.organic_results.is_empty() {
            progress(ProgressEvent::NoResults { index, total });
        } else {
            progress(ProgressEvent::NoCitationData { index, total });
        }
        return Ok(());
    };
    let link = link.to_string();

    progress(ProgressEvent::Expanding {
        index,
        total,
        url: ScholarClient::strip_search_term(&link),
    });

    let citers = client.fetch_citers(&link).await?;
    let folded = map.fold(citers.organic_results);
    progress(ProgressEvent::Folded {
        index,
        total,
        citers: folded,
        unique: map.len(),
    });

    Ok(())
}

/// The cited-by link of the first organic result, if both exist.
fn first_cited_by_link(resp: &ScholarResponse) -> Option<&str> {
    resp.organic_results
        .first()?
        .cited_by()?
        .serpapi_scholar_link
        .as_deref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_cited_by_link_happy_path() {
        let resp: ScholarResponse = serde_json::from_str(
            r#"{"organic_results": [
                {"title": "A", "inline_links": {"cited_by": {
                    "total": 12,
                    "serpapi_scholar_link": "https://serpapi.com/search?cites=1"
                }}},
                {"title": "B", "inline_links": {"cited_by": {
                    "total": 99,
                    "serpapi_scholar_link": "https://serpapi.com/search?cites=2"
                }}}
            ]}"#,
        )
        .unwrap();
        // Only the first result is consulted
        assert_eq!(
            first_cited_by_link(&resp),
            Some("https://serpapi.com/search?cites=1")
        );
    }

    #[test]
    fn test_first_cited_by_link_no_results() {
        let resp: ScholarResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(first_cited_by_link(&resp), None);
    }

    #[test]
    fn test_first_cited_by_link_result_without_citation_data() {
        let resp: ScholarResponse =
            serde_json::from_str(r#"{"organic_results": [{"title": "A"}]}"#).unwrap();
        assert_eq!(first_cited_by_link(&resp), None);
    }

    #[test]
    fn test_first_cited_by_link_missing_link_field() {
        let resp: ScholarResponse = serde_json::from_str(
            r#"{"organic_results": [{"inline_links": {"cited_by": {"total": 3}}}]}"#,
        )
        .unwrap();
        assert_eq!(first_cited_by_link(&resp), None);
    }
}
