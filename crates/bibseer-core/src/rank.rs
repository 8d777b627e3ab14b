use bibseer_scholar::OrganicResult;

use crate::citers::CiterMap;

/// One citing paper with its final ranking fields.
#[derive(Debug, Clone)]
pub struct RankedCiter {
    pub key: String,
    pub hits: usize,
    pub total_citations: u64,
    pub paper: OrganicResult,
}

/// Order citers by hit count, then by their own total citation count, both
/// descending. The sort is stable, so exact ties keep aggregation order.
pub fn rank(map: CiterMap) -> Vec<RankedCiter> {
    let mut ranked: Vec<RankedCiter> = map
        .into_entries()
        .into_iter()
        .map(|(key, entry)| RankedCiter {
            key,
            hits: entry.hits,
            total_citations: entry.paper.citation_total(),
            paper: entry.paper,
        })
        .collect();

    ranked.sort_by(|a, b| (b.hits, b.total_citations).cmp(&(a.hits, a.total_citations)));
    ranked
}
