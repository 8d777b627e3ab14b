use std::collections::HashMap;

use bibseer_scholar::OrganicResult;

/// Aggregate state for one citing paper.
///
/// `hits` counts how many distinct bibliography titles surfaced this paper.
/// `paper` is the record from the most recent hit; earlier records are
/// overwritten, not merged.
#[derive(Debug, Clone)]
pub struct CiterEntry {
    pub hits: usize,
    pub paper: OrganicResult,
}

/// Deduplication map for citing papers, keyed as in [`citer_key`].
///
/// Insertion order is preserved so a stable sort over the entries gives
/// deterministic tie-breaks.
#[derive(Debug, Default)]
pub struct CiterMap {
    index: HashMap<String, usize>,
    entries: Vec<(String, CiterEntry)>,
}

impl CiterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&CiterEntry> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Record one hit for `key`: increment the count (from 0 for unseen keys)
    /// and replace the stored record.
    pub fn record(&mut self, key: String, paper: OrganicResult) {
        match self.index.get(&key) {
            Some(&i) => {
                let entry = &mut self.entries[i].1;
                entry.hits += 1;
                entry.paper = paper;
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, CiterEntry { hits: 1, paper }));
            }
        }
    }

    /// Fold one expansion page into the map. Returns how many of its entries
    /// carried a usable key (the rest contribute nothing).
    pub fn fold(&mut self, results: Vec<OrganicResult>) -> usize {
        let mut folded = 0;
        for paper in results {
            if let Some(key) = citer_key(&paper) {
                self.record(key, paper);
                folded += 1;
            }
        }
        folded
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, CiterEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<(String, CiterEntry)> {
        self.entries
    }
}

/// Aggregation key for a citing paper: its link when present, else a
/// synthetic marker embedding the service's internal result id. A paper
/// with neither field has no identity and is skipped.
pub fn citer_key(paper: &OrganicResult) -> Option<String> {
    if let Some(link) = &paper.link {
        return Some(link.clone());
    }
    paper
        .result_id
        .as_ref()
        .map(|id| format!("No link found (id: {})", id))
}
