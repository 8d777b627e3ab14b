use std::collections::HashSet;
use std::io::Write;

use crate::normalize::normalize_title;
use crate::rank::RankedCiter;

pub const REPORT_HEADER: [&str; 4] = [
    "Num bib articles cited",
    "Num citations received",
    "Link",
    "Title",
];

/// Rows written vs. suppressed as self-citations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub written: usize,
    pub suppressed: usize,
}

/// Build the exclusion set from the bibliography's own titles.
pub fn normalized_title_set(titles: &[String]) -> HashSet<String> {
    titles.iter().map(|t| normalize_title(t)).collect()
}

/// Write the ranked citers as tab-separated lines, in rank order.
///
/// Entries whose normalized title is in `bib_titles` are dropped: those are
/// the bibliography's own papers resurfacing as "citers" via alternate
/// indexed copies.
pub fn write_report(
    w: &mut dyn Write,
    ranked: &[RankedCiter],
    bib_titles: &HashSet<String>,
) -> std::io::Result<ReportStats> {
    let mut stats = ReportStats::default();
    writeln!(w, "{}", REPORT_HEADER.join("\t"))?;

    for citer in ranked {
        let title = citer.paper.title.as_deref().unwrap_or("");
        if bib_titles.contains(&normalize_title(title)) {
            stats.suppressed += 1;
            continue;
        }
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            citer.hits, citer.total_citations, citer.key, title
        )?;
        stats.written += 1;
    }

    Ok(stats)
}
