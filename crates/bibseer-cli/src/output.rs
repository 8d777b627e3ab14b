use std::io::Write;

use bibseer_bib::SkipStats;
use bibseer_core::{ProgressEvent, ReportStats};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the extraction summary after bibliography parsing.
pub fn print_extraction_summary(
    w: &mut dyn Write,
    file_name: &str,
    num_titles: usize,
    skip_stats: &SkipStats,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "Extracting titles from {}...", file_name)?;
    writeln!(w, "Found {} titles to search", num_titles)?;

    if skip_stats.no_title > 0 {
        let msg = format!("(Skipped {} entries without a title)", skip_stats.no_title);
        if color.enabled() {
            writeln!(w, "{}", msg.dimmed())?;
        } else {
            writeln!(w, "{}", msg)?;
        }
    }
    writeln!(w)
}

/// Print a real-time progress event.
pub fn print_progress(
    w: &mut dyn Write,
    event: &ProgressEvent,
    color: ColorMode,
) -> std::io::Result<()> {
    match event {
        ProgressEvent::Searching {
            index,
            total,
            title,
        } => {
            let short = if title.chars().count() > 50 {
                let head: String = title.chars().take(50).collect();
                format!("{}...", head)
            } else {
                title.clone()
            };
            writeln!(w, "[{}/{}] Searching: \"{}\"", index + 1, total, short)
        }
        ProgressEvent::NoResults { .. } => dim_line(w, "  -> no results", color),
        ProgressEvent::NoCitationData { .. } => dim_line(w, "  -> no citation data", color),
        ProgressEvent::Expanding { url, .. } => {
            // Eager trace of the expansion request, one bare URL per line
            writeln!(w, "{}", url)
        }
        ProgressEvent::Folded { citers, unique, .. } => dim_line(
            w,
            &format!("  -> {} citing papers ({} unique so far)", citers, unique),
            color,
        ),
        ProgressEvent::TitleFailed { title, error, .. } => {
            if color.enabled() {
                writeln!(
                    w,
                    "{} search failed for \"{}\": {}",
                    "WARNING:".yellow(),
                    title,
                    error
                )
            } else {
                writeln!(w, "WARNING: search failed for \"{}\": {}", title, error)
            }
        }
    }
}

/// Print the closing one-line summary.
pub fn print_run_summary(
    w: &mut dyn Write,
    searched: usize,
    with_citation_data: usize,
    report: ReportStats,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    let msg = format!(
        "Searched {} titles ({} with citation data): {} citers reported, {} self-citations suppressed",
        searched, with_citation_data, report.written, report.suppressed
    );
    if color.enabled() {
        writeln!(w, "{}", msg.bold())
    } else {
        writeln!(w, "{}", msg)
    }
}

fn dim_line(w: &mut dyn Write, msg: &str, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", msg.dimmed())
    } else {
        writeln!(w, "{}", msg)
    }
}
