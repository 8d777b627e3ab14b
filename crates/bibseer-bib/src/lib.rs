use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BibError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no BibTeX entries found")]
    NoEntries,
}

/// Statistics about entries skipped during title extraction.
#[derive(Debug, Clone, Default)]
pub struct SkipStats {
    pub no_title: usize,
    pub total_raw: usize,
}

/// Titles pulled out of a bibliography, in entry order.
#[derive(Debug, Clone)]
pub struct TitleExtraction {
    pub titles: Vec<String>,
    pub skip_stats: SkipStats,
}

/// Extract the paper titles from a .bib file (BibTeX bibliography database).
///
/// Uses the `biblatex` crate for robust parsing with LaTeX accent decoding.
/// Entries without a title are counted and skipped.
pub fn extract_titles(path: &Path) -> Result<TitleExtraction, BibError> {
    let content = std::fs::read_to_string(path)?;
    extract_titles_from_str(&content)
}

/// Parse .bib content from a string.
pub fn extract_titles_from_str(content: &str) -> Result<TitleExtraction, BibError> {
    // Try parsing the whole file first (fast path)
    match biblatex::Bibliography::parse(content) {
        Ok(bibliography) => {
            let entries: Vec<_> = bibliography.iter().collect();
            if entries.is_empty() {
                return Err(BibError::NoEntries);
            }
            Ok(process_entries(&entries))
        }
        Err(_) => {
            // Fallback: split by @ entries and parse each individually.
            // Real .bib files often have minor syntax errors (extra braces,
            // missing @ prefix, non-standard entry types) that fail the
            // whole-file parse; salvage whatever parses on its own.
            parse_entries_individually(content)
        }
    }
}

/// Split .bib content into individual entry strings and parse each one.
fn parse_entries_individually(content: &str) -> Result<TitleExtraction, BibError> {
    static ENTRY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^@[a-zA-Z]").unwrap());

    let positions: Vec<usize> = ENTRY_RE.find_iter(content).map(|m| m.start()).collect();
    if positions.is_empty() {
        return Err(BibError::NoEntries);
    }

    let mut parsed_bibs = Vec::new();
    for i in 0..positions.len() {
        let start = positions[i];
        let end = if i + 1 < positions.len() {
            positions[i + 1]
        } else {
            content.len()
        };
        if let Ok(bib) = biblatex::Bibliography::parse(&content[start..end]) {
            parsed_bibs.push(bib);
        }
    }

    let entries: Vec<&biblatex::Entry> = parsed_bibs.iter().flat_map(|bib| bib.iter()).collect();
    if entries.is_empty() {
        return Err(BibError::NoEntries);
    }

    Ok(process_entries(&entries))
}

fn process_entries(entries: &[&biblatex::Entry]) -> TitleExtraction {
    let mut stats = SkipStats {
        total_raw: entries.len(),
        ..Default::default()
    };
    let mut titles = Vec::new();

    for entry in entries {
        let title = entry
            .title()
            .ok()
            .map(chunks_to_string)
            .map(|t| strip_latex(&t));

        match title {
            Some(t) if !t.is_empty() => titles.push(t),
            _ => stats.no_title += 1,
        }
    }

    TitleExtraction {
        titles,
        skip_stats: stats,
    }
}

/// Convert biblatex chunks to a plain string.
fn chunks_to_string(chunks: &[biblatex::Spanned<biblatex::Chunk>]) -> String {
    chunks
        .iter()
        .map(|c| match &c.v {
            biblatex::Chunk::Normal(s) => s.as_str(),
            biblatex::Chunk::Verbatim(s) => s.as_str(),
            biblatex::Chunk::Math(s) => s.as_str(),
        })
        .collect::<Vec<_>>()
        .join("")
}

/// Strip residual LaTeX markup from a title.
fn strip_latex(text: &str) -> String {
    let mut result = text.to_string();

    // \emph{X} / \textbf{X} / \textit{X} → X
    static STYLE_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\\(?:emph|textbf|textit)\s*\{([^}]*)\}").unwrap());
    result = STYLE_RE.replace_all(&result, "$1").to_string();

    result = result.replace("\\&", "&");
    result = result.replace("\\_", "_");
    result = result.replace('~', " ");

    // Remaining stray braces (BibTeX capitalization protection)
    result = result.replace(['{', '}'], "");

    // Collapse whitespace
    static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
    result = WS_RE.replace_all(&result, " ").to_string();

    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_extraction() {
        let bib = r#"
@article{vaswani2017,
  title={Attention Is All You Need},
  author={Vaswani, Ashish and Shazeer, Noam},
  journal={Advances in Neural Information Processing Systems},
  year={2017}
}

@inproceedings{devlin2019,
  title={BERT: Pre-training of Deep Bidirectional Transformers},
  author={Devlin, Jacob},
  year={2019}
}
"#;
        let result = extract_titles_from_str(bib).unwrap();
        assert_eq!(result.skip_stats.total_raw, 2);
        assert_eq!(
            result.titles,
            vec![
                "Attention Is All You Need",
                "BERT: Pre-training of Deep Bidirectional Transformers",
            ]
        );
    }

    #[test]
    fn test_entry_without_title_skipped() {
        let bib = r#"
@misc{notitle2020,
  author={Doe, John},
  year={2020}
}

@article{titled2021,
  title={A Paper With a Title},
  author={Doe, Jane},
  year={2021}
}
"#;
        let result = extract_titles_from_str(bib).unwrap();
        assert_eq!(result.skip_stats.total_raw, 2);
        assert_eq!(result.skip_stats.no_title, 1);
        assert_eq!(result.titles, vec!["A Paper With a Title"]);
    }

    #[test]
    fn test_strip_latex_braces_and_emph() {
        assert_eq!(strip_latex("{Perspective API}"), "Perspective API");
        assert_eq!(strip_latex("\\emph{Deep} Learning"), "Deep Learning");
        assert_eq!(
            strip_latex("Security \\& Privacy~Review"),
            "Security & Privacy Review"
        );
    }

    #[test]
    fn test_salvage_parse_recovers_good_entries() {
        // First entry is malformed (unbalanced brace); second should survive
        let bib = r#"
@article{broken2020,
  title={Unterminated {Brace,
  year={2020}
}

@article{good2021,
  title={A Recoverable Entry Title},
  author={Smith, Alice},
  year={2021}
}
"#;
        let result = extract_titles_from_str(bib).unwrap();
        assert!(
            result
                .titles
                .iter()
                .any(|t| t.contains("A Recoverable Entry Title")),
            "salvage parse should keep the well-formed entry: {:?}",
            result.titles
        );
    }

    #[test]
    fn test_not_a_bib_file() {
        assert!(matches!(
            extract_titles_from_str("plain prose, no entries"),
            Err(BibError::NoEntries)
        ));
    }

    #[test]
    fn test_entry_order_preserved() {
        let bib = r#"
@article{b, title={Second In File}, year={2001}}
@article{a, title={First In File}, year={2000}}
"#;
        let result = extract_titles_from_str(bib).unwrap();
        assert_eq!(result.titles, vec!["Second In File", "First In File"]);
    }
}
