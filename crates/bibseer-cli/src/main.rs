use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod output;

use output::ColorMode;

/// Find the papers that cite entries of a BibTeX bibliography.
///
/// Requires a SerpAPI (https://serpapi.com/) key to query Google Scholar.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the .bib file whose entries should be checked for citers
    bib_file: PathBuf,

    /// SerpAPI key (defaults to the SERP_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// Path to write the report to instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "bibseer=warn".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Resolve configuration: CLI flags > env vars
    let api_key = cli
        .api_key
        .or_else(|| std::env::var("SERP_API_KEY").ok())
        .filter(|k| !k.is_empty());
    let Some(api_key) = api_key else {
        anyhow::bail!("no SerpAPI key: pass --api-key or set SERP_API_KEY");
    };

    if !cli.bib_file.exists() {
        anyhow::bail!("File not found: {}", cli.bib_file.display());
    }

    let extraction = bibseer_bib::extract_titles(&cli.bib_file)
        .map_err(|e| anyhow::anyhow!("BibTeX extraction failed: {}", e))?;
    let titles = extraction.titles;

    // Determine color mode and writers. When the report goes to a file,
    // progress moves to stderr so the file stays pure TSV.
    let use_color = !cli.no_color && cli.output.is_none();
    let color = ColorMode(use_color);

    let mut report_writer: Box<dyn Write> = if let Some(ref output_path) = cli.output {
        Box::new(std::fs::File::create(output_path)?)
    } else {
        Box::new(std::io::stdout())
    };
    let mut progress_writer: Box<dyn Write> = if cli.output.is_some() {
        Box::new(std::io::stderr())
    } else {
        Box::new(std::io::stdout())
    };

    let file_name = cli
        .bib_file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| cli.bib_file.display().to_string());

    output::print_extraction_summary(
        &mut progress_writer,
        &file_name,
        titles.len(),
        &extraction.skip_stats,
        color,
    )?;

    if titles.is_empty() {
        writeln!(progress_writer, "No titles to search.")?;
        return Ok(());
    }

    let excluded = bibseer_core::normalized_title_set(&titles);
    let client = bibseer_scholar::ScholarClient::new(api_key)?;

    let mut titles_with_citers = 0usize;
    let map = bibseer_core::collect_citers(&client, &titles, |event| {
        if matches!(event, bibseer_core::ProgressEvent::Folded { .. }) {
            titles_with_citers += 1;
        }
        let _ = output::print_progress(&mut progress_writer, &event, color);
        let _ = progress_writer.flush();
    })
    .await;

    let ranked = bibseer_core::rank(map);

    writeln!(progress_writer)?;
    let stats = bibseer_core::write_report(&mut report_writer, &ranked, &excluded)?;
    report_writer.flush()?;

    output::print_run_summary(
        &mut progress_writer,
        titles.len(),
        titles_with_citers,
        stats,
        color,
    )?;

    Ok(())
}
