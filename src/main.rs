// src/main.rs
mod analysis;
mod extractors;
mod storage;
mod unesco;
mod utils;

#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use analysis::export::{self, ExtractionStats, DEFAULT_MAX_CHARS_PER_PART};
use analysis::{list_documents, scanned, structure, summary};
use extractors::{
    DocxScope, PartialRatio, SectionCatalog, SectionClassifier, TextExtractor, DEFAULT_MATCH_THRESHOLD,
};
use storage::StorageManager;
use utils::AppError;

/// Scrapes, extracts and analyses UNESCO intangible heritage nomination forms
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory that reports are written to
    #[arg(short, long, global = true, default_value = ".")]
    output_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Folder holding the nomination forms (.pdf, .docx, .doc)
    #[arg(short, long, env = "NOMINATION_FORMS_DIR", default_value = "nomination_forms")]
    input_dir: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the English nomination form of every page in a URL list
    Download {
        /// Single-column CSV of element page URLs (no header)
        #[arg(long, default_value = "urls.csv")]
        urls: PathBuf,

        /// Folder the forms are saved to
        #[arg(long, env = "NOMINATION_FORMS_DIR", default_value = "nomination_forms")]
        forms_dir: PathBuf,

        /// Pause between pages, in milliseconds
        #[arg(long, default_value_t = 1000)]
        delay_ms: u64,
    },

    /// Extract the text of every form into a chunked CSV
    Extract {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, default_value = "extracted_text.csv")]
        output: String,

        /// Longest text chunk per CSV row, in characters
        #[arg(long, default_value_t = DEFAULT_MAX_CHARS_PER_PART)]
        max_chars: usize,
    },

    /// Check which expected sections each form contains
    Structure {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, default_value = "nomination_structure_summary.csv")]
        output: String,

        /// JSON section catalog to use instead of the built-in nomination form sections
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Score (0-100) a section label must exceed to count as present
        #[arg(long, env = "NOMINATION_MATCH_THRESHOLD", default_value_t = DEFAULT_MATCH_THRESHOLD)]
        threshold: f64,
    },

    /// Tell text-based forms apart from scanned ones
    ScanCheck {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, default_value = "file_text_vs_scanned.csv")]
        output: String,
    },

    /// Summarise a sentence CSV (File Name, Sentence[, Section])
    Summarize {
        #[arg(long, default_value = "extracted_text.csv")]
        input: PathBuf,

        #[arg(long, default_value = "summary.txt")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let cli = Cli::parse();
    tracing::info!("Starting processing for args: {:?}", cli);

    // 3. Initialize storage
    let storage = StorageManager::new(&cli.output_dir)?;

    // 4. Run the selected job
    match cli.command {
        Command::Download { urls, forms_dir, delay_ms } => {
            run_download(&urls, &forms_dir, Duration::from_millis(delay_ms)).await
        }
        Command::Extract { input, output, max_chars } => run_extract(&storage, &input.input_dir, &output, max_chars),
        Command::Structure { input, output, catalog, threshold } => {
            run_structure(&storage, &input.input_dir, &output, catalog.as_deref(), threshold)
        }
        Command::ScanCheck { input, output } => run_scan_check(&storage, &input.input_dir, &output),
        Command::Summarize { input, output } => run_summarize(&storage, &input, &output),
    }
}

async fn run_download(urls: &Path, forms_dir: &Path, delay: Duration) -> Result<(), AppError> {
    let page_urls = storage::read_url_list(urls)?;
    tracing::info!("Loaded {} page URLs from {}", page_urls.len(), urls.display());
    if page_urls.is_empty() {
        return Err(AppError::Config(format!("No URLs found in {}", urls.display())));
    }

    let (forms, stats) = unesco::client::download_all(&page_urls, forms_dir, delay).await?;
    for form in &forms {
        tracing::debug!("{} -> {} ({} bytes, form {})", form.page_url, form.path.display(), form.bytes, form.form_url);
    }
    tracing::info!("Downloading complete. Downloaded: {}, Skipped: {}", stats.downloaded, stats.skipped);
    Ok(())
}

fn run_extract(storage: &StorageManager, input_dir: &Path, output: &str, max_chars: usize) -> Result<(), AppError> {
    if max_chars == 0 {
        return Err(AppError::Config("--max-chars must be greater than zero".to_string()));
    }

    let listing = list_documents(input_dir)?;
    let rows = export::extract_documents(&listing.documents, &TextExtractor::new(), max_chars);
    let path = storage.save_extracted_text(output, &rows)?;
    tracing::info!("Text extraction complete! Results saved to {}", path.display());

    // Re-read what was written for the dataset figures
    let stats = ExtractionStats::from_rows(&storage.load_extracted_text(&path)?);
    tracing::info!("Total Unique Files: {}", stats.unique_files);
    tracing::info!("Total Text Parts: {}", stats.total_parts);
    tracing::info!("Average Text Length per Part: {:.2} characters", stats.average_part_length);
    Ok(())
}

fn run_structure(
    storage: &StorageManager,
    input_dir: &Path,
    output: &str,
    catalog_path: Option<&Path>,
    threshold: f64,
) -> Result<(), AppError> {
    // Threshold and catalog are validated before any document is touched
    let threshold = validate_threshold(threshold)?;
    let catalog = load_catalog(catalog_path)?;
    tracing::info!("Using a catalog of {} sections, threshold {}", catalog.len(), threshold);

    let listing = list_documents(input_dir)?;
    let classifier = SectionClassifier::with_scorer(PartialRatio, threshold);
    // Table cells are counted one per line, as separate words
    let extractor = TextExtractor::with_docx_scope(DocxScope::ParagraphsAndCells);
    let (records, stats) = structure::analyze_documents(&listing.documents, &extractor, &classifier, &catalog);

    let path = storage.save_structure_report(output, &catalog, &records)?;
    tracing::info!(
        "File structure analysis complete! Processed: {}, Extraction failures: {}, Skipped: {}. Results saved to {}",
        stats.processed,
        stats.failed,
        listing.skipped.len(),
        path.display()
    );
    Ok(())
}

fn validate_threshold(threshold: f64) -> Result<f64, AppError> {
    // NaN fails the range check too
    if !(0.0..=100.0).contains(&threshold) {
        return Err(AppError::Config(format!("Match threshold {} is outside 0-100", threshold)));
    }
    Ok(threshold)
}

fn load_catalog(catalog_path: Option<&Path>) -> Result<SectionCatalog, AppError> {
    let catalog = match catalog_path {
        Some(path) => SectionCatalog::from_json_file(path)?,
        None => SectionCatalog::nomination_form()?,
    };
    Ok(catalog)
}

fn run_scan_check(storage: &StorageManager, input_dir: &Path, output: &str) -> Result<(), AppError> {
    let listing = list_documents(input_dir)?;
    let extractor = TextExtractor::with_docx_scope(DocxScope::ParagraphsOnly);
    let results = scanned::check_documents(&listing.documents, &extractor);

    let text_based = results.iter().filter(|r| r.text_based).count();
    let path = storage.save_scan_report(output, &results)?;
    tracing::info!(
        "File check complete! {} of {} files are text-based. Results saved to {}",
        text_based,
        results.len(),
        path.display()
    );
    Ok(())
}

fn run_summarize(storage: &StorageManager, input: &Path, output: &str) -> Result<(), AppError> {
    let table = storage::read_sentences(input)?;
    let report = summary::summarize(&table.rows, table.has_sections);

    let text = format!(
        "Generated: {}\n{}",
        chrono::Utc::now().to_rfc3339(),
        report.render()
    );
    tracing::info!("{}", text);

    let path = storage.save_text(output, &text)?;
    tracing::info!("Summary saved to {}", path.display());
    Ok(())
}
