// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::scanned::ScanResult;
use crate::analysis::structure::DocumentRecord;
use crate::analysis::summary::SentenceRow;
use crate::extractors::catalog::SectionCatalog;
use crate::utils::error::StorageError;

const STRUCTURE_FIXED_COLUMNS: [&str; 4] = ["File Name", "File Type", "Word Count", "Line Count"];

/// One chunk of a document's extracted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedTextRow {
    #[serde(rename = "File Name")]
    pub file_name: String,
    #[serde(rename = "File Type")]
    pub file_type: String,
    #[serde(rename = "Part")]
    pub part: usize,
    #[serde(rename = "Extracted Text")]
    pub text: String,
}

#[derive(Debug, Serialize)]
struct ScanRow<'a> {
    #[serde(rename = "File Name")]
    file_name: &'a str,
    #[serde(rename = "Text-Based")]
    text_based: &'static str,
}

/// Sentence rows plus whether the file had a `Section` column.
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceTable {
    pub rows: Vec<SentenceRow>,
    pub has_sections: bool,
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Reads inputs and writes reports relative to one output directory.
pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    fn target(&self, file_name: &str) -> PathBuf {
        self.base_dir.join(file_name)
    }

    /// Writes the section presence report: fixed columns, then one Yes/No
    /// column per catalog section, one row per document in input order.
    pub fn save_structure_report(
        &self,
        file_name: &str,
        catalog: &SectionCatalog,
        records: &[DocumentRecord],
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.target(file_name);
        let mut writer = csv::Writer::from_path(&file_path)?;

        let header: Vec<&str> = STRUCTURE_FIXED_COLUMNS
            .iter()
            .copied()
            .chain(catalog.section_names())
            .collect();
        writer.write_record(&header)?;

        for record in records {
            let mut row = vec![
                record.file_name.clone(),
                record.file_type.to_string(),
                record.word_count.to_string(),
                record.line_count.to_string(),
            ];
            row.extend(catalog.section_names().map(|name| {
                yes_no(record.section_presence.get(name).unwrap_or(false)).to_string()
            }));
            writer.write_record(&row)?;
        }
        writer.flush()?;

        tracing::info!("Saved structure report ({} rows) to {}", records.len(), file_path.display());
        Ok(file_path)
    }

    pub fn save_scan_report(&self, file_name: &str, results: &[ScanResult]) -> Result<PathBuf, StorageError> {
        let file_path = self.target(file_name);
        let mut writer = csv::Writer::from_path(&file_path)?;
        for result in results {
            writer.serialize(ScanRow {
                file_name: &result.file_name,
                text_based: yes_no(result.text_based),
            })?;
        }
        writer.flush()?;

        tracing::info!("Saved text-vs-scanned report to {}", file_path.display());
        Ok(file_path)
    }

    pub fn save_extracted_text(&self, file_name: &str, rows: &[ExtractedTextRow]) -> Result<PathBuf, StorageError> {
        let file_path = self.target(file_name);
        let mut writer = csv::Writer::from_path(&file_path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        tracing::info!("Saved {} extracted text parts to {}", rows.len(), file_path.display());
        Ok(file_path)
    }

    pub fn load_extracted_text(&self, path: &Path) -> Result<Vec<ExtractedTextRow>, StorageError> {
        let mut reader = csv::Reader::from_path(path)?;
        let rows = reader.deserialize().collect::<Result<Vec<ExtractedTextRow>, _>>()?;
        Ok(rows)
    }

    pub fn save_text(&self, file_name: &str, contents: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.target(file_name);
        fs::write(&file_path, contents)?;
        tracing::info!("Saved text report to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves raw bytes (a downloaded form) and returns the written path.
    pub fn save_bytes(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let file_path = self.target(file_name);
        fs::write(&file_path, bytes)?;
        Ok(file_path)
    }
}

/// Reads the first column of a header-less CSV, skipping blank cells.
pub fn read_url_list(path: &Path) -> Result<Vec<String>, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut urls = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(url) = record.get(0).map(str::trim).filter(|u| !u.is_empty()) {
            urls.push(url.to_string());
        }
    }
    Ok(urls)
}

/// Reads a sentence CSV. `File Name` and `Sentence` are required columns.
pub fn read_sentences(path: &Path) -> Result<SentenceTable, StorageError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    for column in ["File Name", "Sentence"] {
        if !headers.iter().any(|h| h == column) {
            return Err(StorageError::MissingColumn {
                column: column.to_string(),
                path: path.display().to_string(),
            });
        }
    }
    let has_sections = headers.iter().any(|h| h == "Section");

    let rows = reader.deserialize().collect::<Result<Vec<SentenceRow>, _>>()?;
    Ok(SentenceTable { rows, has_sections })
}
