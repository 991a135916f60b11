// src/utils/error.rs
use thiserror::Error;

use crate::extractors::text::FileType;

// Errors raised while scraping nomination pages and downloading forms
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error {status} for {url}")]
    Http { status: reqwest::StatusCode, url: String },

    #[error("No nomination file section found on {0}")]
    SectionMissing(String),

    #[error("No 'Nomination form:' entry found on {0}")]
    FormEntryMissing(String),

    #[error("No English nomination form found on {0}")]
    EnglishLinkMissing(String),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Text could not be pulled out of one document. The batch carries on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("Error extracting {file_type}: {cause}")]
    ExtractionFailure { file_type: FileType, cause: String },
}

impl ExtractError {
    pub fn failure(file_type: FileType, cause: impl Into<String>) -> Self {
        ExtractError::ExtractionFailure { file_type, cause: cause.into() }
    }
}

// Raised when the section catalog is built; never per document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Section catalog is empty")]
    EmptyCatalog,

    #[error("Section catalog entry has an empty canonical name")]
    EmptyCanonicalName,

    #[error("Section '{0}' has no variants")]
    EmptyVariants(String),

    #[error("Section '{0}' appears more than once in the catalog")]
    DuplicateSection(String),

    #[error("Failed to read catalog file: {0}")]
    Load(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing column '{column}' in {path}")]
    MissingColumn { column: String, path: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scraping failed: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("Catalog misconfiguration: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
