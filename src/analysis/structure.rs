// src/analysis/structure.rs

// --- Imports ---
use crate::analysis::InputDocument;
use crate::extractors::catalog::SectionCatalog;
use crate::extractors::section::{SectionClassifier, SectionPresence};
use crate::extractors::similarity::SimilarityScorer;
use crate::extractors::text::{FileType, TextExtractor};
use crate::utils::error::ExtractError;

/// Outcome of checking one document against the section catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    pub file_name: String,
    pub file_type: FileType,
    pub raw_text: Result<String, ExtractError>,
    pub word_count: usize,
    pub line_count: usize,
    pub section_presence: SectionPresence,
}

impl DocumentRecord {
    /// Derives counts and presence flags from the extraction result. A failed
    /// extraction yields zero counts and every section absent.
    pub fn build<S: SimilarityScorer>(
        file_name: impl Into<String>,
        file_type: FileType,
        raw_text: Result<String, ExtractError>,
        classifier: &SectionClassifier<S>,
        catalog: &SectionCatalog,
    ) -> Self {
        let (word_count, line_count, section_presence) = match &raw_text {
            Ok(text) => (
                word_count(text),
                line_count(text),
                classifier.classify(text, catalog),
            ),
            Err(_) => (0, 0, SectionPresence::absent(catalog)),
        };

        Self {
            file_name: file_name.into(),
            file_type,
            raw_text,
            word_count,
            line_count,
            section_presence,
        }
    }

    pub fn extraction_failed(&self) -> bool {
        self.raw_text.is_err()
    }
}

/// Whitespace-separated tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `\n`-separated lines; zero for empty text.
pub fn line_count(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.split('\n').count()
    }
}

/// Totals for one structure run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StructureStats {
    pub processed: usize,
    pub failed: usize,
}

/// Runs every document through extraction and classification, one at a time,
/// keeping input order.
pub fn analyze_documents<S: SimilarityScorer>(
    documents: &[InputDocument],
    extractor: &TextExtractor,
    classifier: &SectionClassifier<S>,
    catalog: &SectionCatalog,
) -> (Vec<DocumentRecord>, StructureStats) {
    let mut records = Vec::with_capacity(documents.len());
    let mut stats = StructureStats::default();

    for doc in documents {
        tracing::info!("Analyzing structure of {} ({})", doc.file_name, doc.file_type);
        let raw_text = extractor.extract(&doc.path, doc.file_type);
        if let Err(e) = &raw_text {
            tracing::error!("{}: {}", doc.file_name, e);
        }

        let record = DocumentRecord::build(doc.file_name.clone(), doc.file_type, raw_text, classifier, catalog);
        if record.extraction_failed() {
            stats.failed += 1;
        }
        tracing::debug!(
            "{}: {} words, {} lines, {}/{} sections present",
            record.file_name,
            record.word_count,
            record.line_count,
            record.section_presence.present_count(),
            record.section_presence.len()
        );
        stats.processed += 1;
        records.push(record);
    }

    (records, stats)
}
