// src/analysis/scanned.rs
use crate::analysis::InputDocument;
use crate::extractors::text::TextExtractor;

/// Whether a document carries extractable text or is only scanned images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub file_name: String,
    pub text_based: bool,
}

/// A document is text-based when extraction succeeds and yields something
/// other than whitespace. Extraction failures count as not text-based.
pub fn check_documents(documents: &[InputDocument], extractor: &TextExtractor) -> Vec<ScanResult> {
    documents
        .iter()
        .map(|doc| {
            let text_based = match extractor.extract(&doc.path, doc.file_type) {
                Ok(text) => !text.trim().is_empty(),
                Err(e) => {
                    tracing::error!("Error processing {} {}: {}", doc.file_type, doc.path.display(), e);
                    false
                }
            };
            tracing::info!("{}: text-based = {}", doc.file_name, text_based);
            ScanResult { file_name: doc.file_name.clone(), text_based }
        })
        .collect()
}
