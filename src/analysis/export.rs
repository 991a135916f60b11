// src/analysis/export.rs
use std::collections::HashSet;

use crate::analysis::InputDocument;
use crate::extractors::text::TextExtractor;
use crate::storage::ExtractedTextRow;

/// Keeps each CSV cell under spreadsheet cell limits.
pub const DEFAULT_MAX_CHARS_PER_PART: usize = 32_000;

/// Splits text into consecutive pieces of at most `max_chars` characters.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(max_chars).map(|c| c.iter().collect()).collect()
}

/// Extracts every document into numbered text parts. A failed extraction is
/// exported as its error message so the row still shows what happened.
pub fn extract_documents(
    documents: &[InputDocument],
    extractor: &TextExtractor,
    max_chars: usize,
) -> Vec<ExtractedTextRow> {
    let mut rows = Vec::new();
    for doc in documents {
        let text = match extractor.extract(&doc.path, doc.file_type) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("{}: {}", doc.file_name, e);
                e.to_string()
            }
        };

        let parts = chunk_text(&text, max_chars);
        tracing::info!("{}: {} characters in {} part(s)", doc.file_name, text.chars().count(), parts.len());
        rows.extend(parts.into_iter().enumerate().map(|(idx, part)| ExtractedTextRow {
            file_name: doc.file_name.clone(),
            file_type: doc.file_type.to_string(),
            part: idx + 1,
            text: part,
        }));
    }
    rows
}

/// Basic dataset figures for an extracted-text table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionStats {
    pub unique_files: usize,
    pub total_parts: usize,
    pub average_part_length: f64,
}

impl ExtractionStats {
    pub fn from_rows(rows: &[ExtractedTextRow]) -> Self {
        let unique_files = rows.iter().map(|r| r.file_name.as_str()).collect::<HashSet<_>>().len();
        let total_parts = rows.len();
        let average_part_length = if rows.is_empty() {
            0.0
        } else {
            rows.iter().map(|r| r.text.chars().count()).sum::<usize>() as f64 / total_parts as f64
        };
        Self { unique_files, total_parts, average_part_length }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::list_documents;
    use crate::test_support::write_docx;

    #[test]
    fn chunks_respect_char_boundaries() {
        assert!(chunk_text("", 5).is_empty());
        assert_eq!(chunk_text("abcdefg", 3), vec!["abc", "def", "g"]);
        assert_eq!(chunk_text("éééé", 3), vec!["ééé", "é"]);
    }

    #[test]
    fn failed_and_long_documents_become_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_docx(&dir.path().join("1.docx"), &["abcdefghij"], &[]);
        std::fs::write(dir.path().join("2.pdf"), b"broken").unwrap();

        let listing = list_documents(dir.path()).unwrap();
        let mut rows = extract_documents(&listing.documents, &TextExtractor::new(), 4);
        rows.sort_by(|a, b| (a.file_name.as_str(), a.part).cmp(&(b.file_name.as_str(), b.part)));

        let docx: Vec<_> = rows.iter().filter(|r| r.file_name == "1.docx").collect();
        assert_eq!(docx.iter().map(|r| r.part).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(docx.iter().map(|r| r.text.as_str()).collect::<String>(), "abcdefghij");

        let pdf: Vec<_> = rows.iter().filter(|r| r.file_name == "2.pdf").collect();
        assert_eq!(pdf[0].file_type, "PDF");
        assert!(pdf[0].text.starts_with("Erro"));

        let stats = ExtractionStats::from_rows(&rows);
        assert_eq!(stats.unique_files, 2);
        assert_eq!(stats.total_parts, rows.len());
    }
}
