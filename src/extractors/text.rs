// src/extractors/text.rs

// --- Imports ---
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::process::Command;

use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCell, TableCellContent, TableChild,
    TableRowChild,
};
use serde::Serialize;

use crate::utils::error::ExtractError;

// --- Constants ---
// Legacy Word binaries are converted by the external antiword tool
const ANTIWORD_BIN: &str = "antiword";
const TABLE_CELL_SEPARATOR: &str = " | ";

/// Document formats the pipeline knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FileType {
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "DOCX")]
    Docx,
    #[serde(rename = "DOC")]
    Doc,
}

impl FileType {
    /// Picks the format from the file name's extension. `.docx` is tested
    /// before `.doc` so the shorter suffix never shadows it.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        if file_name.ends_with(".pdf") {
            Some(FileType::Pdf)
        } else if file_name.ends_with(".docx") {
            Some(FileType::Docx)
        } else if file_name.ends_with(".doc") {
            Some(FileType::Doc)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "PDF",
            FileType::Docx => "DOCX",
            FileType::Doc => "DOC",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much of a DOCX file to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocxScope {
    /// Body paragraphs followed by every table row, cells joined with ` | `.
    ParagraphsAndTables,
    /// Body paragraphs followed by one line per table cell, empty cells included.
    ParagraphsAndCells,
    /// Body paragraphs only.
    ParagraphsOnly,
}

/// Turns a document file into plain text.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    docx_scope: DocxScope,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor {
    pub fn new() -> Self {
        Self { docx_scope: DocxScope::ParagraphsAndTables }
    }

    pub fn with_docx_scope(docx_scope: DocxScope) -> Self {
        Self { docx_scope }
    }

    /// Extracts the text of one file. Failures are returned, never raised,
    /// so a batch can record them and move on.
    pub fn extract(&self, path: &Path, file_type: FileType) -> Result<String, ExtractError> {
        tracing::debug!("Extracting {} text from {}", file_type, path.display());
        let text = match file_type {
            FileType::Pdf => extract_pdf(path),
            FileType::Docx => extract_docx(path, self.docx_scope),
            FileType::Doc => extract_doc(path),
        }?;
        tracing::debug!("Extracted {} characters from {}", text.len(), path.display());
        Ok(text)
    }
}

fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
    // pdf-extract panics on some malformed files instead of returning an error
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text(path)));
    match outcome {
        Ok(Ok(text)) => Ok(text.trim().to_string()),
        Ok(Err(e)) => Err(ExtractError::failure(FileType::Pdf, e.to_string())),
        Err(panic) => {
            let cause = panic
                .downcast_ref::<String>()
                .map(String::as_str)
                .or_else(|| panic.downcast_ref::<&str>().copied())
                .unwrap_or("PDF parser panicked");
            Err(ExtractError::failure(FileType::Pdf, cause))
        }
    }
}

fn extract_docx(path: &Path, scope: DocxScope) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(|e| ExtractError::failure(FileType::Docx, e.to_string()))?;
    let docx = docx_rs::read_docx(&bytes)
        .map_err(|e| ExtractError::failure(FileType::Docx, e.to_string()))?;

    let mut paragraphs = Vec::new();
    let mut tables = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => paragraphs.push(paragraph_text(p).trim().to_string()),
            DocumentChild::Table(t) => tables.push(t),
            other => tracing::trace!("Skipping document child: {:?}", other),
        }
    }

    let mut lines = paragraphs;
    for table in tables {
        match scope {
            DocxScope::ParagraphsAndTables => lines.extend(table_rows(table)),
            DocxScope::ParagraphsAndCells => lines.extend(table_cells(table)),
            DocxScope::ParagraphsOnly => {}
        }
    }

    Ok(lines.join("\n").trim().to_string())
}

/// Concatenated text runs of a paragraph; tabs and breaks become whitespace.
pub fn paragraph_text(p: &Paragraph) -> String {
    let mut text = String::new();
    for child in &p.children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        RunChild::Break(_) => text.push('\n'),
                        _ => {}
                    }
                }
            }
            other => tracing::trace!("Unhandled paragraph child: {:?}", other),
        }
    }
    text
}

/// One line per table row: the row's non-empty cells joined with ` | `.
pub fn table_rows(table: &Table) -> Vec<String> {
    let mut rows = Vec::new();
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        let mut cells = Vec::new();
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            let mut cell_text = Vec::new();
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(p) => cell_text.push(paragraph_text(p)),
                    TableCellContent::Table(nested) => cell_text.extend(table_rows(nested)),
                    other => tracing::trace!("Unhandled table cell content: {:?}", other),
                }
            }
            let cell_text = cell_text.join("\n").trim().to_string();
            if !cell_text.is_empty() {
                cells.push(cell_text);
            }
        }
        if !cells.is_empty() {
            rows.push(cells.join(TABLE_CELL_SEPARATOR));
        }
    }
    rows
}

/// One trimmed line per cell, row by row. Empty cells still yield a line.
pub fn table_cells(table: &Table) -> Vec<String> {
    let mut cells = Vec::new();
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            cells.push(cell_paragraphs(cell).trim().to_string());
        }
    }
    cells
}

// Paragraphs directly inside a cell; nested tables are not part of its text
fn cell_paragraphs(cell: &TableCell) -> String {
    cell.children
        .iter()
        .filter_map(|content| match content {
            TableCellContent::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn extract_doc(path: &Path) -> Result<String, ExtractError> {
    let output = Command::new(ANTIWORD_BIN)
        .arg(path)
        .output()
        .map_err(|e| ExtractError::failure(FileType::Doc, format!("failed to run {}: {}", ANTIWORD_BIN, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ExtractError::failure(
            FileType::Doc,
            format!("{} exited with {}: {}", ANTIWORD_BIN, output.status, stderr.trim()),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
