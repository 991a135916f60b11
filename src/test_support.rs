// src/test_support.rs
use std::path::Path;

use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};

/// Writes a real DOCX file with the given body paragraphs and an optional table.
pub fn write_docx(path: &Path, paragraphs: &[&str], table: &[&[&str]]) {
    let mut docx = Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
    }
    if !table.is_empty() {
        let rows = table
            .iter()
            .map(|cells| {
                TableRow::new(
                    cells
                        .iter()
                        .map(|c| TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(*c))))
                        .collect(),
                )
            })
            .collect();
        docx = docx.add_table(Table::new(rows));
    }
    let file = std::fs::File::create(path).expect("create docx fixture");
    docx.build().pack(file).expect("pack docx fixture");
}
