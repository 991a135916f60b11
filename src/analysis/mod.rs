// src/analysis/mod.rs
pub mod export;
pub mod scanned;
pub mod structure;
pub mod summary;

use std::fs;
use std::path::{Path, PathBuf};

use crate::extractors::text::FileType;

/// A supported document found in the input folder.
#[derive(Debug, Clone, PartialEq)]
pub struct InputDocument {
    pub file_name: String,
    pub path: PathBuf,
    pub file_type: FileType,
}

/// Supported documents of a folder, in directory-listing order.
#[derive(Debug, Default)]
pub struct DocumentListing {
    pub documents: Vec<InputDocument>,
    pub skipped: Vec<String>,
}

/// Lists the folder without sorting. Files with an unsupported extension are
/// logged and reported in `skipped`; subdirectories are ignored.
pub fn list_documents(input_dir: &Path) -> Result<DocumentListing, std::io::Error> {
    let mut listing = DocumentListing::default();

    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            tracing::debug!("Skipping directory: {}", entry.path().display());
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        match FileType::from_file_name(&file_name) {
            Some(file_type) => listing.documents.push(InputDocument {
                file_name,
                path: entry.path(),
                file_type,
            }),
            None => {
                tracing::warn!("Skipping unsupported file: {}", file_name);
                listing.skipped.push(file_name);
            }
        }
    }

    tracing::info!(
        "Found {} supported documents in {} ({} skipped)",
        listing.documents.len(),
        input_dir.display(),
        listing.skipped.len()
    );
    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_files_and_directories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1.pdf"), b"x").unwrap();
        fs::write(dir.path().join("2.docx"), b"x").unwrap();
        fs::write(dir.path().join("3.doc"), b"x").unwrap();
        fs::write(dir.path().join("readme.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let listing = list_documents(dir.path()).unwrap();
        let mut names: Vec<_> = listing.documents.iter().map(|d| d.file_name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["1.pdf", "2.docx", "3.doc"]);
        assert_eq!(listing.skipped, vec!["readme.txt".to_string()]);
    }

    #[test]
    fn missing_folder_is_an_error() {
        assert!(list_documents(Path::new("/no/such/folder/anywhere")).is_err());
    }
}
