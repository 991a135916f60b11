// src/unesco/models.rs
use std::path::PathBuf;

const DEFAULT_FORM_EXTENSION: &str = ".docx";

/// A nomination form saved to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedForm {
    pub page_url: String,
    pub form_url: String,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Totals for one download run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownloadStats {
    pub downloaded: usize,
    pub skipped: usize,
}

/// File extension for a response `Content-Type`, falling back to `.docx`
/// when the header is missing or unknown.
pub fn extension_for_content_type(content_type: Option<&str>) -> &'static str {
    let Some(content_type) = content_type else {
        return DEFAULT_FORM_EXTENSION;
    };
    // Drop parameters such as "; charset=binary"
    let mime = content_type.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    match mime.as_str() {
        "application/pdf" => ".pdf",
        "application/msword" => ".doc",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => ".docx",
        "application/rtf" | "text/rtf" => ".rtf",
        "text/html" => ".html",
        "text/plain" => ".txt",
        _ => DEFAULT_FORM_EXTENSION,
    }
}

/// Local name for the n-th form of the URL list, e.g. `7.pdf`.
pub fn form_file_name(number: usize, extension: &str) -> String {
    format!("{}{}", number, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_map_to_extensions() {
        assert_eq!(extension_for_content_type(Some("application/pdf")), ".pdf");
        assert_eq!(extension_for_content_type(Some("application/msword; charset=binary")), ".doc");
        assert_eq!(
            extension_for_content_type(Some(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            )),
            ".docx"
        );
        assert_eq!(extension_for_content_type(Some("application/octet-stream")), ".docx");
        assert_eq!(extension_for_content_type(None), ".docx");
    }

    #[test]
    fn forms_are_numbered() {
        assert_eq!(form_file_name(12, ".pdf"), "12.pdf");
    }
}
