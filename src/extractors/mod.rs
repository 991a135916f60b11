// src/extractors/mod.rs
pub mod catalog;
pub mod section;
pub mod similarity;
pub mod text;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use catalog::{SectionCatalog, SectionCatalogEntry};
#[allow(unused_imports)]
pub use section::{SectionClassifier, SectionPresence, DEFAULT_MATCH_THRESHOLD};
#[allow(unused_imports)]
pub use similarity::{PartialRatio, SimilarityScorer};
#[allow(unused_imports)]
pub use text::{DocxScope, FileType, TextExtractor};
