// src/extractors/section.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractors::catalog::SectionCatalog;
use crate::extractors::similarity::{PartialRatio, SimilarityScorer};

// --- Constants ---
/// A variant matches when its whole-number score is strictly above this value.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 85.0;

static WHITESPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RUN_RE")
});

/// Lowercases and folds every whitespace run (line breaks, tabs, table
/// padding) into a single space.
pub fn normalize_text(text: &str) -> String {
    WHITESPACE_RUN_RE.replace_all(text.trim(), " ").to_lowercase()
}

// --- Data Structures ---
/// Presence flags for one document, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPresence {
    flags: Vec<(String, bool)>,
}

impl SectionPresence {
    /// Every section absent; used when no text could be extracted.
    pub fn absent(catalog: &SectionCatalog) -> Self {
        Self {
            flags: catalog.section_names().map(|name| (name.to_string(), false)).collect(),
        }
    }

    pub fn get(&self, canonical_name: &str) -> Option<bool> {
        self.flags
            .iter()
            .find(|(name, _)| name == canonical_name)
            .map(|(_, present)| *present)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(name, present)| (name.as_str(), *present))
    }

    pub fn present_count(&self) -> usize {
        self.iter().filter(|(_, present)| *present).count()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }
}

/// Decides which catalog sections appear in a document's text.
///
/// Holds only its scorer and threshold, so one classifier can be shared
/// across any number of documents (and threads).
#[derive(Debug, Clone)]
pub struct SectionClassifier<S = PartialRatio> {
    scorer: S,
    threshold: f64,
}

impl SectionClassifier<PartialRatio> {
    pub fn new() -> Self {
        Self { scorer: PartialRatio, threshold: DEFAULT_MATCH_THRESHOLD }
    }
}

impl Default for SectionClassifier<PartialRatio> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SimilarityScorer> SectionClassifier<S> {
    pub fn with_scorer(scorer: S, threshold: f64) -> Self {
        Self { scorer, threshold }
    }

    /// Flags each catalog section as present when any of its variants
    /// partially matches the text above the threshold.
    pub fn classify(&self, raw_text: &str, catalog: &SectionCatalog) -> SectionPresence {
        let text = normalize_text(raw_text);
        if text.is_empty() {
            tracing::debug!("Empty text, every section reported absent");
            return SectionPresence::absent(catalog);
        }

        let flags = catalog
            .entries()
            .iter()
            .map(|entry| {
                let present = entry
                    .variants()
                    .iter()
                    .any(|variant| self.variant_matches(&text, variant));
                tracing::trace!("Section '{}' present: {}", entry.canonical_name(), present);
                (entry.canonical_name().to_string(), present)
            })
            .collect();

        SectionPresence { flags }
    }

    // `any` stops at the first matching variant
    fn variant_matches(&self, normalized_text: &str, variant: &str) -> bool {
        let variant = normalize_text(variant);
        // Scores are compared as whole numbers, halves rounding to even
        let score = self.scorer.score(normalized_text, &variant).round_ties_even();
        if score > self.threshold {
            tracing::trace!("Variant '{}' matched with score {:.1}", variant, score);
            true
        } else {
            false
        }
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::catalog::SectionCatalogEntry;
    use std::cell::Cell;

    fn element_catalog() -> SectionCatalog {
        SectionCatalog::from_pairs(&[(
            "Name of Element",
            &["Name of Element", "Element Name", "Title of the Element"],
        )])
        .unwrap()
    }

    #[test]
    fn empty_text_reports_every_section_absent() {
        let catalog = SectionCatalog::nomination_form().unwrap();
        let presence = SectionClassifier::new().classify("", &catalog);
        assert_eq!(presence.len(), catalog.len());
        assert_eq!(presence.present_count(), 0);

        let presence = SectionClassifier::new().classify(" \n\t ", &catalog);
        assert_eq!(presence.present_count(), 0);
    }

    #[test]
    fn canonical_names_match_themselves_in_context() {
        let catalog = SectionCatalog::nomination_form().unwrap();
        let classifier = SectionClassifier::new();
        for entry in catalog.entries() {
            let text = format!("xx 12. {} -- (see annex) yy", entry.canonical_name().to_uppercase());
            let presence = classifier.classify(&text, &catalog);
            assert_eq!(
                presence.get(entry.canonical_name()),
                Some(true),
                "'{}' should self-match",
                entry.canonical_name()
            );
        }
    }

    #[test]
    fn variant_embedded_in_prose_is_found() {
        let presence = SectionClassifier::new().classify(
            "...Title of the Element: The Art of Falconry...",
            &element_catalog(),
        );
        assert_eq!(presence.get("Name of Element"), Some(true));
    }

    #[test]
    fn unrelated_prose_is_not_a_match() {
        let presence = SectionClassifier::new().classify(
            "This document discusses heritage practices broadly.",
            &element_catalog(),
        );
        assert_eq!(presence.get("Name of Element"), Some(false));
    }

    #[test]
    fn line_breaks_inside_headings_are_folded() {
        let presence = SectionClassifier::new().classify(
            "B.1\n  Name\n of\t\r\n Element |",
            &element_catalog(),
        );
        assert_eq!(presence.get("Name of Element"), Some(true));
    }

    #[test]
    fn classification_is_idempotent() {
        let catalog = SectionCatalog::nomination_form().unwrap();
        let classifier = SectionClassifier::new();
        let text = "Cession of rights. Contact Information follows. Documentation attached.";
        assert_eq!(classifier.classify(text, &catalog), classifier.classify(text, &catalog));
    }

    #[test]
    fn variant_order_does_not_change_the_result() {
        let forward = SectionCatalog::new(vec![SectionCatalogEntry::new(
            "Viability assessment",
            vec!["Viability assessment", "Sustainability Evaluation"],
        )
        .unwrap()])
        .unwrap();
        let reversed = SectionCatalog::new(vec![SectionCatalogEntry::new(
            "Viability assessment",
            vec!["Sustainability Evaluation", "Viability assessment"],
        )
        .unwrap()])
        .unwrap();

        let classifier = SectionClassifier::new();
        let text = "Part C: sustainability evaluation of the practice";
        assert_eq!(classifier.classify(text, &forward).get("Viability assessment"), Some(true));
        assert_eq!(classifier.classify(text, &reversed).get("Viability assessment"), Some(true));
    }

    struct CountingScorer {
        calls: Cell<usize>,
    }

    impl SimilarityScorer for CountingScorer {
        fn score(&self, _a: &str, _b: &str) -> f64 {
            self.calls.set(self.calls.get() + 1);
            100.0
        }
    }

    #[test]
    fn first_matching_variant_short_circuits() {
        let scorer = CountingScorer { calls: Cell::new(0) };
        let classifier = SectionClassifier::with_scorer(scorer, DEFAULT_MATCH_THRESHOLD);
        let presence = classifier.classify("anything", &element_catalog());
        assert_eq!(presence.get("Name of Element"), Some(true));
        assert_eq!(classifier.scorer.calls.get(), 1);
    }

    #[test]
    fn score_equal_to_threshold_is_not_a_match() {
        struct Fixed(f64);
        impl SimilarityScorer for Fixed {
            fn score(&self, _a: &str, _b: &str) -> f64 {
                self.0
            }
        }
        let at = SectionClassifier::with_scorer(Fixed(85.0), 85.0);
        assert_eq!(at.classify("text", &element_catalog()).present_count(), 0);
        let above = SectionClassifier::with_scorer(Fixed(86.0), 85.0);
        assert_eq!(above.classify("text", &element_catalog()).present_count(), 1);
    }

    #[test]
    fn fractional_scores_are_rounded_before_the_threshold() {
        struct Fixed(f64);
        impl SimilarityScorer for Fixed {
            fn score(&self, _a: &str, _b: &str) -> f64 {
                self.0
            }
        }
        let present = |score: f64| {
            SectionClassifier::with_scorer(Fixed(score), DEFAULT_MATCH_THRESHOLD)
                .classify("text", &element_catalog())
                .present_count()
                == 1
        };
        assert!(!present(85.4));
        // 85.5 rounds to the even neighbour, 86
        assert!(present(85.5));
        assert!(present(85.6));
    }

    #[test]
    fn near_miss_just_above_threshold_is_absent() {
        let catalog = SectionCatalog::from_pairs(&[(
            "Current and recent efforts to safeguard the element",
            &["Recent Conservation Efforts"],
        )])
        .unwrap();
        let text = "Part D. recent consxxxxtion efforts were made.";
        let raw = PartialRatio.score(&normalize_text(text), "recent conservation efforts");
        assert!(raw > 85.0 && raw < 85.5, "raw score {raw}");

        let presence = SectionClassifier::new().classify(text, &catalog);
        assert_eq!(presence.get("Current and recent efforts to safeguard the element"), Some(false));
    }

    #[test]
    fn absent_presence_keeps_catalog_order() {
        let catalog = SectionCatalog::nomination_form().unwrap();
        let absent = SectionPresence::absent(&catalog);
        let names: Vec<&str> = absent.iter().map(|(n, _)| n).collect();
        assert_eq!(names, catalog.section_names().collect::<Vec<_>>());
    }
}
