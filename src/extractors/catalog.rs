// src/extractors/catalog.rs

// --- Imports ---
use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::utils::error::CatalogError;

/// One expected section of a nomination form and the labels accepted for it.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionCatalogEntry {
    canonical_name: String,
    variants: Vec<String>,
}

impl SectionCatalogEntry {
    /// Builds an entry. The canonical name is put at the front of the
    /// variants when the caller left it out.
    pub fn new<S: Into<String>>(canonical_name: impl Into<String>, variants: Vec<S>) -> Result<Self, CatalogError> {
        let canonical_name = canonical_name.into();
        if canonical_name.trim().is_empty() {
            return Err(CatalogError::EmptyCanonicalName);
        }

        let mut variants: Vec<String> = variants
            .into_iter()
            .map(Into::into)
            .filter(|v: &String| !v.trim().is_empty())
            .collect();
        if variants.is_empty() {
            return Err(CatalogError::EmptyVariants(canonical_name));
        }
        if !variants.iter().any(|v| v == &canonical_name) {
            variants.insert(0, canonical_name.clone());
        }

        Ok(Self { canonical_name, variants })
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }
}

// Shape of an entry in a catalog JSON file
#[derive(Debug, Deserialize)]
struct RawEntry {
    canonical_name: String,
    #[serde(default)]
    variants: Vec<String>,
}

/// Validated, immutable list of expected sections, in report column order.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionCatalog {
    entries: Vec<SectionCatalogEntry>,
}

impl SectionCatalog {
    pub fn new(entries: Vec<SectionCatalogEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.canonical_name.as_str()) {
                return Err(CatalogError::DuplicateSection(entry.canonical_name.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Builds a catalog from `(canonical name, variants)` pairs.
    pub fn from_pairs(pairs: &[(&str, &[&str])]) -> Result<Self, CatalogError> {
        let entries = pairs
            .iter()
            .map(|(name, variants)| SectionCatalogEntry::new(*name, variants.to_vec()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    /// Loads a catalog from a JSON array of `{ "canonical_name", "variants" }` objects.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Load(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let raw_entries: Vec<RawEntry> = serde_json::from_str(raw)
            .map_err(|e| CatalogError::Load(e.to_string()))?;
        let entries = raw_entries
            .into_iter()
            .map(|e| SectionCatalogEntry::new(e.canonical_name, e.variants))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    /// The sections of the UNESCO intangible cultural heritage nomination form.
    pub fn nomination_form() -> Result<Self, CatalogError> {
        Self::from_pairs(NOMINATION_FORM_SECTIONS)
    }

    pub fn entries(&self) -> &[SectionCatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.canonical_name())
    }
}

const NOMINATION_FORM_SECTIONS: &[(&str, &[&str])] = &[
    ("State(s) Party(ies)", &["State(s) Party(ies)", "State Party", "Submitting State(s)"]),
    ("Name of Element", &["Name of Element", "Element Name", "Title of the Element", "Name of the element"]),
    (
        "Community(ies), group(s) or, if applicable, individual(s) concerned",
        &[
            "Community(ies), group(s) or, if applicable, individual(s) concerned",
            "Community Concerned",
            "Involved Communities",
            "Community Groups",
        ],
    ),
    (
        "Brief textual description of the nominated element",
        &["Brief textual description of the nominated element", "Brief Description", "Short Description", "Textual Summary"],
    ),
    (
        "Brief statement of the viability of the element, its need for safeguarding and the proposed safeguarding measures",
        &[
            "Brief statement of the viability of the element, its need for safeguarding and the proposed safeguarding measures",
            "Viability Statement",
            "Safeguarding Need",
            "Conservation Urgency",
        ],
    ),
    ("Identification of the Element", &["Identification of the Element", "Element Identification"]),
    ("Name of element", &["Name of element", "Element Name"]),
    ("Other name(s) of the element, if any", &["Other name(s) of the element, if any", "Alternative Names", "Other Names"]),
    (
        "Identification of the community(ies), group(s) or, if applicable, individual(s) concerned and their location",
        &[
            "Identification of the community(ies), group(s) or, if applicable, individual(s) concerned and their location",
            "Community Identification",
            "Community Location",
        ],
    ),
    (
        "Geographic location and range of the element",
        &["Geographic location and range of the element", "Geographic Location", "Element Location", "Range and Area"],
    ),
    ("Domain(s) represented by the element:", &["Domain(s) represented by the element:", "Cultural Domains", "Heritage Domains"]),
    ("Description of the element", &["Description of the element", "Element Description"]),
    (
        "Need for urgent safeguarding",
        &["Need for urgent safeguarding", "Urgent Safeguarding", "Conservation Need", "Protection Requirement"],
    ),
    ("Viability assessment", &["Viability assessment", "Sustainability Evaluation", "Element Viability"]),
    ("Threat and risk assessment", &["Threat and risk assessment", "Risk and Threats", "Endangerment Assessment"]),
    ("Safeguarding measures", &["Safeguarding measures", "Preservation Strategies"]),
    (
        "Current and recent efforts to safeguard the element",
        &["Current and recent efforts to safeguard the element", "Recent Conservation Efforts", "Past Safeguarding Actions"],
    ),
    (
        "Safeguarding measures proposed",
        &["Safeguarding measures proposed", "Planned Safeguarding Efforts", "Future Conservation Plans"],
    ),
    (
        "Commitments of States and of communities, groups or individuals concerned",
        &["Commitments of States and of communities, groups or individuals concerned", "State and Community Pledges"],
    ),
    (
        "Community involvement and consent",
        &["Community involvement and consent", "Community Participation", "Stakeholder Involvement"],
    ),
    (
        "Participation of communities, groups and individuals",
        &["Participation of communities, groups and individuals", "Local Engagement", "Community Efforts"],
    ),
    ("Free, prior and informed consent", &["Free, prior and informed consent", "Informed Consent", "Community Consent"]),
    (
        "Respect for customary practices governing access",
        &["Respect for customary practices governing access", "Customary Practices", "Traditional Governance of Access"],
    ),
    (
        "Inclusion on an inventory",
        &["Inclusion on an inventory", "Listed in Inventory", "Recorded in Heritage Inventory"],
    ),
    ("Documentation", &["Documentation", "Supporting Documents"]),
    (
        "Required and supplementary documentation",
        &["Required and supplementary documentation", "Supplementary Files", "Attached Materials"],
    ),
    ("Cession of rights", &["Cession of rights", "Transfer of Rights"]),
    ("List of additional resources", &["List of additional resources", "Additional References", "Extra Materials"]),
    ("Contact Information", &["Contact Information", "Point of Contact"]),
    ("Submitting State(s) Party(ies)", &["Submitting State(s) Party(ies)", "State Submitting"]),
    (
        "Contact person for correspondence",
        &["Contact person for correspondence", "Correspondence Contact", "Primary Contact"],
    ),
    ("Competent body involved", &["Competent body involved", "Responsible Organization", "Involved Authority"]),
    (
        "Concerned community organization(s) or representative(s)",
        &["Concerned community organization(s) or representative(s)", "Community Representatives"],
    ),
    (
        "Signature on behalf of the State(s) Party(ies)",
        &["Signature on behalf of the State(s) Party(ies)", "Official Signature"],
    ),
];
