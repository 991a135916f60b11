// src/unesco/page.rs

// --- Imports ---
use once_cell::sync::Lazy;
use reqwest::Url;
use scraper::{Html, Selector};

use crate::utils::error::ScrapeError;

// --- Constants ---
pub const UNESCO_BASE_URL: &str = "https://ich.unesco.org";
const FORM_ENTRY_MARKER: &str = "Nomination form:";
const ENGLISH_LINK_MARKER: &str = "English";

// --- CSS Selectors (Lazy Static) ---
static NOMINATION_SECTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.module-content.nomination-file")
        .expect("Failed to compile NOMINATION_SECTION_SELECTOR")
});

static LIST_ITEM_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("li").expect("Failed to compile LIST_ITEM_SELECTOR")
});

static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a[href]").expect("Failed to compile LINK_SELECTOR")
});

/// Finds the English nomination form link on an element page and returns it
/// as an absolute URL.
///
/// The page lists the nomination files in a `module-content nomination-file`
/// block; the form itself is the `li` labelled "Nomination form:", which holds
/// one link per language.
pub fn find_english_form_url(html: &str, page_url: &str) -> Result<String, ScrapeError> {
    let document = Html::parse_document(html);

    let section = document
        .select(&NOMINATION_SECTION_SELECTOR)
        .next()
        .ok_or_else(|| ScrapeError::SectionMissing(page_url.to_string()))?;

    let form_entry = section
        .select(&LIST_ITEM_SELECTOR)
        .find(|li| li.text().collect::<String>().contains(FORM_ENTRY_MARKER))
        .ok_or_else(|| ScrapeError::FormEntryMissing(page_url.to_string()))?;
    tracing::trace!("Found nomination form entry: {}", form_entry.html());

    let href = form_entry
        .select(&LINK_SELECTOR)
        .find(|a| a.text().collect::<String>().contains(ENGLISH_LINK_MARKER))
        .and_then(|a| a.value().attr("href"))
        .ok_or_else(|| ScrapeError::EnglishLinkMissing(page_url.to_string()))?;

    resolve_link(href.trim())
}

/// Resolves site-relative links against the UNESCO host.
pub fn resolve_link(href: &str) -> Result<String, ScrapeError> {
    let base = Url::parse(UNESCO_BASE_URL).map_err(|e| ScrapeError::InvalidUrl {
        url: UNESCO_BASE_URL.to_string(),
        reason: e.to_string(),
    })?;
    base.join(href)
        .map(String::from)
        .map_err(|e| ScrapeError::InvalidUrl { url: href.to_string(), reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <div class="module-content">Unrelated <a href="/doc/x">English</a></div>
        <div class="module-content nomination-file">
          <ul>
            <li>Decision: <a href="/en/decisions/5.COM/6.12">5.COM 6.12</a></li>
            <li>Nomination form:
              <a href="/doc/src/01234-FR.doc">French</a>
              <a href="/doc/src/01234-EN.doc">English</a>
            </li>
            <li>Consent of communities: <a href="/doc/src/consent.pdf">English</a></li>
          </ul>
        </div>
        </body></html>
    "#;

    #[test]
    fn english_form_link_is_resolved() {
        let url = find_english_form_url(PAGE, "https://ich.unesco.org/en/RL/falconry-00442").unwrap();
        assert_eq!(url, "https://ich.unesco.org/doc/src/01234-EN.doc");
    }

    #[test]
    fn absolute_links_are_kept() {
        assert_eq!(
            resolve_link("https://example.org/form.docx").unwrap(),
            "https://example.org/form.docx"
        );
    }

    #[test]
    fn missing_pieces_are_reported() {
        let no_section = "<html><body><div class='module-content'></div></body></html>";
        assert!(matches!(find_english_form_url(no_section, "p"), Err(ScrapeError::SectionMissing(_))));

        let no_entry = r#"<div class="module-content nomination-file"><ul><li>Photos</li></ul></div>"#;
        assert!(matches!(find_english_form_url(no_entry, "p"), Err(ScrapeError::FormEntryMissing(_))));

        let no_english = r#"<div class="module-content nomination-file"><ul>
            <li>Nomination form: <a href="/f.doc">French</a></li></ul></div>"#;
        assert!(matches!(find_english_form_url(no_english, "p"), Err(ScrapeError::EnglishLinkMissing(_))));
    }
}
