//! HTML extractor for SEO signals
//!
//! This module parses a fetched page and extracts:
//! - The document title
//! - The `title` and `description` meta tags
//! - The robots meta directive, reduced to an indexability flag

use html5ever::driver::{self, ParseOpts};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use scraper::{ElementRef, Html, Selector};

/// SEO fields extracted from an HTML page
///
/// Missing values are empty strings, never absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    /// Text of the first `<title>` element, trimmed
    pub title: String,

    /// Content of `<meta name="title">`, trimmed
    pub meta_title: String,

    /// Content of `<meta name="description">`, trimmed
    pub meta_description: String,

    /// False when `<meta name="robots">` contains `noindex`
    pub indexable: bool,
}

impl Default for ExtractedFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            meta_title: String::new(),
            meta_description: String::new(),
            indexable: true,
        }
    }
}

/// Parses HTML content and extracts the SEO fields
///
/// Parsing is best-effort: malformed markup (unclosed tags, stray text,
/// missing `<head>`) never fails, it only leaves fields empty.
///
/// # Extraction Rules
///
/// - `title`: text content of the first `<title>` element
/// - `meta_title` / `meta_description`: `content` attribute of the first
///   `<meta>` whose `name` is exactly `title` / `description`
///   (case-sensitive)
/// - `indexable`: the first `<meta name="robots">` has its `content`
///   lower-cased and searched for `noindex`; no robots tag means indexable
///
/// # Example
///
/// ```
/// use seo_audit::audit::extract;
///
/// let html = r#"<html><head><title> Hi </title></head></html>"#;
/// let fields = extract(html);
/// assert_eq!(fields.title, "Hi");
/// assert!(fields.indexable);
/// ```
pub fn extract(html: &str) -> ExtractedFields {
    let document = parse_document(html);

    let robots = find_meta(&document, "robots");
    let indexable = !robots
        .and_then(|element| element.value().attr("content"))
        .unwrap_or("")
        .to_lowercase()
        .contains("noindex");

    ExtractedFields {
        title: extract_title(&document),
        meta_title: meta_content(&document, "title"),
        meta_description: meta_content(&document, "description"),
        indexable,
    }
}

/// Parses a document with scripting disabled
///
/// `<noscript>` children are then parsed as elements rather than raw text,
/// so meta tags placed inside `<noscript>` are still found.
fn parse_document(html: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };

    driver::parse_document(Html::new_document(), opts).one(html)
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Returns the trimmed `content` of the first meta tag with the given name
fn meta_content(document: &Html, name: &str) -> String {
    find_meta(document, name)
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default()
}

/// Finds the first `<meta>` element whose `name` attribute equals `name`
///
/// The comparison is done here rather than in the selector so that it stays
/// an exact, case-sensitive match on the attribute value.
fn find_meta<'a>(document: &'a Html, name: &str) -> Option<ElementRef<'a>> {
    let meta_selector = Selector::parse("meta[name]").ok()?;

    document
        .select(&meta_selector)
        .find(|element| element.value().attr("name") == Some(name))
}
