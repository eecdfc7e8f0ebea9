// src/checker/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, so broken markup is parsed like a browser would
//
// We also use the `url` crate to resolve relative hrefs against the page URL.
//
// Every <a href> becomes one LinkCandidate, in document order. Repeated URLs
// are NOT merged: two anchors pointing at the same place are two candidates.
// =============================================================================

use crate::report::LinkCandidate;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

// Extracts all checkable links from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   base: the URL of the page (for resolving relative links)
//
// Example:
//   html = "<a href='/docs'> Docs </a>"
//   base = "https://example.com/page"
//   result = [LinkCandidate { url: "https://example.com/docs", text: "Docs" }]
pub fn extract_links(html: &str, base: &Url) -> Vec<LinkCandidate> {
    let document = Html::parse_document(html);

    // "a[href]" is a constant, known-good selector
    let selector = Selector::parse("a[href]").expect("anchor selector is valid");

    let mut links = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match resolve_url(base, href) {
            Some(url) if is_checkable_link(&url) => links.push(LinkCandidate {
                url: url.to_string(),
                text: anchor_text(element),
            }),
            Some(url) => debug!("Skipping non-http link {}", url),
            None => debug!("Skipping unresolvable href {:?}", href),
        }
    }

    links
}

// Resolves a possibly-relative href against the page URL
//
// Url::join handles both cases: an absolute href replaces the base entirely,
// a relative one is resolved the way a browser would.
//
// Examples (base = "https://example.com/page/"):
//   "/docs"              -> https://example.com/docs
//   "../other"           -> https://example.com/other
//   "https://other.com"  -> https://other.com/
//   "#top"               -> https://example.com/page/#top
//   "http://[bad"        -> None
fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    base.join(href).ok()
}

// Only http and https links can be probed. mailto:, tel:, javascript:,
// data: and friends are dropped without being counted anywhere.
fn is_checkable_link(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

// The anchor's text content with surrounding whitespace trimmed.
// An anchor wrapping only an image has empty text, which is fine.
fn anchor_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    fn urls(links: &[LinkCandidate]) -> Vec<&str> {
        links.iter().map(|l| l.url.as_str()).collect()
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<a href="https://www.rust-lang.org">Rust</a>"#;
        let links = extract_links(html, &base("https://example.com"));
        assert_eq!(
            links,
            vec![LinkCandidate {
                url: "https://www.rust-lang.org/".to_string(),
                text: "Rust".to_string(),
            }]
        );
    }

    #[test]
    fn test_resolve_relative_link() {
        let html = r#"<a href="/docs">Docs</a>"#;
        let links = extract_links(html, &base("https://example.com/page"));
        assert_eq!(urls(&links), vec!["https://example.com/docs"]);
    }

    #[test]
    fn test_skip_mailto_and_javascript() {
        let html = r#"
            <a href="mailto:a@b.com">Email</a>
            <a href="javascript:void(0)">Click</a>
            <a href="tel:+15551234">Call</a>
        "#;
        let links = extract_links(html, &base("https://example.com"));
        assert!(links.is_empty());
    }

    #[test]
    fn test_anchor_without_href_is_ignored() {
        let html = r#"<a name="top">Top</a><a href="/x">X</a>"#;
        let links = extract_links(html, &base("https://example.com"));
        assert_eq!(urls(&links), vec!["https://example.com/x"]);
    }

    #[test]
    fn test_unresolvable_href_is_dropped() {
        let html = r#"<a href="http://[bad">Bad</a><a href="/ok">Ok</a>"#;
        let links = extract_links(html, &base("https://example.com"));
        assert_eq!(urls(&links), vec!["https://example.com/ok"]);
        assert_eq!(links[0].text, "Ok");
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let html = r#"
            <a href="/a">First</a>
            <a href="/b">Second</a>
            <a href="/a">Again</a>
        "#;
        let links = extract_links(html, &base("https://example.com/"));
        assert_eq!(
            urls(&links),
            vec!["https://example.com/a", "https://example.com/b", "https://example.com/a"]
        );
        assert_eq!(links[2].text, "Again");
    }

    #[test]
    fn test_anchor_text_is_trimmed() {
        let html = "<a href=\"/docs\">\n    Read the <b>docs</b>   \n</a>";
        let links = extract_links(html, &base("https://example.com"));
        assert_eq!(links[0].text, "Read the docs");
    }

    #[test]
    fn test_empty_anchor_text_is_valid() {
        let html = r#"<a href="/logo"><img src="logo.png"></a>"#;
        let links = extract_links(html, &base("https://example.com"));
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "");
    }

    #[test]
    fn test_fragment_link_is_kept() {
        let html = r##"<a href="#section">Jump</a>"##;
        let links = extract_links(html, &base("https://example.com/page"));
        assert_eq!(urls(&links), vec!["https://example.com/page#section"]);
    }

    #[test]
    fn test_multiple_links() {
        let html = r#"
            <a href="https://rust-lang.org">Rust</a>
            <a href="/docs">Docs</a>
            <a href="../about">About</a>
        "#;
        let links = extract_links(html, &base("https://example.com/page/"));
        assert_eq!(
            urls(&links),
            vec![
                "https://rust-lang.org/",
                "https://example.com/docs",
                "https://example.com/about",
            ]
        );
    }
}
