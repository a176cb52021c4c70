// src/extract/html.rs
// =============================================================================
// This module turns a fetched HTML document into a PageContent.
//
// What we pull out:
// - <p> paragraphs, <h1>..<h6> headings and <li> items, in document order
// - <a href> links, resolved to absolute URLs
// - sentence fragments from <div> elements (see extract_divs below)
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Never fails: broken markup is repaired the way a browser would
// - Supports CSS selectors for finding elements
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use std::cmp::Reverse;
use std::collections::BTreeSet;
use url::Url;

use super::page::PageContent;

// Fragments this short are navigation crumbs, not content
const MIN_FRAGMENT_CHARS: usize = 5;

// Elements whose text never shows up on screen
const HIDDEN_TEXT_PARENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Extracts a PageContent from an HTML document
///
/// Parameters:
///   html: the raw document
///   page_url: the canonical URL the page is recorded under
///   link_base: the URL relative hrefs are resolved against (the final
///              URL after redirects)
pub fn extract_page(html: &str, page_url: &str, link_base: &Url) -> PageContent {
    let document = Html::parse_document(html);

    PageContent {
        url: page_url.to_string(),
        paragraphs: select_texts(&document, "p"),
        links: extract_links(&document, link_base),
        headings: select_texts(&document, "h1, h2, h3, h4, h5, h6"),
        lists: select_texts(&document, "li"),
        divs: extract_divs(&document),
    }
}

// Parses a CSS selector we wrote ourselves.
// The selectors are constants, so a failure here is a programmer error.
fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("constant CSS selector must parse")
}

// Trimmed text of every element matching `css`, in document order.
// Empty elements are kept so counts match the markup.
fn select_texts(document: &Html, css: &'static str) -> Vec<String> {
    let selector = selector(css);

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect()
}

// Absolute URLs of every <a href> on the page. Duplicates collapse.
fn extract_links(document: &Html, base: &Url) -> BTreeSet<String> {
    let selector = selector("a[href]");

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| base.join(href.trim()).ok())
        .map(String::from)
        .collect()
}

// Extracts sentence fragments from every <div> on the page.
//
// Layout divs nest, so the same sentence shows up in a div, its parent,
// its grandparent and so on. To keep each sentence once we:
// 1. Take every div's visible text
// 2. Visit divs from longest text to shortest
// 3. Split each text on '.'
// 4. Keep a fragment only if it is longer than MIN_FRAGMENT_CHARS and is not
//    contained in a fragment we already kept
//
// Longest-first means the kept copy is the one with the most context.
fn extract_divs(document: &Html) -> Vec<String> {
    let selector = selector("div");

    let mut texts: Vec<String> = document.select(&selector).map(visible_text).collect();

    // sort_by_key is stable, so equal lengths keep document order
    texts.sort_by_key(|text| Reverse(text.chars().count()));

    dedup_fragments(&texts)
}

// Splits texts on '.' and keeps fragments not already covered by a kept one.
// `texts` must already be ordered longest first.
fn dedup_fragments(texts: &[String]) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();

    for text in texts {
        for fragment in text.split('.') {
            let fragment = fragment.trim();

            if fragment.chars().count() <= MIN_FRAGMENT_CHARS {
                continue;
            }

            if kept.iter().any(|existing| existing.contains(fragment)) {
                continue;
            }

            kept.push(fragment.to_string());
        }
    }

    kept
}

// All text inside an element, each text node trimmed, joined with spaces.
// Text inside <script>, <style> and friends is skipped.
fn visible_text(element: ElementRef) -> String {
    let mut pieces = Vec::new();

    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .map_or(false, |parent| HIDDEN_TEXT_PARENTS.contains(&parent.name()));
        if hidden {
            continue;
        }

        let text = text.trim();
        if !text.is_empty() {
            pieces.push(text);
        }
    }

    pieces.join(" ")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is std::cmp::Reverse?
//    - A wrapper that flips the ordering of whatever it holds
//    - sort_by_key(|t| Reverse(len)) sorts longest first
//
// 2. Why count chars() instead of using len()?
//    - len() counts bytes; "é" is 2 bytes but 1 character
//    - Our length limits are about characters people read
//
// 3. What is `let ... else`?
//    - let Some(text) = x else { continue; } binds text if x is Some
//    - Otherwise it runs the else block, which must leave the loop/function
//
// 4. Why does base.join() handle absolute links too?
//    - Url::join follows browser rules: an href with its own scheme
//      replaces the base entirely, a relative one is resolved against it
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> PageContent {
        let base = Url::parse("http://example.com").unwrap();
        extract_page(html, "http://example.com", &base)
    }

    #[test]
    fn test_extract_very_small_page() {
        let page = extract("<html><body><p>Test paragraph</p></body></html>");

        assert_eq!(page.paragraphs, vec!["Test paragraph"]);
        assert!(page.headings.is_empty());
        assert!(page.links.is_empty());
        assert!(page.divs.is_empty());
    }

    #[test]
    fn test_extract_small_page() {
        let page = extract(
            r#"
            <html>
                <head><title>Test Page</title></head>
                <body>
                    <h1>Main Heading</h1>
                    <p>Paragraph 1</p>
                    <p>Paragraph 2 with more <a href="http://example.com/link">details</a></p>
                    <ul>
                        <li>List item 1</li>
                        <li>List item 2</li>
                    </ul>
                    <div>Some div content</div>
                </body>
            </html>
        "#,
        );

        assert_eq!(page.paragraphs, vec!["Paragraph 1", "Paragraph 2 with more details"]);
        assert_eq!(page.headings, vec!["Main Heading"]);
        assert!(page.links.contains("http://example.com/link"));
        assert_eq!(page.lists, vec!["List item 1", "List item 2"]);
        assert_eq!(page.divs, vec!["Some div content"]);
    }

    #[test]
    fn test_headings_keep_document_order() {
        let page = extract("<h2>Second level</h2><h1>Top</h1><h6>Tiny</h6>");
        assert_eq!(page.headings, vec!["Second level", "Top", "Tiny"]);
    }

    #[test]
    fn test_relative_links_resolve_and_collapse() {
        let base = Url::parse("https://example.com/docs/").unwrap();
        let page = extract_page(
            r#"<a href="intro">A</a><a href="/about">B</a><a href="intro">C</a>"#,
            "https://example.com/docs",
            &base,
        );

        let links: Vec<_> = page.links.iter().cloned().collect();
        assert_eq!(
            links,
            vec!["https://example.com/about", "https://example.com/docs/intro"]
        );
    }

    #[test]
    fn test_nested_divs_keep_longest_copy() {
        let page = extract("<div><div><div>Our office is open daily</div></div></div>");
        assert_eq!(page.divs, vec!["Our office is open daily"]);
    }

    #[test]
    fn test_sibling_div_substring_is_dropped() {
        let page = extract(r#"<div>Contact us at 555-1234</div><div>555-1234</div>"#);
        assert_eq!(page.divs, vec!["Contact us at 555-1234"]);
    }

    #[test]
    fn test_short_fragments_are_dropped() {
        let texts = vec!["Hi. Short. A longer sentence. tiny!".to_string()];
        assert_eq!(dedup_fragments(&texts), vec!["A longer sentence"]);
    }

    #[test]
    fn test_div_text_splits_on_periods() {
        let page = extract("<div>First sentence here. Second sentence here.</div>");
        assert_eq!(page.divs, vec!["First sentence here", "Second sentence here"]);
    }

    #[test]
    fn test_div_text_skips_scripts() {
        let page = extract("<div>Visible words <script>var hidden = 1;</script></div>");
        assert_eq!(page.divs, vec!["Visible words"]);
    }

    #[test]
    fn test_div_text_joins_nodes_with_spaces() {
        let page = extract("<div><span>Hello</span><b>world</b> again</div>");
        assert_eq!(page.divs, vec!["Hello world again"]);
    }
}
