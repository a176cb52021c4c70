// src/extract/page.rs
// =============================================================================
// The structured result of extracting one page, and the text block we build
// from it.
//
// The text block is what ends up in the corpus, so its layout matters:
//
//   URL:
//   https://example.com
//
//   Headings:
//   1. Welcome
//
//   Paragraphs:
//   ...
//
// Sections come in a fixed order (Headings, Paragraphs, Divs, Lists, Links)
// and an empty section is left out entirely.
// =============================================================================

use std::collections::BTreeSet;

/// One crawled page. All text fields are already trimmed.
///
/// A page we could not fetch is `PageContent::default()`: every field empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    pub url: String,
    pub headings: Vec<String>,
    pub paragraphs: Vec<String>,
    pub lists: Vec<String>,
    /// Sentence fragments from <div> elements, with nested repeats removed
    pub divs: Vec<String>,
    /// Absolute URLs found in <a href>. A BTreeSet keeps them unique and sorted.
    pub links: BTreeSet<String>,
}

impl PageContent {
    /// True when the page has no paragraph text.
    ///
    /// The crawler neither records nor follows such pages.
    pub fn is_shell(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Renders the page as the text block stored in the corpus
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("URL:\n{}\n", self.url));

        if !self.headings.is_empty() {
            lines.push("Headings:".to_string());
            for (idx, heading) in self.headings.iter().enumerate() {
                lines.push(format!("{}. {}", idx + 1, heading));
            }
            lines.push(String::new());
        }

        push_section(&mut lines, "Paragraphs:", self.paragraphs.iter(), "");
        push_section(&mut lines, "Divs:", self.divs.iter(), "");
        push_section(&mut lines, "Lists:", self.lists.iter(), "");
        push_section(&mut lines, "Links:", self.links.iter(), "- ");

        // The trailing empty line of the last section gives us the final "\n"
        lines.join("\n")
    }
}

// Appends a labelled section followed by a blank line, or nothing at all
// when there are no items
fn push_section<'a>(
    lines: &mut Vec<String>,
    label: &str,
    items: impl ExactSizeIterator<Item = &'a String>,
    bullet: &str,
) {
    if items.len() == 0 {
        return;
    }

    lines.push(label.to_string());
    for item in items {
        lines.push(format!("{}{}", bullet, item));
    }
    lines.push(String::new());
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why #[derive(Default)]?
//    - It gives us PageContent::default() with empty strings and collections
//    - That is exactly the "nothing fetched" value the fetcher returns
//
// 2. Why impl ExactSizeIterator in push_section?
//    - Vec and BTreeSet iterators both know their length up front
//    - So one helper serves every section, whatever collection backs it
//
// 3. What does lines.join("\n") do?
//    - Glues the strings together with a newline between each pair
//    - An empty string in the list becomes a blank line in the output
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_all_sections() {
        let page = PageContent {
            url: "http://example.com".to_string(),
            headings: strings(&["Heading 1", "Heading 2"]),
            paragraphs: strings(&["paragraph 1", "paragraph 2"]),
            lists: strings(&["Item 1", "Item 2"]),
            divs: strings(&["div 1", "div 2"]),
            links: ["http://example.com/link2", "http://example.com/link1"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        let expected = "URL:
http://example.com

Headings:
1. Heading 1
2. Heading 2

Paragraphs:
paragraph 1
paragraph 2

Divs:
div 1
div 2

Lists:
Item 1
Item 2

Links:
- http://example.com/link1
- http://example.com/link2
";

        assert_eq!(page.render(), expected);
    }

    #[test]
    fn test_render_single_paragraph() {
        let page = PageContent {
            url: "http://example.com".to_string(),
            paragraphs: strings(&["Hello"]),
            ..Default::default()
        };

        assert_eq!(page.render(), "URL:\nhttp://example.com\n\nParagraphs:\nHello\n");
    }

    #[test]
    fn test_render_skips_empty_sections() {
        let page = PageContent {
            url: "http://example.com/a".to_string(),
            paragraphs: strings(&["Body"]),
            lists: strings(&["One"]),
            ..Default::default()
        };

        let text = page.render();
        assert!(!text.contains("Headings:"));
        assert!(!text.contains("Divs:"));
        assert!(!text.contains("Links:"));
        assert!(text.ends_with("Lists:\nOne\n"));
    }

    #[test]
    fn test_default_is_shell() {
        assert!(PageContent::default().is_shell());
    }
}
