// src/crawl/filter.rs
// =============================================================================
// This module decides which URLs the crawler is allowed to follow.
//
// Two steps:
// 1. canonicalize(): drop the #fragment and any trailing '/', so
//    "https://example.com/docs/#intro" and "https://example.com/docs" are
//    the same page
// 2. Scope::admits(): the canonical URL must
//    - be http(s)
//    - live under the base URL
//    - not look like an asset (.pdf, .png, .css ...)
//
// Whether a URL was already visited is NOT checked here. That check has to be
// atomic with marking the URL visited, so it lives in the crawler (visit.rs).
// =============================================================================

use anyhow::Result;
use regex::Regex;
use url::Url;

// A dot followed by 3-4 word characters at the very end of the path
const ASSET_SUFFIX: &str = r"\.\w{3,4}$";

/// Strips the fragment and trailing slashes from a URL.
///
/// Canonicalizing twice gives the same result as canonicalizing once.
pub fn canonicalize(url: &str) -> String {
    let without_fragment = match url.find('#') {
        Some(idx) => &url[..idx],
        None => url,
    };

    without_fragment.trim_end_matches('/').to_string()
}

/// The set of URLs one crawl may visit
#[derive(Debug, Clone)]
pub struct Scope {
    // Canonical form of the base URL
    base: String,
    asset_suffix: Regex,
}

impl Scope {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base: canonicalize(base_url),
            asset_suffix: Regex::new(ASSET_SUFFIX)?,
        })
    }

    /// Returns true if a canonical URL may be crawled
    pub fn admits(&self, canonical: &str) -> bool {
        canonical.starts_with("http") && self.is_under_base(canonical) && !self.is_asset(canonical)
    }

    // Prefix test that only matches at a path boundary, so a base of
    // "https://example.com" does not admit "https://example.com.evil.net"
    fn is_under_base(&self, canonical: &str) -> bool {
        match canonical.strip_prefix(self.base.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
            None => false,
        }
    }

    // Only the path is inspected: "https://example.com" has a ".com" suffix
    // but is obviously a page, and "/report.pdf?v=2" is still a PDF
    fn is_asset(&self, canonical: &str) -> bool {
        match Url::parse(canonical) {
            Ok(parsed) => self.asset_suffix.is_match(parsed.path()),
            Err(_) => {
                let without_query = canonical.split('?').next().unwrap_or(canonical);
                self.asset_suffix.is_match(without_query)
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is trim_end_matches('/')?
//    - Removes every trailing '/' (not just one)
//    - "https://example.com//" becomes "https://example.com"
//
// 2. What does strip_prefix return?
//    - Some(rest) if the string starts with the prefix, None otherwise
//    - rest is whatever follows the prefix, borrowed from the original
//
// 3. Why compile the Regex once in Scope::new?
//    - Compiling a regex is much slower than matching with it
//    - The crawler calls admits() for every link on every page
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_strips_fragment_and_slash() {
        assert_eq!(canonicalize("https://example.com/docs/#intro"), "https://example.com/docs");
        assert_eq!(canonicalize("https://example.com/"), "https://example.com");
        assert_eq!(canonicalize("https://example.com/a?x=1#top"), "https://example.com/a?x=1");
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        for url in [
            "https://example.com/docs/#intro",
            "https://example.com//",
            "https://example.com/a/b",
            "http://example.com/#/route/",
        ] {
            let once = canonicalize(url);
            assert_eq!(canonicalize(&once), once);
        }
    }

    #[test]
    fn test_admits_pages_under_base() {
        let scope = Scope::new("https://example.com/").unwrap();
        assert!(scope.admits("https://example.com"));
        assert!(scope.admits("https://example.com/about"));
        assert!(scope.admits("https://example.com?page=2"));
    }

    #[test]
    fn test_rejects_other_hosts() {
        let scope = Scope::new("https://example.com").unwrap();
        assert!(!scope.admits("https://other.com/about"));
        assert!(!scope.admits("https://example.com.evil.net/about"));
    }

    #[test]
    fn test_rejects_sibling_paths() {
        let scope = Scope::new("https://example.com/docs").unwrap();
        assert!(scope.admits("https://example.com/docs/intro"));
        assert!(!scope.admits("https://example.com/docs-old"));
        assert!(!scope.admits("https://example.com/blog"));
    }

    #[test]
    fn test_rejects_assets() {
        let scope = Scope::new("https://example.com").unwrap();
        assert!(!scope.admits("https://example.com/report.pdf"));
        assert!(!scope.admits("https://example.com/logo.png"));
        assert!(!scope.admits("https://example.com/site.css?v=3"));
        assert!(scope.admits("https://example.com/v1.2/guide"));
    }

    #[test]
    fn test_rejects_non_http() {
        let scope = Scope::new("https://example.com").unwrap();
        assert!(!scope.admits("mailto:someone@example.com"));
        assert!(!scope.admits("ftp://example.com/file"));
    }
}
