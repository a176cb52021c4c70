// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Recursive crawling from a base URL, children fetched concurrently
// - Stays under the base URL and skips asset links (.pdf, .png ...)
// - Configurable depth limit
// - Every page fetched at most once, even when many pages link to it
// - Bounded number of fetches in flight
//
// Submodules:
// - filter: URL canonicalization and scope rules
// - fetch: Downloads one page, turning every failure into an empty page
// - visit: The recursive crawl itself
// =============================================================================

mod fetch;
mod filter;
mod visit;

// Re-export the pieces the rest of the program uses
pub use fetch::{build_client, fetch_page};
pub use filter::canonicalize;
pub use visit::crawl_website;
