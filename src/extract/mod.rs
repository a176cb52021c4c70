// src/extract/mod.rs
// =============================================================================
// This module contains all content extraction logic.
//
// Submodules:
// - html: Parses an HTML document into a PageContent
// - page: The PageContent struct and its text rendering
// =============================================================================

mod html;
mod page;

pub use html::extract_page;
pub use page::PageContent;
