// src/corpus/mod.rs
// =============================================================================
// This module holds the crawl output (the corpus) and its size budget.
//
// Submodules:
// - budget: measures the corpus and trims it to a character limit
// =============================================================================

mod budget;

pub use budget::{enforce_budget, serialized_len, Corpus};
