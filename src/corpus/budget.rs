// src/corpus/budget.rs
// =============================================================================
// Keeps the crawled corpus under a character budget.
//
// The size of a corpus is the length of the whole map serialized as JSON,
// keys, quotes and escapes included. That over-counts compared to just
// adding up the texts, but it tracks what a prompt embedding the corpus
// actually carries.
//
// When the corpus is too big we drop pages longest-first: many short pages
// cover more of a site than one very long page does.
// =============================================================================

use std::collections::BTreeMap;

/// Canonical URL -> rendered text block for that page
pub type Corpus = BTreeMap<String, String>;

/// Length of the corpus serialized as a JSON object, in characters
pub fn serialized_len(corpus: &Corpus) -> usize {
    match serde_json::to_string(corpus) {
        Ok(json) => json.chars().count(),
        // Unreachable for string maps; fall back to a rough count
        Err(_) => corpus.iter().map(|(url, text)| url.len() + text.len()).sum(),
    }
}

/// Returns a copy of the corpus that fits in `max_chars`.
///
/// Pages are removed longest text first. After each removal the running size
/// drops by the removed text's length only, which never under-counts what
/// the JSON actually lost. A corpus already within budget is returned as is.
pub fn enforce_budget(corpus: &Corpus, max_chars: usize) -> Corpus {
    let mut kept = corpus.clone();
    let mut total = serialized_len(&kept);

    if total <= max_chars {
        return kept;
    }

    log::info!(
        "Total text length {} exceeds the limit of {}. Truncating data. \
         Use a smaller max depth to avoid truncation.",
        total,
        max_chars
    );

    let mut by_length: Vec<(&String, usize)> = corpus
        .iter()
        .map(|(url, text)| (url, text.chars().count()))
        .collect();
    // Stable sort: pages of equal length go in URL order
    by_length.sort_by(|a, b| b.1.cmp(&a.1));

    for (url, length) in by_length {
        if total <= max_chars {
            break;
        }
        kept.remove(url);
        total = total.saturating_sub(length);
        log::debug!("Dropped {} ({} chars) from the corpus", url, length);
    }

    kept
}
