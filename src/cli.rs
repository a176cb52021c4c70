// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - crawl: crawl a whole site and print the size-bounded corpus
// - page:  fetch and extract a single page (handy for checking what the
//          extractor makes of a page before crawling a whole site)
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{DEFAULT_MAX_CHARS, DEFAULT_MAX_DEPTH};

#[derive(Parser, Debug)]
#[command(
    name = "site-corpus",
    version,
    about = "Crawl a website into a size-bounded text corpus",
    long_about = "site-corpus recursively crawls a website, extracts headings, paragraphs, \
                  lists and div text from every page, and trims the result to a character \
                  budget so it fits in a question-answering prompt."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and print its corpus
    ///
    /// Example: site-corpus crawl https://example.com/docs --max-depth 2
    Crawl {
        /// Where to start. Only URLs under this one are crawled.
        ///
        /// May be omitted when --config is given.
        #[arg(required_unless_present = "config")]
        base_url: Option<String>,

        /// How many link hops below the base URL to follow (0 = base only)
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Character budget for the printed corpus
        #[arg(long, default_value_t = DEFAULT_MAX_CHARS)]
        max_chars: usize,

        /// Maximum number of pages downloaded at the same time
        #[arg(long, default_value_t = 16)]
        concurrency: usize,

        /// Per-page request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,

        /// Read the crawl settings from a JSON file instead of the flags above
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output results in JSON format instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Fetch one page and print the text block extracted from it
    ///
    /// Example: site-corpus page https://example.com/about
    Page {
        /// Page URL
        url: String,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },
}
