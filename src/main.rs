// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (RUST_LOG controls verbosity, default "info")
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Print the corpus (stdout) and diagnostics (stderr)
// 5. Exit with proper code (0 = pages found, 1 = nothing crawled, 2 = error)
// =============================================================================

mod cli;
mod config;
mod corpus;
mod crawl;
mod extract;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use cli::{Cli, Commands};
use config::CrawlConfig;
use corpus::Corpus;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            base_url,
            max_depth,
            max_chars,
            concurrency,
            timeout,
            config,
            json,
        } => {
            let config = match (config, base_url) {
                (Some(path), _) => CrawlConfig::from_file(path)?,
                (None, Some(base_url)) => CrawlConfig {
                    base_url,
                    max_depth,
                    max_concurrency: concurrency,
                    fetch_timeout_secs: timeout,
                    max_chars,
                },
                // clap enforces one of the two
                (None, None) => anyhow::bail!("A base URL or --config is required"),
            };
            handle_crawl(&config, json).await
        }
        Commands::Page { url, timeout } => handle_page(&url, timeout).await,
    }
}

// What --json prints
#[derive(Serialize)]
struct CrawlReport<'a> {
    config: &'a CrawlConfig,
    pages: usize,
    total_chars: usize,
    corpus: &'a Corpus,
}

// Handles the 'crawl' subcommand
async fn handle_crawl(config: &CrawlConfig, json: bool) -> Result<i32> {
    let crawled = crawl::crawl_website(config).await?;
    let corpus = corpus::enforce_budget(&crawled, config.max_chars);

    if json {
        let report = CrawlReport {
            config,
            pages: corpus.len(),
            total_chars: corpus::serialized_len(&corpus),
            corpus: &corpus,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_corpus(&corpus);
    }

    if corpus.is_empty() {
        log::warn!("No pages with paragraph text were found under {}", config.base_url);
        Ok(1)
    } else {
        Ok(0)
    }
}

// Handles the 'page' subcommand
async fn handle_page(url: &str, timeout: u64) -> Result<i32> {
    let mut config = CrawlConfig::new(url);
    config.fetch_timeout_secs = timeout;
    config.validate()?;

    let client = crawl::build_client(config.fetch_timeout())?;
    let page = crawl::fetch_page(&client, &crawl::canonicalize(url)).await;

    match page_outcome(&page) {
        // fetch_page has already logged why
        PageOutcome::FetchFailed => return Ok(1),
        PageOutcome::NoParagraphs => {
            log::warn!("{} has no paragraph text; a crawl would skip it", url);
        }
        PageOutcome::Content => {}
    }

    print!("{}", page.render());
    Ok(0)
}

#[derive(Debug, PartialEq, Eq)]
enum PageOutcome {
    FetchFailed,
    NoParagraphs,
    Content,
}

// A failed fetch is an all-empty page, url included
fn page_outcome(page: &extract::PageContent) -> PageOutcome {
    if page.url.is_empty() {
        PageOutcome::FetchFailed
    } else if page.is_shell() {
        PageOutcome::NoParagraphs
    } else {
        PageOutcome::Content
    }
}

// Prints every text block with a rule between them
fn print_corpus(corpus: &Corpus) {
    for (idx, text) in corpus.values().enumerate() {
        if idx > 0 {
            println!("{}", "=".repeat(80));
        }
        print!("{}", text);
    }

    eprintln!();
    eprintln!("📊 Summary:");
    eprintln!("   📄 Pages: {}", corpus.len());
    eprintln!("   🔤 Corpus size: {} chars", corpus::serialized_len(corpus));
}
