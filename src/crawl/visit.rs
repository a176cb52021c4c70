// src/crawl/visit.rs
// =============================================================================
// This module implements the recursive, concurrent website crawl.
//
// How it works:
// 1. visit(url, depth) canonicalizes the URL and checks it is in scope
// 2. It atomically claims the URL in the shared visited set
//    (a URL someone else already claimed is skipped)
// 3. It fetches the page; a page with no <p> text is dropped and its links
//    are NOT followed
// 4. It records {url: text block} and visits every link at depth + 1,
//    all children at the same time, then merges their results
//
// Why this terminates:
// - Every URL is claimed at most once, so each page is fetched at most once
// - depth grows by one per hop and stops at max_depth
//
// Resource bounds:
// - A Semaphore caps how many fetches are in flight at once. The permit is
//   only held while downloading, never while waiting on children, so deep
//   recursion cannot starve itself of permits.
//
// Rust concepts:
// - BoxFuture: an async fn can't call itself directly (its future would have
//   infinite size), so the recursive call returns a boxed future
// - join_all: run many futures concurrently and wait for all of them
// - tokio::sync::Mutex: a lock that is safe to use from async code
// =============================================================================

use anyhow::Result;
use futures::future::{join_all, BoxFuture, FutureExt};
use reqwest::Client;
use std::collections::HashSet;
use std::fmt;
use tokio::sync::{Mutex, Semaphore};

use super::fetch::{build_client, fetch_page};
use super::filter::{canonicalize, Scope};
use crate::config::CrawlConfig;
use crate::corpus::{serialized_len, Corpus};
use crate::extract::PageContent;

/// Why a URL was not fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    TooDeep,
    OutOfScope,
    AlreadyClaimed,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Skip::TooDeep => "beyond max depth",
            Skip::OutOfScope => "out of scope",
            Skip::AlreadyClaimed => "already visited",
        };
        f.write_str(reason)
    }
}

/// State shared by every branch of one crawl
struct Crawler {
    client: Client,
    scope: Scope,
    max_depth: usize,
    // Canonical URLs already dispatched for fetching
    visited: Mutex<HashSet<String>>,
    // Limits simultaneous in-flight fetches
    permits: Semaphore,
}

/// Crawls a website and returns {canonical url: text block} for every page
/// with paragraph text.
///
/// Fails only on invalid configuration. Individual page failures are logged
/// and skipped.
pub async fn crawl_website(config: &CrawlConfig) -> Result<Corpus> {
    config.validate()?;

    let crawler = Crawler::new(config)?;

    log::info!(
        "Crawling '{}' (max depth {}, {} concurrent fetches)",
        config.base_url,
        config.max_depth,
        config.max_concurrency
    );

    let corpus = crawler.visit(config.base_url.clone(), 0).await;

    log::info!(
        "Crawled '{}' pages with total length of text '{}'",
        corpus.len(),
        serialized_len(&corpus)
    );

    Ok(corpus)
}

impl Crawler {
    fn new(config: &CrawlConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.fetch_timeout())?,
            scope: Scope::new(&config.base_url)?,
            max_depth: config.max_depth,
            visited: Mutex::new(HashSet::new()),
            permits: Semaphore::new(config.max_concurrency),
        })
    }

    fn visit(&self, url: String, depth: usize) -> BoxFuture<'_, Corpus> {
        async move {
            let mut corpus = Corpus::new();

            let Some(page) = self.claim_and_fetch(&url, depth).await else {
                return corpus;
            };

            if page.is_shell() {
                log::debug!("No paragraphs on {}, not following its links", url);
                return corpus;
            }

            let children = page
                .links
                .iter()
                .map(|link| self.visit(link.clone(), depth + 1));

            corpus.insert(page.url.clone(), page.render());

            for child in join_all(children).await {
                corpus.extend(child);
            }

            corpus
        }
        .boxed()
    }

    // Claims the canonical form of `url` for this branch, or says why not
    async fn claim(&self, url: &str, depth: usize) -> Result<String, Skip> {
        if depth > self.max_depth {
            return Err(Skip::TooDeep);
        }

        let canonical = canonicalize(url);
        if !self.scope.admits(&canonical) {
            return Err(Skip::OutOfScope);
        }

        // insert() is the test-and-set: it returns false if the URL was
        // already present, and the check and the insert happen under one lock
        if !self.visited.lock().await.insert(canonical.clone()) {
            return Err(Skip::AlreadyClaimed);
        }

        Ok(canonical)
    }

    // Returns None when the URL must not be fetched
    async fn claim_and_fetch(&self, url: &str, depth: usize) -> Option<PageContent> {
        let canonical = match self.claim(url, depth).await {
            Ok(canonical) => canonical,
            Err(skip) => {
                log::debug!("Skipping [depth {}] {}: {}", depth, url, skip);
                return None;
            }
        };

        log::debug!("Fetching [depth {}]: {}", depth, canonical);

        // The semaphore is never closed, so acquire() cannot fail in practice
        let _permit = self.permits.acquire().await.ok()?;
        Some(fetch_page(&self.client, &canonical).await)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not tokio::spawn for the children?
//    - Spawned tasks must be 'static, so we'd need Arc<Crawler> everywhere
//    - join_all runs the child futures concurrently on the current task
//    - No child can outlive its parent call (structured concurrency)
//
// 2. Why BoxFuture<'_, Corpus>?
//    - The future borrows &self, so it carries self's lifetime ('_)
//    - .boxed() puts the future on the heap and requires it to be Send
//
// 3. Why is the depth check before the visited check?
//    - A URL seen first at a too-deep level must stay unclaimed, otherwise
//      it could never be crawled from a shallower path that reaches it later
//
// 4. Why `let _permit = ...`?
//    - The permit is released when _permit is dropped, at the end of the
//      function, i.e. right after the download finishes
//    - Naming it `_` alone would drop it immediately!
// -----------------------------------------------------------------------------
