// src/crawl/fetch.rs
// =============================================================================
// This module downloads one page and hands it to the extractor.
//
// Failure containment:
// - Anything other than HTTP 200 counts as "no content"
// - Timeouts, DNS errors, refused connections, unreadable bodies: same
// - In every failure case we log a warning and return an empty PageContent
//
// One unreachable page must never abort the whole crawl, so nothing in
// here returns an error to the caller.
// =============================================================================

use anyhow::{anyhow, bail, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::extract::{extract_page, PageContent};

// Same limit browsers use before giving up on a redirect chain
const MAX_REDIRECTS: usize = 10;

/// Builds the HTTP client shared by every fetch of a crawl.
///
/// Reusing one client means connections to the site get pooled.
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Fetches and extracts one page. Never fails: errors become an empty page.
pub async fn fetch_page(client: &Client, url: &str) -> PageContent {
    match try_fetch(client, url).await {
        Ok(page) => page,
        Err(e) => {
            log::warn!("Failed to fetch '{}': {}", url, e);
            PageContent::default()
        }
    }
}

async fn try_fetch(client: &Client, url: &str) -> Result<PageContent> {
    let response = client.get(url).send().await.map_err(describe_error)?;

    let status = response.status();
    if status != StatusCode::OK {
        bail!("HTTP {}", status.as_u16());
    }

    // Relative links resolve against where we ended up, not where we started
    let final_url = response.url().clone();
    let html = response.text().await.map_err(describe_error)?;

    Ok(extract_page(&html, url, &final_url))
}

// Turns a reqwest error into a short message for the log
fn describe_error(error: reqwest::Error) -> anyhow::Error {
    if error.is_timeout() {
        anyhow!("request timed out")
    } else if error.is_redirect() {
        anyhow!("too many redirects")
    } else if error.is_connect() {
        anyhow!("connection failed: {}", error)
    } else {
        anyhow!(error)
    }
}
