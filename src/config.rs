// src/config.rs
// =============================================================================
// This file holds the settings for one crawl.
//
// A CrawlConfig can come from:
// - the command line (see cli.rs)
// - a JSON file (CrawlConfig::from_file)
//
// Whatever the source, validate() runs before the first request goes out,
// so a bad base URL fails fast instead of producing an empty corpus.
//
// Rust concepts:
// - serde defaults: missing JSON fields fall back to default functions
// - anyhow::bail!: return an error with a formatted message
// =============================================================================

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default recursion depth below the base URL.
pub const DEFAULT_MAX_DEPTH: usize = 7;

/// Default size budget for the final corpus, in characters.
pub const DEFAULT_MAX_CHARS: usize = 196_000;

/// Settings for one crawl. Immutable once the crawl starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Where the crawl starts. Also defines the crawl scope.
    pub base_url: String,

    /// How many link hops below the base URL are followed (0 = base only)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum number of fetches in flight at the same time
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Per-request deadline in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Character budget for the final corpus
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_max_concurrency() -> usize {
    16
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CHARS
}

impl CrawlConfig {
    /// Create a configuration with default values for everything but the URL
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            max_depth: default_max_depth(),
            max_concurrency: default_max_concurrency(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_chars: default_max_chars(),
        }
    }

    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;

        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Rejects input that cannot produce a meaningful crawl.
    pub fn validate(&self) -> Result<()> {
        let parsed = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base URL '{}'", self.base_url))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "Base URL must use http or https, got '{}'",
                parsed.scheme()
            );
        }

        if self.max_concurrency == 0 {
            bail!("max_concurrency must be at least 1");
        }

        if self.fetch_timeout_secs == 0 {
            bail!("fetch_timeout_secs must be at least 1");
        }

        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::new("https://example.com");
        assert_eq!(config.max_depth, 7);
        assert_eq!(config.max_chars, 196_000);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_malformed_url() {
        let config = CrawlConfig::new("not a url");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = CrawlConfig::new("ftp://example.com/files");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let mut config = CrawlConfig::new("https://example.com");
        config.max_concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_fills_defaults() {
        let config: CrawlConfig =
            serde_json::from_str(r#"{"base_url": "https://example.com/docs", "max_depth": 2}"#)
                .unwrap();
        assert_eq!(config.base_url, "https://example.com/docs");
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.max_concurrency, 16);
        assert_eq!(config.max_chars, DEFAULT_MAX_CHARS);
    }
}
