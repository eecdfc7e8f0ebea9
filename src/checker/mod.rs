// src/checker/mod.rs
// =============================================================================
// This module contains the link-health scanner.
//
// Submodules:
// - fetch: Downloads the root page (the only step that can fail a scan)
// - html:  Extracts link candidates from the page
// - http:  Probes every candidate concurrently and classifies the answers
//
// A scan goes:
//   URL -> fetch page -> extract anchors -> resolve + filter http(s)
//       -> probe all links concurrently -> wait for all -> ScanReport
// =============================================================================

mod fetch;
mod html;
mod http;

pub use fetch::{fetch_page, parse_root_url, FetchedPage};
pub use html::extract_links;
pub use http::{classify, probe_links, round_millis, ProbeOutcome, ProbeSettings};

use crate::config::{ScanConfig, MAX_REDIRECTS};
use crate::error::{FetchError, Result, ScanError};
use crate::report::ScanReport;
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::info;

/// Runs scans with one HTTP client and one configuration.
///
/// The client is a connection pool; build one `Scanner` and reuse it across
/// scans rather than creating a scanner per URL.
#[derive(Debug, Clone)]
pub struct Scanner {
    client: Client,
    config: ScanConfig,
}

impl Scanner {
    /// Builds a scanner with its own HTTP client configured from `config`.
    pub fn new(config: ScanConfig) -> Result<Self> {
        let redirect = if config.follow_redirects {
            Policy::limited(MAX_REDIRECTS)
        } else {
            Policy::none()
        };

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(redirect)
            .build()
            .map_err(ScanError::Client)?;

        Ok(Self { client, config })
    }

    /// Uses a client built by the caller. Timeouts and the user agent from
    /// `config` are still applied to every request; the redirect policy is
    /// whatever the client was built with.
    pub fn with_client(client: Client, config: ScanConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scans one page.
    ///
    /// Returns the full report, or the reason the page itself could not be
    /// read. Failing links never turn into an `Err`; they are reported in the
    /// broken bucket.
    pub async fn scan(&self, page_url: &str) -> std::result::Result<ScanReport, FetchError> {
        let url = parse_root_url(page_url)?;
        info!("Scanning {}", url);

        let page = fetch_page(
            &self.client,
            &url,
            &self.config.user_agent,
            self.config.page_timeout,
        )
        .await?;

        let candidates = extract_links(&page.html, &page.url);
        let total = candidates.len();
        match self.config.max_in_flight {
            Some(limit) => info!("Probing {} link(s), at most {} at a time", total, limit),
            None => info!("Probing {} link(s)", total),
        }

        let results = probe_links(&self.client, candidates, &self.probe_settings()).await;
        let report = ScanReport::from_results(results);

        info!(
            "Scan of {} complete: {} ok, {} slow, {} broken",
            url,
            report.ok.len(),
            report.slow.len(),
            report.broken.len()
        );
        Ok(report)
    }

    fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            user_agent: self.config.user_agent.clone(),
            timeout: self.config.probe_timeout,
            slow_threshold_ms: self.config.slow_threshold_ms,
            max_in_flight: self.config.max_in_flight,
        }
    }
}

/// One-shot helper: builds a scanner for `config` and scans `page_url`.
pub async fn scan_url(page_url: &str, config: ScanConfig) -> Result<ScanReport> {
    let scanner = Scanner::new(config)?;
    Ok(scanner.scan(page_url).await?)
}
