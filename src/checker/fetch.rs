// src/checker/fetch.rs
// =============================================================================
// Fetches the root page of a scan.
//
// This is the only request whose failure ends the whole scan: if the page
// can't be read there are no links to check, so the caller gets a FetchError
// instead of a report.
//
// The request is a plain GET with the scanner's user agent and the page
// timeout. Anything outside 2xx counts as a failure.
// =============================================================================

use crate::error::FetchError;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// A successfully fetched root page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Where the page was finally served from (differs from the requested
    /// URL only when redirects are followed); relative links resolve against it
    pub url: Url,
    pub status: u16,
    /// Body decoded with the charset from Content-Type (UTF-8 when absent)
    pub html: String,
}

/// Parses a root URL and makes sure it is something we can scan.
pub fn parse_root_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|source| FetchError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}

pub async fn fetch_page(
    client: &Client,
    url: &Url,
    user_agent: &str,
    timeout: Duration,
) -> Result<FetchedPage, FetchError> {
    debug!("Fetching page {}", url);

    let request_error = |source: reqwest::Error| FetchError::Request {
        url: url.to_string(),
        source,
    };

    let response = client
        .get(url.clone())
        .header(reqwest::header::USER_AGENT, user_agent)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| {
            warn!("Could not reach {}: {}", url, e);
            request_error(e)
        })?;

    let status = response.status();
    let final_url = response.url().clone();
    if !status.is_success() {
        warn!("Page {} answered HTTP {}", url, status.as_u16());
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    // The timeout set on the request also covers reading the body.
    // Undecodable bytes become U+FFFD rather than failing the scan.
    let html = response.text().await.map_err(request_error)?;
    debug!("Fetched {} ({} bytes of text)", url, html.len());

    Ok(FetchedPage {
        url: final_url,
        status: status.as_u16(),
        html,
    })
}
