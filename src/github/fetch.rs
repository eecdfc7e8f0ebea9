// src/github/fetch.rs
// =============================================================================
// This module fetches single files from GitHub so the linter can check them.
//
// Strategy:
// - Parse a "blob" URL (the address of a file page on github.com)
// - Rewrite it to raw.githubusercontent.com, which serves the bare file
// - Download the text with the scanner's user agent and a 10 second timeout
//
// Example:
//   https://github.com/user/repo/blob/main/site/index.html
//   -> https://raw.githubusercontent.com/user/repo/main/site/index.html
// =============================================================================

use anyhow::{anyhow, bail, Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

const RAW_HOST: &str = "https://raw.githubusercontent.com";

/// A file inside a GitHub repository, as named by its blob URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobUrl {
    pub user: String,
    pub repo: String,
    pub branch: String,
    /// Path of the file inside the repository, without a leading slash
    pub path: String,
}

impl BlobUrl {
    // Parses https://github.com/<user>/<repo>/blob/<branch>/<path...>
    //
    // Anything else (another host, a repo root, a tree/ directory URL) is
    // rejected with a message saying what was expected.
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw.trim()).map_err(|e| anyhow!("Invalid URL '{}': {}", raw, e))?;

        if url.host_str() != Some("github.com") {
            bail!("Not a GitHub URL: {}", raw);
        }

        let parts: Vec<&str> = url
            .path()
            .trim_matches('/')
            .split('/')
            .filter(|p| !p.is_empty())
            .collect();

        if parts.len() < 5 || parts[2] != "blob" {
            bail!(
                "URL does not look like a GitHub file URL \
                 (expected .../<user>/<repo>/blob/<branch>/<file>): {}",
                raw
            );
        }

        Ok(Self {
            user: parts[0].to_string(),
            repo: parts[1].to_string(),
            branch: parts[3].to_string(),
            path: parts[4..].join("/"),
        })
    }

    /// Where the bare file contents are served.
    pub fn raw_url(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            RAW_HOST, self.user, self.repo, self.branch, self.path
        )
    }
}

/// Downloads the file behind a GitHub blob URL.
pub async fn fetch_blob(
    client: &Client,
    blob_url: &str,
    user_agent: &str,
    timeout: Duration,
) -> Result<String> {
    let blob = BlobUrl::parse(blob_url)?;
    fetch_file(client, &blob.raw_url(), user_agent, timeout).await
}

// Fetches content from a URL
//
// Returns the body text, or an error for network failures and non-2xx answers.
pub async fn fetch_file(
    client: &Client,
    url: &str,
    user_agent: &str,
    timeout: Duration,
) -> Result<String> {
    debug!("Fetching file {}", url);

    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, user_agent)
        .timeout(timeout)
        .send()
        .await
        .with_context(|| format!("Error fetching file from GitHub: {}", url))?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Error fetching file from GitHub: {}: HTTP {}",
            url,
            response.status()
        ));
    }

    let content = response
        .text()
        .await
        .with_context(|| format!("Error reading file from GitHub: {}", url))?;
    Ok(content)
}
