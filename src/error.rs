// src/error.rs
// =============================================================================
// Error types for the scanner.
//
// Only one kind of failure ends a scan: the root page could not be read
// (FetchError). Everything that goes wrong with an individual link is a
// ProbeError, which the prober turns into a "broken" report entry instead of
// returning it.
// =============================================================================

use std::error::Error as StdError;
use thiserror::Error;

/// The root page could not be fetched; the scan produces no report.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme '{scheme}' (only http and https pages can be scanned)")]
    UnsupportedScheme { scheme: String },

    #[error("error fetching {url}: {}", error_chain(.source))]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("error fetching {url}: HTTP {status}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Request { source, .. } if source.is_timeout())
    }
}

/// Why a single link probe failed at the network level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("Request timed out")]
    Timeout,

    #[error("Could not resolve hostname")]
    Dns,

    #[error("SSL certificate error")]
    Tls,

    #[error("Too many redirects")]
    TooManyRedirects,

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(error: reqwest::Error) -> Self {
        // reqwest only exposes a few predicates; DNS and TLS failures have to
        // be recognised from the text of the source chain.
        let details = error_chain(&error);
        // Only the causes: the top-level message contains the URL, which
        // could itself contain "dns" or "tls".
        let lowered = error
            .source()
            .map(|cause| error_chain(cause))
            .unwrap_or_default()
            .to_lowercase();

        if error.is_timeout() {
            ProbeError::Timeout
        } else if error.is_redirect() {
            ProbeError::TooManyRedirects
        } else if lowered.contains("dns") || lowered.contains("failed to lookup address") {
            ProbeError::Dns
        } else if lowered.contains("certificate") || lowered.contains("tls") || lowered.contains("ssl") {
            ProbeError::Tls
        } else if error.is_connect() {
            ProbeError::Connection(details)
        } else {
            ProbeError::Request(details)
        }
    }
}

/// Errors from the scanner's public entry points.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, ScanError>;

/// Joins an error with all of its sources: "outer: inner: root cause".
pub(crate) fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // reqwest 0.11 already folds some causes into its own Display
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
