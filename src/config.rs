// src/config.rs
// =============================================================================
// Settings for a link-health scan.
//
// Every knob has a default that matches how the scanner is meant to behave
// out of the box:
// - identifying user agent:  AI-Agent-Checker/1.0
// - root page timeout:       10 seconds
// - per-link probe timeout:  5 seconds
// - slow threshold:          1000 ms (strictly greater is slow)
// - concurrency:             unbounded (every link probed at once)
// - redirects:               not followed
//
// The CLI maps its flags onto this struct, library users build it with the
// `with_*` methods.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "AI-Agent-Checker/1.0";
pub const DEFAULT_PAGE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_SLOW_THRESHOLD_MS: u64 = 1000;

/// Hop limit used when `follow_redirects` is on.
pub const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Sent as the User-Agent header on the page fetch and on every probe
    pub user_agent: String,
    /// Timeout for the GET of the root page
    pub page_timeout: Duration,
    /// Timeout for each HEAD probe, applied independently per link
    pub probe_timeout: Duration,
    /// Links answering slower than this (in ms) land in the slow bucket
    pub slow_threshold_ms: u64,
    /// Optional cap on probes in flight. `None` probes every link at once,
    /// which on very large pages can exhaust sockets or file descriptors.
    pub max_in_flight: Option<usize>,
    /// Follow up to MAX_REDIRECTS redirects instead of reporting the 3xx
    pub follow_redirects: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_timeout: DEFAULT_PAGE_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            slow_threshold_ms: DEFAULT_SLOW_THRESHOLD_MS,
            max_in_flight: None,
            follow_redirects: false,
        }
    }
}

impl ScanConfig {
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = timeout;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_slow_threshold_ms(mut self, threshold_ms: u64) -> Self {
        self.slow_threshold_ms = threshold_ms;
        self
    }

    /// A limit of 0 is treated as 1 so the scan can still make progress.
    pub fn with_max_in_flight(mut self, limit: Option<usize>) -> Self {
        self.max_in_flight = limit.map(|n| n.max(1));
        self
    }

    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }
}
