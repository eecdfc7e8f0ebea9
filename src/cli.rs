// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes.
//
//   link-health scan https://example.com --json
//   link-health lint https://github.com/user/repo/blob/main/style.css
// =============================================================================

use clap::{Parser, Subcommand};
use link_health::config::{
    ScanConfig, DEFAULT_PAGE_TIMEOUT, DEFAULT_PROBE_TIMEOUT, DEFAULT_SLOW_THRESHOLD_MS,
    DEFAULT_USER_AGENT,
};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "link-health",
    version,
    about = "Check every link on a web page and report which are ok, slow or broken",
    long_about = "link-health fetches a page, probes each link on it with a HEAD request \
                  (all at once), and sorts the links into ok, slow and broken buckets. \
                  It can also lint HTML and CSS source, inline or from a GitHub file URL."
)]
pub struct Cli {
    /// Log progress to stderr (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a web page and check every link on it
    ///
    /// Example: link-health scan https://example.com --max-in-flight 20
    Scan {
        /// Page URL to scan (http or https)
        url: String,

        /// Output the report as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// User-Agent header sent with every request
        #[arg(long, default_value = DEFAULT_USER_AGENT)]
        user_agent: String,

        /// Timeout for fetching the page, in seconds
        #[arg(long, default_value_t = DEFAULT_PAGE_TIMEOUT.as_secs_f64(), value_parser = parse_seconds)]
        page_timeout: f64,

        /// Timeout for each link probe, in seconds
        #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT.as_secs_f64(), value_parser = parse_seconds)]
        probe_timeout: f64,

        /// Links slower than this many milliseconds are reported as slow
        #[arg(long, default_value_t = DEFAULT_SLOW_THRESHOLD_MS)]
        slow_threshold_ms: u64,

        /// Probe at most this many links at a time (default: all at once)
        #[arg(long)]
        max_in_flight: Option<usize>,

        /// Follow redirects (up to 5) instead of reporting the 3xx status
        #[arg(long)]
        follow_redirects: bool,
    },

    /// Check HTML or CSS source for common structural mistakes
    ///
    /// Example: link-health lint 'body { margin: 0 }'
    Lint {
        /// Inline source code, or a GitHub file URL (.../blob/<branch>/<path>)
        source: String,

        /// Output the result as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Builds the scan configuration from the `scan` flags.
    /// Returns None for other subcommands.
    pub fn scan_config(&self) -> Option<ScanConfig> {
        match self {
            Commands::Scan {
                user_agent,
                page_timeout,
                probe_timeout,
                slow_threshold_ms,
                max_in_flight,
                follow_redirects,
                ..
            } => Some(
                ScanConfig::default()
                    .with_user_agent(user_agent.clone())
                    .with_page_timeout(Duration::from_secs_f64(*page_timeout))
                    .with_probe_timeout(Duration::from_secs_f64(*probe_timeout))
                    .with_slow_threshold_ms(*slow_threshold_ms)
                    .with_max_in_flight(*max_in_flight)
                    .with_follow_redirects(*follow_redirects),
            ),
            Commands::Lint { .. } => None,
        }
    }
}

// A timeout must be a positive number of seconds that fits in a Duration.
// A zero timeout would mean "never time out" to reqwest, so it is rejected
// here and clap exits with status 2.
fn parse_seconds(value: &str) -> Result<f64, String> {
    let secs: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;
    if secs.is_nan() || secs <= 0.0 {
        return Err(format!("timeout must be greater than 0, got '{}'", value));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|_| format!("timeout '{}' is too large", value))?;
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_defaults_match_config_defaults() {
        let cli = Cli::parse_from(["link-health", "scan", "https://example.com"]);
        let config = cli.command.scan_config().unwrap();
        assert_eq!(config, ScanConfig::default());
    }

    #[test]
    fn test_scan_flags() {
        let cli = Cli::parse_from([
            "link-health",
            "-v",
            "scan",
            "https://example.com",
            "--json",
            "--probe-timeout",
            "2.5",
            "--slow-threshold-ms",
            "300",
            "--max-in-flight",
            "16",
            "--follow-redirects",
        ]);
        assert!(cli.verbose);

        let config = cli.command.scan_config().unwrap();
        assert_eq!(config.probe_timeout, Duration::from_millis(2500));
        assert_eq!(config.slow_threshold_ms, 300);
        assert_eq!(config.max_in_flight, Some(16));
        assert!(config.follow_redirects);
    }

    #[test]
    fn test_lint_has_no_scan_config() {
        let cli = Cli::parse_from(["link-health", "lint", "body {}"]);
        assert!(cli.command.scan_config().is_none());
    }

    #[test]
    fn test_non_positive_timeouts_are_rejected() {
        for args in [
            ["link-health", "scan", "https://example.com", "--probe-timeout=-1"],
            ["link-health", "scan", "https://example.com", "--page-timeout=0"],
            ["link-health", "scan", "https://example.com", "--page-timeout=NaN"],
            ["link-health", "scan", "https://example.com", "--probe-timeout=soon"],
        ] {
            let err = Cli::try_parse_from(args).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "{:?}", args);
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_fractional_timeout_is_accepted() {
        let cli = Cli::try_parse_from(["link-health", "scan", "https://example.com", "--page-timeout", "0.25"])
            .unwrap();
        let config = cli.command.scan_config().unwrap();
        assert_eq!(config.page_timeout, Duration::from_millis(250));
    }
}
