// src/lib.rs
// =============================================================================
// link-health: fetch a web page, probe every link on it concurrently and
// sort the links into ok / slow / broken.
//
//   let scanner = Scanner::new(ScanConfig::default())?;
//   let report = scanner.scan("https://example.com").await?;
//   println!("{} broken", report.broken.len());
//
// Modules:
// - checker: the scanner (page fetch, link extraction, concurrent probing)
// - report:  the data a scan returns, and its JSON shape
// - config:  timeouts, user agent, slow threshold, concurrency cap
// - error:   FetchError / ProbeError / ScanError
// - github:  downloading single files from GitHub blob URLs
// - lint:    quick structural checks for HTML and CSS source
// =============================================================================

pub mod checker;
pub mod config;
pub mod error;
pub mod github;
pub mod lint;
pub mod report;

pub use checker::{scan_url, Scanner};
pub use config::ScanConfig;
pub use error::{FetchError, ProbeError, ScanError};
pub use report::{Bucket, LinkCandidate, LinkProbeResult, ProbeStatus, ScanReport};
