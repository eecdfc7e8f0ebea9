// src/github/mod.rs
// =============================================================================
// This module handles fetching source files from GitHub repositories.
//
// Only single files are supported: a github.com "blob" URL is rewritten to
// raw.githubusercontent.com and downloaded. The linter uses this when it is
// given a URL instead of inline code.
// =============================================================================

mod fetch;

pub use fetch::{fetch_blob, fetch_file, BlobUrl};
