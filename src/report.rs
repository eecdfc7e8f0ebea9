// src/report.rs
// =============================================================================
// The data a scan produces.
//
//   LinkCandidate    one per <a href> found on the page (duplicates kept)
//   LinkProbeResult  the outcome of probing one candidate
//   ScanReport       all results, split into ok / broken / slow buckets
//
// JSON shape of a report:
//
//   {
//     "ok":     [{"url": "...", "text": "...", "status": 200, "time_ms": 42}],
//     "broken": [{"url": "...", "text": "...", "status": "Error", "error": "Request timed out"}],
//     "slow":   [{"url": "...", "text": "...", "status": 200, "time_ms": 1840}]
//   }
// =============================================================================

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A link found on the page, already resolved to an absolute http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    pub url: String,
    /// Anchor text with surrounding whitespace trimmed; may be empty
    pub text: String,
}

/// The `status` field of a probe result: an HTTP status code, or the literal
/// marker "Error" when no response was received at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeStatus {
    Code(u16),
    Error,
}

const ERROR_MARKER: &str = "Error";

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeStatus::Code(code) => write!(f, "{}", code),
            ProbeStatus::Error => f.write_str(ERROR_MARKER),
        }
    }
}

impl Serialize for ProbeStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProbeStatus::Code(code) => serializer.serialize_u16(*code),
            ProbeStatus::Error => serializer.serialize_str(ERROR_MARKER),
        }
    }
}

impl<'de> Deserialize<'de> for ProbeStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(u16),
            Marker(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Ok(ProbeStatus::Code(code)),
            Raw::Marker(marker) if marker == ERROR_MARKER => Ok(ProbeStatus::Error),
            Raw::Marker(other) => Err(serde::de::Error::custom(format!(
                "expected a status code or \"{}\", got \"{}\"",
                ERROR_MARKER, other
            ))),
        }
    }
}

/// Result of probing one link.
///
/// Exactly one of `time_ms` / `error` is set: network failures carry an
/// error message and no timing, everything that got a response carries a
/// timing and no error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkProbeResult {
    pub url: String,
    pub text: String,
    pub status: ProbeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LinkProbeResult {
    pub fn responded(candidate: LinkCandidate, status: u16, time_ms: u64) -> Self {
        Self {
            url: candidate.url,
            text: candidate.text,
            status: ProbeStatus::Code(status),
            time_ms: Some(time_ms),
            error: None,
        }
    }

    pub fn failed(candidate: LinkCandidate, error: impl Into<String>) -> Self {
        Self {
            url: candidate.url,
            text: candidate.text,
            status: ProbeStatus::Error,
            time_ms: None,
            error: Some(error.into()),
        }
    }
}

/// Which part of the report a probe result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Ok,
    Slow,
    Broken,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Bucket::Ok => "ok",
            Bucket::Slow => "slow",
            Bucket::Broken => "broken",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub ok: Vec<LinkProbeResult>,
    pub broken: Vec<LinkProbeResult>,
    pub slow: Vec<LinkProbeResult>,
}

impl ScanReport {
    /// Builds the report once every probe has finished. Probes never share
    /// this structure while running; each hands back its own classified
    /// result and they are merged here.
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = (Bucket, LinkProbeResult)>,
    {
        let mut report = ScanReport::default();
        for (bucket, result) in results {
            report.push(bucket, result);
        }
        report
    }

    pub fn push(&mut self, bucket: Bucket, result: LinkProbeResult) {
        match bucket {
            Bucket::Ok => self.ok.push(result),
            Bucket::Slow => self.slow.push(result),
            Bucket::Broken => self.broken.push(result),
        }
    }

    /// Total number of entries across all buckets.
    pub fn len(&self) -> usize {
        self.ok.len() + self.broken.len() + self.slow.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_broken(&self) -> bool {
        !self.broken.is_empty()
    }

    /// Every entry with the bucket it sits in: ok first, then slow, then broken.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &LinkProbeResult)> {
        self.ok
            .iter()
            .map(|r| (Bucket::Ok, r))
            .chain(self.slow.iter().map(|r| (Bucket::Slow, r)))
            .chain(self.broken.iter().map(|r| (Bucket::Broken, r)))
    }
}
