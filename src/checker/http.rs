// src/checker/http.rs
// =============================================================================
// This module checks if links are alive by making HTTP HEAD requests.
//
// Key functionality:
// - One HEAD request per link (lightweight, no body download)
// - Every probe has its own timeout; one slow link never delays the verdict
//   on another
// - All probes run concurrently and we wait for every one of them
// - No retries: the first answer (or failure) is final
//
// Classification, checked in this order:
//   1. network error (timeout, DNS, refused, TLS)  -> broken, status "Error"
//   2. HTTP status >= 400                          -> broken
//   3. answered slower than the slow threshold     -> slow
//   4. anything else                               -> ok
// =============================================================================

use crate::error::ProbeError;
use crate::report::{Bucket, LinkCandidate, LinkProbeResult};
use futures::future::join_all;
use futures::stream::{self, StreamExt}; // StreamExt gives us .buffer_unordered()
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;

/// Settings shared by every probe of one scan.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub user_agent: String,
    pub timeout: Duration,
    pub slow_threshold_ms: u64,
    /// `None` launches every probe at once
    pub max_in_flight: Option<usize>,
}

/// What came back from a single HEAD request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Response headers arrived after `time_ms` milliseconds
    Responded { status: u16, time_ms: u64 },
    /// No response at all
    Failed(ProbeError),
}

// Probes all candidates concurrently and returns one classified result per
// candidate.
//
// Without a limit every probe is started at once and join_all waits for all
// of them. With a limit, buffer_unordered keeps at most that many in flight;
// it still only finishes once every probe has resolved.
//
// Results come back in no particular order.
pub async fn probe_links(
    client: &Client,
    candidates: Vec<LinkCandidate>,
    settings: &ProbeSettings,
) -> Vec<(Bucket, LinkProbeResult)> {
    let probes = candidates
        .into_iter()
        .map(|candidate| probe_link(client, candidate, settings));

    match settings.max_in_flight {
        Some(limit) => stream::iter(probes).buffer_unordered(limit.max(1)).collect().await,
        None => join_all(probes).await,
    }
}

// Probes a single link and classifies the answer.
async fn probe_link(
    client: &Client,
    candidate: LinkCandidate,
    settings: &ProbeSettings,
) -> (Bucket, LinkProbeResult) {
    let outcome = send_probe(client, &candidate.url, settings).await;
    let bucket = classify(&outcome, settings.slow_threshold_ms);
    debug!("{} -> {} ({:?})", candidate.url, bucket, outcome);

    let result = match outcome {
        ProbeOutcome::Responded { status, time_ms } => {
            LinkProbeResult::responded(candidate, status, time_ms)
        }
        ProbeOutcome::Failed(error) => LinkProbeResult::failed(candidate, error.to_string()),
    };

    (bucket, result)
}

// Sends the HEAD request and times it.
//
// The clock starts right before dispatch and stops when send() returns,
// which is when the response headers have arrived. HEAD has no body to wait
// for.
async fn send_probe(client: &Client, url: &str, settings: &ProbeSettings) -> ProbeOutcome {
    let start = Instant::now();
    let result = client
        .head(url)
        .header(reqwest::header::USER_AGENT, settings.user_agent.as_str())
        .timeout(settings.timeout)
        .send()
        .await;
    let elapsed = start.elapsed();

    match result {
        Ok(response) => ProbeOutcome::Responded {
            status: response.status().as_u16(),
            time_ms: round_millis(elapsed),
        },
        Err(e) => ProbeOutcome::Failed(ProbeError::from(e)),
    }
}

/// Picks the bucket for a probe outcome.
///
/// A status of 400 or above is broken no matter how fast it came back, and
/// `time_ms == slow_threshold_ms` still counts as ok.
pub fn classify(outcome: &ProbeOutcome, slow_threshold_ms: u64) -> Bucket {
    match outcome {
        ProbeOutcome::Failed(_) => Bucket::Broken,
        ProbeOutcome::Responded { status, .. } if *status >= 400 => Bucket::Broken,
        ProbeOutcome::Responded { time_ms, .. } if *time_ms > slow_threshold_ms => Bucket::Slow,
        ProbeOutcome::Responded { .. } => Bucket::Ok,
    }
}

/// Elapsed time rounded to the nearest whole millisecond.
pub fn round_millis(elapsed: Duration) -> u64 {
    (elapsed.as_secs_f64() * 1000.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ProbeStatus;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings() -> ProbeSettings {
        ProbeSettings {
            user_agent: "AI-Agent-Checker/1.0".to_string(),
            timeout: Duration::from_secs(5),
            slow_threshold_ms: 1000,
            max_in_flight: None,
        }
    }

    fn candidate(url: String) -> LinkCandidate {
        LinkCandidate {
            url,
            text: "link".to_string(),
        }
    }

    #[test]
    fn test_classify_precedence() {
        let threshold = 1000;
        assert_eq!(classify(&ProbeOutcome::Failed(ProbeError::Timeout), threshold), Bucket::Broken);
        // a slow 404 is still broken, not slow
        assert_eq!(
            classify(&ProbeOutcome::Responded { status: 404, time_ms: 3000 }, threshold),
            Bucket::Broken
        );
        assert_eq!(
            classify(&ProbeOutcome::Responded { status: 400, time_ms: 5 }, threshold),
            Bucket::Broken
        );
        assert_eq!(
            classify(&ProbeOutcome::Responded { status: 200, time_ms: 1001 }, threshold),
            Bucket::Slow
        );
        assert_eq!(
            classify(&ProbeOutcome::Responded { status: 200, time_ms: 1000 }, threshold),
            Bucket::Ok
        );
        assert_eq!(
            classify(&ProbeOutcome::Responded { status: 399, time_ms: 50 }, threshold),
            Bucket::Ok
        );
    }

    #[test]
    fn test_round_millis() {
        assert_eq!(round_millis(Duration::from_micros(1_499)), 1);
        assert_eq!(round_millis(Duration::from_micros(1_500)), 2);
        assert_eq!(round_millis(Duration::from_millis(250)), 250);
    }

    #[tokio::test]
    async fn test_probe_uses_head_and_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/alive"))
            .and(header("user-agent", "AI-Agent-Checker/1.0"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let results = probe_links(
            &Client::new(),
            vec![candidate(format!("{}/alive", server.uri()))],
            &settings(),
        )
        .await;

        assert_eq!(results.len(), 1);
        let (bucket, result) = &results[0];
        assert_eq!(*bucket, Bucket::Ok);
        assert_eq!(result.status, ProbeStatus::Code(200));
        assert!(result.time_ms.is_some());
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_probe_timeout_is_broken_error() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let settings = ProbeSettings {
            timeout: Duration::from_millis(100),
            ..settings()
        };
        let results = probe_links(&Client::new(), vec![candidate(server.uri())], &settings).await;

        let (bucket, result) = &results[0];
        assert_eq!(*bucket, Bucket::Broken);
        assert_eq!(result.status, ProbeStatus::Error);
        assert_eq!(result.error.as_deref(), Some("Request timed out"));
        assert_eq!(result.time_ms, None);
    }

    #[tokio::test]
    async fn test_bounded_pool_still_probes_everything() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_millis(20)))
            .expect(12)
            .mount(&server)
            .await;

        let candidates = (0..12)
            .map(|i| candidate(format!("{}/page{}", server.uri(), i)))
            .collect();
        let settings = ProbeSettings {
            max_in_flight: Some(3),
            ..settings()
        };
        let results = probe_links(&Client::new(), candidates, &settings).await;

        assert_eq!(results.len(), 12);
        assert!(results.iter().all(|(bucket, _)| *bucket == Bucket::Ok));
    }
}
