//! Latency probing: dispatch, deadline and result classification
//!
//! Every target discovered on the page gets exactly one GET. All probes are
//! started at once on the current task and each result is rendered the
//! moment its probe settles; completion order is whatever the network gives.

pub mod client;


pub use client::{ProbeClient, ProbeRequest, ProbeResponse, ReqwestProbeClient};

use crate::{
    defaults::{CACHE_BUST_PARAM, PROBE_TIMEOUT},
    error::Result,
    logging::ProbeLogger,
    models::{ProbeResult, ProbeTarget},
    origin::classify_origin,
    page::{discover_targets, PageDocument},
    render::render_result,
    types::ResponseKind,
};
use chrono::Utc;
use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::time::timeout;
use url::Url;

/// Counters for one run; individual results are not retained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Targets discovered on the page
    pub targets: usize,
    /// Results written onto an element
    pub rendered: usize,
    /// Probes that ended with the sentinel
    pub failed: usize,
    /// Results dropped because their element was missing
    pub missing_elements: usize,
}

/// Append the cache-busting timestamp to a URL as written in the page
pub fn cache_busted_url(url: &str, epoch_ms: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", url, separator, CACHE_BUST_PARAM, epoch_ms)
}

/// Whether a response counts as a successful probe
///
/// Opaque responses only prove the endpoint answered, so they always pass.
/// Readable responses pass on status 200 and nothing else.
pub fn classify_response(response: &ProbeResponse) -> bool {
    match response.kind {
        ResponseKind::Opaque => true,
        ResponseKind::Basic => response.status == 200,
    }
}

/// Latency prober
pub struct Prober {
    client: Arc<dyn ProbeClient>,
    timeout: Duration,
    logger: ProbeLogger,
}

impl Prober {
    /// Create a prober with the standard 3 second deadline
    pub fn new(client: Arc<dyn ProbeClient>, logger: ProbeLogger) -> Self {
        Self {
            client,
            timeout: PROBE_TIMEOUT,
            logger,
        }
    }

    /// Override the per-probe deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe every target on the page and render each result as it settles
    pub async fn run(&self, page: &mut PageDocument) -> RunSummary {
        let targets = discover_targets(page);
        let location = page.location().clone();
        let run_id = self.logger.log_run_started(location.as_str(), targets.len()).await;

        let mut summary = RunSummary {
            targets: targets.len(),
            ..RunSummary::default()
        };

        let location_ref = &location;
        let mut pending: FuturesUnordered<_> = targets
            .into_iter()
            .map(move |target| async move {
                let result = self.probe(&target, location_ref).await;
                (target, result)
            })
            .collect();

        while let Some((target, result)) = pending.next().await {
            if result.is_error {
                summary.failed += 1;
            }

            if render_result(page, &target.display_target_id, &result.display_value(), result.is_error) {
                summary.rendered += 1;
            } else {
                summary.missing_elements += 1;
                self.logger.log_render_skipped(&target).await;
            }
        }

        self.logger.log_run_finished(&run_id, summary.rendered, summary.failed).await;
        summary
    }

    /// Probe a single target; never fails, failures become the sentinel
    pub async fn probe(&self, target: &ProbeTarget, page_location: &Url) -> ProbeResult {
        let (result, reason) = self.execute(target, page_location).await;
        self.logger.log_probe_settled(target, &result, reason.as_deref()).await;
        result
    }

    async fn execute(&self, target: &ProbeTarget, page_location: &Url) -> (ProbeResult, Option<String>) {
        let origin = classify_origin(&target.url, page_location);
        let request_url = cache_busted_url(&target.url, Utc::now().timestamp_millis());
        self.logger.log_probe_dispatched(target, origin, &request_url).await;

        let url = match page_location.join(&request_url) {
            Ok(url) => url,
            Err(e) => return (ProbeResult::failure(), Some(format!("Invalid URL: {}", e))),
        };
        let request = ProbeRequest {
            url,
            mode: origin.request_mode(),
        };

        let started = Instant::now();
        // Expiry drops the in-flight request future, which aborts it.
        let outcome = timeout(self.timeout, self.client.fetch(request)).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Err(_) => (
                ProbeResult::failure(),
                Some(format!("Timed out after {}ms", self.timeout.as_millis())),
            ),
            Ok(Err(e)) => (ProbeResult::failure(), Some(e.to_string())),
            Ok(Ok(response)) if classify_response(&response) => (ProbeResult::success(elapsed_ms), None),
            Ok(Ok(response)) => (
                ProbeResult::failure(),
                Some(format!("HTTP {}", response.status)),
            ),
        }
    }
}

/// Entry point for a host: probe the page once with the production client
pub async fn run(page: &mut PageDocument, logger: ProbeLogger) -> Result<RunSummary> {
    let client = Arc::new(ReqwestProbeClient::new()?);
    Ok(Prober::new(client, logger).run(page).await)
}
