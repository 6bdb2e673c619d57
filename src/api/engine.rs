//! Fans a single IP lookup out to every registered provider at once.
//!
//! Each provider runs in its own tokio task and reports into a shared MPSC
//! channel; the caller drains a [`LookupStream`] and sees records in the
//! order providers answered. The stream ends once every provider has
//! reported, and dropping it early cancels whatever is still in flight.

use crate::api::backend::HttpBackend;
use crate::api::extract::extract;
use crate::api::registry::ProviderRegistry;
use crate::error::FetchError;
use crate::models::{LookupResult, LookupStatus, ProviderSpec};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Per-provider timeout used when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Lower bound on the result channel's capacity.
const MIN_CHANNEL_CAPACITY: usize = 2;

/// Concurrent multi-provider lookup engine.
///
/// Holds the HTTP backend and provider list explicitly, so clones share both
/// and tests can substitute either.
#[derive(Clone)]
pub struct LookupEngine {
    backend: Arc<dyn HttpBackend>,
    registry: Arc<ProviderRegistry>,
    timeout: Duration,
}

impl LookupEngine {
    pub fn new(
        backend: Arc<dyn HttpBackend>,
        registry: ProviderRegistry,
        timeout: Duration,
    ) -> Self {
        Self {
            backend,
            registry: Arc::new(registry),
            timeout,
        }
    }

    /// Starts querying every provider for `ip` and returns the stream their
    /// results arrive on.
    ///
    /// Must be called from within a tokio runtime.
    pub fn lookup(&self, ip: &str) -> LookupStream {
        let providers = self.registry.providers();
        let expected = self.registry.len();
        info!(ip, providers = expected, "starting lookup");

        // Room for every result, so no producer ever waits on the consumer.
        let (tx, rx) = mpsc::channel(expected.max(MIN_CHANNEL_CAPACITY));

        for provider in providers.iter().cloned() {
            let tx = tx.clone();
            let backend = Arc::clone(&self.backend);
            let timeout = self.timeout;
            let ip = ip.to_string();

            tokio::spawn(async move {
                tokio::select! {
                    result = query_provider(backend.as_ref(), timeout, &ip, &provider) => {
                        if tx.send(result).await.is_err() {
                            debug!(provider = %provider.name, "consumer gone, result discarded");
                        }
                    }
                    _ = tx.closed() => {
                        debug!(provider = %provider.name, "lookup abandoned, request cancelled");
                    }
                }
            });
        }

        // The stream ends when the last task drops its sender.
        drop(tx);

        LookupStream { rx, expected }
    }
}

/// Results of one [`LookupEngine::lookup`] in completion order.
#[derive(Debug)]
pub struct LookupStream {
    rx: mpsc::Receiver<LookupResult>,
    expected: usize,
}

impl LookupStream {
    /// Waits for the next provider to report. Returns `None` once all of
    /// them have.
    pub async fn next(&mut self) -> Option<LookupResult> {
        self.rx.recv().await
    }

    /// Number of records this stream yields in total.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Takes a record only if one is already buffered.
    #[cfg(test)]
    pub fn try_next(&mut self) -> Option<LookupResult> {
        self.rx.try_recv().ok()
    }

    /// Drains the remaining records in arrival order.
    #[cfg(test)]
    pub async fn collect_all(mut self) -> Vec<LookupResult> {
        let mut results = Vec::with_capacity(self.expected);
        while let Some(result) = self.next().await {
            results.push(result);
        }
        results
    }
}

/// Performs one GET against `provider` for `ip` and normalizes the answer.
///
/// Transport failures, timeouts, non-200 statuses and unparseable bodies all
/// produce an empty record tagged with the matching [`LookupStatus`]. Paths
/// missing from an otherwise valid body just leave that field empty.
pub async fn query_provider(
    backend: &dyn HttpBackend,
    timeout: Duration,
    ip: &str,
    provider: &ProviderSpec,
) -> LookupResult {
    let url = provider.url_for(ip);
    let name = provider.name.as_str();

    let response = match tokio::time::timeout(timeout, backend.get(&url)).await {
        Ok(Ok(response)) => response,
        Ok(Err(FetchError::Timeout)) | Err(_) => {
            debug!(provider = name, url = %url, "request timed out");
            return LookupResult::failed(name, LookupStatus::Timeout);
        },
        Ok(Err(e)) => {
            debug!(provider = name, url = %url, error = %e, "request failed");
            return LookupResult::failed(name, LookupStatus::Transport);
        },
    };

    if response.status != 200 {
        debug!(provider = name, url = %url, status = response.status, "unexpected status");
        return LookupResult::failed(name, LookupStatus::BadStatus(response.status));
    }

    let doc: Value = match serde_json::from_slice(&response.body) {
        Ok(doc) => doc,
        Err(e) => {
            debug!(provider = name, url = %url, error = %e, "response is not valid JSON");
            return LookupResult::failed(name, LookupStatus::Parse);
        },
    };

    let result = LookupResult {
        provider: provider.name.clone(),
        status: LookupStatus::Ok,
        ip: ip.to_string(),
        country_name: extract(&doc, &provider.country_path),
        city: extract(&doc, &provider.city_path),
        isp: extract(&doc, &provider.isp_path),
        org: extract(&doc, &provider.org_path),
        source_url: url,
    };
    debug!(provider = name, country = %result.country_name, "provider answered");
    result
}
