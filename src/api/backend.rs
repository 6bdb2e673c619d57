//! The HTTP seam the lookup engine talks through.
//!
//! Production lookups go through [`ReqwestBackend`]; tests plug in fakes that
//! control latency and payloads without touching the network.

use crate::error::{AppError, FetchError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Status code and raw body of a completed GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Something that can perform a plain GET and hand back the raw response.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn get(&self, url: &str) -> std::result::Result<HttpResponse, FetchError>;
}

/// [`HttpBackend`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: Client,
}

impl ReqwestBackend {
    /// Creates a backend whose client gives up on any request after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(AppError::from)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get(&self, url: &str) -> std::result::Result<HttpResponse, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!(url, status, bytes = body.len(), "received response");
        Ok(HttpResponse { status, body })
    }
}
