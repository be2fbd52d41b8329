//! HTTP client seam used by the dispatcher

use crate::error::{AppError, Result};
use crate::types::{RequestMode, ResponseKind};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// A single probe request
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRequest {
    /// Absolute, cache-busted URL
    pub url: Url,
    pub mode: RequestMode,
}

/// What the dispatcher gets to see of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResponse {
    pub kind: ResponseKind,
    /// HTTP status; always 0 for opaque responses
    pub status: u16,
}

impl ProbeResponse {
    pub fn basic(status: u16) -> Self {
        Self {
            kind: ResponseKind::Basic,
            status,
        }
    }

    pub fn opaque() -> Self {
        Self {
            kind: ResponseKind::Opaque,
            status: 0,
        }
    }
}

/// HTTP client trait for abstraction and testing
///
/// Implementations issue a plain GET with no body and no custom headers and
/// resolve once response headers arrive. For [`RequestMode::NoCors`] the
/// status must be hidden by returning [`ProbeResponse::opaque`]. Deadlines are
/// the dispatcher's job; implementations must be cancel-safe when dropped.
#[async_trait]
pub trait ProbeClient: Send + Sync {
    async fn fetch(&self, request: ProbeRequest) -> Result<ProbeResponse>;
}

/// Production client backed by reqwest
pub struct ReqwestProbeClient {
    client: Client,
}

impl ReqwestProbeClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("{}/{}", crate::PKG_NAME, crate::VERSION))
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ProbeClient for ReqwestProbeClient {
    async fn fetch(&self, request: ProbeRequest) -> Result<ProbeResponse> {
        // The body is never read; dropping the response releases the connection.
        let response = self.client.get(request.url).send().await?;

        Ok(match request.mode {
            RequestMode::Cors => ProbeResponse::basic(response.status().as_u16()),
            RequestMode::NoCors => ProbeResponse::opaque(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_hides_status() {
        let response = ProbeResponse::opaque();
        assert_eq!(response.kind, ResponseKind::Opaque);
        assert_eq!(response.status, 0);
    }

    #[test]
    fn test_client_builds() {
        assert!(ReqwestProbeClient::new().is_ok());
    }
}
