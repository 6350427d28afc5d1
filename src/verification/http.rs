// HTTP boundary - Replaceable client used by the network-backed checkers

use crate::error::TrustError;
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_USER_AGENT: &str = concat!("certtrust/", env!("CARGO_PKG_VERSION"));

/// Milliseconds since `started`, saturating at `u64::MAX`
pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Status code and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Checkers only accept an exact 200
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Minimal GET-only client
///
/// Any status code is a successful response at this level; only transport
/// failures (timeouts, DNS, connection resets, unreadable bodies) are errors.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, TrustError>;
}

/// `reqwest`-backed client with a bounded request timeout
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, TrustError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| TrustError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, TrustError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| TrustError::from_reqwest(url, self.timeout, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TrustError::from_reqwest(url, self.timeout, e))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_200_is_ok() {
        assert!(HttpResponse::new(200, "").is_ok());
        assert!(!HttpResponse::new(204, "").is_ok());
        assert!(!HttpResponse::new(500, "").is_ok());
    }

    #[test]
    fn test_elapsed_ms() {
        let started = Instant::now() - Duration::from_millis(1500);
        assert!(elapsed_ms(started) >= 1500);
        assert!(elapsed_ms(Instant::now()) < 1000);
    }

    #[test]
    fn test_client_creation() {
        let client = ReqwestHttpClient::new(Duration::from_secs(3), DEFAULT_USER_AGENT).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_network_error() {
        let client =
            ReqwestHttpClient::new(Duration::from_millis(500), DEFAULT_USER_AGENT).unwrap();
        // Port 9 on loopback: nothing listens there in test environments
        let err = client.get("http://127.0.0.1:9/", &[]).await.unwrap_err();
        assert!(err.is_network());
    }
}
