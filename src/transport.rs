/// HTTP transport seam
///
/// The pipeline treats the wire as a black box: one JSON POST for the RPC
/// call, one GET for the gateway fetch. Keeping it behind a trait lets tests
/// stub the wire and assert which URLs were (or were not) reached.
use crate::error::{ResolverError, ResolverResult};
use async_trait::async_trait;

/// Black-box request/response transport
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body, returning the response body text
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> ResolverResult<String>;

    /// GET a URL, returning the response body text
    async fn get(&self, url: &str) -> ResolverResult<String>;
}

/// Production transport backed by `reqwest`
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with the given user agent and request timeout
    pub fn new(user_agent: &str, timeout: std::time::Duration) -> ResolverResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| ResolverError::Transport(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> ResolverResult<String> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ResolverError::Transport(format!("POST {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(ResolverError::Transport(format!(
                "POST {} returned {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ResolverError::Transport(format!("POST {}: failed to read body: {}", url, e)))
    }

    async fn get(&self, url: &str) -> ResolverResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ResolverError::Transport(format!("GET {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(ResolverError::Transport(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ResolverError::Transport(format!("GET {}: failed to read body: {}", url, e)))
    }
}
