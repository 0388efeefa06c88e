use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, Method,
};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use shared_config::PortalConfig;
use shared_models::ApiError;

use crate::response::process_response;
use crate::retry::send_with_retry;

/// HTTP client for the portal API.
///
/// Every call goes through the retry policy and the response normalizer, so
/// callers only ever see `Ok(payload)` or a structured [`ApiError`].
pub struct HttpClient {
    client: Client,
    config: PortalConfig,
}

impl HttpClient {
    pub fn new(config: &PortalConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// One HTTP exchange. The network call races the configured timer;
    /// whichever settles first wins, and an expired timer surfaces as
    /// [`ApiError::Timeout`] rather than any server status.
    pub(crate) async fn send_once(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = self.client.request(method, url).headers(Self::default_headers());

        if let Some(body) = body {
            request = request.json(body);
        }

        let timeout = Duration::from_millis(self.config.timeout_ms);
        match tokio::time::timeout(timeout, request.send()).await {
            Ok(result) => result.map_err(ApiError::from),
            Err(_) => Err(ApiError::Timeout {
                ms: self.config.timeout_ms,
            }),
        }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!("{} {}", method, url);

        let response = send_with_retry(self, method, &url, body.as_ref(), &self.config).await?;
        process_response(response).await
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::DELETE, path, None).await
    }
}
