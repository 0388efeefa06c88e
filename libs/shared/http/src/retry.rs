use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

use shared_config::PortalConfig;
use shared_models::ApiError;

use crate::client::HttpClient;

/// Issues the identical request up to `max_retries` times in total, sleeping
/// the fixed `retry_delay_ms` between attempts.
///
/// Retried outcomes: transport failure (network error or timeout) and any
/// status >= 500. 4xx responses are returned on the first attempt. After the
/// budget is spent the last response or error is surfaced unchanged, so a
/// caller cannot tell a first-try failure from an exhausted retry run except
/// through the logs.
pub(crate) async fn send_with_retry(
    client: &HttpClient,
    method: Method,
    url: &str,
    body: Option<&Value>,
    config: &PortalConfig,
) -> Result<reqwest::Response, ApiError> {
    let attempts = config.max_retries.max(1);
    let mut attempt = 1;

    loop {
        match client.send_once(method.clone(), url, body).await {
            Ok(response) if response.status().is_server_error() && attempt < attempts => {
                warn!(
                    "server error {} from {}, retrying ({}/{} attempts used)",
                    response.status(),
                    url,
                    attempt,
                    attempts
                );
            }
            Ok(response) => return Ok(response),
            Err(err) if attempt < attempts => {
                warn!(
                    "transport error calling {}: {}, retrying ({}/{} attempts used)",
                    url, err, attempt, attempts
                );
            }
            Err(err) => return Err(err),
        }

        sleep(Duration::from_millis(config.retry_delay_ms)).await;
        attempt += 1;
    }
}
