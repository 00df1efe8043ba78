//! HTTP heartbeat implementation.

use super::service::{HeartbeatError, HeartbeatResult, LivenessReporter};
use crate::config::mask_token;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Sends a GET request to `{target}{token}` for every heartbeat.
///
/// The client carries a request timeout so a slow monitor cannot pile up
/// outstanding pings. Logs and errors only ever carry the masked URL.
pub struct HttpHeartbeat {
    client: Client,
    url: String,
    masked_url: String,
}

impl HttpHeartbeat {
    /// Builds the reporter.
    ///
    /// # Arguments
    ///
    /// - `target` - Monitor base URL (`HEARTBEAT_TARGET`)
    /// - `token` - Monitor token appended to the base URL (`HEARTBEAT_TOKEN`)
    /// - `timeout` - Per-request timeout (`HEARTBEAT_TARGET_TIMEOUT`)
    ///
    /// # Errors
    ///
    /// Returns [`HeartbeatError::Request`] if the HTTP client cannot be built.
    pub fn new(target: &str, token: &str, timeout: Duration) -> HeartbeatResult<Self> {
        let url = format!("{target}{token}");
        let masked_url = format!("{target}{}", mask_token(token));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pxy-redirect/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HeartbeatError::Request {
                url: masked_url.clone(),
                message: e.without_url().to_string(),
            })?;

        Ok(Self {
            client,
            url,
            masked_url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Monitor URL with the token masked, safe to log.
    pub fn masked_url(&self) -> &str {
        &self.masked_url
    }
}

#[async_trait]
impl LivenessReporter for HttpHeartbeat {
    async fn beat(&self) -> HeartbeatResult<()> {
        debug!("Emitting heartbeat to URL: {}", self.masked_url);

        let response =
            self.client
                .get(&self.url)
                .send()
                .await
                .map_err(|e| HeartbeatError::Request {
                    url: self.masked_url.clone(),
                    message: e.without_url().to_string(),
                })?;

        if response.status() != StatusCode::OK {
            return Err(HeartbeatError::UnexpectedStatus(response.status().as_u16()));
        }

        Ok(())
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_concatenation() {
        let heartbeat = HttpHeartbeat::new(
            "https://uptime.example.com/ping/",
            "abc123",
            Duration::from_secs(10),
        )
        .unwrap();

        assert_eq!(heartbeat.url(), "https://uptime.example.com/ping/abc123");
        assert_eq!(heartbeat.masked_url(), "https://uptime.example.com/ping/abc1***");
        assert!(heartbeat.is_enabled());
    }

    #[tokio::test]
    async fn test_unreachable_target_is_error() {
        let heartbeat =
            HttpHeartbeat::new("http://127.0.0.1:9/", "secret-token", Duration::from_millis(500))
                .unwrap();

        let err = heartbeat.beat().await.unwrap_err();
        assert!(matches!(err, HeartbeatError::Request { .. }));
        assert!(!err.to_string().contains("secret-token"));
        assert!(err.to_string().contains("http://127.0.0.1:9/secr***"));
    }
}
