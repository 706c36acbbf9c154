//! HTTP transport for the Webshare API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::WebshareConfig;

use super::{SearchParams, SearchTransport, TransportError};

const USER_AGENT: &str = concat!("shelf/", env!("CARGO_PKG_VERSION"));

/// Speaks the Webshare `POST /api/<action>/` form protocol.
pub struct WebshareTransport {
    client: Client,
    base_url: String,
}

impl WebshareTransport {
    pub fn new(config: &WebshareConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::ConnectionFailed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn action_url(&self, action: &str) -> String {
        format!("{}/api/{}/", self.base_url, action)
    }
}

#[async_trait]
impl SearchTransport for WebshareTransport {
    fn name(&self) -> &str {
        "webshare"
    }

    async fn call(&self, action: &str, params: &SearchParams) -> Result<String, TransportError> {
        let url = self.action_url(action);
        debug!(url = %url, what = %params.what, offset = params.offset, "Calling Webshare API");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::REFERER, format!("{}/", self.base_url))
            .header(reqwest::header::ACCEPT, "text/xml; charset=UTF-8")
            .form(&params.to_form())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else if e.is_connect() {
                    TransportError::ConnectionFailed(e.to_string())
                } else {
                    TransportError::ApiError(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| TransportError::ApiError(format!("Failed to read response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_url_strips_trailing_slash() {
        let config = WebshareConfig {
            base_url: "https://webshare.example/".to_string(),
            token: None,
            timeout_secs: 10,
        };
        let transport = WebshareTransport::new(&config).unwrap();
        assert_eq!(transport.action_url("search"), "https://webshare.example/api/search/");
        assert_eq!(transport.name(), "webshare");
    }
}
