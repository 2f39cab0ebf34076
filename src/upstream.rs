//! HTTP plumbing shared by the RapidAPI-hosted providers.
//!
//! Both providers authenticate with the same pair of static headers and wrap
//! their payloads in a `results` envelope.

use crate::error::UpstreamError;
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const HOST_HEADER: &str = "x-rapidapi-host";
const KEY_HEADER: &str = "x-rapidapi-key";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Builds the pooled client shared by every provider.
pub fn http_client(timeout: Duration) -> Result<Client> {
    let user_agent = format!("movielink/{}", env!("CARGO_PKG_VERSION"));
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .context("Failed to build upstream HTTP client")
}

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub results: Option<T>,
}

/// A provider endpoint plus the credentials injected into every request.
#[derive(Debug, Clone)]
pub struct RapidApiClient {
    client: Client,
    base_url: String,
    host: String,
    api_key: String,
}

impl RapidApiClient {
    pub fn new(client: Client, base_url: &str, host: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            host: host.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        debug!("Fetching {}", url);
        let res = self
            .client
            .get(url)
            .header(HOST_HEADER, &self.host)
            .header(KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = res.status();
        let text = res.text().await.map_err(|source| UpstreamError::Transport {
            url: url.to_string(),
            source,
        })?;
        debug!(%status, body = %text, "Received response from {}", url);

        if status == StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status,
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }
        serde_json::from_str(&text).map_err(|source| UpstreamError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = RapidApiClient::new(Client::new(), "https://movies.example/", "h", "k");
        assert_eq!(api.url("/titles/tt1"), "https://movies.example/titles/tt1");
    }

    #[test]
    fn envelope_accepts_missing_results() {
        let env: Envelope<Vec<String>> = serde_json::from_str("{}").unwrap();
        assert!(env.results.is_none());
        let env: Envelope<Vec<String>> = serde_json::from_str(r#"{"results":null}"#).unwrap();
        assert!(env.results.is_none());
    }
}
