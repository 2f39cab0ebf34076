use crate::config::Config;
use crate::error::UpstreamError;
use crate::models::StreamingOption;
use crate::upstream::{Envelope, RapidApiClient};
use async_trait::async_trait;
use reqwest::Client;

#[async_trait]
pub trait StreamingApi: Send + Sync {
    async fn fetch_streaming_options(&self, id: &str)
        -> Result<Vec<StreamingOption>, UpstreamError>;
}

/// Client for the streaming-availability provider.
#[derive(Debug, Clone)]
pub struct StreamingClient {
    api: RapidApiClient,
}

impl StreamingClient {
    pub fn new(api: RapidApiClient) -> Self {
        Self { api }
    }

    pub fn from_config(config: &Config, client: Client) -> Self {
        Self::new(RapidApiClient::new(
            client,
            &config.streaming_api_url,
            &config.streaming_api_host,
            &config.rapid_api_key,
        ))
    }
}

#[async_trait]
impl StreamingApi for StreamingClient {
    async fn fetch_streaming_options(
        &self,
        id: &str,
    ) -> Result<Vec<StreamingOption>, UpstreamError> {
        let url = self.api.url(&format!("/shows/{}", urlencoding::encode(id)));
        let data: Envelope<Vec<StreamingOption>> = self.api.get_json(&url).await?;
        Ok(data.results.unwrap_or_default())
    }
}
