use crate::config::Config;
use crate::error::UpstreamError;
use crate::models::{Actor, TitleInfo};
use crate::upstream::{Envelope, RapidApiClient};
use async_trait::async_trait;
use reqwest::Client;

#[async_trait]
pub trait MetadataApi: Send + Sync {
    async fn fetch_title(&self, id: &str) -> Result<TitleInfo, UpstreamError>;
    async fn fetch_main_actors(&self, id: &str) -> Result<Vec<Actor>, UpstreamError>;
}

/// Client for the movie-metadata provider.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    api: RapidApiClient,
}

impl MetadataClient {
    pub fn new(api: RapidApiClient) -> Self {
        Self { api }
    }

    pub fn from_config(config: &Config, client: Client) -> Self {
        Self::new(RapidApiClient::new(
            client,
            &config.movie_api_url,
            &config.movie_api_host,
            &config.rapid_api_key,
        ))
    }
}

#[async_trait]
impl MetadataApi for MetadataClient {
    async fn fetch_title(&self, id: &str) -> Result<TitleInfo, UpstreamError> {
        let url = self.api.url(&format!(
            "/titles/{}?info=base_info",
            urlencoding::encode(id)
        ));
        let data: Envelope<TitleInfo> = self.api.get_json(&url).await?;
        // The provider answers unknown titles with `"results": null`.
        data.results.ok_or(UpstreamError::NotFound { url })
    }

    async fn fetch_main_actors(&self, id: &str) -> Result<Vec<Actor>, UpstreamError> {
        let url = self
            .api
            .url(&format!("/titles/{}/main_actors", urlencoding::encode(id)));
        let data: Envelope<Vec<Actor>> = self.api.get_json(&url).await?;
        Ok(data.results.unwrap_or_default())
    }
}
