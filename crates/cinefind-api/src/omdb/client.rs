use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use cinefind_core::config::CatalogConfig;
use cinefind_core::models::{MovieDetail, MovieSummary};

use super::error::OmdbError;
use super::types::{OmdbEnvelope, OmdbSearchResponse, OmdbTitle};
use crate::traits::CatalogService;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb (Open Movie Database) client. One attempt per call, no caching.
#[derive(Clone)]
pub struct OmdbClient {
    base_url: Url,
    api_key: String,
    http: Client,
}

impl OmdbClient {
    pub fn new(base_url: &str, api_key: String) -> Result<Self, OmdbError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            api_key,
            http: Client::new(),
        })
    }

    /// Build from the `[catalog]` config section.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, OmdbError> {
        if config.api_key.is_empty() {
            tracing::warn!("No OMDb API key configured; catalog requests will be rejected");
        }
        Ok(Self {
            base_url: Url::parse(&config.base_url)?,
            api_key: config.api_key.clone(),
            http: build_http(config.timeout_secs)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, OmdbError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "OMDb API error");
            Err(OmdbError::Api {
                status,
                message: body,
            })
        }
    }

    /// GET with the api key plus `params`, unwrapping OMDb's `Response` envelope.
    async fn get_json<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, OmdbError> {
        let resp = self
            .http
            .get(self.base_url.clone())
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body = resp.text().await?;

        let envelope: OmdbEnvelope =
            serde_json::from_str(&body).map_err(|e| OmdbError::Parse(e.to_string()))?;
        if !envelope.is_success() {
            return Err(OmdbError::NotFound(
                envelope.error.unwrap_or_else(|| "no result".into()),
            ));
        }

        serde_json::from_str(&body).map_err(|e| OmdbError::Parse(e.to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http(timeout_secs: u64) -> Result<Client, OmdbError> {
    let mut builder = Client::builder();
    if timeout_secs > 0 {
        builder = builder.timeout(std::time::Duration::from_secs(timeout_secs));
    }
    Ok(builder.build()?)
}

// The browser's fetch has no per-request timeout knob.
#[cfg(target_arch = "wasm32")]
fn build_http(_timeout_secs: u64) -> Result<Client, OmdbError> {
    Ok(Client::new())
}

impl CatalogService for OmdbClient {
    type Error = OmdbError;

    async fn search_by_title(&self, query: &str) -> Result<Vec<MovieSummary>, OmdbError> {
        let search: OmdbSearchResponse = self.get_json(&[("s", query)]).await?;
        tracing::debug!(
            query,
            hits = search.search.len(),
            total = search.total_results.as_deref().unwrap_or("0"),
            "OMDb search"
        );
        Ok(search
            .search
            .into_iter()
            .map(|item| item.into_summary())
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<MovieDetail, OmdbError> {
        let title: OmdbTitle = self.get_json(&[("i", id), ("plot", "full")]).await?;
        Ok(title.into_detail())
    }
}
