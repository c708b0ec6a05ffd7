//! reqwest-backed implementation of the ficha API.

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::envelope::{decode_list, ApiVersion};
use super::{ReferenceSource, SyncClient};
use crate::config::Config;
use crate::error::FichaError;
use crate::models::{Ficha, Program, Site};

/// HTTP client for the ficha API.
#[derive(Debug, Clone)]
pub struct HttpSyncClient {
    base_url: String,
    api_version: ApiVersion,
    client: reqwest::Client,
}

impl HttpSyncClient {
    /// Creates a client with reqwest's default settings.
    pub fn new(base_url: impl Into<String>, api_version: ApiVersion) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_version,
            client: reqwest::Client::new(),
        }
    }

    /// Creates a client from the resolved configuration, applying its timeout.
    pub fn from_config(config: &Config) -> Result<Self, FichaError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.value))
            .build()?;

        Ok(Self {
            base_url: config.api_url.value.trim_end_matches('/').to_string(),
            api_version: config.api_version.value,
            client,
        })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the API generation this client speaks.
    pub fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and turns transport failures and non-2xx statuses
    /// into network errors.
    async fn send(&self, request: RequestBuilder) -> Result<Response, FichaError> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FichaError::Network(format!(
                "Server returned status {}",
                status
            )));
        }

        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, FichaError> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FichaError::MalformedResponse(e.to_string()))
    }
}

impl SyncClient for HttpSyncClient {
    async fn list(&self) -> Result<Vec<Ficha>, FichaError> {
        let url = self.url("/fichas");
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(&url)).await?;
        let body = response.bytes().await?;
        decode_list(self.api_version, &body)
    }

    async fn create(&self, ficha: &Ficha) -> Result<Ficha, FichaError> {
        let url = self.url("/fichas");
        tracing::debug!("POST {} (code {})", url, ficha.code);

        let response = self.send(self.client.post(&url).json(ficha)).await?;
        Self::read_json(response).await
    }

    async fn update(&self, code: i64, ficha: &Ficha) -> Result<Ficha, FichaError> {
        let url = self.url(&format!("/fichas/{}", code));
        tracing::debug!("PUT {}", url);

        let response = self.send(self.client.put(&url).json(ficha)).await?;
        Self::read_json(response).await
    }

    async fn delete(&self, code: i64) -> Result<(), FichaError> {
        let url = self.url(&format!("/fichas/{}", code));
        tracing::debug!("DELETE {}", url);

        self.send(self.client.delete(&url)).await?;
        Ok(())
    }
}

impl ReferenceSource for HttpSyncClient {
    async fn programs(&self) -> Result<Vec<Program>, FichaError> {
        let url = self.url("/programas");
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(&url)).await?;
        Self::read_json(response).await
    }

    async fn sites(&self) -> Result<Vec<Site>, FichaError> {
        let url = self.url("/sedes");
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(&url)).await?;
        Self::read_json(response).await
    }
}
