//! HTTP client for the network data service.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::NetworkError;
use super::records::{LineRecord, StopRecord};

/// Configuration for the network data client.
#[derive(Debug, Clone)]
pub struct NetworkClientConfig {
    /// Base URL; `/stops` and `/lines` are appended
    pub base_url: String,
    /// Optional API key sent as `x-apikey`
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NetworkClientConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }

    /// Authenticate with an API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// Client that fetches stop and line records over HTTP.
#[derive(Debug, Clone)]
pub struct NetworkClient {
    http: reqwest::Client,
    base_url: String,
}

impl NetworkClient {
    /// Create a new client.
    pub fn new(config: NetworkClientConfig) -> Result<Self, NetworkError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).map_err(|_| NetworkError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
            headers.insert(HeaderName::from_static("x-apikey"), value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch every stop.
    pub async fn fetch_stops(&self) -> Result<Vec<StopRecord>, NetworkError> {
        self.get_json("stops").await
    }

    /// Fetch every line.
    pub async fn fetch_lines(&self) -> Result<Vec<LineRecord>, NetworkError> {
        self.get_json("lines").await
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: &str) -> Result<T, NetworkError> {
        let url = format!("{}/{}", self.base_url, resource);
        debug!(%url, "Fetching network data");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(NetworkError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NetworkError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| NetworkError::Json {
            message: e.to_string(),
        })
    }
}
