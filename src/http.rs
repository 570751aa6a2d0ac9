//! Page client used by every scraper.
//!
//! Scrapers never talk to `reqwest` directly; they go through [`PageClient`]
//! so the network can be swapped for canned pages in tests.

use crate::config::FetchSettings;
use crate::error::FetchError;
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// A single GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
}

impl PageRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            bearer: None,
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }
}

#[async_trait]
pub trait PageClient: Send + Sync {
    /// Perform the request and return the response body as text.
    ///
    /// Non-2xx responses are errors.
    async fn fetch(&self, request: &PageRequest) -> Result<String, FetchError>;
}

/// [`PageClient`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.timeout())
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl PageClient for HttpClient {
    #[instrument(level = "info", skip_all, fields(url = %request.url))]
    async fn fetch(&self, request: &PageRequest) -> Result<String, FetchError> {
        let mut builder = self.http.get(&request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Request failed");
            return Err(FetchError::Status {
                url: request.url.clone(),
                status,
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
