use crate::models::record::{Record, SearchResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_SOURCE_URL: &str =
    "https://openlibrary.org/search.json?title=the+lord+of+the+rings";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected status: {0}")]
    Status(StatusCode),
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where the dataset view reads its records from.
#[async_trait]
pub trait RecordSource {
    async fn fetch_records(&self) -> Result<Vec<Record>, FetchError>;
}

pub struct OpenLibrarySource {
    client: Client,
    url: String,
}

impl OpenLibrarySource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for OpenLibrarySource {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_URL)
    }
}

#[async_trait]
impl RecordSource for OpenLibrarySource {
    async fn fetch_records(&self) -> Result<Vec<Record>, FetchError> {
        info!("Fetching records from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.text().await?;
        let search: SearchResponse = serde_json::from_str(&body)?;

        info!(
            "Fetched {} records ({} matches reported)",
            search.docs.len(),
            search
                .num_found
                .map_or_else(|| "unknown".to_string(), |n| n.to_string())
        );
        Ok(search.docs)
    }
}
