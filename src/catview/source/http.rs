use super::CatalogSource;
use crate::error::{CatalogError, Result};
use crate::model::CatalogDocument;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL};

/// Fetches the catalog from an HTTP endpoint.
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("catview/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    async fn fetch(&self) -> Result<CatalogDocument> {
        tracing::debug!(url = %self.url, "fetching catalog");
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, status = status.as_u16(), "catalog endpoint unavailable");
            return Err(CatalogError::Unavailable {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let document = CatalogDocument::from_json(&body)?;
        tracing::info!(url = %self.url, items = document.data.len(), "catalog fetched");
        Ok(document)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
