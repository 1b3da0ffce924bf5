//! HTTP transport for CourtListener's search endpoint.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use tracing::info;

use crate::search::{SearchPage, SearchQuery, SearchTransport};
use crate::{ApiKey, FetchConfig, SyncError};

/// Search client for CourtListener's REST API.
pub struct CourtListenerClient {
    client: reqwest::Client,
    search_url: String,
    api_key: ApiKey,
}

impl CourtListenerClient {
    /// Create a client from a validated config. There is no way to build
    /// one without an API key.
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            search_url: config.search_url(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl SearchTransport for CourtListenerClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, SyncError> {
        info!(
            court = query.court,
            order_by = query.ordering.order_by(),
            "searching opinions"
        );
        let resp = self
            .client
            .get(&self.search_url)
            .query(&query.params())
            .header(AUTHORIZATION, format!("Token {}", self.api_key.expose()))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp.text().await?;
        let page: SearchPage = serde_json::from_str(&text)?;
        Ok(page)
    }
}
