//! Marketaux news API client

use crate::error::{MarketError, Result};
use crate::types::NewsArticle;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::sync::Arc;

const BASE_URL: &str = "https://api.marketaux.com/v1";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Marketaux client for market news
#[derive(Debug, Clone)]
pub struct MarketauxClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

impl MarketauxClient {
    /// Create a new Marketaux client with rate limiting
    ///
    /// # Arguments
    /// * `api_key` - Marketaux API token
    /// * `rate_limit` - Requests per minute
    pub fn new(api_key: impl Into<String>, rate_limit: u32) -> Self {
        let quota =
            Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::new(60).unwrap()));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Self {
            client: Client::new(),
            api_key: api_key.into(),
            rate_limiter,
        }
    }

    /// Latest US/FR market news with entity filtering, capped at 15
    /// articles.
    pub async fn latest_news(&self) -> Result<Vec<NewsArticle>> {
        self.rate_limiter.until_ready().await;

        #[derive(Deserialize)]
        struct Payload {
            #[serde(default)]
            data: Vec<NewsArticle>,
        }

        let response = self
            .client
            .get(format!("{BASE_URL}/news/all"))
            .query(&[
                ("countries", "us,fr"),
                ("filter_entities", "true"),
                ("limit", "15"),
                ("language", "en"),
                ("api_token", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| MarketError::Unavailable(format!("Marketaux request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::Unavailable(format!(
                "Marketaux API error {status}: {body}"
            )));
        }

        let payload: Payload = response
            .json()
            .await
            .map_err(|e| MarketError::MalformedResponse(format!("Marketaux payload: {e}")))?;

        Ok(payload.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_payload_shape() {
        #[derive(Deserialize)]
        struct Payload {
            #[serde(default)]
            data: Vec<NewsArticle>,
        }

        let payload: Payload = serde_json::from_str(
            r#"{
                "meta": {"found": 1, "returned": 1},
                "data": [{
                    "uuid": "abc-123",
                    "title": "Markets rally",
                    "description": "Stocks climbed on Tuesday.",
                    "url": "https://example.com/a",
                    "published_at": "2025-01-07T14:00:00.000000Z",
                    "source": "example.com"
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(payload.data.len(), 1);
        assert_eq!(payload.data[0].title.as_deref(), Some("Markets rally"));
        assert_eq!(payload.data[0].snippet, None);
    }

    #[tokio::test]
    #[ignore] // Requires network access and a MARKETAUX_API_KEY
    async fn test_latest_news() {
        let api_key = std::env::var("MARKETAUX_API_KEY").unwrap();
        let client = MarketauxClient::new(api_key, 60);
        let articles = client.latest_news().await.unwrap();
        assert!(!articles.is_empty());
    }
}
