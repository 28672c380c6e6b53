// Hacker News API HTTP client.
// Wraps reqwest over the Firebase REST endpoints used by the feed.

use futures::future;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::Result;

use super::types::Item;

const HN_API_BASE: &str = "https://hacker-news.firebaseio.com/v0";

/// Client for the read-only Hacker News API.
pub struct HnClient {
    client: Client,
    base_url: String,
}

impl HnClient {
    /// Create a client against the public API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(HN_API_BASE)
    }

    /// Create a client against a non-default API base.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("spark-tui"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Ids of the current top stories, in rank order.
    pub async fn top_story_ids(&self) -> Result<Vec<u64>> {
        let url = format!("{}/topstories.json", self.base_url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let ids: Vec<u64> = response.json().await?;
        Ok(ids)
    }

    /// Full details for a single item.
    pub async fn item(&self, id: u64) -> Result<Item> {
        let url = format!("{}/item/{}.json", self.base_url, id);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let item: Item = response.json().await?;
        Ok(item)
    }

    /// The first `limit` top stories with full details.
    ///
    /// Detail requests run concurrently; the first failure aborts the whole
    /// batch so callers never observe a partial result.
    pub async fn top_stories(&self, limit: usize) -> Result<Vec<Item>> {
        let ids = self.top_story_ids().await?;
        let fetches = ids.into_iter().take(limit).map(|id| self.item(id));
        let items = future::try_join_all(fetches).await?;
        Ok(items)
    }
}
