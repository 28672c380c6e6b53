// Fetch/cache service for the top-stories feed.
// Fetches and normalizes story batches, keeps the on-disk cache, and serves
// reads through the freshness policy.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;

use crate::cache::store;
use crate::error::{Result, SparkError};
use crate::hn::{HnClient, Story};

use super::freshness::{self, Freshness};

/// How many stories of the index a batch covers.
pub const TOP_STORY_LIMIT: usize = 100;

/// Owns the API client and the story cache file.
pub struct FeedService {
    client: HnClient,
    stories_path: PathBuf,
}

impl FeedService {
    pub fn new(client: HnClient, stories_path: PathBuf) -> Self {
        Self {
            client,
            stories_path,
        }
    }

    /// Fetch the current top stories and overwrite the cache.
    ///
    /// All-or-nothing: if the index request or any detail request fails, the
    /// error propagates and the cache file is left untouched. On success the
    /// stories and the fetch timestamp are written as one atomic document.
    pub async fn refresh_stories(&self) -> Result<Vec<Story>> {
        let items = self.client.top_stories(TOP_STORY_LIMIT).await?;

        let now = Utc::now();
        let fetch_date = now.date_naive();
        let stories: Vec<Story> = items
            .into_iter()
            .map(|item| Story::from_item(item, fetch_date))
            .collect();

        store::write_stories(&self.stories_path, &stories, now)?;

        Ok(stories)
    }

    /// Serve stories no older than `window`, refetching when needed.
    ///
    /// A stale cache survives a failed refetch; only when no cache exists at
    /// all does a failed refetch surface as `Unavailable`. Storage errors
    /// propagate untouched.
    pub async fn get_stories(&self, window: Duration) -> Result<Vec<Story>> {
        // An empty story list is the same as no cache at all.
        let cached = store::read_stories(&self.stories_path)?
            .filter(|entry| !entry.stories.is_empty());

        let decision = freshness::evaluate(
            cached.as_ref().map(|entry| entry.last_fetched),
            window,
            Utc::now(),
        );

        match decision {
            Freshness::ServeCached => {
                if let Some(entry) = cached {
                    return Ok(entry.stories);
                }
                self.refresh_stories().await
            }
            Freshness::Refetch { stale_fallback } => {
                match self.refresh_stories().await {
                    Ok(stories) => Ok(stories),
                    Err(SparkError::Network(err)) => match cached {
                        Some(entry) if stale_fallback => Ok(entry.stories),
                        _ => Err(SparkError::Unavailable(format!("refetch failed: {err}"))),
                    },
                    Err(other) => Err(other),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::freshness::DEFAULT_FRESHNESS_WINDOW;
    use chrono::{DateTime, NaiveDate, Utc};
    use std::fs;
    use tempfile::TempDir;

    fn story(id: u64, title: &str) -> Story {
        Story {
            id,
            title: title.to_string(),
            url: None,
            score: 10,
            by: "tester".to_string(),
            time: 1_700_000_000,
            descendants: 3,
            fetch_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        }
    }

    // Nothing listens on port 1, so every request fails fast with a
    // connection error.
    fn unreachable_service(temp_dir: &TempDir) -> FeedService {
        let client = HnClient::with_base_url("http://127.0.0.1:1").unwrap();
        FeedService::new(client, temp_dir.path().join("stories.json"))
    }

    fn seed_cache(service: &FeedService, stories: &[Story], last_fetched: DateTime<Utc>) {
        store::write_stories(&service.stories_path, stories, last_fetched).unwrap();
    }

    #[tokio::test]
    async fn test_fresh_cache_is_served_without_network() {
        let temp_dir = TempDir::new().unwrap();
        let service = unreachable_service(&temp_dir);
        let stories = vec![story(1, "one"), story(2, "two")];
        seed_cache(&service, &stories, Utc::now());

        let served = service.get_stories(DEFAULT_FRESHNESS_WINDOW).await.unwrap();

        // An unreachable endpoint would have errored, so this proves no
        // network call happened.
        assert_eq!(served, stories);
    }

    #[tokio::test]
    async fn test_stale_cache_survives_failed_refetch() {
        let temp_dir = TempDir::new().unwrap();
        let service = unreachable_service(&temp_dir);
        let stories = vec![story(1, "old")];
        seed_cache(
            &service,
            &stories,
            Utc::now() - chrono::Duration::hours(4),
        );
        let on_disk = fs::read_to_string(&service.stories_path).unwrap();

        let served = service.get_stories(DEFAULT_FRESHNESS_WINDOW).await.unwrap();

        assert_eq!(served, stories);
        // The failed refetch must not have touched the file.
        assert_eq!(fs::read_to_string(&service.stories_path).unwrap(), on_disk);
    }

    #[tokio::test]
    async fn test_no_cache_and_failed_refetch_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let service = unreachable_service(&temp_dir);

        let err = service
            .get_stories(DEFAULT_FRESHNESS_WINDOW)
            .await
            .unwrap_err();

        assert!(matches!(err, SparkError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_empty_cached_batch_counts_as_missing() {
        let temp_dir = TempDir::new().unwrap();
        let service = unreachable_service(&temp_dir);
        seed_cache(&service, &[], Utc::now());

        let err = service
            .get_stories(DEFAULT_FRESHNESS_WINDOW)
            .await
            .unwrap_err();

        assert!(matches!(err, SparkError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_no_cache_behind() {
        let temp_dir = TempDir::new().unwrap();
        let service = unreachable_service(&temp_dir);

        let err = service.refresh_stories().await.unwrap_err();

        assert!(matches!(err, SparkError::Network(_)));
        assert!(!service.stories_path.exists());
    }
}
