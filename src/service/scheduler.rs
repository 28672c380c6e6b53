// Background task driving the feed service.
// One periodic refresh timer plus the on-demand request loop, on a single
// tokio task; cache writes are idempotent full overwrites, so the two paths
// need no coordination.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;

use super::feed::FeedService;
use super::freshness::DEFAULT_FRESHNESS_WINDOW;
use super::message::{FeedEvent, FeedRequest, FeedResponse};

/// Time between unconditional background refreshes: 180 minutes.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(180 * 60);

/// Run the feed service until every request sender is dropped.
///
/// The first timer tick fires immediately, which doubles as the
/// fetch-on-startup behavior.
pub async fn run(
    service: FeedService,
    mut requests: mpsc::UnboundedReceiver<FeedRequest>,
    events: mpsc::UnboundedSender<FeedEvent>,
) {
    let mut ticker = time::interval(REFRESH_INTERVAL);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let event = match service.refresh_stories().await {
                    Ok(stories) => FeedEvent::Refreshed {
                        count: stories.len(),
                    },
                    Err(err) => FeedEvent::RefreshFailed(err.to_string()),
                };
                let _ = events.send(event);
            }
            request = requests.recv() => {
                let Some(request) = request else { break };
                handle_request(&service, request).await;
            }
        }
    }
}

async fn handle_request(service: &FeedService, request: FeedRequest) {
    match request {
        FeedRequest::GetStories { reply } => {
            let response = match service.get_stories(DEFAULT_FRESHNESS_WINDOW).await {
                Ok(stories) => FeedResponse::Stories(stories),
                Err(err) => FeedResponse::Failed(err.to_string()),
            };
            let _ = reply.send(response);
        }
        FeedRequest::FetchNow { reply } => {
            let response = match service.refresh_stories().await {
                Ok(stories) => FeedResponse::Fetched {
                    count: stories.len(),
                },
                Err(err) => FeedResponse::Failed(err.to_string()),
            };
            let _ = reply.send(response);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store;
    use crate::hn::{HnClient, Story};
    use chrono::{NaiveDate, Utc};
    use tempfile::TempDir;
    use tokio::sync::oneshot;

    fn story(id: u64) -> Story {
        Story {
            id,
            title: format!("story {id}"),
            url: None,
            score: 1,
            by: "tester".to_string(),
            time: 1_700_000_000,
            descendants: 0,
            fetch_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        }
    }

    fn unreachable_service(temp_dir: &TempDir) -> FeedService {
        let client = HnClient::with_base_url("http://127.0.0.1:1").unwrap();
        FeedService::new(client, temp_dir.path().join("stories.json"))
    }

    #[tokio::test]
    async fn test_get_stories_is_answered_from_a_fresh_cache() {
        let temp_dir = TempDir::new().unwrap();
        let service = unreachable_service(&temp_dir);
        store::write_stories(
            &temp_dir.path().join("stories.json"),
            &[story(1), story(2)],
            Utc::now(),
        )
        .unwrap();

        let (reply, rx) = oneshot::channel();
        handle_request(&service, FeedRequest::GetStories { reply }).await;

        match rx.await.unwrap() {
            FeedResponse::Stories(stories) => assert_eq!(stories.len(), 2),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_stories_fails_when_nothing_is_available() {
        let temp_dir = TempDir::new().unwrap();
        let service = unreachable_service(&temp_dir);

        let (reply, rx) = oneshot::channel();
        handle_request(&service, FeedRequest::GetStories { reply }).await;

        assert!(matches!(rx.await.unwrap(), FeedResponse::Failed(_)));
    }

    #[tokio::test]
    async fn test_fetch_now_reports_the_failure() {
        let temp_dir = TempDir::new().unwrap();
        let service = unreachable_service(&temp_dir);

        let (reply, rx) = oneshot::channel();
        handle_request(&service, FeedRequest::FetchNow { reply }).await;

        assert!(matches!(rx.await.unwrap(), FeedResponse::Failed(_)));
    }
}
