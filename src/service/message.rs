// Request/response protocol between the UI surfaces and the feed service.
// Every request carries a oneshot reply slot, so it is answered exactly once.

use tokio::sync::{mpsc, oneshot};

use crate::error::{Result, SparkError};
use crate::hn::Story;

/// A request from a UI surface to the background feed service.
#[derive(Debug)]
pub enum FeedRequest {
    /// Current stories, cached or refetched per the freshness policy.
    GetStories {
        reply: oneshot::Sender<FeedResponse>,
    },
    /// Unconditional refetch, answered with the fetched count.
    FetchNow {
        reply: oneshot::Sender<FeedResponse>,
    },
}

/// The single response to a `FeedRequest`.
#[derive(Debug, Clone)]
pub enum FeedResponse {
    Stories(Vec<Story>),
    Fetched { count: usize },
    Failed(String),
}

/// Outcome of a timer-driven background refresh, for the console log.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    Refreshed { count: usize },
    RefreshFailed(String),
}

/// UI-side handle for talking to the feed service.
#[derive(Clone)]
pub struct FeedHandle {
    tx: mpsc::UnboundedSender<FeedRequest>,
}

impl FeedHandle {
    pub fn new(tx: mpsc::UnboundedSender<FeedRequest>) -> Self {
        Self { tx }
    }

    /// Ask for stories; the reply arrives on the returned receiver.
    pub fn get_stories(&self) -> Result<oneshot::Receiver<FeedResponse>> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(FeedRequest::GetStories { reply })
            .map_err(|_| SparkError::Disconnected)?;
        Ok(rx)
    }

    /// Ask for an immediate refetch; the reply arrives on the returned
    /// receiver.
    pub fn fetch_now(&self) -> Result<oneshot::Receiver<FeedResponse>> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(FeedRequest::FetchNow { reply })
            .map_err(|_| SparkError::Disconnected)?;
        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_reports_a_gone_service() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        let handle = FeedHandle::new(tx);
        assert!(matches!(
            handle.get_stories().unwrap_err(),
            SparkError::Disconnected
        ));
        assert!(matches!(
            handle.fetch_now().unwrap_err(),
            SparkError::Disconnected
        ));
    }
}
