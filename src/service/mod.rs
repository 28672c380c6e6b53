// Background feed service module.
// Owns fetching, the freshness policy, cache writes, and the refresh timer.

pub mod feed;
pub mod freshness;
pub mod message;
pub mod scheduler;

pub use feed::{FeedService, TOP_STORY_LIMIT};
pub use freshness::{DEFAULT_FRESHNESS_WINDOW, Freshness};
pub use message::{FeedEvent, FeedHandle, FeedRequest, FeedResponse};
pub use scheduler::REFRESH_INTERVAL;
