// Hacker News API response types.
// Defines the wire item shape and the normalized story record kept in the
// local cache.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Host used for stories without an external link.
pub const DISCUSSION_HOST: &str = "news.ycombinator.com";

/// Raw story item as returned by the item endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    pub score: u32,
    pub by: String,
    pub time: i64,
    #[serde(default)]
    pub descendants: Option<u32>,
}

/// Normalized story record.
///
/// Immutable once fetched; every story in a batch carries the same
/// `fetch_date` (the UTC calendar date the batch was captured).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: u64,
    pub title: String,
    pub url: Option<String>,
    pub score: u32,
    pub by: String,
    /// Submission time as Unix seconds.
    pub time: i64,
    pub descendants: u32,
    pub fetch_date: NaiveDate,
}

impl Story {
    /// Normalize a wire item, substituting 0 for a missing comment count.
    pub fn from_item(item: Item, fetch_date: NaiveDate) -> Self {
        Self {
            id: item.id,
            title: item.title,
            url: item.url,
            score: item.score,
            by: item.by,
            time: item.time,
            descendants: item.descendants.unwrap_or(0),
            fetch_date,
        }
    }

    /// External link, or the discussion page when the story has none.
    pub fn link(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("https://{}/item?id={}", DISCUSSION_HOST, self.id),
        }
    }

    /// Hostname of the link, without a leading `www.`.
    pub fn domain(&self) -> String {
        let Some(url) = &self.url else {
            return DISCUSSION_HOST.to_string();
        };
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(url);
        let host = rest.split(['/', '?', '#']).next().unwrap_or("");
        let host = host.strip_prefix("www.").unwrap_or(host);
        if host.is_empty() {
            DISCUSSION_HOST.to_string()
        } else {
            host.to_string()
        }
    }

    /// Submission time as a chrono timestamp.
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_missing_descendants_defaults_to_zero() {
        let json = r#"{"id": 1, "title": "Show HN", "score": 42, "by": "pg", "time": 1700000000}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        let story = Story::from_item(item, fetch_date());
        assert_eq!(story.descendants, 0);
        assert_eq!(story.url, None);
    }

    #[test]
    fn test_link_falls_back_to_discussion_page() {
        let story = Story {
            id: 8863,
            title: "My YC app".to_string(),
            url: None,
            score: 104,
            by: "dhouston".to_string(),
            time: 1_175_714_200,
            descendants: 71,
            fetch_date: fetch_date(),
        };
        assert_eq!(story.link(), "https://news.ycombinator.com/item?id=8863");
        assert_eq!(story.domain(), DISCUSSION_HOST);
    }

    #[test]
    fn test_domain_strips_scheme_and_www() {
        let mut story = Story {
            id: 1,
            title: "t".to_string(),
            url: Some("https://www.example.com/a/b?q=1".to_string()),
            score: 1,
            by: "a".to_string(),
            time: 0,
            descendants: 0,
            fetch_date: fetch_date(),
        };
        assert_eq!(story.domain(), "example.com");

        story.url = Some("http://blog.rust-lang.org/post".to_string());
        assert_eq!(story.domain(), "blog.rust-lang.org");
    }

    #[test]
    fn test_batch_date_is_stamped_on_every_story() {
        let json = r#"{"id": 2, "title": "A", "url": "https://a.io", "score": 3,
                       "by": "b", "time": 1700000100, "descendants": 5}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        let story = Story::from_item(item, fetch_date());
        assert_eq!(story.fetch_date, fetch_date());
        assert_eq!(story.descendants, 5);
    }
}
