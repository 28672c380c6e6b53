// Cache store for reading and writing cached data.
// Handles JSON serialization and atomic filesystem writes.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hn::Story;
use crate::state::Theme;

/// The cached story batch and the instant it was fetched.
///
/// Lives in a single JSON document so the stories and their timestamp are
/// always read and written as one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryCache {
    pub stories: Vec<Story>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_fetched: DateTime<Utc>,
}

/// Read the cached story batch, if any.
pub fn read_stories(path: &Path) -> Result<Option<StoryCache>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let cached: StoryCache = serde_json::from_str(&contents)?;
    Ok(Some(cached))
}

/// Overwrite the cached story batch together with its fetch timestamp.
pub fn write_stories(path: &Path, stories: &[Story], last_fetched: DateTime<Utc>) -> Result<()> {
    let entry = StoryCache {
        stories: stories.to_vec(),
        last_fetched,
    };
    write_json(path, &serde_json::to_string_pretty(&entry)?)
}

/// Read the persisted theme preference; a missing file means light.
pub fn read_theme(path: &Path) -> Result<Theme> {
    if !path.exists() {
        return Ok(Theme::default());
    }

    let contents = fs::read_to_string(path)?;
    let theme: Theme = serde_json::from_str(&contents)?;
    Ok(theme)
}

/// Persist the theme preference.
pub fn write_theme(path: &Path, theme: Theme) -> Result<()> {
    write_json(path, &serde_json::to_string(&theme)?)
}

// Single write through a temp file; a concurrent reader sees either the old
// document or the new one, never a torn pair.
fn write_json(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn story(id: u64, title: &str) -> Story {
        Story {
            id,
            title: title.to_string(),
            url: Some(format!("https://example.com/{id}")),
            score: 10,
            by: "tester".to_string(),
            time: 1_700_000_000,
            descendants: 3,
            fetch_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        }
    }

    #[test]
    fn test_write_and_read_stories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stories.json");

        let stories = vec![story(1, "one"), story(2, "two")];
        let fetched = Utc::now();

        write_stories(&path, &stories, fetched).unwrap();

        let cached = read_stories(&path).unwrap().unwrap();
        assert_eq!(cached.stories, stories);
        assert_eq!(
            cached.last_fetched.timestamp_millis(),
            fetched.timestamp_millis()
        );
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stories.json");

        assert!(read_stories(&path).unwrap().is_none());
    }

    #[test]
    fn test_overwrite_replaces_the_whole_batch() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stories.json");

        write_stories(&path, &[story(1, "old")], Utc::now()).unwrap();
        write_stories(&path, &[story(2, "new")], Utc::now()).unwrap();

        let cached = read_stories(&path).unwrap().unwrap();
        assert_eq!(cached.stories.len(), 1);
        assert_eq!(cached.stories[0].id, 2);
    }

    #[test]
    fn test_write_leaves_no_temp_file_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stories.json");

        write_stories(&path, &[story(1, "one")], Utc::now()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_theme_defaults_to_light_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("theme.json");

        assert_eq!(read_theme(&path).unwrap(), Theme::Light);
    }

    #[test]
    fn test_theme_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("theme.json");

        write_theme(&path, Theme::Dark).unwrap();
        assert_eq!(read_theme(&path).unwrap(), Theme::Dark);
    }
}
