// Cache path utilities.
// Resolves the on-disk locations of the story cache and the theme preference.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Base cache directory (~/.cache/spark on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "spark").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the cached story batch and its fetch timestamp.
pub fn stories_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("stories.json"))
}

/// Path to the persisted theme preference.
pub fn theme_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("theme.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_the_cache_dir() {
        let stories = stories_path().unwrap();
        let theme = theme_path().unwrap();

        assert!(stories.ends_with("stories.json"));
        assert!(theme.ends_with("theme.json"));
        assert_eq!(stories.parent(), theme.parent());
    }
}
