// Client-side filtering and sorting of the in-memory story set.
// Pure functions reapplied on every keystroke; the source slice is never
// mutated.

use crate::hn::Story;

/// Sort order for a story surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Highest score first.
    #[default]
    Score,
    /// Newest submission first.
    Time,
    /// Title, case-insensitive ascending.
    Title,
    /// Most comments first.
    Comments,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            SortKey::Score => SortKey::Time,
            SortKey::Time => SortKey::Title,
            SortKey::Title => SortKey::Comments,
            SortKey::Comments => SortKey::Score,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Score => "score",
            SortKey::Time => "time",
            SortKey::Title => "title",
            SortKey::Comments => "comments",
        }
    }
}

/// Case-insensitive substring match over title and author.
pub fn matches(story: &Story, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    story.title.to_lowercase().contains(&query) || story.by.to_lowercase().contains(&query)
}

/// The filtered, sorted view a surface renders.
pub fn filter_and_sort(stories: &[Story], query: &str, sort: SortKey) -> Vec<Story> {
    let mut view: Vec<Story> = stories
        .iter()
        .filter(|story| matches(story, query))
        .cloned()
        .collect();

    match sort {
        SortKey::Score => view.sort_by(|a, b| b.score.cmp(&a.score)),
        SortKey::Time => view.sort_by(|a, b| b.time.cmp(&a.time)),
        SortKey::Title => {
            view.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        SortKey::Comments => view.sort_by(|a, b| b.descendants.cmp(&a.descendants)),
    }

    view
}
