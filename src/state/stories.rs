// Per-surface story panel state.
// Each surface owns its stories, search query, sort key, and selection;
// nothing is shared between surfaces.

use chrono::{DateTime, Utc};
use ratatui::widgets::ListState;

use crate::hn::Story;

use super::filter::{self, SortKey};

/// Loading state for async data.
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// State owned by one story surface.
#[derive(Debug, Default)]
pub struct StoryPanel {
    pub data: LoadingState<Vec<Story>>,
    pub query: String,
    pub sort: SortKey,
    pub list_state: ListState,
    /// When this surface last received stories.
    pub loaded_at: Option<DateTime<Utc>>,
}

impl StoryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The filtered, sorted view this surface renders.
    pub fn visible(&self) -> Vec<Story> {
        match self.data.data() {
            Some(stories) => filter::filter_and_sort(stories, &self.query, self.sort),
            None => Vec::new(),
        }
    }

    pub fn set_loading(&mut self) {
        self.data = LoadingState::Loading;
    }

    pub fn set_loaded(&mut self, stories: Vec<Story>, now: DateTime<Utc>) {
        self.data = LoadingState::Loaded(stories);
        self.loaded_at = Some(now);
        self.reset_selection();
    }

    pub fn set_error(&mut self, error: String) {
        self.data = LoadingState::Error(error);
        self.list_state.select(None);
    }

    pub fn push_query(&mut self, c: char) {
        self.query.push(c);
        self.reset_selection();
    }

    pub fn pop_query(&mut self) {
        self.query.pop();
        self.reset_selection();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.reset_selection();
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
        self.reset_selection();
    }

    /// Select the next visible story.
    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 >= len => i,
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous visible story.
    pub fn select_prev(&mut self) {
        if self.visible().is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// The currently selected story of the visible view.
    pub fn selected_story(&self) -> Option<Story> {
        let index = self.list_state.selected()?;
        self.visible().get(index).cloned()
    }

    fn reset_selection(&mut self) {
        if self.visible().is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn story(id: u64, title: &str, score: u32) -> Story {
        Story {
            id,
            title: title.to_string(),
            url: None,
            score,
            by: "tester".to_string(),
            time: id as i64,
            descendants: 0,
            fetch_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        }
    }

    fn loaded_panel() -> StoryPanel {
        let mut panel = StoryPanel::new();
        panel.set_loaded(
            vec![
                story(1, "apple story", 10),
                story(2, "Banana story", 30),
                story(3, "cherry", 20),
            ],
            Utc::now(),
        );
        panel
    }

    #[test]
    fn test_loading_panel_shows_nothing() {
        let mut panel = StoryPanel::new();
        panel.set_loading();
        assert!(panel.data.is_loading());
        assert!(panel.visible().is_empty());
    }

    #[test]
    fn test_loaded_panel_selects_the_top_story() {
        let panel = loaded_panel();
        assert_eq!(panel.list_state.selected(), Some(0));
        // Default sort is score descending.
        assert_eq!(panel.selected_story().unwrap().id, 2);
    }

    #[test]
    fn test_query_narrows_the_view_and_resets_selection() {
        let mut panel = loaded_panel();
        panel.select_next();
        for c in "apple".chars() {
            panel.push_query(c);
        }

        assert_eq!(panel.visible().len(), 1);
        assert_eq!(panel.list_state.selected(), Some(0));
        assert_eq!(panel.selected_story().unwrap().title, "apple story");
    }

    #[test]
    fn test_selection_is_cleared_when_nothing_matches() {
        let mut panel = loaded_panel();
        for c in "zzz".chars() {
            panel.push_query(c);
        }
        assert!(panel.visible().is_empty());
        assert_eq!(panel.list_state.selected(), None);
        assert_eq!(panel.selected_story(), None);
    }

    #[test]
    fn test_selection_stops_at_the_ends() {
        let mut panel = loaded_panel();
        panel.select_prev();
        assert_eq!(panel.list_state.selected(), Some(0));

        panel.select_next();
        panel.select_next();
        panel.select_next();
        assert_eq!(panel.list_state.selected(), Some(2));
    }
}
