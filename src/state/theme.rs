// Theme preference shared by the story surfaces.
// Persisted on its own, independent of the story cache; light is the default.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Primary text color.
    pub fn fg(&self) -> Color {
        match self {
            Theme::Light => Color::Black,
            Theme::Dark => Color::White,
        }
    }

    /// Secondary color for metadata.
    pub fn dim(&self) -> Color {
        match self {
            Theme::Light => Color::DarkGray,
            Theme::Dark => Color::Gray,
        }
    }

    /// Accent color for titles and the active tab.
    pub fn accent(&self) -> Color {
        match self {
            Theme::Light => Color::Blue,
            Theme::Dark => Color::Cyan,
        }
    }

    /// Background of the selected row.
    pub fn highlight_bg(&self) -> Color {
        match self {
            Theme::Light => Color::Gray,
            Theme::Dark => Color::DarkGray,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_light() {
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn test_serializes_as_a_lowercase_string() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let parsed: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(parsed, Theme::Light);
    }

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }
}
