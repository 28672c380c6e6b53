// State management module.
// Per-surface story panels, pure filtering/sorting, and the theme preference.

#![allow(dead_code)]

pub mod filter;
pub mod stories;
pub mod theme;

pub use filter::SortKey;
pub use stories::{LoadingState, StoryPanel};
pub use theme::Theme;
