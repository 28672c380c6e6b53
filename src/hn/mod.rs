// Hacker News API module.
// Client and types for the public Firebase REST API.

pub mod client;
pub mod types;

pub use client::HnClient;
pub use types::{Item, Story};
