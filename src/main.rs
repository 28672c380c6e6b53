// Entry point: wires the cache paths, the Hacker News client, the background
// feed scheduler, and the TUI event loop together.

mod app;
mod cache;
mod error;
mod hn;
mod service;
mod state;
mod ui;

use tokio::sync::mpsc;

use crate::app::App;
use crate::cache::{paths, store};
use crate::error::{Result, SparkError};
use crate::hn::HnClient;
use crate::service::{FeedHandle, FeedService, scheduler};

#[tokio::main]
async fn main() -> Result<()> {
    let stories_path = paths::stories_path()
        .ok_or_else(|| SparkError::Other("could not resolve a cache directory".to_string()))?;
    let theme_path = paths::theme_path()
        .ok_or_else(|| SparkError::Other("could not resolve a cache directory".to_string()))?;

    let client = HnClient::new()?;
    let service = FeedService::new(client, stories_path);

    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    tokio::spawn(scheduler::run(service, request_rx, event_tx));

    let theme = store::read_theme(&theme_path).unwrap_or_default();

    let mut terminal = ratatui::init();
    let mut app = App::new(FeedHandle::new(request_tx), event_rx, theme, theme_path);
    let result = app.run(&mut terminal);
    ratatui::restore();

    result.map_err(SparkError::Io)
}
