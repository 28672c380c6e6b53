// Feed surface: a compact ranked list of stories.
// Each row carries score, title, domain, author, age, and comment count.

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::state::LoadingState;

use super::{format_relative_time, render_empty, render_error, render_loading, render_search_line};

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme;

    // Search input line at the bottom while typing a query.
    let (list_area, search_area) = if app.search_active {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let panel = &mut app.feed_panel;
    match &panel.data {
        LoadingState::Idle | LoadingState::Loading => {
            render_loading(frame, list_area, "Loading stories");
        }
        LoadingState::Error(err) => render_error(frame, list_area, err),
        LoadingState::Loaded(_) => {
            let stories = panel.visible();
            if stories.is_empty() {
                render_empty(frame, list_area, theme, "No stories match");
            } else {
                let items: Vec<ListItem> = stories
                    .iter()
                    .map(|story| {
                        let age = story
                            .posted_at()
                            .map(|t| format_relative_time(&t))
                            .unwrap_or_else(|| "-".to_string());

                        let title_line = Line::from(vec![
                            Span::styled(
                                format!("{:>4} ▲ ", story.score),
                                Style::default().fg(theme.accent()),
                            ),
                            Span::styled(
                                story.title.clone(),
                                Style::default().fg(theme.fg()).add_modifier(Modifier::BOLD),
                            ),
                            Span::styled(
                                format!("  ({})", story.domain()),
                                Style::default().fg(theme.dim()),
                            ),
                        ]);
                        let meta_line = Line::from(Span::styled(
                            format!(
                                "       by {} · {} · {} comments",
                                story.by, age, story.descendants
                            ),
                            Style::default().fg(theme.dim()),
                        ));

                        ListItem::new(Text::from(vec![title_line, meta_line]))
                    })
                    .collect();

                let list_widget = List::new(items)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(theme.dim()))
                            .title(" Top Stories "),
                    )
                    .highlight_style(
                        Style::default()
                            .bg(theme.highlight_bg())
                            .add_modifier(Modifier::BOLD),
                    )
                    .highlight_symbol("> ");

                frame.render_stateful_widget(list_widget, list_area, &mut panel.list_state);
            }
        }
    }

    if let Some(search_area) = search_area {
        render_search_line(frame, &app.feed_panel.query, theme, search_area);
    }
}
