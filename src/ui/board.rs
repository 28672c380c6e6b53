// Board surface: a card grid of stories.
// Each card shows the title, author, domain tag, and a score/comment footer.

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::hn::Story;
use crate::state::{LoadingState, Theme};

use super::{format_relative_time, render_empty, render_error, render_loading, render_search_line};

const CARD_HEIGHT: u16 = 6;

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme;

    let (grid_area, search_area) = if app.search_active {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let panel = &app.board_panel;
    match &panel.data {
        LoadingState::Idle | LoadingState::Loading => {
            render_loading(frame, grid_area, "Loading stories");
        }
        LoadingState::Error(err) => render_error(frame, grid_area, err),
        LoadingState::Loaded(_) => {
            let stories = panel.visible();
            if stories.is_empty() {
                render_empty(frame, grid_area, theme, "No stories match");
            } else {
                let selected = panel.list_state.selected().unwrap_or(0);
                draw_grid(frame, &stories, selected, theme, grid_area);
            }
        }
    }

    if let Some(search_area) = search_area {
        render_search_line(frame, &app.board_panel.query, theme, search_area);
    }
}

// Pages of rows × columns; the page containing the selection is shown.
fn draw_grid(frame: &mut Frame, stories: &[Story], selected: usize, theme: Theme, area: Rect) {
    let cols = if area.width >= 150 { 3u16 } else { 2u16 };
    let rows = (area.height / CARD_HEIGHT).max(1);
    let per_page = (cols * rows) as usize;
    let start = (selected / per_page) * per_page;

    let row_constraints: Vec<Constraint> =
        (0..rows).map(|_| Constraint::Length(CARD_HEIGHT)).collect();
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(area);

    let mut index = start;
    for row_area in row_areas.iter() {
        let col_constraints: Vec<Constraint> =
            (0..cols).map(|_| Constraint::Ratio(1, cols as u32)).collect();
        let col_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(col_constraints)
            .split(*row_area);

        for col_area in col_areas.iter() {
            if let Some(story) = stories.get(index) {
                draw_card(frame, story, index == selected, theme, *col_area);
            }
            index += 1;
        }
    }
}

fn draw_card(frame: &mut Frame, story: &Story, selected: bool, theme: Theme, area: Rect) {
    let border = if selected { theme.accent() } else { theme.dim() };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", story.domain()))
        .title_style(Style::default().fg(theme.dim()));

    let age = story
        .posted_at()
        .map(|t| format_relative_time(&t))
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        Line::from(Span::styled(
            story.title.clone(),
            Style::default().fg(theme.fg()).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("by {} · {}", story.by, age),
            Style::default().fg(theme.dim()),
        )),
        Line::from(vec![
            Span::styled(
                format!("▲ {}", story.score),
                Style::default().fg(theme.accent()),
            ),
            Span::styled(
                format!("   {} comments", story.descendants),
                Style::default().fg(theme.dim()),
            ),
        ]),
    ];

    let card = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(card, area);
}
