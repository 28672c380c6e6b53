// UI module for rendering the TUI.
// Tab bar, the two story surfaces, the console log, status bar, and help.

mod board;
mod feed;
mod tabs;

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::app::{App, ConsoleLevel, Tab};
use crate::state::Theme;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);
    draw_content(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame, app);
    }
}

/// Draw the main content area based on active tab.
fn draw_content(frame: &mut Frame, app: &mut App, area: Rect) {
    match app.active_tab {
        Tab::Feed => feed::draw(frame, app, area),
        Tab::Board => board::draw(frame, app, area),
        Tab::Console => draw_console_tab(frame, app, area),
    }
}

/// Draw the Console tab with the activity log.
fn draw_console_tab(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim()))
        .title(" Console ");

    if app.console_messages.is_empty() {
        let text = Paragraph::new("No messages")
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.dim()))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let items: Vec<ListItem> = app
        .console_messages
        .iter()
        .map(|msg| {
            let (icon, color) = match msg.level {
                ConsoleLevel::Error => ("❌", Color::Red),
                ConsoleLevel::Warn => ("⚠️", Color::Yellow),
                ConsoleLevel::Info => ("ℹ️", theme.accent()),
            };

            let time = format_relative_time(&msg.timestamp);

            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", icon)),
                Span::styled(time, Style::default().fg(theme.dim())),
                Span::raw(" "),
                Span::styled(msg.message.clone(), Style::default().fg(color)),
            ]))
        })
        .collect();

    let list_widget = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(theme.highlight_bg())
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list_widget, area, &mut app.console_list_state);
}

/// Draw the status bar with keybinding hints and feed info.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(app.theme.dim());
    let mut spans = vec![
        Span::raw(" ↑↓ "),
        Span::styled("Navigate", dim),
        Span::raw("  ↵ "),
        Span::styled("Open", dim),
        Span::raw("  / "),
        Span::styled("Search", dim),
        Span::raw("  s "),
        Span::styled("Sort", dim),
        Span::raw("  r "),
        Span::styled("Refresh", dim),
        Span::raw("  t "),
        Span::styled("Theme", dim),
        Span::raw("  ? "),
        Span::styled("Help", dim),
        Span::raw("  q "),
        Span::styled("Quit", dim),
    ];

    if let Some(panel) = app.active_panel() {
        spans.push(Span::styled(
            format!("  {} stories", panel.visible().len()),
            dim,
        ));
        spans.push(Span::styled(format!("  sort: {}", panel.sort.label()), dim));
        spans.push(Span::styled(format!("  theme: {}", app.theme.label()), dim));
        if let Some(loaded_at) = panel.loaded_at {
            spans.push(Span::styled(
                format!("  updated {}", format_relative_time(&loaded_at)),
                dim,
            ));
        }
    }

    if app.is_busy() {
        spans.push(Span::styled(
            "  ⟳ fetching…",
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame, app: &App) {
    let theme = app.theme;
    let area = frame.area();

    let popup_width = 44u16.min(area.width);
    let popup_height = 15u16.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = Style::default().fg(theme.accent());
    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ↑/↓ or j/k  ", key),
            Span::raw("Navigate stories"),
        ]),
        Line::from(vec![
            Span::styled("  Enter or o  ", key),
            Span::raw("Open in browser"),
        ]),
        Line::from(vec![
            Span::styled("  /           ", key),
            Span::raw("Search title/author"),
        ]),
        Line::from(vec![
            Span::styled("  s           ", key),
            Span::raw("Cycle sort order"),
        ]),
        Line::from(vec![
            Span::styled("  r           ", key),
            Span::raw("Refresh stories"),
        ]),
        Line::from(vec![
            Span::styled("  t           ", key),
            Span::raw("Toggle light/dark"),
        ]),
        Line::from(vec![
            Span::styled("  Tab         ", key),
            Span::raw("Switch tabs"),
        ]),
        Line::from(vec![
            Span::styled("  ?           ", key),
            Span::raw("Show/hide this help"),
        ]),
        Line::from(vec![Span::styled("  q           ", key), Span::raw("Quit")]),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or ? to close",
            Style::default().fg(theme.dim()),
        )),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent()))
                .title(" Help "),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}

/// Format a timestamp as relative time (e.g., "2h ago").
pub(crate) fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Render a loading indicator.
pub(crate) fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an error message replacing the content area.
pub(crate) fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let text = Paragraph::new(format!("❌ {}", error))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red));
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub(crate) fn render_empty(frame: &mut Frame, area: Rect, theme: Theme, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.dim()));
    frame.render_widget(text, area);
}

/// Render the search input line.
pub(crate) fn render_search_line(frame: &mut Frame, query: &str, theme: Theme, area: Rect) {
    let line = Line::from(vec![
        Span::styled("/", Style::default().fg(Color::Yellow)),
        Span::raw(query.to_string()),
        Span::styled("█", Style::default().fg(Color::Yellow)),
    ]);
    let widget = Paragraph::new(line).style(Style::default().bg(theme.highlight_bg()));
    frame.render_widget(widget, area);
}
