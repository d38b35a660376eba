// UI rendering logic
use crate::{form_ui, list_ui, search_ui, App, InputMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search bar
            Constraint::Min(8),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    search_ui::render_search_bar(frame, app, chunks[1]);

    // Adaptive split: the form needs less room on wide screens
    let form_pct = if frame.area().width < 100 { 40 } else { 33 };
    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(form_pct),
            Constraint::Percentage(100 - form_pct),
        ])
        .split(chunks[2]);

    form_ui::render_add_form(frame, app, content[0]);

    // Error banner sits above the list and never replaces it
    let list_area = if let Some(message) = app.controller.state().error_message() {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(content[1]);

        let banner = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
        frame.render_widget(banner, parts[0]);
        parts[1]
    } else {
        content[1]
    };

    list_ui::render_item_list(frame, app, list_area);

    render_status_bar(frame, app, chunks[3]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.controller.state();
    let filters = app.controller.filters();

    let mut spans = vec![Span::styled(
        "🎁 My Wishlist",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    if !filters.is_unconstrained() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            " filtered ",
            Style::default().fg(Color::Black).bg(Color::Magenta),
        ));
    }

    if !state.loading {
        spans.push(Span::styled(
            format!("  {} items", state.items.len()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = match app.input_mode {
        InputMode::Searching => Span::styled(
            "SEARCH | Type to filter by name | ENTER/ESC: done",
            Style::default().fg(Color::Yellow),
        ),
        InputMode::Category => Span::styled(
            "CATEGORY | Type to filter by category | ENTER/ESC: done",
            Style::default().fg(Color::Yellow),
        ),
        InputMode::Adding => Span::styled(
            "ADD ITEM | TAB/arrows: field | ENTER: submit | ESC: close",
            Style::default().fg(Color::Green),
        ),
        InputMode::Normal => Span::raw(
            "j/k: navigate | t/SPACE: toggle downloaded | d: delete | a: add | /: search | c: category | D: status | x: reset | r: refresh | q: quit",
        ),
    };

    frame.render_widget(Paragraph::new(Line::from(status)), area);
}
