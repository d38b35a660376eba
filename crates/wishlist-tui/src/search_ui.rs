use crate::{App, InputMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use wishlist_api::DownloadedFilter;

/// Render the search bar: free text, category and download status
pub fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    let filters = app.controller.filters();

    render_text_filter(
        frame,
        chunks[0],
        "🔍 Search (/)",
        &filters.search_term,
        "Search items...",
        app.input_mode == InputMode::Searching,
    );
    render_text_filter(
        frame,
        chunks[1],
        "📂 Category (c)",
        &filters.category,
        "Filter by category",
        app.input_mode == InputMode::Category,
    );

    let status_style = match filters.downloaded {
        DownloadedFilter::Any => Style::default(),
        DownloadedFilter::Downloaded => Style::default().fg(Color::Green),
        DownloadedFilter::NotDownloaded => Style::default().fg(Color::Yellow),
    };
    let status = Paragraph::new(filters.downloaded.label())
        .style(status_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("⬇ Status (D) | x: reset"),
        );
    frame.render_widget(status, chunks[2]);
}

fn render_text_filter(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    placeholder: &str,
    active: bool,
) {
    let style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let paragraph = if value.is_empty() && !active {
        Paragraph::new(placeholder.to_string()).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(value.to_string()).style(style)
    };

    frame.render_widget(
        paragraph.block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(style),
        ),
        area,
    );

    // Show cursor while typing
    if active {
        frame.set_cursor_position((
            area.x + value.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }
}
